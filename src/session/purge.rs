//! Background eviction of expired sessions

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::SessionStore;
use crate::infrastructure::server::ShutdownSignal;

/// Calls `purge_expired` every `interval` until `shutdown` fires.
pub fn spawn_session_purger(
    store: Arc<dyn SessionStore>,
    interval: Duration,
    shutdown: ShutdownSignal,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let purged = store.purge_expired().await;
                    if purged > 0 {
                        debug!(purged, "Expired sessions removed");
                    }
                }
                _ = shutdown.wait() => {
                    info!("Session purger stopped");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_support::seeded_connection;
    use crate::domain::RepositoryProvider;
    use crate::session::InMemorySessionStore;

    #[tokio::test]
    async fn purges_until_shutdown() {
        let repos = SeaOrmRepositoryProvider::new(seeded_connection().await);
        let admin = repos
            .users()
            .find_by_username("admin")
            .await
            .unwrap()
            .unwrap();

        let store = Arc::new(InMemorySessionStore::new(chrono::Duration::zero()));
        store.issue(&admin).await;
        assert_eq!(store.len(), 1);

        let shutdown = ShutdownSignal::new();
        let handle = spawn_session_purger(store.clone(), Duration::from_millis(10), shutdown.clone());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.is_empty());

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
