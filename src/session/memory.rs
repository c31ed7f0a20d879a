//! In-memory session store

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

use super::{Session, SessionStore};
use crate::domain::User;
use crate::infrastructure::crypto::generate_token;

/// Sessions indexed by token, each valid for a fixed TTL from issue.
pub struct InMemorySessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn issue(&self, user: &User) -> String {
        let token = generate_token();
        let now = Utc::now();
        let session = Session {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            issued_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions.insert(token.clone(), session);
        debug!(user_id = user.id, "Session issued");
        token
    }

    async fn lookup(&self, token: &str) -> Option<Session> {
        // Clone out before removing; holding the shard guard across remove deadlocks.
        let session = self.sessions.get(token).map(|entry| entry.value().clone())?;

        if session.is_expired_at(Utc::now()) {
            self.sessions.remove(token);
            debug!(user_id = session.user_id, "Session expired");
            return None;
        }

        Some(session)
    }

    async fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    async fn revoke_user(&self, user_id: i32) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.user_id != user_id);
        before.saturating_sub(self.sessions.len())
    }

    async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired_at(now));
        before.saturating_sub(self.sessions.len())
    }
}
