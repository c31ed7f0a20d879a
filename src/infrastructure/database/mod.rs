pub mod entities;
pub mod migrator;
pub mod repositories;
pub mod seed;

#[cfg(test)]
pub(crate) mod test_support;

pub use seed::{DefaultAccounts, SeedAccount};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::infrastructure::crypto::PasswordHasher;
use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./autoservice.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./autoservice.db?mode=rwc";

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }

    /// Private in-memory database. Pinned to one pooled connection because
    /// every SQLite memory connection is its own database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Create the schema if needed and insert default data into empty tables.
/// Safe to call on every start.
pub async fn initialize(
    db: &DatabaseConnection,
    accounts: &DefaultAccounts,
    hasher: &PasswordHasher,
) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("📦 Database migrations applied");
    seed::seed_defaults(db, accounts, hasher).await
}
