//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod appointment_repository;
pub mod notification_repository;
pub mod repository_provider;
pub mod service_repository;
pub mod setting_repository;
pub mod user_repository;
pub mod vehicle_repository;
pub mod vehicle_type_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::sea_query::LikeExpr;
use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

pub const USER_SEARCH_LIMIT: u64 = 50;
pub const SERVICE_SEARCH_LIMIT: u64 = 50;
pub const VEHICLE_SEARCH_LIMIT: u64 = 50;
pub const APPOINTMENT_SEARCH_LIMIT: u64 = 100;

/// `%query%` with the LIKE wildcards in `query` matched literally.
fn contains_pattern(query: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape('\\')
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Unavailable(format!("Database error: {}", e))
}

/// Like [`db_err`], but constraint violations become `Conflict` with the
/// given message.
fn write_err(e: DbErr, conflict: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_))
        | Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            DomainError::Conflict(conflict.to_string())
        }
        _ => db_err(e),
    }
}
