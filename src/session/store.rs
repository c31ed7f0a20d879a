//! Session abstraction

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{User, UserRole};

/// An authenticated login, identified by its bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: i32,
    pub username: String,
    pub role: UserRole,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Bearer-token session storage.
///
/// The in-memory implementation loses every session on restart; a durable
/// backend only has to implement this trait.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a session for `user` and returns its token.
    async fn issue(&self, user: &User) -> String;

    /// Returns the live session for `token`. Expired sessions are dropped and
    /// reported as missing.
    async fn lookup(&self, token: &str) -> Option<Session>;

    /// Returns false if the token was unknown.
    async fn revoke(&self, token: &str) -> bool;

    /// Drops every session of one user, returning how many were removed.
    async fn revoke_user(&self, user_id: i32) -> usize;

    /// Removes expired sessions, returning how many were removed.
    async fn purge_expired(&self) -> usize;
}
