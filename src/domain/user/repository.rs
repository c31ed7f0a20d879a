use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{NewUser, UpdateUserDto, User, UserCredentials};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the username or email is taken.
    async fn create(&self, user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn list(&self) -> DomainResult<Vec<User>>;
    async fn list_active_ids(&self) -> DomainResult<Vec<i32>>;

    /// Looks the identifier up as a username first, then as an email.
    async fn find_credentials(&self, identifier: &str) -> DomainResult<Option<UserCredentials>>;
    async fn find_credentials_by_id(&self, id: i32) -> DomainResult<Option<UserCredentials>>;

    async fn update(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>>;
    async fn touch_last_login(&self, id: i32, at: DateTime<Utc>) -> DomainResult<()>;
    async fn update_password(&self, id: i32, password_hash: &str) -> DomainResult<bool>;

    /// Stores a reset token for the account with this email. Returns false
    /// when no such account exists.
    async fn set_reset_token(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<bool>;
    /// Returns the user id owning `token` if it has not expired at `now`.
    async fn find_by_reset_token(&self, token: &str, now: DateTime<Utc>) -> DomainResult<Option<i32>>;
    async fn clear_reset_token(&self, id: i32) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<bool>;
    async fn search(&self, query: &str) -> DomainResult<Vec<User>>;
}
