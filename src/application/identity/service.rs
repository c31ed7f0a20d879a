//! Authentication service
//!
//! Login, registration, session authorization and password management.
//! HTTP handlers stay thin and delegate here.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use super::AuthenticatedUser;
use crate::application::services::non_blank;
use crate::domain::user::{NewUser, RegisterUser};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::{generate_token, PasswordHasher};
use crate::session::SessionStore;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const DEFAULT_RESET_TOKEN_TTL_HOURS: i64 = 24;

/// Returned after a successful login or registration
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    sessions: Arc<dyn SessionStore>,
    hasher: PasswordHasher,
    reset_token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        sessions: Arc<dyn SessionStore>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            repos,
            sessions,
            hasher,
            reset_token_ttl: Duration::hours(DEFAULT_RESET_TOKEN_TTL_HOURS),
        }
    }

    pub fn with_reset_token_ttl(mut self, ttl: Duration) -> Self {
        self.reset_token_ttl = ttl;
        self
    }

    // ── Credentials ─────────────────────────────────────────────

    /// Checks a username-or-email and password. Unknown identifiers, wrong
    /// passwords and inactive accounts all yield `None`. On success the
    /// last-login timestamp is updated.
    pub async fn verify_credentials(
        &self,
        identifier: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        let Some(credentials) = self.repos.users().find_credentials(identifier.trim()).await?
        else {
            return Ok(None);
        };

        if !self.hasher.verify(password, &credentials.password_hash) {
            return Ok(None);
        }
        if !credentials.user.is_active {
            warn!(user_id = credentials.user.id, "Login attempt on inactive account");
            return Ok(None);
        }

        let mut user = credentials.user;
        let now = Utc::now();
        self.repos.users().touch_last_login(user.id, now).await?;
        user.last_login_at = Some(now);
        Ok(Some(user))
    }

    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<AuthResult> {
        let user = self
            .verify_credentials(identifier, password)
            .await?
            .ok_or_else(|| DomainError::Unauthenticated("Invalid credentials".into()))?;

        let token = self.sessions.issue(&user).await;
        info!(user_id = user.id, username = %user.username, "User logged in");
        Ok(AuthResult { token, user })
    }

    // ── Registration ────────────────────────────────────────────

    /// Creates a regular user account.
    pub async fn register_user(&self, input: RegisterUser) -> DomainResult<User> {
        let username = input.username.trim().to_string();
        let email = input.email.trim().to_string();

        if username.len() < 3 || username.len() > 50 {
            return Err(DomainError::Validation(
                "Username must be 3-50 characters".into(),
            ));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        validate_password(&input.password)?;

        if self.repos.users().find_by_username(&username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if self.repos.users().find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let password_hash = self.hash(&input.password)?;
        let user = self
            .repos
            .users()
            .create(NewUser {
                username,
                email,
                password_hash,
                full_name: non_blank(input.full_name),
                phone: non_blank(input.phone),
                role: UserRole::User,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    /// Registers and immediately opens a session.
    pub async fn register(&self, input: RegisterUser) -> DomainResult<AuthResult> {
        let user = self.register_user(input).await?;
        let token = self.sessions.issue(&user).await;
        Ok(AuthResult { token, user })
    }

    // ── Sessions ────────────────────────────────────────────────

    /// Resolves a bearer token to its caller and checks the required role.
    pub async fn authorize(
        &self,
        token: Option<&str>,
        required: Option<UserRole>,
    ) -> DomainResult<AuthenticatedUser> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::Unauthenticated("Authentication required".into()))?;

        let session = self
            .sessions
            .lookup(token)
            .await
            .ok_or_else(|| DomainError::Unauthenticated("Invalid or expired token".into()))?;

        if let Some(required) = required {
            if !session.role.satisfies(required) {
                return Err(DomainError::Forbidden("Admin access required".into()));
            }
        }

        Ok(session.into())
    }

    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.revoke(token).await
    }

    pub async fn current_user(&self, principal: &AuthenticatedUser) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(principal.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", principal.user_id))
    }

    // ── Passwords ───────────────────────────────────────────────

    pub async fn change_password(
        &self,
        principal: &AuthenticatedUser,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        validate_password(new_password)?;

        let credentials = self
            .repos
            .users()
            .find_credentials_by_id(principal.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", principal.user_id))?;

        if !self.hasher.verify(current_password, &credentials.password_hash) {
            return Err(DomainError::Validation("Current password is incorrect".into()));
        }

        let hash = self.hash(new_password)?;
        self.repos.users().update_password(principal.user_id, &hash).await?;

        info!(user_id = principal.user_id, "Password changed");
        Ok(())
    }

    /// Stores a fresh reset token for the account and returns it. Delivery
    /// to the user happens outside this service.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<String> {
        let email = email.trim();
        let token = generate_token();
        let expires_at = Utc::now() + self.reset_token_ttl;

        let stored = self
            .repos
            .users()
            .set_reset_token(email, &token, expires_at)
            .await?;
        if !stored {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "email",
                value: email.to_string(),
            });
        }

        info!(email = %email, "Password reset requested");
        Ok(token)
    }

    /// Sets a new password if `token` is a live reset token. All sessions of
    /// the account are revoked.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<()> {
        validate_password(new_password)?;

        let user_id = self
            .repos
            .users()
            .find_by_reset_token(token, Utc::now())
            .await?
            .ok_or_else(|| DomainError::Validation("Invalid or expired reset token".into()))?;

        let hash = self.hash(new_password)?;
        self.repos.users().update_password(user_id, &hash).await?;
        self.repos.users().clear_reset_token(user_id).await?;
        let revoked = self.sessions.revoke_user(user_id).await;

        info!(user_id, revoked_sessions = revoked, "Password reset");
        Ok(())
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        self.hasher
            .hash(password)
            .map_err(|e| DomainError::Unavailable(format!("Password hashing failed: {}", e)))
    }
}

fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UpdateUserDto;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_support::{seeded_connection, test_hasher};
    use crate::session::InMemorySessionStore;

    async fn service() -> AuthService {
        let db = seeded_connection().await;
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
        let sessions: Arc<dyn SessionStore> =
            Arc::new(InMemorySessionStore::new(Duration::hours(1)));
        AuthService::new(repos, sessions, test_hasher())
    }

    fn bob() -> RegisterUser {
        RegisterUser {
            username: "bob".into(),
            email: "bob@example.com".into(),
            password: "secret1".into(),
            full_name: Some("Bob Builder".into()),
            phone: Some("  ".into()),
        }
    }

    #[tokio::test]
    async fn seeded_admin_can_log_in() {
        let auth = service().await;
        let result = auth.login("admin", "admin123").await.unwrap();

        assert_eq!(result.user.role, UserRole::Admin);
        assert!(result.user.last_login_at.is_some());

        let principal = auth
            .authorize(Some(&result.token), Some(UserRole::Admin))
            .await
            .unwrap();
        assert_eq!(principal.username, "admin");
    }

    #[tokio::test]
    async fn login_by_email_works() {
        let auth = service().await;
        assert!(auth.login("user@autoservis.com", "user123").await.is_ok());
    }

    #[tokio::test]
    async fn bad_credentials_are_rejected() {
        let auth = service().await;
        assert!(auth.verify_credentials("admin", "wrong").await.unwrap().is_none());
        assert!(auth.verify_credentials("ghost", "admin123").await.unwrap().is_none());
        assert!(matches!(
            auth.login("admin", "wrong").await,
            Err(DomainError::Unauthenticated(_))
        ));
    }

    #[tokio::test]
    async fn inactive_account_cannot_log_in() {
        let auth = service().await;
        let user = auth.register_user(bob()).await.unwrap();
        auth.repos
            .users()
            .update(
                user.id,
                UpdateUserDto {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(auth.verify_credentials("bob", "secret1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let auth = service().await;
        let user = auth.register_user(bob()).await.unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.phone, None);

        let same_name = auth.register_user(bob()).await.unwrap_err();
        assert!(matches!(same_name, DomainError::Conflict(_)));

        let mut same_email = bob();
        same_email.username = "robert".into();
        assert!(matches!(
            auth.register_user(same_email).await,
            Err(DomainError::Conflict(_))
        ));
        assert_eq!(auth.repos.users().list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn registration_validates_input() {
        let auth = service().await;

        let mut short = bob();
        short.password = "abc".into();
        assert!(matches!(
            auth.register_user(short).await,
            Err(DomainError::Validation(_))
        ));

        let mut no_at = bob();
        no_at.email = "bob.example.com".into();
        assert!(matches!(
            auth.register_user(no_at).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn authorize_checks_token_and_role() {
        let auth = service().await;
        let session = auth.register(bob()).await.unwrap();

        assert!(matches!(
            auth.authorize(None, None).await,
            Err(DomainError::Unauthenticated(_))
        ));
        assert!(matches!(
            auth.authorize(Some("bogus"), None).await,
            Err(DomainError::Unauthenticated(_))
        ));
        assert!(matches!(
            auth.authorize(Some(&session.token), Some(UserRole::Admin)).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(auth.authorize(Some(&session.token), None).await.is_ok());
    }

    #[tokio::test]
    async fn logout_revokes_token() {
        let auth = service().await;
        let session = auth.login("user", "user123").await.unwrap();

        assert!(auth.logout(&session.token).await);
        assert!(auth.authorize(Some(&session.token), None).await.is_err());
    }

    #[tokio::test]
    async fn change_password_requires_current_one() {
        let auth = service().await;
        let session = auth.login("user", "user123").await.unwrap();
        let principal = auth.authorize(Some(&session.token), None).await.unwrap();

        assert!(matches!(
            auth.change_password(&principal, "nope", "newpass1").await,
            Err(DomainError::Validation(_))
        ));

        auth.change_password(&principal, "user123", "newpass1")
            .await
            .unwrap();
        assert!(auth.login("user", "user123").await.is_err());
        assert!(auth.login("user", "newpass1").await.is_ok());
    }

    #[tokio::test]
    async fn password_reset_flow() {
        let auth = service().await;
        let session = auth.login("user", "user123").await.unwrap();

        let token = auth
            .request_password_reset("user@autoservis.com")
            .await
            .unwrap();
        auth.reset_password(&token, "fresh-pass").await.unwrap();

        assert!(auth.login("user", "fresh-pass").await.is_ok());
        assert!(auth.authorize(Some(&session.token), None).await.is_err());

        // Tokens are single use.
        assert!(matches!(
            auth.reset_password(&token, "another-pass").await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn password_reset_for_unknown_email_is_not_found() {
        let auth = service().await;
        assert!(matches!(
            auth.request_password_reset("nobody@example.com").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn expired_reset_token_is_rejected() {
        let auth = service().await.with_reset_token_ttl(Duration::seconds(-1));
        let token = auth
            .request_password_reset("user@autoservis.com")
            .await
            .unwrap();

        assert!(auth.reset_password(&token, "fresh-pass").await.is_err());
    }
}
