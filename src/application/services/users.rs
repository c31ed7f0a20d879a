//! User administration

use std::sync::Arc;

use tracing::info;

use crate::application::identity::AuthenticatedUser;
use crate::domain::user::UpdateUserDto;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, User, UserRole};
use crate::session::SessionStore;

pub struct UserAdminService {
    repos: Arc<dyn RepositoryProvider>,
    sessions: Arc<dyn SessionStore>,
}

impl UserAdminService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { repos, sessions }
    }

    pub async fn list(&self, principal: &AuthenticatedUser) -> DomainResult<Vec<User>> {
        principal.ensure_admin()?;
        self.repos.users().list().await
    }

    pub async fn get(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<User> {
        principal.ensure_admin()?;
        self.find(id).await
    }

    /// Role or activation changes end the user's open sessions, since
    /// sessions carry the role they were issued with.
    pub async fn update(
        &self,
        principal: &AuthenticatedUser,
        id: i32,
        mut dto: UpdateUserDto,
    ) -> DomainResult<User> {
        principal.ensure_admin()?;

        if id == principal.user_id
            && (dto.is_active == Some(false) || dto.role == Some(UserRole::User))
        {
            return Err(DomainError::Forbidden(
                "You cannot demote or deactivate your own account".into(),
            ));
        }
        if let Some(email) = dto.email.as_deref() {
            let email = email.trim();
            if !email.contains('@') {
                return Err(DomainError::Validation("Invalid email address".into()));
            }
            dto.email = Some(email.to_string());
        }
        dto.full_name = dto.full_name.map(|v| v.trim().to_string());
        dto.phone = dto.phone.map(|v| v.trim().to_string());

        let before = self.find(id).await?;
        let access_changed = dto.role.is_some_and(|r| r != before.role)
            || dto.is_active.is_some_and(|a| a != before.is_active);

        let updated = self
            .repos
            .users()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        if access_changed {
            let revoked = self.sessions.revoke_user(id).await;
            info!(
                user_id = id,
                role = %updated.role,
                active = updated.is_active,
                revoked_sessions = revoked,
                "User access changed"
            );
        }
        Ok(updated)
    }

    /// Deletes the account along with its vehicles, appointments and
    /// notifications.
    pub async fn delete(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        principal.ensure_admin()?;
        if id == principal.user_id {
            return Err(DomainError::Forbidden(
                "You cannot delete your own account".into(),
            ));
        }

        if !self.repos.users().delete(id).await? {
            return Err(DomainError::not_found("User", id));
        }
        self.sessions.revoke_user(id).await;
        info!(user_id = id, by = principal.user_id, "User deleted");
        Ok(())
    }

    async fn find(&self, id: i32) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::application::services::testing::fixture;
    use crate::session::InMemorySessionStore;

    #[tokio::test]
    async fn deactivation_ends_sessions() {
        let f = fixture().await;
        let sessions: Arc<dyn SessionStore> =
            Arc::new(InMemorySessionStore::new(Duration::hours(1)));
        let alice = f.repos.users().find_by_id(f.alice.user_id).await.unwrap().unwrap();
        let token = sessions.issue(&alice).await;

        let users = UserAdminService::new(f.repos.clone(), sessions.clone());
        let updated = users
            .update(
                &f.admin,
                alice.id,
                UpdateUserDto {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!updated.is_active);
        assert!(sessions.lookup(&token).await.is_none());
    }

    #[tokio::test]
    async fn profile_edit_keeps_sessions() {
        let f = fixture().await;
        let sessions: Arc<dyn SessionStore> =
            Arc::new(InMemorySessionStore::new(Duration::hours(1)));
        let alice = f.repos.users().find_by_id(f.alice.user_id).await.unwrap().unwrap();
        let token = sessions.issue(&alice).await;

        let users = UserAdminService::new(f.repos.clone(), sessions.clone());
        let updated = users
            .update(
                &f.admin,
                alice.id,
                UpdateUserDto {
                    full_name: Some(" Alice Smith ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.full_name.as_deref(), Some("Alice Smith"));
        assert!(sessions.lookup(&token).await.is_some());
    }

    #[tokio::test]
    async fn admin_cannot_lock_themselves_out() {
        let f = fixture().await;
        let sessions: Arc<dyn SessionStore> =
            Arc::new(InMemorySessionStore::new(Duration::hours(1)));
        let users = UserAdminService::new(f.repos.clone(), sessions);

        let demote = UpdateUserDto {
            role: Some(UserRole::User),
            ..Default::default()
        };
        let deactivate = UpdateUserDto {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(matches!(
            users.update(&f.admin, f.admin.user_id, demote).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            users.update(&f.admin, f.admin.user_id, deactivate).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            users.delete(&f.admin, f.admin.user_id).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn delete_and_access_rules() {
        let f = fixture().await;
        let sessions: Arc<dyn SessionStore> =
            Arc::new(InMemorySessionStore::new(Duration::hours(1)));
        let users = UserAdminService::new(f.repos.clone(), sessions);

        assert!(matches!(
            users.list(&f.alice).await,
            Err(DomainError::Forbidden(_))
        ));

        users.delete(&f.admin, f.mallory.user_id).await.unwrap();
        assert!(matches!(
            users.get(&f.admin, f.mallory.user_id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(users.list(&f.admin).await.unwrap().len(), 3);
    }
}
