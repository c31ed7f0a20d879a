//! The caller behind an authorized request

use crate::domain::{DomainError, DomainResult, UserRole};
use crate::session::Session;

/// Identity resolved from a live session token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn ensure_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden("Admin access required".into()))
        }
    }

    /// Passes for admins and for the user owning the resource.
    pub fn ensure_owner_or_admin(&self, owner_id: i32) -> DomainResult<()> {
        if self.is_admin() || self.user_id == owner_id {
            Ok(())
        } else {
            Err(DomainError::Forbidden("Access denied".into()))
        }
    }
}

impl From<Session> for AuthenticatedUser {
    fn from(session: Session) -> Self {
        Self {
            user_id: session.user_id,
            username: session.username,
            role: session.role,
        }
    }
}
