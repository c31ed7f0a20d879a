//! User domain entity

use chrono::{DateTime, Utc};

/// Account role. Admins pass every role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Whether a holder of this role may access something that requires `required`.
    pub fn satisfies(&self, required: UserRole) -> bool {
        match required {
            UserRole::User => true,
            UserRole::Admin => *self == UserRole::Admin,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account. The password hash lives in [`UserCredentials`] and
/// never travels with this type.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// A user together with the stored password hash, only handed out to the
/// authentication service.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole) -> User {
        User {
            id: 1,
            username: "marko".into(),
            email: "marko@example.com".into(),
            full_name: None,
            phone: None,
            role,
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn role_round_trips_through_text() {
        for role in [UserRole::User, UserRole::Admin] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse(" ADMIN "), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("mechanic"), None);
    }

    #[test]
    fn admin_satisfies_every_requirement() {
        assert!(UserRole::Admin.satisfies(UserRole::User));
        assert!(UserRole::Admin.satisfies(UserRole::Admin));
        assert!(UserRole::User.satisfies(UserRole::User));
        assert!(!UserRole::User.satisfies(UserRole::Admin));
    }

    #[test]
    fn display_name_prefers_full_name() {
        let mut user = sample_user(UserRole::User);
        assert_eq!(user.display_name(), "marko");
        user.full_name = Some("Marko Marković".into());
        assert_eq!(user.display_name(), "Marko Marković");
        assert!(!user.is_admin());
    }
}
