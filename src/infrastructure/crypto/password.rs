//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// bcrypt hasher with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Out-of-range costs are clamped to what bcrypt accepts.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password using bcrypt
    pub fn hash(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        hash(password, self.cost)
    }

    /// Verify a password against a hash. A malformed hash counts as a mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = PasswordHasher::new(MIN_COST);
        let hashed = hasher.hash("admin123").unwrap();

        assert_ne!(hashed, "admin123");
        assert!(hasher.verify("admin123", &hashed));
        assert!(!hasher.verify("admin124", &hashed));
    }

    #[test]
    fn same_password_gets_different_salts() {
        let hasher = PasswordHasher::new(MIN_COST);
        let a = hasher.hash("secret1").unwrap();
        let b = hasher.hash("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!PasswordHasher::new(MIN_COST).verify("x", "not-a-bcrypt-hash"));
    }

    #[test]
    fn cost_is_clamped() {
        assert_eq!(PasswordHasher::new(1).cost(), MIN_COST);
        assert_eq!(PasswordHasher::new(99).cost(), MAX_COST);
    }
}
