//! Password hashing using Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher as _, SaltString},
    Algorithm, Argon2, Params, Version,
};
use shaku::Component;
use std::sync::Arc;
use tracing::debug;
use userhub_core::{HubError, HubResult, Interface};

/// Interface for password hashing operations.
pub trait PasswordHasherInterface: Interface + Send + Sync {
    /// Hashes a plaintext password into a PHC string.
    fn hash(&self, password: &str) -> HubResult<String>;
}

/// Argon2id password hasher.
#[derive(Component, Clone)]
#[shaku(interface = PasswordHasherInterface)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Creates a new password hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a new password hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Arc::new(Argon2::new(Algorithm::Argon2id, Version::V0x13, params)),
        }
    }

    /// Creates a password hasher with the given time cost (iterations).
    ///
    /// Falls back to the default parameters when the cost is rejected.
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        let params = Params::new(Params::DEFAULT_M_COST, cost.max(1), Params::DEFAULT_P_COST, None)
            .unwrap_or(Params::DEFAULT);
        Self::with_params(params)
    }

    /// Returns the internal Argon2 instance, used as a shaku component parameter.
    #[must_use]
    pub fn argon2_arc(&self) -> Arc<Argon2<'static>> {
        Arc::clone(&self.argon2)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherInterface for PasswordHasher {
    fn hash(&self, password: &str) -> HubResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HubError::PasswordHash(format!("Failed to hash password: {e}")))?;

        debug!("Password hashed");
        Ok(hash.to_string())
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    fn matches(password: &str, hash: &str) -> bool {
        let parsed = PasswordHash::new(hash).unwrap();
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    #[test]
    fn test_hash_is_argon2id_phc_string() {
        let hasher = PasswordHasher::with_cost(1);
        let hash = hasher.hash("MySecurePassword123!").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(matches("MySecurePassword123!", &hash));
        assert!(!matches("wrong-password", &hash));
    }

    #[test]
    fn test_hash_never_equals_plaintext() {
        let hasher = PasswordHasher::with_cost(1);
        let hash = hasher.hash("plaintext").unwrap();
        assert_ne!(hash, "plaintext");
        assert!(!hash.contains("plaintext"));
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::with_cost(1);
        let hash1 = hasher.hash("TestPassword123!").unwrap();
        let hash2 = hasher.hash("TestPassword123!").unwrap();

        assert_ne!(hash1, hash2);
        assert!(matches("TestPassword123!", &hash1));
        assert!(matches("TestPassword123!", &hash2));
    }

    #[test]
    fn test_cost_is_recorded_in_hash() {
        let hash = PasswordHasher::with_cost(2).hash("pw").unwrap();
        assert!(hash.contains("t=2"));
    }

    #[test]
    fn test_zero_cost_is_clamped() {
        let hash = PasswordHasher::with_cost(0).hash("pw").unwrap();
        assert!(hash.contains("t=1"));
        assert!(matches("pw", &hash));
    }

    #[test]
    fn test_shared_argon2_instance() {
        let hasher = PasswordHasher::with_cost(1);
        let rebuilt = PasswordHasher {
            argon2: hasher.argon2_arc(),
        };
        let hash = rebuilt.hash("shared").unwrap();
        assert!(hash.contains("t=1"));
        assert!(matches("shared", &hash));
    }

    #[test]
    fn test_debug_does_not_leak_parameters() {
        let rendered = format!("{:?}", PasswordHasher::new());
        assert_eq!(rendered, "PasswordHasher { .. }");
    }
}
