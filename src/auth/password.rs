//! Password hashing
//!
//! Argon2id salted hashing and verification for stored credentials.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::config::HashingConfig;
use crate::error::StoreError;

/// Hashes new passwords with the configured cost and verifies stored ones.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    /// Real hash of a throwaway secret, used to burn the same time on unknown users
    decoy_hash: String,
}

impl CredentialHasher {
    pub fn new(config: &HashingConfig) -> Result<Self, StoreError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| StoreError::Hash(format!("Invalid Argon2 parameters: {e}")))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let decoy_hash = hash_with(&argon2, "rax-auth-decoy-credential")?;

        Ok(Self { argon2, decoy_hash })
    }

    /// Produces a PHC-format hash string with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, StoreError> {
        hash_with(&self.argon2, password)
    }

    /// Checks a plaintext password against a stored PHC hash.
    ///
    /// Returns `Ok(false)` on mismatch and `Err` only if the stored hash
    /// cannot be parsed.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, StoreError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| StoreError::Hash(format!("Invalid password hash format: {e}")))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Runs a verification whose result is discarded.
    pub fn verify_decoy(&self, password: &str) {
        let _ = self.verify(password, &self.decoy_hash);
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Hash(e.to_string()))
}

#[cfg(test)]
pub(crate) fn test_hasher() -> CredentialHasher {
    // Cheap parameters; never use outside tests
    CredentialHasher::new(&HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("valid Argon2 params for tests")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = test_hasher();
        let hash = hasher.hash("secret1").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("secret1"));
        assert!(hasher.verify("secret1", &hash).unwrap());
        assert!(!hasher.verify("secret1x", &hash).unwrap());
        assert!(!hasher.verify("Secret1", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = test_hasher();
        let a = hasher.hash("secret1").unwrap();
        let b = hasher.hash("secret1").unwrap();

        assert_ne!(a, b);
        assert!(hasher.verify("secret1", &a).unwrap());
        assert!(hasher.verify("secret1", &b).unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let hasher = test_hasher();
        assert!(matches!(
            hasher.verify("secret1", "plaintext-password"),
            Err(StoreError::Hash(_))
        ));
    }

    #[test]
    fn test_invalid_params_are_reported() {
        let result = CredentialHasher::new(&HashingConfig {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
        });
        assert!(result.is_err());
    }
}
