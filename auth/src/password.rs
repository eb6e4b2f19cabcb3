use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is not a valid PHC string: {0}")]
    InvalidHash(String),
}

/// Argon2id password hasher.
///
/// Hashing embeds a fresh random salt and the cost parameters into the PHC
/// output string, so `verify` needs nothing beyond the stored hash.
/// Comparison happens inside the argon2 crate in constant time.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a plaintext password for storage.
    ///
    /// Deliberately slow; callers on an async runtime should run this on a
    /// blocking thread.
    ///
    /// # Errors
    /// * `HashingFailed` - the hashing operation itself failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// A wrong password is `Ok(false)`, never an error; only an undecodable
    /// stored hash produces `Err`.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_round_trip() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("correct horse battery").expect("hash failed");

        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("correct horse battery", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_is_false_not_error() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("pw1").expect("hash failed");

        assert!(!hasher.verify("pw2", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new();
        let first = hasher.hash("same password").unwrap();
        let second = hasher.hash("same password").unwrap();

        // Fresh salt per call, so identical inputs never collide.
        assert_ne!(first, second);
    }

    #[test]
    fn test_garbage_stored_hash_is_an_error() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }
}
