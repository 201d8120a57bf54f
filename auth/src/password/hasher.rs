use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Prefixes used by the bcrypt family in modular crypt format.
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// One-way salted password hashing.
///
/// New hashes are Argon2id in PHC string format. Verification additionally
/// understands bcrypt hashes carried over from imported accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// A fresh random salt is generated for every call, so hashing the same
    /// password twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Fails closed: an empty, malformed or unsupported hash returns `false`.
    /// The underlying comparison is constant-time for both algorithms.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix)) {
            return bcrypt::verify(password, hash).unwrap_or(false);
        }

        match PasswordHash::new(hash) {
            Ok(parsed_hash) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Whether a stored hash was produced by an algorithm other than the one
    /// used for new hashes.
    pub fn is_legacy(&self, hash: &str) -> bool {
        !hash.starts_with("$argon2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same_password").expect("Failed to hash password");
        let second = hasher.hash("same_password").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("same_password", &first));
        assert!(hasher.verify("same_password", &second));
    }

    #[test]
    fn test_verify_malformed_hash_fails_closed() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$garbage"));
        assert!(!hasher.verify("password", "$2b$10$tooshort"));
    }

    #[test]
    fn test_verify_legacy_bcrypt_hash() {
        let hasher = PasswordHasher::new();
        let legacy = bcrypt::hash("imported_password", 10).expect("Failed to hash with bcrypt");

        assert!(hasher.is_legacy(&legacy));
        assert!(hasher.verify("imported_password", &legacy));
        assert!(!hasher.verify("other_password", &legacy));
    }
}
