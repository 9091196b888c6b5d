//! Argon2 password hashing for account passwords.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use yatube_core::ports::{AuthError, PasswordService};

/// Argon2-based password service.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    /// A stored hash that cannot be parsed never matches.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        match PasswordHash::new(hash) {
            Ok(parsed) => Ok(self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not a PHC string");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(service.verify("correct horse", &hash).unwrap());
        assert!(!service.verify("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        let service = Argon2PasswordService::new();
        assert!(!service.verify("password", "not-a-phc-string").unwrap());
    }
}
