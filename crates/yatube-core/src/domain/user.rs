use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Longest username accepted at signup.
pub const USERNAME_MAX_LEN: usize = 150;

/// User entity - the author of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

/// A user that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

impl NewUser {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            date_joined: Utc::now(),
        }
    }
}

impl User {
    /// Usernames are 1..=150 characters of letters, digits and `@.+-_`.
    pub fn validate_username(username: &str) -> Result<(), DomainError> {
        if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "Username must be between 1 and {USERNAME_MAX_LEN} characters"
            )));
        }
        let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
        if !username.chars().all(allowed) {
            return Err(DomainError::Validation(
                "Username may contain only letters, numbers, and @/./+/-/_ characters".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(User::validate_username("TolikVihodnoi").is_ok());
        assert!(User::validate_username("user.name+tag@host-1_x").is_ok());
        assert!(User::validate_username("").is_err());
        assert!(User::validate_username("with space").is_err());
        assert!(User::validate_username(&"a".repeat(151)).is_err());
    }
}
