use argon2::{
    Argon2,
    password_hash::{PasswordHasher as Argon2Hasher, SaltString, rand_core::OsRng},
};

use crate::domain::{
    error::IdentityCreationError, models::credential::HashedPassword,
    services::password_service::PasswordHasher,
};

/// minimum length enforced by the original credential provider
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone)]
pub struct Argon2PasswordHasher {
    min_length: usize,
}

impl Argon2PasswordHasher {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PASSWORD_LENGTH)
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, IdentityCreationError> {
        // Validate password strength
        if plain_password.chars().count() < self.min_length {
            return Err(IdentityCreationError::WeakPassword {
                min_length: self.min_length,
            });
        }

        let salt = SaltString::generate(OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(plain_password.as_bytes(), &salt)
            .map_err(|e| IdentityCreationError::Unknown(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(HashedPassword::new(hash))
    }
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("12345")]
    fn test_short_password_is_weak(#[case] password: &str) {
        let err = Argon2PasswordHasher::default().hash(password).unwrap_err();
        assert_eq!(err, IdentityCreationError::WeakPassword { min_length: 6 });
    }

    #[test]
    fn test_min_length_is_configurable() {
        let hasher = Argon2PasswordHasher::new(10);
        assert!(hasher.hash("123456789").is_err());
        assert!(hasher.hash("1234567890").is_ok());
    }

    #[test]
    fn test_hash_verifies_against_plain_password() {
        let hashed = Argon2PasswordHasher::default().hash("secret123").unwrap();
        assert_ne!(hashed.as_str(), "secret123");

        let parsed = PasswordHash::new(hashed.as_str()).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"secret123", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong-password", &parsed)
                .is_err()
        );
    }
}
