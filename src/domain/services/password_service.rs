use crate::domain::{error::IdentityCreationError, models::credential::HashedPassword};

/// Service for hashing passwords under a minimum-strength policy
pub trait PasswordHasher: Clone + Send + Sync {
    /// Hash a plain text password, rejecting it if it is too weak
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, IdentityCreationError>;
}
