use async_trait::async_trait;

use crate::domain::{
    error::IdentityCreationError,
    models::{identity::CredentialReceipt, profile::EmailAddress},
};

/// Capability that creates authentication credentials.
/// Email uniqueness is enforced here, not by the caller.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_credential(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<CredentialReceipt, IdentityCreationError>;
}
