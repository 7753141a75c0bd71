use async_trait::async_trait;

use crate::domain::{
    error::ProfileWriteError,
    models::{identity::IdentityId, profile::Profile},
};

/// Key-value store for profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Upsert the profile under `id`. Writing the same pair twice leaves the same state.
    async fn write(&self, id: &IdentityId, profile: &Profile) -> Result<(), ProfileWriteError>;
}
