use tracing::{debug, error, info, warn};

use crate::domain::{
    models::{
        identity::IdentityId,
        profile::{DisplayName, EmailAddress, Profile},
        registration::RegistrationResult,
    },
    repositories::{identity_provider::IdentityProvider, profile_store::ProfileStore},
};

/// Orchestrates identity creation followed by the profile write.
///
/// Nothing is retried here. Every failure comes back tagged with the
/// step that failed and the orphaned identity id, if one was left behind.
pub struct RegistrationCoordinator<I: IdentityProvider, S: ProfileStore> {
    identity_provider: I,
    profile_store: S,
}

impl<I: IdentityProvider, S: ProfileStore> RegistrationCoordinator<I, S> {
    pub fn new(identity_provider: I, profile_store: S) -> Self {
        Self {
            identity_provider,
            profile_store,
        }
    }

    #[tracing::instrument(name = "register", skip_all, fields(email = %email))]
    pub async fn register(&self, name: String, email: String, password: String) -> RegistrationResult {
        // validate locally before touching either collaborator
        let (name, email) = match validate_profile_input(&name, &email) {
            Ok(input) => input,
            Err(result) => return result,
        };

        let receipt = match self
            .identity_provider
            .create_credential(&email, &password)
            .await
        {
            Ok(receipt) => receipt,
            Err(err) => {
                warn!(error = %err, "identity creation failed");
                return RegistrationResult::identity_failed(err);
            }
        };

        let Some(identity) = receipt.into_identity(email) else {
            error!("identity provider reported success without a usable id");
            return RegistrationResult::invariant_violation();
        };

        let profile = Profile::new(name, identity.email().clone());
        self.write_profile(identity.id().clone(), &profile).await
    }

    /// Write only the profile for an identity that already exists.
    /// Used to repair an orphan identity left by a failed `register`.
    #[tracing::instrument(name = "complete_profile", skip_all, fields(id = %id))]
    pub async fn complete_profile(&self, id: String, name: String, email: String) -> RegistrationResult {
        let id = match IdentityId::new(id) {
            Ok(id) => id,
            Err(err) => {
                debug!(error = %err, "rejected identity id");
                return RegistrationResult::ValidationError(err);
            }
        };
        let (name, email) = match validate_profile_input(&name, &email) {
            Ok(input) => input,
            Err(result) => return result,
        };

        self.write_profile(id, &Profile::new(name, email)).await
    }

    async fn write_profile(&self, id: IdentityId, profile: &Profile) -> RegistrationResult {
        match self.profile_store.write(&id, profile).await {
            Ok(()) => {
                info!(id = %id, "registration complete");
                RegistrationResult::Success(id)
            }
            Err(err) => {
                error!(id = %id, error = %err, "profile write failed, identity has no profile");
                RegistrationResult::profile_write_failed(id, err)
            }
        }
    }
}

fn validate_profile_input(
    name: &str,
    email: &str,
) -> Result<(DisplayName, EmailAddress), RegistrationResult> {
    let name = DisplayName::new(name);
    let email = EmailAddress::parse(email);
    match (name, email) {
        (Ok(name), Ok(email)) => Ok((name, email)),
        (Err(err), _) | (_, Err(err)) => {
            debug!(error = %err, "rejected registration input");
            Err(RegistrationResult::ValidationError(err))
        }
    }
}
