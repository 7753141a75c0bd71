use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, Insert};
use uuid::Uuid;

use crate::{
    domain::{
        error::IdentityCreationError,
        models::{credential::HashedPassword, identity::CredentialReceipt, profile::EmailAddress},
        repositories::identity_provider::IdentityProvider,
        services::password_service::PasswordHasher,
    },
    infrastructure::{db_error::to_identity_error, entity::identities},
};

/// Identity provider backed by the `identities` table.
/// The unique index on `email` settles concurrent registrations.
#[derive(Clone)]
pub struct SeaOrmIdentityProvider<P: PasswordHasher> {
    db: DatabaseConnection,
    password_hasher: P,
}

impl<P: PasswordHasher + 'static> SeaOrmIdentityProvider<P> {
    pub fn new(db: DatabaseConnection, password_hasher: P) -> Self {
        Self {
            db,
            password_hasher,
        }
    }

    // argon2 is CPU-bound, keep it off the async workers
    async fn hash_password(&self, password: &str) -> Result<HashedPassword, IdentityCreationError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| IdentityCreationError::Unknown(format!("Hashing task failed: {}", e)))?
    }
}

/// plain insert: a duplicate email must fail, never overwrite
fn insert_identity(
    id: Uuid,
    email: &EmailAddress,
    password_hash: &HashedPassword,
) -> Insert<identities::ActiveModel> {
    identities::Entity::insert(identities::ActiveModel {
        id: Set(id),
        email: Set(email.as_str().to_string()),
        password_hash: Set(password_hash.as_str().to_string()),
        created_at: Set(Utc::now().fixed_offset()),
    })
}

#[async_trait]
impl<P: PasswordHasher + 'static> IdentityProvider for SeaOrmIdentityProvider<P> {
    async fn create_credential(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<CredentialReceipt, IdentityCreationError> {
        let password_hash = self.hash_password(password).await?;

        let id = Uuid::new_v4();
        insert_identity(id, email, &password_hash)
            .exec_without_returning(&self.db)
            .await
            .map_err(to_identity_error)?;

        Ok(CredentialReceipt::new(Some(id.to_string())))
    }
}
