use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, Insert, sea_query::OnConflict};

use crate::{
    domain::{
        error::ProfileWriteError,
        models::{identity::IdentityId, profile::Profile},
        repositories::profile_store::ProfileStore,
    },
    infrastructure::{db_error::to_profile_error, entity::profiles},
};

#[derive(Clone)]
pub struct SeaOrmProfileStore {
    db: DatabaseConnection,
}

impl SeaOrmProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// insert keyed by `id`, overwriting name and email of an existing row
fn upsert_profile(id: &IdentityId, profile: &Profile) -> Insert<profiles::ActiveModel> {
    profiles::Entity::insert(profiles::ActiveModel {
        id: Set(id.as_str().to_string()),
        name: Set(profile.name().to_string()),
        email: Set(profile.email().as_str().to_string()),
    })
    .on_conflict(
        OnConflict::column(profiles::Column::Id)
            .update_columns([profiles::Column::Name, profiles::Column::Email])
            .to_owned(),
    )
}

#[async_trait]
impl ProfileStore for SeaOrmProfileStore {
    async fn write(&self, id: &IdentityId, profile: &Profile) -> Result<(), ProfileWriteError> {
        // rows affected is 0 when the stored row already matches, which is still success
        upsert_profile(id, profile)
            .exec_without_returning(&self.db)
            .await
            .map_err(to_profile_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;
    use crate::domain::models::profile::{DisplayName, EmailAddress};

    fn profile() -> Profile {
        Profile::new(
            DisplayName::new("Budi").unwrap(),
            EmailAddress::parse("budi@example.com").unwrap(),
        )
    }

    #[test]
    fn test_write_is_upsert_on_id() {
        let id = IdentityId::new("uid-1").unwrap();

        let sql = upsert_profile(&id, &profile())
            .build(DbBackend::MySql)
            .to_string();

        assert!(sql.starts_with("INSERT INTO `profiles`"));
        assert!(sql.contains("'uid-1'"));
        assert!(sql.contains("ON DUPLICATE KEY UPDATE"));
        assert!(sql.contains("`name` = VALUES(`name`)"));
        assert!(sql.contains("`email` = VALUES(`email`)"));
        // the key itself is never rewritten
        assert!(!sql.contains("`id` = VALUES(`id`)"));
    }

    #[tokio::test]
    async fn test_lost_connection_is_unavailable() {
        let store = SeaOrmProfileStore::new(DatabaseConnection::Disconnected);
        let id = IdentityId::new("uid-1").unwrap();

        let err = store.write(&id, &profile()).await.unwrap_err();

        assert_eq!(err, ProfileWriteError::Unavailable);
    }
}
