pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_registration_tables;

/// longest identity id a profile row can be keyed by
pub const MAX_IDENTITY_ID_LENGTH: u32 = 255;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20261019_000001_create_registration_tables::Migration,
        )]
    }
}
