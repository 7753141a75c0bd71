use sea_orm_migration::prelude::*;

use crate::MAX_IDENTITY_ID_LENGTH;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(identities_table()).await?;
        manager.create_table(profiles_table()).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Identities::Table).to_owned())
            .await?;
        Ok(())
    }
}

// unique email is what rejects a second registration for the same address
fn identities_table() -> TableCreateStatement {
    Table::create()
        .table(Identities::Table)
        .if_not_exists()
        .col(ColumnDef::new(Identities::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Identities::Email).string().not_null().unique_key())
        .col(ColumnDef::new(Identities::PasswordHash).string().not_null())
        .col(
            ColumnDef::new(Identities::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

fn profiles_table() -> TableCreateStatement {
    Table::create()
        .table(Profiles::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Profiles::Id)
                .string_len(MAX_IDENTITY_ID_LENGTH)
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(Profiles::Name).string().not_null())
        .col(ColumnDef::new(Profiles::Email).string().not_null())
        .to_owned()
}

#[derive(DeriveIden)]
enum Identities {
    Table,
    Id,
    Email,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    Name,
    Email,
}
