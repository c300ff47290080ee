//! Create the `personDetails` table.
//!
//! Single table, no foreign keys; `id` is assigned by the database.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PersonDetails::Table)
                    .if_not_exists()
                    .col(pk_auto(PersonDetails::Id))
                    .col(text(PersonDetails::Name))
                    .col(text(PersonDetails::Designation))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PersonDetails::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PersonDetails {
    #[sea_orm(iden = "personDetails")]
    Table,
    Id,
    Name,
    Designation,
}
