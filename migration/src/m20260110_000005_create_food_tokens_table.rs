use sea_orm_migration::{prelude::*, schema::*};

use super::m20260110_000002_create_registrations_table::Registrations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FoodTokens::Table)
                    .if_not_exists()
                    .col(pk_auto(FoodTokens::Id))
                    .col(integer_uniq(FoodTokens::RegistrationId))
                    .col(string_uniq(FoodTokens::Token))
                    .col(string(FoodTokens::FoodType))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_food_tokens_registration_id")
                            .from(FoodTokens::Table, FoodTokens::RegistrationId)
                            .to(Registrations::Table, Registrations::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FoodTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FoodTokens {
    Table,
    Id,
    RegistrationId,
    Token,
    FoodType,
}
