use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registrations::Table)
                    .if_not_exists()
                    .col(pk_auto(Registrations::Id))
                    .col(string(Registrations::Name))
                    .col(string_uniq(Registrations::Email))
                    .col(string(Registrations::Phone))
                    .col(string(Registrations::College))
                    .col(string(Registrations::StudentYear))
                    .col(string(Registrations::Food))
                    .col(
                        timestamp_with_time_zone(Registrations::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Registrations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Registrations {
    Table,
    Id,
    Name,
    Email,
    Phone,
    College,
    StudentYear,
    Food,
    CreatedAt,
}
