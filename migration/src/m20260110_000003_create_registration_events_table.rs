use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260110_000001_create_events_table::Events,
    m20260110_000002_create_registrations_table::Registrations,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RegistrationEvents::Table)
                    .if_not_exists()
                    .col(pk_auto(RegistrationEvents::Id))
                    .col(integer(RegistrationEvents::RegistrationId))
                    .col(integer(RegistrationEvents::EventId))
                    .col(string_null(RegistrationEvents::Role))
                    .col(string_null(RegistrationEvents::TeamName))
                    .col(string_null(RegistrationEvents::TeamCode))
                    .col(string(RegistrationEvents::RegistrationMode))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registration_events_registration_id")
                            .from(RegistrationEvents::Table, RegistrationEvents::RegistrationId)
                            .to(Registrations::Table, Registrations::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registration_events_event_id")
                            .from(RegistrationEvents::Table, RegistrationEvents::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registration_events_event_team_code")
                    .table(RegistrationEvents::Table)
                    .col(RegistrationEvents::EventId)
                    .col(RegistrationEvents::TeamCode)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RegistrationEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RegistrationEvents {
    Table,
    Id,
    RegistrationId,
    EventId,
    Role,
    TeamName,
    TeamCode,
    RegistrationMode,
}
