use sea_orm_migration::{prelude::*, schema::*};

use super::m20260110_000001_create_events_table::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SlotReservations::Table)
                    .if_not_exists()
                    .col(pk_auto(SlotReservations::Id))
                    .col(string(SlotReservations::Email))
                    .col(integer(SlotReservations::EventId))
                    .col(string_null(SlotReservations::Role))
                    .col(string_null(SlotReservations::TeamName))
                    .col(string_null(SlotReservations::TeamCode))
                    .col(string(SlotReservations::RegistrationMode))
                    .col(timestamp_with_time_zone(SlotReservations::ExpiresAt))
                    .col(
                        timestamp_with_time_zone(SlotReservations::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_slot_reservations_event_id")
                            .from(SlotReservations::Table, SlotReservations::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_slot_reservations_email")
                    .table(SlotReservations::Table)
                    .col(SlotReservations::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_slot_reservations_expires_at")
                    .table(SlotReservations::Table)
                    .col(SlotReservations::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_slot_reservations_event_team_code")
                    .table(SlotReservations::Table)
                    .col(SlotReservations::EventId)
                    .col(SlotReservations::TeamCode)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SlotReservations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SlotReservations {
    Table,
    Id,
    Email,
    EventId,
    Role,
    TeamName,
    TeamCode,
    RegistrationMode,
    ExpiresAt,
    CreatedAt,
}
