pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_events_table;
mod m20260110_000002_create_registrations_table;
mod m20260110_000003_create_registration_events_table;
mod m20260110_000004_create_slot_reservations_table;
mod m20260110_000005_create_food_tokens_table;
mod m20260110_000006_create_payments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_events_table::Migration),
            Box::new(m20260110_000002_create_registrations_table::Migration),
            Box::new(m20260110_000003_create_registration_events_table::Migration),
            Box::new(m20260110_000004_create_slot_reservations_table::Migration),
            Box::new(m20260110_000005_create_food_tokens_table::Migration),
            Box::new(m20260110_000006_create_payments_table::Migration),
        ]
    }
}
