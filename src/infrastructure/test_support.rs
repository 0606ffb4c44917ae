//! In-memory SQLite fixtures for store-level tests. The schema is generated
//! from the entities, unique indexes included.

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use entity::{prelude::*, registration_events, registrations, slot_reservations};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection, DbBackend, EntityTrait, QueryFilter, Schema,
};

use crate::domain::services::clock::Clock;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
}

/// Clock that only moves when told to
pub struct TestClock(Mutex<DateTime<Utc>>);

impl TestClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub async fn setup_db() -> DatabaseConnection {
    // One connection: every connection to sqlite::memory: is a separate
    // database. It also means transactions run one at a time, so tests that
    // spawn contending writers check serialized outcomes, not row locks.
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    let tables = [
        schema.create_table_from_entity(Events),
        schema.create_table_from_entity(Registrations),
        schema.create_table_from_entity(RegistrationEvents),
        schema.create_table_from_entity(SlotReservations),
        schema.create_table_from_entity(FoodTokens),
        schema.create_table_from_entity(Payments),
    ];
    for table in tables {
        db.execute(db.get_database_backend().build(&table))
            .await
            .unwrap();
    }
    db
}

pub async fn seed_event(
    db: &DatabaseConnection,
    name: &str,
    event_type: &str,
    team_size: i32,
    max_slots: i32,
    max_online_slots: i32,
) -> i32 {
    entity::events::ActiveModel {
        name: Set(name.to_string()),
        event_type: Set(event_type.to_string()),
        team_size: Set(team_size),
        max_slots: Set(max_slots),
        max_online_slots: Set(max_online_slots),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

async fn registration_id(db: &DatabaseConnection, email: &str) -> i32 {
    if let Some(existing) = Registrations::find()
        .filter(registrations::Column::Email.eq(email))
        .one(db)
        .await
        .unwrap()
    {
        return existing.id;
    }
    registrations::ActiveModel {
        name: Set("Seeded".to_string()),
        email: Set(email.to_string()),
        phone: Set("0000000000".to_string()),
        college: Set("Seed College".to_string()),
        student_year: Set("1".to_string()),
        food: Set("veg".to_string()),
        created_at: Set(t0()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

/// Confirmed row, creating the registration for `email` when needed.
/// `team` is `(role, team_name)`.
pub async fn insert_confirmed(
    db: &DatabaseConnection,
    email: &str,
    event_id: i32,
    team: Option<(&str, &str)>,
    team_code: Option<&str>,
    mode: &str,
) {
    let registration_id = registration_id(db, email).await;
    registration_events::ActiveModel {
        registration_id: Set(registration_id),
        event_id: Set(event_id),
        role: Set(team.map(|(role, _)| role.to_string())),
        team_name: Set(team.map(|(_, name)| name.to_string())),
        team_code: Set(team_code.map(str::to_string)),
        registration_mode: Set(mode.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn insert_hold(
    db: &DatabaseConnection,
    email: &str,
    event_id: i32,
    team: Option<(&str, &str)>,
    team_code: Option<&str>,
    mode: &str,
    expires_at: DateTime<Utc>,
) {
    slot_reservations::ActiveModel {
        email: Set(email.to_string()),
        event_id: Set(event_id),
        role: Set(team.map(|(role, _)| role.to_string())),
        team_name: Set(team.map(|(_, name)| name.to_string())),
        team_code: Set(team_code.map(str::to_string)),
        registration_mode: Set(mode.to_string()),
        expires_at: Set(expires_at),
        created_at: Set(expires_at - Duration::minutes(10)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn count_holds(db: &DatabaseConnection, email: &str) -> usize {
    SlotReservations::find()
        .filter(slot_reservations::Column::Email.eq(email))
        .all(db)
        .await
        .unwrap()
        .len()
}
