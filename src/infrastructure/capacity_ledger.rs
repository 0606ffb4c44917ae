//! Capacity bookkeeping over the store. Nothing is cached: usage is counted
//! inside whatever transaction the caller holds, after the event row has
//! been locked.

use chrono::{DateTime, Utc};
use entity::{events, registration_events, registrations, slot_reservations};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, sea_query::Query,
};

use crate::domain::{
    error::DomainError,
    models::{
        event::{CapacityUsage, Event, EventType},
        reservation::{RegistrationMode, Role},
    },
};

pub fn to_event(model: events::Model) -> Result<Event, DomainError> {
    Ok(Event::new(
        model.id,
        model.name,
        EventType::parse(&model.event_type)?,
        u64::try_from(model.team_size).unwrap_or(0),
        u64::try_from(model.max_slots).unwrap_or(0),
        u64::try_from(model.max_online_slots).unwrap_or(0),
    ))
}

/// Lock the named event rows (`SELECT ... FOR UPDATE`) in ascending id
/// order. Every admission decision for an event happens while its row is
/// locked, so concurrent writers to the same event queue up while other
/// events stay unaffected.
pub async fn lock_events<C: ConnectionTrait>(
    db: &C,
    names: &[String],
) -> Result<Vec<Event>, DomainError> {
    let models = events::Entity::find()
        .filter(events::Column::Name.is_in(names.iter().cloned()))
        .order_by_asc(events::Column::Id)
        .lock_exclusive()
        .all(db)
        .await?;
    models.into_iter().map(to_event).collect()
}

pub fn find_locked<'a>(events: &'a [Event], name: &str) -> Result<&'a Event, DomainError> {
    events
        .iter()
        .find(|event| event.name() == name)
        .ok_or_else(|| DomainError::EventNotFound(name.to_string()))
}

/// Holds that still count: not expired, and not owned by someone who has
/// already registered (their confirmed rows count instead).
pub fn live_holds(event_id: i32, now: DateTime<Utc>) -> Select<slot_reservations::Entity> {
    slot_reservations::Entity::find()
        .filter(slot_reservations::Column::EventId.eq(event_id))
        .filter(slot_reservations::Column::ExpiresAt.gt(now))
        .filter(
            slot_reservations::Column::Email.not_in_subquery(
                Query::select()
                    .column(registrations::Column::Email)
                    .from(registrations::Entity)
                    .to_owned(),
            ),
        )
}

fn confirmed_slots(event: &Event) -> Select<registration_events::Entity> {
    let query = registration_events::Entity::find()
        .filter(registration_events::Column::EventId.eq(event.id()));
    if event.is_team() {
        query.filter(registration_events::Column::Role.eq(Role::Lead.as_str()))
    } else {
        query
    }
}

fn held_slots(event: &Event, now: DateTime<Utc>) -> Select<slot_reservations::Entity> {
    let query = live_holds(event.id(), now);
    if event.is_team() {
        query.filter(slot_reservations::Column::Role.eq(Role::Lead.as_str()))
    } else {
        query
    }
}

pub async fn usage<C: ConnectionTrait>(
    db: &C,
    event: &Event,
    now: DateTime<Utc>,
) -> Result<CapacityUsage, DbErr> {
    let online = RegistrationMode::Online.as_str();

    let confirmed = confirmed_slots(event).count(db).await?;
    let confirmed_online = confirmed_slots(event)
        .filter(registration_events::Column::RegistrationMode.eq(online))
        .count(db)
        .await?;
    let held = held_slots(event, now).count(db).await?;
    let held_online = held_slots(event, now)
        .filter(slot_reservations::Column::RegistrationMode.eq(online))
        .count(db)
        .await?;

    Ok(CapacityUsage {
        used: confirmed + held,
        used_online: confirmed_online + held_online,
    })
}

/// Fails with `CapacityExceeded` or `OnlineCapacityExceeded` when one more
/// slot in `mode` would overshoot. The online quota is only consulted for
/// online requests.
pub async fn ensure_room<C: ConnectionTrait>(
    db: &C,
    event: &Event,
    mode: RegistrationMode,
    now: DateTime<Utc>,
) -> Result<(), DomainError> {
    let usage = usage(db, event, now).await?;
    event.admit(&usage, mode)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::infrastructure::test_support::{
        insert_confirmed, insert_hold, seed_event, setup_db, t0,
    };

    #[tokio::test]
    async fn test_usage_counts_confirmed_and_live_holds() {
        let db = setup_db().await;
        let event_id = seed_event(&db, "quiz", "individual", 1, 5, 2).await;
        insert_confirmed(&db, "a@example.com", event_id, None, None, "online").await;
        insert_hold(&db, "b@example.com", event_id, None, None, "onspot", t0() + Duration::minutes(10)).await;
        // expired hold is ignored
        insert_hold(&db, "c@example.com", event_id, None, None, "online", t0() - Duration::minutes(1)).await;

        let events = lock_events(&db, &["quiz".to_string()]).await.unwrap();
        let usage = usage(&db, &events[0], t0()).await.unwrap();
        assert_eq!(usage, CapacityUsage { used: 2, used_online: 1 });
    }

    #[tokio::test]
    async fn test_team_usage_counts_leads_only() {
        let db = setup_db().await;
        let event_id = seed_event(&db, "hackquest", "team", 4, 10, 5).await;
        insert_confirmed(&db, "lead@example.com", event_id, Some(("lead", "Rocket")), Some("ABC123"), "online").await;
        insert_confirmed(&db, "m1@example.com", event_id, Some(("member", "Rocket")), Some("ABC123"), "online").await;
        insert_hold(&db, "m2@example.com", event_id, Some(("member", "Rocket")), Some("ABC123"), "online", t0() + Duration::minutes(5)).await;

        let events = lock_events(&db, &["hackquest".to_string()]).await.unwrap();
        let usage = usage(&db, &events[0], t0()).await.unwrap();
        assert_eq!(usage.used, 1);
    }

    #[tokio::test]
    async fn test_holds_of_registered_emails_are_not_double_counted() {
        let db = setup_db().await;
        let event_id = seed_event(&db, "quiz", "individual", 1, 5, 5).await;
        insert_confirmed(&db, "a@example.com", event_id, None, None, "online").await;
        insert_hold(&db, "a@example.com", event_id, None, None, "online", t0() + Duration::minutes(5)).await;

        let events = lock_events(&db, &["quiz".to_string()]).await.unwrap();
        assert_eq!(usage(&db, &events[0], t0()).await.unwrap().used, 1);
    }

    #[tokio::test]
    async fn test_ensure_room_rejects_full_event() {
        let db = setup_db().await;
        let event_id = seed_event(&db, "quiz", "individual", 1, 1, 1).await;
        insert_hold(&db, "a@example.com", event_id, None, None, "onspot", t0() + Duration::minutes(5)).await;

        let events = lock_events(&db, &["quiz".to_string()]).await.unwrap();
        let err = ensure_room(&db, &events[0], RegistrationMode::Onspot, t0())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded(_)));
    }

    #[tokio::test]
    async fn test_lock_events_orders_by_id_and_skips_unknown() {
        let db = setup_db().await;
        seed_event(&db, "quiz", "individual", 1, 1, 1).await;
        seed_event(&db, "hackquest", "team", 4, 10, 5).await;

        let names = vec!["hackquest".to_string(), "ghost".to_string(), "quiz".to_string()];
        let events = lock_events(&db, &names).await.unwrap();
        let locked: Vec<&str> = events.iter().map(Event::name).collect();
        assert_eq!(locked, vec!["quiz", "hackquest"]);
        assert!(matches!(
            find_locked(&events, "ghost"),
            Err(DomainError::EventNotFound(_))
        ));
    }
}
