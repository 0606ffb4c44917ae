use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use entity::{registrations, slot_reservations};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait,
};

use crate::domain::{
    error::DomainError,
    models::{
        email::Email,
        reservation::{HeldSlot, ReservationRequest},
    },
    repositories::reservation_repository::ReservationRepository,
    services::clock::Clock,
};
use crate::infrastructure::{
    capacity_ledger,
    team_resolver::{self, TeamSource},
    transaction::{lock_email, settle},
};

#[derive(Clone)]
pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self { db, clock, ttl }
    }

    async fn reserve_in(
        &self,
        txn: &DatabaseTransaction,
        request: &ReservationRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<HeldSlot>, DomainError> {
        let email = request.email().as_str();
        // taken before the delete below so two reserves for one email cannot both see no holds
        lock_email(txn, email).await?;

        // lazy expiry: stale holds stop counting for everyone
        let swept = slot_reservations::Entity::delete_many()
            .filter(slot_reservations::Column::ExpiresAt.lt(now))
            .exec(txn)
            .await?
            .rows_affected;
        let superseded = slot_reservations::Entity::delete_many()
            .filter(slot_reservations::Column::Email.eq(email))
            .exec(txn)
            .await?
            .rows_affected;
        tracing::debug!(swept, superseded, "cleared holds before reserving");

        let registered = registrations::Entity::find()
            .filter(registrations::Column::Email.eq(email))
            .count(txn)
            .await?;
        if registered > 0 {
            return Err(DomainError::EmailAlreadyRegistered);
        }

        let events = capacity_ledger::lock_events(txn, &request.event_names()).await?;
        let expires_at = now + self.ttl;
        let mut held = Vec::with_capacity(request.slots().len());

        for slot in request.slots() {
            let event = capacity_ledger::find_locked(&events, &slot.event_name)?;

            if event.consumes_slot(slot.role) {
                capacity_ledger::ensure_room(txn, event, request.mode(), now).await?;
            }

            let assignment =
                team_resolver::resolve(txn, event, slot, TeamSource::ConfirmedAndHeld { now })
                    .await?;

            slot_reservations::Entity::insert(slot_reservations::ActiveModel {
                email: Set(email.to_string()),
                event_id: Set(event.id()),
                role: Set(assignment.role.map(|role| role.as_str().to_string())),
                team_name: Set(assignment.team_name.clone()),
                team_code: Set(assignment.team_code.clone()),
                registration_mode: Set(request.mode().as_str().to_string()),
                expires_at: Set(expires_at),
                created_at: Set(now),
                ..Default::default()
            })
            .exec(txn)
            .await?;

            held.push(HeldSlot {
                event_name: event.name().to_string(),
                role: assignment.role,
                team_name: assignment.team_name,
                team_code: assignment.team_code,
                registration_mode: request.mode(),
                expires_at,
            });
        }

        Ok(held)
    }
}

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn reserve(&self, request: &ReservationRequest) -> Result<Vec<HeldSlot>, DomainError> {
        let now = self.clock.now();
        let txn = self.db.begin().await?;
        let result = self.reserve_in(&txn, request, now).await;
        settle(txn, result).await
    }

    async fn release(&self, email: &Email) -> Result<u64, DomainError> {
        let result = slot_reservations::Entity::delete_many()
            .filter(slot_reservations::Column::Email.eq(email.as_str()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
