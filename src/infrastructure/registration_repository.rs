use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::{food_tokens, payments, registration_events, registrations, slot_reservations};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait,
};

use crate::domain::{
    error::DomainError,
    models::{
        email::Email,
        food_token::FoodToken,
        registration::{ConfirmedEvent, Receipt, RegistrationPayload},
        reservation::Role,
    },
    repositories::registration_repository::RegistrationRepository,
    services::clock::Clock,
};
use crate::infrastructure::{
    capacity_ledger,
    transaction::{is_unique_violation, lock_email, settle},
};

#[derive(Clone)]
pub struct SeaOrmRegistrationRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    require_payment: bool,
}

impl SeaOrmRegistrationRepository {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>, require_payment: bool) -> Self {
        Self {
            db,
            clock,
            require_payment,
        }
    }

    async fn ensure_paid(
        &self,
        txn: &DatabaseTransaction,
        payload: &RegistrationPayload,
    ) -> Result<(), DomainError> {
        let order_id = payload.order_id().ok_or(DomainError::PaymentNotVerified)?;
        let paid = payments::Entity::find()
            .filter(payments::Column::OrderId.eq(order_id))
            .filter(payments::Column::Email.eq(payload.participant().email().as_str()))
            .count(txn)
            .await?;
        if paid == 0 {
            return Err(DomainError::PaymentNotVerified);
        }
        Ok(())
    }

    async fn finalize_in(
        &self,
        txn: &DatabaseTransaction,
        payload: &RegistrationPayload,
        now: DateTime<Utc>,
    ) -> Result<Receipt, DomainError> {
        let participant = payload.participant();
        let email = participant.email().as_str();
        lock_email(txn, email).await?;

        if self.require_payment {
            self.ensure_paid(txn, payload).await?;
        }

        // re-checked here; the pre-check outside the transaction is only a fast path
        let registered = registrations::Entity::find()
            .filter(registrations::Column::Email.eq(email))
            .count(txn)
            .await?;
        if registered > 0 {
            return Err(DomainError::EmailAlreadyRegistered);
        }

        let holds = slot_reservations::Entity::find()
            .filter(slot_reservations::Column::Email.eq(email))
            .filter(slot_reservations::Column::ExpiresAt.gt(now))
            .all(txn)
            .await?;
        if holds.is_empty() {
            return Err(DomainError::ReservationExpired);
        }
        if holds.len() != payload.event_names().len() {
            return Err(DomainError::ReservationMismatch);
        }

        let events = capacity_ledger::lock_events(txn, payload.event_names()).await?;

        // capacity and team identity were settled when the slot was held; only copy
        let mut rows = Vec::with_capacity(holds.len());
        for name in payload.event_names() {
            let event = capacity_ledger::find_locked(&events, name)?;
            let hold = holds
                .iter()
                .find(|hold| hold.event_id == event.id())
                .ok_or(DomainError::ReservationMismatch)?;
            if hold.registration_mode != payload.mode().as_str() {
                return Err(DomainError::ReservationMismatch);
            }
            rows.push((event, hold));
        }

        let registration = registrations::Entity::insert(registrations::ActiveModel {
            name: Set(participant.name().to_string()),
            email: Set(email.to_string()),
            phone: Set(participant.phone().to_string()),
            college: Set(participant.college().to_string()),
            student_year: Set(participant.student_year().to_string()),
            food: Set(participant.food().to_string()),
            created_at: Set(now),
            ..Default::default()
        })
        .exec(txn)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DomainError::EmailAlreadyRegistered
            } else {
                err.into()
            }
        })?;
        let registration_id = registration.last_insert_id;

        let mut confirmed = Vec::with_capacity(rows.len());
        for (event, hold) in rows {
            registration_events::Entity::insert(registration_events::ActiveModel {
                registration_id: Set(registration_id),
                event_id: Set(event.id()),
                role: Set(hold.role.clone()),
                team_name: Set(hold.team_name.clone()),
                team_code: Set(hold.team_code.clone()),
                registration_mode: Set(hold.registration_mode.clone()),
                ..Default::default()
            })
            .exec(txn)
            .await?;

            confirmed.push(ConfirmedEvent {
                event_name: event.name().to_string(),
                role: hold.role.as_deref().map(Role::parse).transpose()?,
                team_name: hold.team_name.clone(),
                team_code: hold.team_code.clone(),
            });
        }

        let food_token = FoodToken::generate();
        food_tokens::Entity::insert(food_tokens::ActiveModel {
            registration_id: Set(registration_id),
            token: Set(food_token.as_str().to_string()),
            food_type: Set(participant.food().to_string()),
            ..Default::default()
        })
        .exec(txn)
        .await?;

        Ok(Receipt {
            registration_id,
            name: participant.name().to_string(),
            email: email.to_string(),
            phone: participant.phone().to_string(),
            college: participant.college().to_string(),
            student_year: participant.student_year().to_string(),
            registration_mode: payload.mode(),
            events: confirmed,
            food_token,
            food_type: participant.food().to_string(),
        })
    }
}

#[async_trait]
impl RegistrationRepository for SeaOrmRegistrationRepository {
    async fn email_exists(&self, email: &Email) -> Result<bool, DomainError> {
        let count = registrations::Entity::find()
            .filter(registrations::Column::Email.eq(email.as_str()))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn finalize(&self, payload: &RegistrationPayload) -> Result<Receipt, DomainError> {
        let now = self.clock.now();
        let txn = self.db.begin().await?;
        let result = self.finalize_in(&txn, payload, now).await;
        settle(txn, result).await
    }
}
