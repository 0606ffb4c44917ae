use async_trait::async_trait;

use crate::domain::{
    error::DomainError,
    models::{
        email::Email,
        reservation::{HeldSlot, ReservationRequest},
    },
};

/// Time-boxed holds on event capacity and team identity
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Replace every hold of the requesting email with holds for the
    /// requested events, all or nothing.
    async fn reserve(&self, request: &ReservationRequest) -> Result<Vec<HeldSlot>, DomainError>;

    /// Drop every hold of `email`, returning how many were removed.
    async fn release(&self, email: &Email) -> Result<u64, DomainError>;
}
