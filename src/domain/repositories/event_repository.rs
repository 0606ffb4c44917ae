use async_trait::async_trait;

use crate::domain::{
    error::DomainError,
    models::event::{Event, SlotAvailability},
};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Event>, DomainError>;

    /// Remaining capacity per event, counting confirmed rows and live holds
    async fn live_slots(&self) -> Result<Vec<SlotAvailability>, DomainError>;
}
