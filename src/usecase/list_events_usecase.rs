use crate::domain::{
    error::DomainError,
    models::event::{Event, SlotAvailability},
    repositories::event_repository::EventRepository,
};

pub struct ListEventsUsecase<E: EventRepository> {
    event_repository: E,
}

impl<E: EventRepository> ListEventsUsecase<E> {
    pub fn new(event_repository: E) -> Self {
        Self { event_repository }
    }

    pub async fn list(&self) -> Result<Vec<Event>, DomainError> {
        self.event_repository.list().await
    }

    pub async fn live_slots(&self) -> Result<Vec<SlotAvailability>, DomainError> {
        self.event_repository.live_slots().await
    }
}
