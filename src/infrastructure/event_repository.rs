use std::sync::Arc;

use async_trait::async_trait;
use entity::events;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::domain::{
    error::DomainError,
    models::event::{Event, SlotAvailability},
    repositories::event_repository::EventRepository,
    services::clock::Clock,
};
use crate::infrastructure::capacity_ledger;

#[derive(Clone)]
pub struct SeaOrmEventRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl SeaOrmEventRepository {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }
}

#[async_trait]
impl EventRepository for SeaOrmEventRepository {
    async fn list(&self) -> Result<Vec<Event>, DomainError> {
        let models = events::Entity::find()
            .order_by_asc(events::Column::Id)
            .all(&self.db)
            .await?;
        models.into_iter().map(capacity_ledger::to_event).collect()
    }

    // Read without locks: the numbers are advisory, admission re-checks them.
    async fn live_slots(&self) -> Result<Vec<SlotAvailability>, DomainError> {
        let now = self.clock.now();
        let mut slots = Vec::new();
        for event in self.list().await? {
            let usage = capacity_ledger::usage(&self.db, &event, now).await?;
            slots.push(SlotAvailability::from_usage(&event, &usage));
        }
        Ok(slots)
    }
}
