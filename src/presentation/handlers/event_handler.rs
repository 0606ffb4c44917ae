use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::event::{Event, EventType, SlotAvailability},
        repositories::event_repository::EventRepository,
    },
    presentation::error::ApiError,
    usecase::list_events_usecase::ListEventsUsecase,
};

#[derive(Serialize, Deserialize)]
pub struct EventInfo {
    pub name: String,
    pub event_type: EventType,
    pub team_size: u64,
    pub max_slots: u64,
    pub max_online_slots: u64,
}

impl From<Event> for EventInfo {
    fn from(event: Event) -> Self {
        Self {
            name: event.name().to_string(),
            event_type: event.event_type(),
            team_size: event.team_size(),
            max_slots: event.max_slots(),
            max_online_slots: event.max_online_slots(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct EventsResponse {
    pub success: bool,
    pub events: Vec<EventInfo>,
}

#[derive(Serialize, Deserialize)]
pub struct LiveSlotsResponse {
    pub success: bool,
    pub slots: Vec<SlotAvailability>,
}

pub fn create_event_router<E: EventRepository + Send + Sync + 'static + Clone>(
    event_service: ListEventsUsecase<E>,
) -> Router {
    let state = EventState {
        event_service: Arc::new(event_service),
    };

    Router::new()
        .route("/events", get(list_events::<E>))
        .route("/events/live_slots", get(live_slots::<E>))
        .with_state(state)
}

#[derive(Clone)]
pub struct EventState<E: EventRepository> {
    pub event_service: Arc<ListEventsUsecase<E>>,
}

async fn list_events<E: EventRepository + Send + Sync>(
    State(state): State<EventState<E>>,
) -> Result<Json<EventsResponse>, ApiError> {
    let events = state.event_service.list().await?;
    Ok(Json(EventsResponse {
        success: true,
        events: events.into_iter().map(EventInfo::from).collect(),
    }))
}

async fn live_slots<E: EventRepository + Send + Sync>(
    State(state): State<EventState<E>>,
) -> Result<Json<LiveSlotsResponse>, ApiError> {
    let slots = state.event_service.live_slots().await?;
    Ok(Json(LiveSlotsResponse {
        success: true,
        slots,
    }))
}
