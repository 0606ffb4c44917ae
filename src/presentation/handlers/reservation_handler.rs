use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{models::reservation::HeldSlot, repositories::reservation_repository::ReservationRepository},
    presentation::error::ApiError,
    usecase::{
        release_reservation_usecase::ReleaseReservationUsecase,
        reserve_slots_usecase::{ReserveSlotsUsecase, SlotInput},
    },
};

// Request

/// one selected event in a reserve request
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EventSelection {
    pub event_name: String,
    pub role: Option<String>,
    pub team_name: Option<String>,
    pub team_code: Option<String>,
}

/// json for reserve request; absent fields are left empty and rejected by
/// the usecase's validation
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReserveRequest {
    pub email: String,
    pub registration_mode: String,
    pub events: Vec<EventSelection>,
}

/// json for release request
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReleaseRequest {
    pub email: String,
}

// Response

/// json for reserve response
#[derive(Serialize, Deserialize)]
pub struct ReserveResponse {
    pub success: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub reservations: Vec<HeldSlot>,
}

/// json for release response
#[derive(Serialize, Deserialize)]
pub struct ReleaseResponse {
    pub success: bool,
    pub released: u64,
}

// Reservation Router

pub fn create_reservation_router<R: ReservationRepository + Send + Sync + 'static + Clone>(
    reserve_service: ReserveSlotsUsecase<R>,
    release_service: ReleaseReservationUsecase<R>,
) -> Router {
    let state = ReservationState {
        reserve_service: Arc::new(reserve_service),
        release_service: Arc::new(release_service),
    };

    Router::new()
        .route("/reserve", post(reserve::<R>))
        .route("/release", post(release::<R>))
        .with_state(state)
}

#[derive(Clone)]
pub struct ReservationState<R: ReservationRepository> {
    pub reserve_service: Arc<ReserveSlotsUsecase<R>>,
    pub release_service: Arc<ReleaseReservationUsecase<R>>,
}

// handler function

async fn reserve<R: ReservationRepository + Send + Sync>(
    State(state): State<ReservationState<R>>,
    Json(payload): Json<ReserveRequest>,
) -> Result<(StatusCode, Json<ReserveResponse>), ApiError> {
    let slots = payload
        .events
        .into_iter()
        .map(|selection| SlotInput {
            event_name: selection.event_name,
            role: selection.role,
            team_name: selection.team_name,
            team_code: selection.team_code,
        })
        .collect();

    let reservations = state
        .reserve_service
        .reserve(payload.email, payload.registration_mode, slots)
        .await?;

    let response = ReserveResponse {
        success: true,
        expires_at: reservations.iter().map(|slot| slot.expires_at).min(),
        reservations,
    };
    Ok((StatusCode::OK, Json(response)))
}

async fn release<R: ReservationRepository + Send + Sync>(
    State(state): State<ReservationState<R>>,
    Json(payload): Json<ReleaseRequest>,
) -> Result<(StatusCode, Json<ReleaseResponse>), ApiError> {
    let released = state.release_service.release(payload.email).await?;
    Ok((
        StatusCode::OK,
        Json(ReleaseResponse {
            success: true,
            released,
        }),
    ))
}
