use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::registration::Receipt,
        repositories::{
            registration_repository::RegistrationRepository,
            reservation_repository::ReservationRepository,
        },
        services::{food_pass_service::FoodPassEncoder, notification_service::Notifier},
    },
    presentation::error::ApiError,
    usecase::finalize_registration_usecase::{FinalizeRegistrationUsecase, RegistrationInput},
};

/// json for register request; a missing field fails the same profile
/// validation as a blank one
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub student_year: String,
    pub food: String,
    pub registration_mode: String,
    pub events: Vec<String>,
    pub order_id: Option<String>,
}

/// json for register response
#[derive(Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub registration: Receipt,
}

pub fn create_registration_router<
    R: RegistrationRepository + Send + Sync + 'static,
    S: ReservationRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    F: FoodPassEncoder + Send + Sync + 'static,
>(
    register_service: FinalizeRegistrationUsecase<R, S, N, F>,
) -> Router {
    let state = RegistrationState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/register", post(register::<R, S, N, F>))
        .with_state(state)
}

pub struct RegistrationState<
    R: RegistrationRepository,
    S: ReservationRepository,
    N: Notifier,
    F: FoodPassEncoder,
> {
    pub register_service: Arc<FinalizeRegistrationUsecase<R, S, N, F>>,
}

// only the Arc is cloned
impl<R, S, N, F> Clone for RegistrationState<R, S, N, F>
where
    R: RegistrationRepository,
    S: ReservationRepository,
    N: Notifier,
    F: FoodPassEncoder,
{
    fn clone(&self) -> Self {
        Self {
            register_service: Arc::clone(&self.register_service),
        }
    }
}

async fn register<
    R: RegistrationRepository + Send + Sync + 'static,
    S: ReservationRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    F: FoodPassEncoder + Send + Sync + 'static,
>(
    State(state): State<RegistrationState<R, S, N, F>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let input = RegistrationInput {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        college: payload.college,
        student_year: payload.student_year,
        food: payload.food,
        registration_mode: payload.registration_mode,
        events: payload.events,
        order_id: payload.order_id,
    };

    let registration = state.register_service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            registration,
        }),
    ))
}
