use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::payment::PaymentConfirmation,
        repositories::payment_repository::PaymentRepository,
        services::payment_gateway::PaymentGateway,
    },
    presentation::error::ApiError,
    usecase::verify_payment_usecase::VerifyPaymentUsecase,
};

/// json for the gateway callback relayed by the client
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VerifyPaymentRequest {
    pub email: String,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

#[derive(Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub order_id: String,
}

pub fn create_payment_router<
    G: PaymentGateway + Send + Sync + 'static + Clone,
    P: PaymentRepository + Send + Sync + 'static + Clone,
>(
    payment_service: VerifyPaymentUsecase<G, P>,
) -> Router {
    let state = PaymentState {
        payment_service: Arc::new(payment_service),
    };

    Router::new()
        .route("/payment/verify", post(verify_payment::<G, P>))
        .with_state(state)
}

#[derive(Clone)]
pub struct PaymentState<G: PaymentGateway, P: PaymentRepository> {
    pub payment_service: Arc<VerifyPaymentUsecase<G, P>>,
}

async fn verify_payment<G: PaymentGateway + Send + Sync, P: PaymentRepository + Send + Sync>(
    State(state): State<PaymentState<G, P>>,
    Json(payload): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    let confirmation = PaymentConfirmation {
        order_id: payload.order_id,
        payment_id: payload.payment_id,
        signature: payload.signature,
    };
    let payment = state
        .payment_service
        .verify(payload.email, confirmation)
        .await?;
    Ok(Json(VerifyPaymentResponse {
        success: true,
        order_id: payment.order_id,
    }))
}
