use crate::domain::{
    error::DomainError,
    models::{
        email::Email,
        payment::{PaymentConfirmation, VerifiedPayment},
    },
    repositories::payment_repository::PaymentRepository,
    services::payment_gateway::PaymentGateway,
};

pub struct VerifyPaymentUsecase<G: PaymentGateway, P: PaymentRepository> {
    payment_gateway: G,
    payment_repository: P,
}

impl<G: PaymentGateway, P: PaymentRepository> VerifyPaymentUsecase<G, P> {
    pub fn new(payment_gateway: G, payment_repository: P) -> Self {
        Self {
            payment_gateway,
            payment_repository,
        }
    }

    pub async fn verify(
        &self,
        email: String,
        confirmation: PaymentConfirmation,
    ) -> Result<VerifiedPayment, DomainError> {
        let email = Email::new(&email)?;
        if confirmation.order_id.trim().is_empty() || confirmation.payment_id.trim().is_empty() {
            return Err(DomainError::Validation("Missing payment details".to_string()));
        }
        if !self.payment_gateway.verify_signature(&confirmation) {
            tracing::warn!(order_id = %confirmation.order_id, "payment signature rejected");
            return Err(DomainError::InvalidPaymentSignature);
        }

        let payment = VerifiedPayment {
            order_id: confirmation.order_id,
            payment_id: confirmation.payment_id,
            email,
        };
        self.payment_repository.record_verified(&payment).await?;
        tracing::info!(
            order_id = %payment.order_id,
            email = payment.email.as_str(),
            "payment verified"
        );
        Ok(payment)
    }
}
