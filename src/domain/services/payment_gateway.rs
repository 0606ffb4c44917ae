use crate::domain::models::payment::PaymentConfirmation;

pub trait PaymentGateway: Send + Sync {
    /// Whether the confirmation was really signed by the gateway
    fn verify_signature(&self, confirmation: &PaymentConfirmation) -> bool;
}
