use async_trait::async_trait;

use crate::domain::{error::DomainError, models::payment::VerifiedPayment};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Record a verified payment. An order id is accepted at most once.
    async fn record_verified(&self, payment: &VerifiedPayment) -> Result<(), DomainError>;
}
