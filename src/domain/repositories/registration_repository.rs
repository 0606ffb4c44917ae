use async_trait::async_trait;

use crate::domain::{
    error::DomainError,
    models::{
        email::Email,
        registration::{Receipt, RegistrationPayload},
    },
};

/// Repository that turns held reservations into permanent registrations
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn email_exists(&self, email: &Email) -> Result<bool, DomainError>;

    /// Materialize the holds of the payload's email in a single transaction.
    /// Holds are left in place; the caller discards them after commit.
    async fn finalize(&self, payload: &RegistrationPayload) -> Result<Receipt, DomainError>;
}
