use async_trait::async_trait;

use crate::domain::{error::DomainError, models::registration::ConfirmedEvent};

/// Confirmation sent to a participant once registration is committed
#[derive(Debug, Clone)]
pub struct RegistrationNotice {
    pub name: String,
    pub email: String,
    pub events: Vec<ConfirmedEvent>,
    pub food_pass: Vec<u8>,
    pub food_type: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_confirmation(&self, notice: RegistrationNotice) -> Result<(), DomainError>;
}
