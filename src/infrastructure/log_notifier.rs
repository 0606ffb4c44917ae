use async_trait::async_trait;

use crate::domain::{
    error::DomainError,
    services::notification_service::{Notifier, RegistrationNotice},
};

/// Notifier that only writes the confirmation to the log. Stands in for a
/// mail transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_confirmation(&self, notice: RegistrationNotice) -> Result<(), DomainError> {
        let events: Vec<&str> = notice
            .events
            .iter()
            .map(|event| event.event_name.as_str())
            .collect();
        tracing::info!(
            email = %notice.email,
            name = %notice.name,
            ?events,
            food_type = %notice.food_type,
            food_pass_bytes = notice.food_pass.len(),
            "registration confirmation sent"
        );
        Ok(())
    }
}
