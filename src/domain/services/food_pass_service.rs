use crate::domain::{error::DomainError, models::food_token::FoodToken};

/// Turns a food token into a renderable artifact (for example a QR image).
/// The bytes are opaque to the registration core.
pub trait FoodPassEncoder: Send + Sync {
    fn encode(&self, token: &FoodToken) -> Result<Vec<u8>, DomainError>;
}
