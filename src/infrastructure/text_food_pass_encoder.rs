use crate::domain::{
    error::DomainError, models::food_token::FoodToken,
    services::food_pass_service::FoodPassEncoder,
};

const PREFIX: &str = "SYMPO-FOOD:";

/// Plain text food pass, scanned back at the counter by its prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFoodPassEncoder;

impl FoodPassEncoder for TextFoodPassEncoder {
    fn encode(&self, token: &FoodToken) -> Result<Vec<u8>, DomainError> {
        if token.as_str().is_empty() {
            return Err(DomainError::Validation("Empty food token".to_string()));
        }
        Ok(format!("{PREFIX}{}", token.as_str()).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_positive() {
        let token = FoodToken::new("ABC".to_string());
        assert_eq!(TextFoodPassEncoder.encode(&token).unwrap(), b"SYMPO-FOOD:ABC".to_vec());
    }

    #[test]
    fn test_encode_empty_negative() {
        assert!(TextFoodPassEncoder.encode(&FoodToken::new(String::new())).is_err());
    }
}
