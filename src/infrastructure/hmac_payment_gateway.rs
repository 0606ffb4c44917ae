use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::{
    models::payment::PaymentConfirmation, services::payment_gateway::PaymentGateway,
};

type HmacSha256 = Hmac<Sha256>;

/// Checks gateway callbacks signed as `hex(HMAC-SHA256(secret, "order_id|payment_id"))`.
#[derive(Clone)]
pub struct HmacPaymentGateway {
    key_secret: String,
}

impl HmacPaymentGateway {
    pub fn new(key_secret: String) -> Self {
        Self { key_secret }
    }

    fn mac(&self, order_id: &str, payment_id: &str) -> Option<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(self.key_secret.as_bytes()).ok()?;
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        Some(mac)
    }

    #[cfg(test)]
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        let mac = self.mac(order_id, payment_id).unwrap();
        hex::encode(mac.finalize().into_bytes())
    }
}

impl PaymentGateway for HmacPaymentGateway {
    fn verify_signature(&self, confirmation: &PaymentConfirmation) -> bool {
        let Ok(expected) = hex::decode(confirmation.signature.trim()) else {
            return false;
        };
        match self.mac(&confirmation.order_id, &confirmation.payment_id) {
            // constant time comparison
            Some(mac) => mac.verify_slice(&expected).is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn confirmation(signature: String) -> PaymentConfirmation {
        PaymentConfirmation {
            order_id: "order_1".to_string(),
            payment_id: "pay_1".to_string(),
            signature,
        }
    }

    #[test]
    fn test_valid_signature_positive() {
        let gateway = HmacPaymentGateway::new("secret".to_string());
        let signature = gateway.sign("order_1", "pay_1");
        assert_eq!(signature.len(), 64);
        assert!(gateway.verify_signature(&confirmation(signature.clone())));
        assert!(gateway.verify_signature(&confirmation(signature.to_uppercase())));
    }

    #[test]
    fn test_signature_from_other_secret_negative() {
        let signature = HmacPaymentGateway::new("other".to_string()).sign("order_1", "pay_1");
        let gateway = HmacPaymentGateway::new("secret".to_string());
        assert!(!gateway.verify_signature(&confirmation(signature)));
    }

    #[test]
    fn test_signature_for_other_payment_negative() {
        let gateway = HmacPaymentGateway::new("secret".to_string());
        let signature = gateway.sign("order_1", "pay_2");
        assert!(!gateway.verify_signature(&confirmation(signature)));
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("zz")]
    fn test_malformed_signature_negative(#[case] signature: &str) {
        let gateway = HmacPaymentGateway::new("secret".to_string());
        assert!(!gateway.verify_signature(&confirmation(signature.to_string())));
    }

    #[test]
    fn test_signature_is_lowercase_hex_of_mac() {
        let gateway = HmacPaymentGateway::new("secret".to_string());
        let signature = gateway.sign("order_1", "pay_1");
        assert_eq!(hex::decode(&signature).unwrap().len(), 32);
        assert_eq!(signature, signature.to_lowercase());
    }
}
