use crate::domain::models::email::Email;

/// Gateway callback data for a completed payment
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Payment whose signature checked out, ready for the ledger
#[derive(Debug, Clone)]
pub struct VerifiedPayment {
    pub order_id: String,
    pub payment_id: String,
    pub email: Email,
}
