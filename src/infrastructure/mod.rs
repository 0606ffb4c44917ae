pub mod capacity_ledger;
pub mod event_repository;
pub mod hmac_payment_gateway;
pub mod log_notifier;
pub mod payment_repository;
pub mod registration_repository;
pub mod reservation_repository;
pub mod system_clock;
pub mod team_resolver;
pub mod text_food_pass_encoder;
pub mod transaction;

#[cfg(test)]
pub mod test_support;
