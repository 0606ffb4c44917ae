pub mod event_handler;
pub mod payment_handler;
pub mod registration_handler;
pub mod reservation_handler;
