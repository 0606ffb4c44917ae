pub mod event_repository;
pub mod payment_repository;
pub mod registration_repository;
pub mod reservation_repository;
