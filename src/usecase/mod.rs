pub mod finalize_registration_usecase;
pub mod list_events_usecase;
pub mod release_reservation_usecase;
pub mod reserve_slots_usecase;
pub mod verify_payment_usecase;
