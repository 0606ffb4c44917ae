pub mod prelude;

pub mod events;
pub mod food_tokens;
pub mod payments;
pub mod registration_events;
pub mod registrations;
pub mod slot_reservations;
