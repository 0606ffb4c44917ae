pub use super::events::Entity as Events;
pub use super::food_tokens::Entity as FoodTokens;
pub use super::payments::Entity as Payments;
pub use super::registration_events::Entity as RegistrationEvents;
pub use super::registrations::Entity as Registrations;
pub use super::slot_reservations::Entity as SlotReservations;
