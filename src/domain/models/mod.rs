pub mod email;
pub mod event;
pub mod food_token;
pub mod payment;
pub mod registration;
pub mod reservation;
pub mod team;
