pub mod clock;
pub mod food_pass_service;
pub mod notification_service;
pub mod payment_gateway;
