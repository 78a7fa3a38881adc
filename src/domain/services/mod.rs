pub mod auth_service;
pub mod booking_service;
pub mod defaults;
pub mod filters;
pub mod lifecycle;
pub mod statistics;
