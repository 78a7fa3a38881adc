pub mod auth;
pub mod booking;
pub mod booking_management;
pub mod health;
pub mod resource;
pub mod user;
