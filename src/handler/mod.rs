pub mod auth;
pub mod bookings;
pub mod chat;
pub mod provider;
pub mod services;
pub mod users;
