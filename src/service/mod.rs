pub mod booking_service;
pub mod error;
pub mod notification_service;
