// Database access layer
pub mod db;

pub mod bookingdb;
pub mod chatdb;
pub mod reviewdb;
pub mod servicedb;
pub mod userdb;
