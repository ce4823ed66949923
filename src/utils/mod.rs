pub mod dates;
pub mod password;
pub mod pricing;
pub mod token;
