pub mod bookingmodels;
pub mod chatmodels;
pub mod reviewmodel;
pub mod servicemodel;
pub mod usermodel;
