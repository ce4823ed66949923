pub mod bookingdtos;
pub mod reviewdtos;
pub mod servicedtos;
pub mod userdtos;
