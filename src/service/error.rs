use thiserror::Error;
use uuid::Uuid;
use crate::error::HttpError;
use axum::http::StatusCode;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Service {0} not found")]
    ServiceNotFound(Uuid),

    #[error("Booking request {0} not found")]
    BookingRequestNotFound(Uuid),

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("User {0} is not authorized to respond to booking request {1}")]
    UnauthorizedRequestAccess(Uuid, Uuid),

    #[error("Booking request {0} has already been responded to")]
    RequestAlreadyResolved(Uuid),

    #[error("Please complete your profile (full name, location, and phone number) before making a booking request.")]
    ProfileIncomplete { redirect: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Notification error: {0}")]
    Notification(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let message = error.to_string();
        match error {
            ServiceError::ServiceNotFound(_)
            | ServiceError::BookingRequestNotFound(_)
            | ServiceError::UserNotFound(_) => HttpError::not_found(message),

            ServiceError::Validation(_) => HttpError::bad_request(message),

            ServiceError::UnauthorizedRequestAccess(_, _) => HttpError::unauthorized(message),

            ServiceError::RequestAlreadyResolved(_) => {
                HttpError::unique_constraint_violation(message)
            }

            ServiceError::ProfileIncomplete { redirect } => {
                HttpError::redirect_to(message, redirect)
            }

            _ => HttpError::server_error(message),
        }
    }
}

impl From<Box<dyn std::error::Error>> for ServiceError {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        ServiceError::Notification(err.to_string())
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ServiceNotFound(_)
            | ServiceError::BookingRequestNotFound(_)
            | ServiceError::UserNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::UnauthorizedRequestAccess(_, _) => StatusCode::UNAUTHORIZED,

            ServiceError::RequestAlreadyResolved(_) => StatusCode::CONFLICT,

            ServiceError::ProfileIncomplete { .. } => StatusCode::FORBIDDEN,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,

            ServiceError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
