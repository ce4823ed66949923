use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{bookingdb::BookingExt, servicedb::ServiceExt},
    dtos::bookingdtos::*,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn bookings_handler() -> Router {
    Router::new()
        .route("/", post(create_booking))
        .route("/mine", get(get_my_bookings))
        .route("/incoming", get(get_incoming_bookings))
        .route("/requests", post(submit_booking_request))
        .route("/requests/mine", get(get_my_requests))
        .route("/requests/incoming", get(get_incoming_requests))
        .route("/requests/:request_id", get(get_request_detail))
        .route("/requests/:request_id/respond", post(respond_to_request))
}

pub async fn submit_booking_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<SubmitBookingRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    body.validate_phone_number()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let request_id = app_state
        .booking_service
        .submit_request(&user.user, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": {
                "request_id": request_id
            }
        })),
    ))
}

pub async fn respond_to_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<RespondToRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    body.validate_counter_offer()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let request = app_state
        .booking_service
        .respond_request(&user.user, request_id, body)
        .await?;

    Ok(Json(BookingRequestResponseDto {
        status: "success".to_string(),
        data: BookingRequestData { request },
    }))
}

/// Status-page data: the request plus its service, visible only to the two
/// participants.
pub async fn get_request_detail(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let request = app_state
        .db_client
        .get_booking_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Booking request not found"))?;

    if request.customer_id != user.user.id && request.provider_id != user.user.id {
        return Err(HttpError::unauthorized(
            "Not authorized to view this booking request",
        ));
    }

    let service = app_state
        .db_client
        .get_service(request.service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "request": request,
            "service": service
        }
    })))
}

pub async fn get_my_requests(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let requests = app_state
        .db_client
        .list_requests_by_customer(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(BookingRequestListResponseDto {
        status: "success".to_string(),
        results: requests.len() as i64,
        requests,
    }))
}

pub async fn get_incoming_requests(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let requests = app_state
        .db_client
        .list_requests_by_provider(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(BookingRequestListResponseDto {
        status: "success".to_string(),
        results: requests.len() as i64,
        requests,
    }))
}

/// Direct booking of a fixed slot, charged at the service's flat price.
pub async fn create_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let service = app_state
        .db_client
        .get_service(body.service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Service not found"))?;

    let booking = app_state
        .db_client
        .create_booking(
            service.id,
            user.user.id,
            service.provider_id,
            body.booking_date,
            body.booking_time,
            body.notes,
            service.price,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": {
                "booking": booking
            }
        })),
    ))
}

pub async fn get_my_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let bookings = app_state
        .db_client
        .list_bookings_by_customer(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(BookingListResponseDto {
        status: "success".to_string(),
        results: bookings.len() as i64,
        bookings,
    }))
}

pub async fn get_incoming_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let bookings = app_state
        .db_client
        .list_bookings_by_provider(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(BookingListResponseDto {
        status: "success".to_string(),
        results: bookings.len() as i64,
        bookings,
    }))
}
