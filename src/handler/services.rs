use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{reviewdb::ReviewExt, servicedb::ServiceExt, userdb::UserExt},
    dtos::{
        reviewdtos::{CreateReviewDto, ReviewListResponseDto},
        servicedtos::*,
        userdtos::PublicUserDto,
    },
    error::HttpError,
    middleware::{auth, JWTAuthMiddeware},
    models::usermodel::UserType,
    AppState,
};

pub fn services_handler() -> Router {
    let public_routes = Router::new()
        .route("/", get(browse_services))
        .route("/:service_id", get(get_service_detail))
        .route("/:service_id/reviews", get(get_service_reviews));

    let protected_routes = Router::new()
        .route("/", post(create_service))
        .route("/mine", get(get_my_services))
        .route("/:service_id", put(update_service))
        .route("/:service_id/reviews", post(create_review))
        .layer(middleware::from_fn(auth));

    public_routes.merge(protected_routes)
}

pub async fn browse_services(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<ServiceQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let limit = query.limit.unwrap_or(50);

    let services = app_state
        .db_client
        .list_active_services(query.category, query.search.as_deref(), limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ServiceListResponseDto {
        status: "success".to_string(),
        results: services.len() as i64,
        services,
    }))
}

pub async fn get_service_detail(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(service_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let service = app_state
        .db_client
        .get_service(service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Service not found"))?;

    let provider = app_state
        .db_client
        .get_user(Some(service.provider_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .map(|user| PublicUserDto::from_user(&user));

    let reviews = app_state
        .db_client
        .list_reviews_for_service(service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let average_rating = ServiceDetailDto::average_of(&reviews);

    Ok(Json(json!({
        "status": "success",
        "data": ServiceDetailDto {
            service,
            provider,
            reviews,
            average_rating,
        }
    })))
}

pub async fn create_service(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateServiceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let service = app_state
        .db_client
        .save_service(user.user.id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // A customer listing their first service becomes a provider as well
    if user.user.user_type == UserType::Customer {
        app_state
            .db_client
            .upgrade_user_type(user.user.id, UserType::Both)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    Ok((
        StatusCode::CREATED,
        Json(ServiceResponseDto {
            status: "success".to_string(),
            data: ServiceData { service },
        }),
    ))
}

pub async fn update_service(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(service_id): Path<Uuid>,
    Json(body): Json<UpdateServiceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_service(service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Service not found"))?;

    if existing.provider_id != user.user.id {
        return Err(HttpError::unauthorized(
            "Not authorized to edit this service",
        ));
    }

    let service = app_state
        .db_client
        .update_service(service_id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ServiceResponseDto {
        status: "success".to_string(),
        data: ServiceData { service },
    }))
}

pub async fn get_my_services(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let services = app_state
        .db_client
        .list_services_by_provider(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ServiceListResponseDto {
        status: "success".to_string(),
        results: services.len() as i64,
        services,
    }))
}

pub async fn get_service_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(service_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .list_reviews_for_service(service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReviewListResponseDto {
        status: "success".to_string(),
        results: reviews.len() as i64,
        reviews,
    }))
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(service_id): Path<Uuid>,
    Json(body): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let _ = app_state
        .db_client
        .get_service(service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Service not found"))?;

    let result = app_state
        .db_client
        .save_review(service_id, user.user.id, body.rating, body.comment)
        .await;

    match result {
        Ok(review) => Ok((
            StatusCode::CREATED,
            Json(json!({
                "status": "success",
                "data": review
            })),
        )),
        Err(sqlx::Error::Database(db_err)) => {
            if db_err.is_unique_violation() {
                Err(HttpError::unique_constraint_violation(
                    "You have already reviewed this service",
                ))
            } else {
                Err(HttpError::server_error(db_err.to_string()))
            }
        }
        Err(e) => Err(HttpError::server_error(e.to_string())),
    }
}
