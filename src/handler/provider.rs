use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};
use serde_json::json;

use crate::{
    db::bookingdb::BookingExt, error::HttpError, middleware::JWTAuthMiddeware, AppState,
};

pub fn provider_handler() -> Router {
    Router::new().route("/stats", get(get_provider_stats))
}

/// Dashboard aggregates for the authenticated provider.
pub async fn get_provider_stats(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state
        .db_client
        .get_provider_stats(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": stats
    })))
}
