use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use futures::future::join_all;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{chatdb::ChatExt, servicedb::ServiceExt, userdb::UserExt},
    dtos::userdtos::PublicUserDto,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{
        chatmodels::{ChatMessage, Conversation, MessageType, SenderType},
        servicemodel::Service,
        usermodel::UserType,
    },
    AppState,
};

pub fn chat_handler() -> Router {
    Router::new()
        .route("/conversations", get(get_conversations))
        .route(
            "/conversations/:conversation_id/messages",
            get(get_messages).post(send_message),
        )
        .route(
            "/conversations/:conversation_id/read",
            put(mark_conversation_read),
        )
}

/// A conversation enriched with the related service and the other
/// participant, as list views render it.
#[derive(Debug, Serialize, Clone)]
pub struct ConversationWithDetails {
    pub conversation: Conversation,
    pub service: Option<Service>,
    pub other_user: Option<PublicUserDto>,
    pub unread_count: i32,
}

/// Union of the viewer's customer-side and provider-side threads,
/// de-duplicated by id and ordered by last activity, newest first.
fn merge_conversations(
    mut as_customer: Vec<Conversation>,
    as_provider: Vec<Conversation>,
) -> Vec<Conversation> {
    let mut seen: HashSet<Uuid> = as_customer.iter().map(|c| c.id).collect();
    for conversation in as_provider {
        if seen.insert(conversation.id) {
            as_customer.push(conversation);
        }
    }
    as_customer.sort_by(|a, b| b.last_activity().cmp(&a.last_activity()));
    as_customer
}

pub async fn get_conversations(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let viewer = &auth.user;

    let conversations = match viewer.user_type {
        UserType::Customer => app_state
            .db_client
            .list_conversations_for_customer(viewer.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
        UserType::Provider => app_state
            .db_client
            .list_conversations_for_provider(viewer.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
        UserType::Both => {
            let as_customer = app_state
                .db_client
                .list_conversations_for_customer(viewer.id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;
            let as_provider = app_state
                .db_client
                .list_conversations_for_provider(viewer.id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;
            merge_conversations(as_customer, as_provider)
        }
    };

    // Enrichment runs concurrently across conversations; within one
    // conversation the service and user lookups stay sequential.
    let viewer_id = viewer.id;
    let lookups = conversations.into_iter().map(|conversation| {
        let app_state = app_state.clone();
        async move {
            let service = app_state
                .db_client
                .get_service(conversation.service_id)
                .await?;

            let other_user_id = if conversation.customer_id == viewer_id {
                conversation.provider_id
            } else {
                conversation.customer_id
            };
            let other_user = app_state.db_client.get_user(Some(other_user_id), None).await?;

            let unread_count = match conversation.role_of(viewer_id) {
                SenderType::Customer => conversation.customer_unread_count,
                SenderType::Provider => conversation.provider_unread_count,
            };

            Ok::<ConversationWithDetails, sqlx::Error>(ConversationWithDetails {
                conversation,
                service,
                other_user: other_user.map(|user| PublicUserDto::from_user(&user)),
                unread_count,
            })
        }
    });

    let details = join_all(lookups)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "results": details.len(),
        "data": details
    })))
}

pub async fn get_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(conversation_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let conversation = participant_conversation(&app_state, conversation_id, auth.user.id).await?;

    let messages: Vec<ChatMessage> = app_state
        .db_client
        .get_messages(conversation.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "results": messages.len(),
        "data": messages
    })))
}

#[derive(Debug, serde::Deserialize, Validate)]
pub struct SendMessageDto {
    #[validate(length(min = 1, max = 2000, message = "Message must be between 1-2000 characters"))]
    pub content: String,
    pub message_type: Option<MessageType>,
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(conversation_id): Path<Uuid>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let conversation = participant_conversation(&app_state, conversation_id, auth.user.id).await?;

    let message = app_state
        .db_client
        .create_message(
            conversation.id,
            auth.user.id,
            conversation.role_of(auth.user.id),
            body.content,
            body.message_type.unwrap_or(MessageType::Text),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": message
        })),
    ))
}

pub async fn mark_conversation_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(conversation_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let conversation = participant_conversation(&app_state, conversation_id, auth.user.id).await?;

    app_state
        .db_client
        .mark_conversation_read(conversation.id, conversation.role_of(auth.user.id))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Conversation marked as read"
    })))
}

async fn participant_conversation(
    app_state: &AppState,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Result<Conversation, HttpError> {
    let conversation = app_state
        .db_client
        .get_conversation(conversation_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Conversation not found"))?;

    if !conversation.is_participant(user_id) {
        return Err(HttpError::unauthorized(
            "Not authorized to view this conversation",
        ));
    }

    Ok(conversation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn conversation(minutes_ago: i64) -> Conversation {
        let now = Utc::now();
        Conversation {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            booking_request_id: None,
            last_message_at: Some(now - Duration::minutes(minutes_ago)),
            last_message_preview: None,
            customer_unread_count: 0,
            provider_unread_count: 0,
            created_at: Some(now - Duration::hours(1)),
        }
    }

    #[test]
    fn merge_drops_duplicates_by_id() {
        let shared = conversation(10);
        let merged = merge_conversations(
            vec![shared.clone(), conversation(20)],
            vec![shared.clone(), conversation(5)],
        );
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.iter().filter(|c| c.id == shared.id).count(), 1);
    }

    #[test]
    fn merge_orders_by_last_activity_descending() {
        let merged = merge_conversations(
            vec![conversation(30), conversation(5)],
            vec![conversation(15)],
        );
        let activities: Vec<_> = merged.iter().map(|c| c.last_activity()).collect();
        let mut sorted = activities.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(activities, sorted);
    }

    #[test]
    fn merge_falls_back_to_created_at_when_never_messaged() {
        let mut silent = conversation(0);
        silent.last_message_at = None;
        // created an hour ago, so it sorts after a fresh message
        let merged = merge_conversations(vec![silent.clone()], vec![conversation(5)]);
        assert_eq!(merged.last().map(|c| c.id), Some(silent.id));
    }
}
