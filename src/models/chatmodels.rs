// models/chatmodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "sender_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SenderType {
    Customer,
    Provider,
}

impl SenderType {
    pub fn to_str(&self) -> &str {
        match self {
            SenderType::Customer => "customer",
            SenderType::Provider => "provider",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "message_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    System,
}

impl MessageType {
    pub fn to_str(&self) -> &str {
        match self {
            MessageType::Text => "text",
            MessageType::System => "system",
        }
    }
}

/// A (customer, provider, service) thread. `booking_request_id` is a
/// back-reference to the most recent request that touched the thread, not an
/// ownership relation.
#[derive(Debug, Serialize, Clone, Deserialize, sqlx::FromRow)]
pub struct Conversation {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub booking_request_id: Option<Uuid>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub last_message_preview: Option<String>,
    pub customer_unread_count: i32,
    pub provider_unread_count: i32,
    pub created_at: Option<DateTime<Utc>>,
}

impl Conversation {
    /// Last activity used for ordering conversation lists.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.last_message_at.or(self.created_at)
    }

    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.customer_id == user_id || self.provider_id == user_id
    }

    /// Which side of the thread the given participant is on.
    pub fn role_of(&self, user_id: Uuid) -> SenderType {
        if self.customer_id == user_id {
            SenderType::Customer
        } else {
            SenderType::Provider
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ChatMessage {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub sender_type: SenderType,
    pub content: String,
    pub message_type: MessageType,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sender_and_message_types_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(SenderType::Customer).unwrap(),
            json!("customer")
        );
        assert_eq!(
            serde_json::to_value(MessageType::System).unwrap(),
            json!("system")
        );
        let parsed: SenderType = serde_json::from_value(json!("provider")).unwrap();
        assert_eq!(parsed, SenderType::Provider);
        let parsed: MessageType = serde_json::from_value(json!("text")).unwrap();
        assert_eq!(parsed, MessageType::Text);
    }
}
