// db/chatdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::chatmodels::*;

/// Stored alongside the conversation row so list views can render the
/// latest message without touching the messages table.
const PREVIEW_MAX_CHARS: usize = 50;

fn message_preview(content: &str) -> String {
    content.chars().take(PREVIEW_MAX_CHARS).collect()
}

#[async_trait]
pub trait ChatExt {
    // Conversation management
    async fn find_conversations(
        &self,
        customer_id: Uuid,
        provider_id: Uuid,
        service_id: Uuid,
    ) -> Result<Vec<Conversation>, Error>;

    async fn create_conversation(
        &self,
        customer_id: Uuid,
        provider_id: Uuid,
        service_id: Uuid,
        booking_request_id: Option<Uuid>,
    ) -> Result<Conversation, Error>;

    async fn attach_booking_request(
        &self,
        conversation_id: Uuid,
        booking_request_id: Uuid,
    ) -> Result<Conversation, Error>;

    async fn get_conversation(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Conversation>, Error>;

    async fn find_conversation_by_request(
        &self,
        booking_request_id: Uuid,
    ) -> Result<Option<Conversation>, Error>;

    async fn list_conversations_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<Conversation>, Error>;

    async fn list_conversations_for_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<Conversation>, Error>;

    // Message management
    async fn create_message(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        sender_type: SenderType,
        content: String,
        message_type: MessageType,
    ) -> Result<ChatMessage, Error>;

    async fn get_messages(&self, conversation_id: Uuid) -> Result<Vec<ChatMessage>, Error>;

    async fn mark_conversation_read(
        &self,
        conversation_id: Uuid,
        viewer: SenderType,
    ) -> Result<(), Error>;
}

#[async_trait]
impl ChatExt for DBClient {
    /// All threads for the (customer, provider, service) triple, oldest
    /// first. Duplicates are possible under concurrent creation.
    async fn find_conversations(
        &self,
        customer_id: Uuid,
        provider_id: Uuid,
        service_id: Uuid,
    ) -> Result<Vec<Conversation>, Error> {
        sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, customer_id, provider_id, service_id, booking_request_id,
                   last_message_at, last_message_preview, customer_unread_count,
                   provider_unread_count, created_at
            FROM conversations
            WHERE customer_id = $1 AND provider_id = $2 AND service_id = $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(customer_id)
        .bind(provider_id)
        .bind(service_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn create_conversation(
        &self,
        customer_id: Uuid,
        provider_id: Uuid,
        service_id: Uuid,
        booking_request_id: Option<Uuid>,
    ) -> Result<Conversation, Error> {
        sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (customer_id, provider_id, service_id, booking_request_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_id, provider_id, service_id, booking_request_id,
                      last_message_at, last_message_preview, customer_unread_count,
                      provider_unread_count, created_at
            "#,
        )
        .bind(customer_id)
        .bind(provider_id)
        .bind(service_id)
        .bind(booking_request_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn attach_booking_request(
        &self,
        conversation_id: Uuid,
        booking_request_id: Uuid,
    ) -> Result<Conversation, Error> {
        sqlx::query_as::<_, Conversation>(
            r#"
            UPDATE conversations
            SET booking_request_id = $2
            WHERE id = $1
            RETURNING id, customer_id, provider_id, service_id, booking_request_id,
                      last_message_at, last_message_preview, customer_unread_count,
                      provider_unread_count, created_at
            "#,
        )
        .bind(conversation_id)
        .bind(booking_request_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_conversation(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Conversation>, Error> {
        sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, customer_id, provider_id, service_id, booking_request_id,
                   last_message_at, last_message_preview, customer_unread_count,
                   provider_unread_count, created_at
            FROM conversations
            WHERE id = $1
            "#,
        )
        .bind(conversation_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_conversation_by_request(
        &self,
        booking_request_id: Uuid,
    ) -> Result<Option<Conversation>, Error> {
        sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, customer_id, provider_id, service_id, booking_request_id,
                   last_message_at, last_message_preview, customer_unread_count,
                   provider_unread_count, created_at
            FROM conversations
            WHERE booking_request_id = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(booking_request_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_conversations_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<Conversation>, Error> {
        sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, customer_id, provider_id, service_id, booking_request_id,
                   last_message_at, last_message_preview, customer_unread_count,
                   provider_unread_count, created_at
            FROM conversations
            WHERE customer_id = $1
            ORDER BY last_message_at DESC NULLS LAST, created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn list_conversations_for_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<Conversation>, Error> {
        sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, customer_id, provider_id, service_id, booking_request_id,
                   last_message_at, last_message_preview, customer_unread_count,
                   provider_unread_count, created_at
            FROM conversations
            WHERE provider_id = $1
            ORDER BY last_message_at DESC NULLS LAST, created_at DESC
            "#,
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn create_message(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        sender_type: SenderType,
        content: String,
        message_type: MessageType,
    ) -> Result<ChatMessage, Error> {
        let preview = message_preview(&content);
        let mut tx = self.pool.begin().await?;

        // Insert message
        let message = sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO messages (conversation_id, sender_id, sender_type, content, message_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, conversation_id, sender_id, sender_type, content,
                      message_type, created_at
            "#,
        )
        .bind(conversation_id)
        .bind(sender_id)
        .bind(sender_type)
        .bind(content)
        .bind(message_type)
        .fetch_one(&mut *tx)
        .await?;

        // Refresh conversation activity and bump the recipient's unread count
        sqlx::query(
            r#"
            UPDATE conversations
            SET last_message_at = NOW(),
                last_message_preview = $2,
                customer_unread_count = customer_unread_count
                    + CASE WHEN $3::sender_type = 'provider'::sender_type THEN 1 ELSE 0 END,
                provider_unread_count = provider_unread_count
                    + CASE WHEN $3::sender_type = 'customer'::sender_type THEN 1 ELSE 0 END
            WHERE id = $1
            "#,
        )
        .bind(conversation_id)
        .bind(preview)
        .bind(sender_type)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(message)
    }

    async fn get_messages(&self, conversation_id: Uuid) -> Result<Vec<ChatMessage>, Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, conversation_id, sender_id, sender_type, content,
                   message_type, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn mark_conversation_read(
        &self,
        conversation_id: Uuid,
        viewer: SenderType,
    ) -> Result<(), Error> {
        let query = match viewer {
            SenderType::Customer => {
                "UPDATE conversations SET customer_unread_count = 0 WHERE id = $1"
            }
            SenderType::Provider => {
                "UPDATE conversations SET provider_unread_count = 0 WHERE id = $1"
            }
        };

        sqlx::query(query)
            .bind(conversation_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_message_kept_whole() {
        assert_eq!(message_preview("See you at 3pm"), "See you at 3pm");
    }

    #[test]
    fn test_preview_truncates_at_fifty_chars() {
        let long = "a".repeat(80);
        let preview = message_preview(&long);
        assert_eq!(preview.chars().count(), 50);
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        let long = "é".repeat(60);
        let preview = message_preview(&long);
        assert_eq!(preview.chars().count(), 50);
        assert_eq!(preview, "é".repeat(50));
    }
}
