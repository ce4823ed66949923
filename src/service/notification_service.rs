// services/notification_service.rs
use std::sync::Arc;

use crate::{
    db::{db::DBClient, userdb::UserExt},
    mail::mails,
    models::{
        bookingmodels::{BookingRequest, CounterOffer},
        servicemodel::Service,
        usermodel::User,
    },
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn notify_welcome(&self, user: &User) -> Result<(), ServiceError> {
        tracing::info!("Welcome notification: sending to {}", user.email);

        mails::send_welcome_email(&user.email, &user.full_name).await?;
        Ok(())
    }

    /// Email the provider about a freshly submitted booking request.
    pub async fn notify_booking_request(
        &self,
        request: &BookingRequest,
        service: &Service,
        customer: &User,
    ) -> Result<(), ServiceError> {
        let provider = self
            .db_client
            .get_user(Some(request.provider_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(request.provider_id))?;

        tracing::info!(
            "Booking request notification: provider {} has a new request for service {}",
            provider.id,
            service.id
        );

        mails::send_booking_request_email(
            &provider.email,
            provider_greeting_name(&provider),
            customer,
            &service.title,
            request,
        )
        .await?;

        Ok(())
    }

    /// Email the customer after the provider responded. `counter_offer` is the
    /// offer from this response, not whatever the row may have stored from an
    /// earlier one.
    pub async fn notify_request_response(
        &self,
        request: &BookingRequest,
        service: &Service,
        status_text: &str,
        counter_offer: Option<&CounterOffer>,
        message_content: &str,
    ) -> Result<(), ServiceError> {
        let customer = self
            .db_client
            .get_user(Some(request.customer_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(request.customer_id))?;

        tracing::info!(
            "Request response notification: customer {} notified that request {} was {}",
            customer.id,
            request.id,
            status_text
        );

        mails::send_request_response_email(
            &customer.email,
            &service.title,
            status_text,
            counter_offer,
            message_content,
        )
        .await?;

        Ok(())
    }
}

fn provider_greeting_name(provider: &User) -> &str {
    if !provider.full_name.trim().is_empty() {
        &provider.full_name
    } else if let Some(name) = provider
        .business_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
    {
        name
    } else {
        "Provider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usermodel::UserType;
    use chrono::Utc;
    use uuid::Uuid;

    fn provider_named(full_name: &str, business_name: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            full_name: full_name.to_string(),
            email: "provider@example.com".to_string(),
            password: "hashed".to_string(),
            phone: None,
            location: None,
            user_type: UserType::Provider,
            business_name: business_name.map(|name| name.to_string()),
            bio: None,
            profile_image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_greeting_prefers_full_name() {
        let provider = provider_named("Alex Chen", Some("Chen Lawn Care"));
        assert_eq!(provider_greeting_name(&provider), "Alex Chen");
    }

    #[test]
    fn test_greeting_falls_back_to_business_name() {
        let provider = provider_named("", Some("Chen Lawn Care"));
        assert_eq!(provider_greeting_name(&provider), "Chen Lawn Care");
    }

    #[test]
    fn test_greeting_defaults_when_both_blank() {
        let provider = provider_named("", None);
        assert_eq!(provider_greeting_name(&provider), "Provider");
    }
}
