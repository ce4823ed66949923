// services/booking_service.rs
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::{
    db::{bookingdb::BookingExt, chatdb::ChatExt, db::DBClient, servicedb::ServiceExt},
    dtos::bookingdtos::{RespondAction, RespondToRequestDto, SubmitBookingRequestDto},
    models::{
        bookingmodels::{BookingRequest, CounterOffer, RequestStatus},
        chatmodels::{Conversation, MessageType, SenderType},
        usermodel::User,
    },
    service::{error::ServiceError, notification_service::NotificationService},
    utils::{dates, pricing},
};

const MISSING_COUNTER_FIELDS: &str =
    "Please select both a date and a time for your counter-offer";

#[derive(Debug, Clone)]
pub struct BookingService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl BookingService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    /// Submit a booking request on behalf of `customer`. Returns the new
    /// request id. Steps run sequentially; only the provider email is
    /// fire-and-forget.
    pub async fn submit_request(
        &self,
        customer: &User,
        request_data: SubmitBookingRequestDto,
    ) -> Result<Uuid, ServiceError> {
        // Profile must be complete before anything is written
        if !customer.missing_profile_fields().is_empty() {
            let return_to = request_data.return_url.as_deref().unwrap_or("/services");
            return Err(ServiceError::ProfileIncomplete {
                redirect: profile_redirect(return_to),
            });
        }

        let service = self
            .db_client
            .get_service(request_data.service_id)
            .await?
            .ok_or(ServiceError::ServiceNotFound(request_data.service_id))?;

        let total_estimated_price = pricing::estimate_total(
            service.pricing_model,
            service.price,
            request_data.duration_hours,
        );

        let request = self
            .db_client
            .create_booking_request(
                service.id,
                customer.id,
                service.provider_id,
                request_data.preferred_dates.clone(),
                request_data.duration_hours,
                request_data.location_details.clone(),
                request_data.notes.clone(),
                request_data.phone.clone(),
                total_estimated_price,
            )
            .await?;

        let existing = self
            .db_client
            .find_conversations(customer.id, service.provider_id, service.id)
            .await?;

        let conversation = match thread_for_request(existing) {
            Some(thread) => {
                self.db_client
                    .attach_booking_request(thread.id, request.id)
                    .await?
            }
            None => {
                self.db_client
                    .create_conversation(
                        customer.id,
                        service.provider_id,
                        service.id,
                        Some(request.id),
                    )
                    .await?
            }
        };

        let content = initial_request_message(&service.title, request_data.notes.as_deref());
        self.db_client
            .create_message(
                conversation.id,
                customer.id,
                SenderType::Customer,
                content,
                MessageType::Text,
            )
            .await?;

        if let Err(e) = self
            .notification_service
            .notify_booking_request(&request, &service, customer)
            .await
        {
            tracing::warn!(
                "Failed to send booking request email for request {}: {}",
                request.id,
                e
            );
        }

        Ok(request.id)
    }

    /// Apply the provider's accept/decline/counter response to a pending
    /// request, post the follow-up conversation message, and email the
    /// customer.
    pub async fn respond_request(
        &self,
        provider: &User,
        request_id: Uuid,
        response_data: RespondToRequestDto,
    ) -> Result<BookingRequest, ServiceError> {
        let request = self
            .db_client
            .get_booking_request(request_id)
            .await?
            .ok_or(ServiceError::BookingRequestNotFound(request_id))?;

        if request.provider_id != provider.id {
            return Err(ServiceError::UnauthorizedRequestAccess(
                provider.id,
                request_id,
            ));
        }

        ensure_pending(request_id, request.status)?;

        let service = self
            .db_client
            .get_service(request.service_id)
            .await?
            .ok_or(ServiceError::ServiceNotFound(request.service_id))?;

        let (counter_offer, message_content) = match response_data.response {
            RespondAction::Accept => (
                None,
                accept_message(response_data.message.as_deref()),
            ),
            RespondAction::Decline => (
                None,
                decline_message(response_data.message.as_deref()),
            ),
            RespondAction::Counter => {
                let date = response_data
                    .counter_date
                    .ok_or_else(|| ServiceError::Validation(MISSING_COUNTER_FIELDS.to_string()))?;
                let time = response_data
                    .counter_time
                    .ok_or_else(|| ServiceError::Validation(MISSING_COUNTER_FIELDS.to_string()))?;

                let content = counter_message(date, time, response_data.message.as_deref());
                let offer = CounterOffer {
                    date,
                    time,
                    notes: response_data.counter_notes.clone(),
                };
                (Some(offer), content)
            }
        };

        // The pending guard repeats inside the UPDATE, so a racing second
        // response loses even after the check above passed
        let updated = self
            .db_client
            .update_request_response(
                request_id,
                response_data.response.new_status(),
                response_data.message.clone(),
                counter_offer.clone(),
            )
            .await?
            .ok_or(ServiceError::RequestAlreadyResolved(request_id))?;

        // First conversation carrying this request id; if the customer's
        // conversation is gone the message is skipped without error
        if let Some(conversation) = self
            .db_client
            .find_conversation_by_request(request_id)
            .await?
        {
            self.db_client
                .create_message(
                    conversation.id,
                    provider.id,
                    SenderType::Provider,
                    message_content.clone(),
                    MessageType::Text,
                )
                .await?;
        }

        let status_text = response_data.response.status_text();
        if let Err(e) = self
            .notification_service
            .notify_request_response(
                &updated,
                &service,
                status_text,
                counter_offer.as_ref(),
                &message_content,
            )
            .await
        {
            tracing::warn!(
                "Failed to send booking response email for request {}: {}",
                request_id,
                e
            );
        }

        Ok(updated)
    }
}

/// The thread a new request lands in: the oldest existing conversation for
/// the (customer, provider, service) triple, or none if one must be created.
/// Duplicates can exist under concurrent creation; the oldest row is the
/// canonical one.
fn thread_for_request(existing: Vec<Conversation>) -> Option<Conversation> {
    existing
        .into_iter()
        .min_by_key(|conversation| conversation.created_at)
}

/// A request takes exactly one provider response; every status past pending
/// is terminal.
fn ensure_pending(request_id: Uuid, status: RequestStatus) -> Result<(), ServiceError> {
    if status == RequestStatus::Pending {
        Ok(())
    } else {
        Err(ServiceError::RequestAlreadyResolved(request_id))
    }
}

pub fn profile_redirect(return_to: &str) -> String {
    format!(
        "/profile?required=true&return={}",
        urlencoding::encode(return_to)
    )
}

fn message_or<'a>(message: Option<&'a str>, fallback: &'a str) -> &'a str {
    match message {
        Some(text) if !text.is_empty() => text,
        _ => fallback,
    }
}

fn initial_request_message(service_title: &str, notes: Option<&str>) -> String {
    format!(
        "Booking request sent for \"{}\". Notes: {}",
        service_title,
        message_or(notes, "No notes provided.")
    )
}

fn accept_message(message: Option<&str>) -> String {
    format!(
        "I've accepted your booking request! {}",
        message_or(message, "I look forward to it.")
    )
}

fn decline_message(message: Option<&str>) -> String {
    format!(
        "Unfortunately, I have to decline this request. {}",
        message_or(message, "Sorry for the inconvenience.")
    )
}

fn counter_message(date: NaiveDate, time: NaiveTime, message: Option<&str>) -> String {
    format!(
        "I'd like to suggest an alternative time: {} at {}. {}",
        dates::format_short_date(date),
        dates::format_clock_time(time),
        message.unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};

    fn conversation_created_minutes_ago(minutes: i64) -> Conversation {
        Conversation {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            booking_request_id: None,
            last_message_at: None,
            last_message_preview: None,
            customer_unread_count: 0,
            provider_unread_count: 0,
            created_at: Some(Utc::now() - Duration::minutes(minutes)),
        }
    }

    #[test]
    fn test_second_request_reuses_the_existing_conversation() {
        let existing = conversation_created_minutes_ago(60);
        let picked = thread_for_request(vec![existing.clone()]).unwrap();
        assert_eq!(picked.id, existing.id);
    }

    #[test]
    fn test_first_request_starts_a_new_conversation() {
        assert!(thread_for_request(Vec::new()).is_none());
    }

    #[test]
    fn test_oldest_duplicate_thread_is_canonical() {
        let oldest = conversation_created_minutes_ago(120);
        let newer = conversation_created_minutes_ago(30);
        let newest = conversation_created_minutes_ago(1);
        let picked =
            thread_for_request(vec![newer, oldest.clone(), newest]).unwrap();
        assert_eq!(picked.id, oldest.id);
    }

    #[test]
    fn test_only_pending_requests_accept_a_response() {
        let request_id = Uuid::new_v4();
        assert!(ensure_pending(request_id, RequestStatus::Pending).is_ok());

        for status in [
            RequestStatus::Accepted,
            RequestStatus::Declined,
            RequestStatus::CounterOffered,
        ] {
            let err = ensure_pending(request_id, status).unwrap_err();
            let http: HttpError = err.into();
            assert_eq!(http.status, StatusCode::CONFLICT);
        }
    }

    #[test]
    fn test_profile_redirect_urlencodes_return_url() {
        assert_eq!(
            profile_redirect("/services/123/book"),
            "/profile?required=true&return=%2Fservices%2F123%2Fbook"
        );
    }

    #[test]
    fn test_initial_message_with_and_without_notes() {
        assert_eq!(
            initial_request_message("Lawn Mowing", Some("Side gate is unlocked")),
            "Booking request sent for \"Lawn Mowing\". Notes: Side gate is unlocked"
        );
        assert_eq!(
            initial_request_message("Lawn Mowing", None),
            "Booking request sent for \"Lawn Mowing\". Notes: No notes provided."
        );
        assert_eq!(
            initial_request_message("Lawn Mowing", Some("")),
            "Booking request sent for \"Lawn Mowing\". Notes: No notes provided."
        );
    }

    #[test]
    fn test_accept_message_fallback() {
        assert_eq!(
            accept_message(None),
            "I've accepted your booking request! I look forward to it."
        );
        assert_eq!(
            accept_message(Some("See you Saturday.")),
            "I've accepted your booking request! See you Saturday."
        );
    }

    #[test]
    fn test_decline_message_fallback() {
        assert_eq!(
            decline_message(None),
            "Unfortunately, I have to decline this request. Sorry for the inconvenience."
        );
    }

    #[test]
    fn test_counter_message_formats_date_and_time() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        let time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert_eq!(
            counter_message(date, time, Some("Mornings work better for me.")),
            "I'd like to suggest an alternative time: Aug 20, 2025 at 10:00. Mornings work better for me."
        );
        assert_eq!(
            counter_message(date, time, None),
            "I'd like to suggest an alternative time: Aug 20, 2025 at 10:00. "
        );
    }
}
