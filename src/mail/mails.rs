use super::sendmail::send_email;
use crate::{
    models::{
        bookingmodels::{BookingRequest, CounterOffer},
        usermodel::User,
    },
    utils::{dates, pricing},
};

pub async fn send_welcome_email(
    to_email: &str,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = "Welcome to TeenOp";
    let body = format!(
        "Hello {},\n\n\
         Welcome to TeenOp! Browse services from local teen providers, or list \
         your own services to start earning.\n\n\
         Best regards,\nThe TeenOp Team",
        name
    );

    send_email(to_email, subject, &body).await
}

/// Notify a provider that a new booking request arrived for one of their
/// services.
pub async fn send_booking_request_email(
    to_email: &str,
    provider_name: &str,
    customer: &User,
    service_title: &str,
    request: &BookingRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = format!("New Booking Request for {}", service_title);
    let body = booking_request_email_body(provider_name, customer, service_title, request);

    send_email(to_email, &subject, &body).await
}

/// Notify a customer that the provider accepted, declined, or countered
/// their request. `message_content` is the same text posted to the
/// conversation.
pub async fn send_request_response_email(
    to_email: &str,
    service_title: &str,
    status_text: &str,
    counter_offer: Option<&CounterOffer>,
    message_content: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = format!(
        "Booking Request {} - {}",
        capitalize_first(status_text),
        service_title
    );
    let body =
        request_response_email_body(service_title, status_text, counter_offer, message_content);

    send_email(to_email, &subject, &body).await
}

fn booking_request_email_body(
    provider_name: &str,
    customer: &User,
    service_title: &str,
    request: &BookingRequest,
) -> String {
    let preferred_times = request
        .preferred_dates
        .iter()
        .enumerate()
        .map(|(i, slot)| format!("{}. {}", i + 1, dates::format_slot(slot.date, slot.time)))
        .collect::<Vec<_>>()
        .join("\n");

    let location_line = request
        .location_details
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|location| format!("Location: {}", location))
        .unwrap_or_default();

    let notes_line = request
        .notes
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|notes| format!("Notes: {}", notes))
        .unwrap_or_default();

    format!(
        "Hello {},\n\n\
         You have a new booking request for your service \"{}\".\n\n\
         Customer: {} ({})\n\
         Phone: {}\n\
         Estimated Price: {}\n\n\
         Preferred Times:\n{}\n\n\
         Duration: {} hour(s)\n\
         {}\n\
         {}\n\n\
         Please log in to your TeenOp account to accept, decline, or propose an \
         alternative time. You can also message the customer directly through the \
         Messages section.\n\n\
         Best regards,\nThe TeenOp Team",
        provider_name,
        service_title,
        customer.full_name,
        customer.email,
        request.customer_phone,
        pricing::format_usd(request.total_estimated_price),
        preferred_times,
        request.duration_hours,
        location_line,
        notes_line,
    )
}

fn request_response_email_body(
    service_title: &str,
    status_text: &str,
    counter_offer: Option<&CounterOffer>,
    message_content: &str,
) -> String {
    let counter_info = counter_offer
        .map(|offer| {
            format!(
                "Alternative time suggested: {}\n\n",
                dates::format_slot(offer.date, offer.time)
            )
        })
        .unwrap_or_default();

    format!(
        "Hello!\n\n\
         Your booking request for \"{}\" has been {}.\n\n\
         {}Provider message: {}\n\n\
         Log in to your TeenOp account to view the full details in your Messages.\n\n\
         Best regards,\nTeenOp Team",
        service_title, status_text, counter_info, message_content,
    )
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bookingmodels::{PreferredDate, RequestStatus};
    use crate::models::usermodel::UserType;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use sqlx::types::Json;
    use uuid::Uuid;

    fn sample_customer() -> User {
        User {
            id: Uuid::new_v4(),
            full_name: "Jamie Rivera".to_string(),
            email: "jamie@example.com".to_string(),
            password: "hashed".to_string(),
            phone: Some("555-123-4567".to_string()),
            location: Some("Austin, TX".to_string()),
            user_type: UserType::Customer,
            business_name: None,
            bio: None,
            profile_image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_request() -> BookingRequest {
        BookingRequest {
            id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            preferred_dates: Json(vec![
                PreferredDate {
                    date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
                    time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                },
                PreferredDate {
                    date: NaiveDate::from_ymd_opt(2025, 8, 16).unwrap(),
                    time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
                },
            ]),
            duration_hours: 2.0,
            location_details: Some("Backyard, gate code 4321".to_string()),
            notes: None,
            customer_phone: "555-123-4567".to_string(),
            total_estimated_price: 30.0,
            status: RequestStatus::Pending,
            provider_response: None,
            counter_offer: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_booking_request_body_lists_numbered_slots() {
        let body =
            booking_request_email_body("Alex", &sample_customer(), "Lawn Mowing", &sample_request());

        assert!(body.contains("Hello Alex,"));
        assert!(body.contains("your service \"Lawn Mowing\""));
        assert!(body.contains("Customer: Jamie Rivera (jamie@example.com)"));
        assert!(body.contains("Estimated Price: $30"));
        assert!(body.contains("1. Friday, Aug 15, 2025 at 09:00"));
        assert!(body.contains("2. Saturday, Aug 16, 2025 at 14:30"));
        assert!(body.contains("Duration: 2 hour(s)"));
        assert!(body.contains("Location: Backyard, gate code 4321"));
        assert!(!body.contains("Notes:"));
    }

    #[test]
    fn test_response_body_without_counter_offer() {
        let body = request_response_email_body(
            "Lawn Mowing",
            "accepted",
            None,
            "I've accepted your booking request! I look forward to it.",
        );

        assert!(body.contains("has been accepted."));
        assert!(!body.contains("Alternative time suggested"));
        assert!(body.contains(
            "Provider message: I've accepted your booking request! I look forward to it."
        ));
    }

    #[test]
    fn test_response_body_with_counter_offer() {
        let offer = CounterOffer {
            date: NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            notes: None,
        };
        let body = request_response_email_body(
            "Lawn Mowing",
            "updated with an alternative",
            Some(&offer),
            "I'd like to suggest an alternative time: Aug 20, 2025 at 10:00.",
        );

        assert!(body.contains("has been updated with an alternative."));
        assert!(body.contains("Alternative time suggested: Wednesday, Aug 20, 2025 at 10:00"));
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("accepted"), "Accepted");
        assert_eq!(
            capitalize_first("updated with an alternative"),
            "Updated with an alternative"
        );
        assert_eq!(capitalize_first(""), "");
    }
}
