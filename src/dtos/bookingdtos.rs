// dtos/bookingdtos.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::bookingmodels::{Booking, BookingRequest, PreferredDate, RequestStatus};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SubmitBookingRequestDto {
    pub service_id: Uuid,

    #[validate(length(min = 1, max = 3, message = "Choose between one and three preferred times"))]
    pub preferred_dates: Vec<PreferredDate>,

    #[validate(range(min = 0.5, max = 24.0, message = "Duration must be between 0.5 and 24 hours"))]
    pub duration_hours: f64,

    #[validate(length(max = 500, message = "Location details must be at most 500 characters"))]
    pub location_details: Option<String>,

    #[validate(length(max = 300, message = "Notes must be at most 300 characters"))]
    pub notes: Option<String>,

    #[validate(length(min = 10, max = 20, message = "Phone number must be between 10-20 characters"))]
    pub phone: String,

    /// The page the customer was on; echoed back in guard redirects.
    pub return_url: Option<String>,
}

impl SubmitBookingRequestDto {
    pub fn validate_phone_number(&self) -> Result<(), ValidationError> {
        let phone_regex =
            regex::Regex::new(r"^(\+?[0-9]{1,3}[- ]?)?[0-9]{3}[- ]?[0-9]{3}[- ]?[0-9]{4}$")
                .map_err(|_| ValidationError::new("invalid_phone_regex"))?;

        if !phone_regex.is_match(&self.phone) {
            let mut error = ValidationError::new("invalid_phone");
            error.message = Some(Cow::from(
                "Phone number must be in a valid format (e.g., +1234567890 or 123-456-7890)",
            ));
            return Err(error);
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RespondAction {
    Accept,
    Decline,
    Counter,
}

impl RespondAction {
    pub fn new_status(&self) -> RequestStatus {
        match self {
            RespondAction::Accept => RequestStatus::Accepted,
            RespondAction::Decline => RequestStatus::Declined,
            RespondAction::Counter => RequestStatus::CounterOffered,
        }
    }

    /// Lowercase phrase used in customer-facing copy: "has been accepted" etc.
    pub fn status_text(&self) -> &'static str {
        match self {
            RespondAction::Accept => "accepted",
            RespondAction::Decline => "declined",
            RespondAction::Counter => "updated with an alternative",
        }
    }
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RespondToRequestDto {
    pub response: RespondAction,

    #[validate(length(max = 300, message = "Message must be at most 300 characters"))]
    pub message: Option<String>,

    pub counter_date: Option<NaiveDate>,
    pub counter_time: Option<NaiveTime>,

    #[validate(length(max = 200, message = "Counter-offer notes must be at most 200 characters"))]
    pub counter_notes: Option<String>,
}

impl RespondToRequestDto {
    /// Counter-offers must carry both a date and a time; accept/decline carry
    /// neither requirement.
    pub fn validate_counter_offer(&self) -> Result<(), ValidationError> {
        if self.response == RespondAction::Counter
            && (self.counter_date.is_none() || self.counter_time.is_none())
        {
            let mut error = ValidationError::new("counter_offer_incomplete");
            error.message = Some(Cow::from(
                "Please select both a date and a time for your counter-offer",
            ));
            return Err(error);
        }
        Ok(())
    }
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingDto {
    pub service_id: Uuid,
    pub booking_date: NaiveDate,
    pub booking_time: NaiveTime,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingRequestData {
    pub request: BookingRequest,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingRequestResponseDto {
    pub status: String,
    pub data: BookingRequestData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingRequestListResponseDto {
    pub status: String,
    pub requests: Vec<BookingRequest>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingListResponseDto {
    pub status: String,
    pub bookings: Vec<Booking>,
    pub results: i64,
}

/// Provider dashboard aggregates.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, sqlx::FromRow)]
pub struct ProviderStatsDto {
    pub active_services: i64,
    pub total_bookings: i64,
    pub pending_requests: i64,
    pub total_earnings: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preferred(date: &str, time: &str) -> PreferredDate {
        PreferredDate {
            date: date.parse().unwrap(),
            time: time.parse().unwrap(),
        }
    }

    fn submit_dto() -> SubmitBookingRequestDto {
        SubmitBookingRequestDto {
            service_id: Uuid::new_v4(),
            preferred_dates: vec![preferred("2026-08-22", "09:00:00")],
            duration_hours: 2.0,
            location_details: None,
            notes: None,
            phone: "555-123-4567".to_string(),
            return_url: None,
        }
    }

    #[test]
    fn submission_allows_one_to_three_slots() {
        let mut dto = submit_dto();
        assert!(dto.validate().is_ok());

        dto.preferred_dates = vec![];
        assert!(dto.validate().is_err());

        dto.preferred_dates = vec![
            preferred("2026-08-22", "09:00:00"),
            preferred("2026-08-23", "10:00:00"),
            preferred("2026-08-24", "11:00:00"),
            preferred("2026-08-25", "12:00:00"),
        ];
        assert!(dto.validate().is_err());
    }

    #[test]
    fn submission_rejects_overlong_notes() {
        let mut dto = submit_dto();
        dto.notes = Some("n".repeat(301));
        assert!(dto.validate().is_err());
        dto.notes = Some("n".repeat(300));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn submission_validates_phone_shape() {
        let mut dto = submit_dto();
        assert!(dto.validate_phone_number().is_ok());
        dto.phone = "not a phone".to_string();
        assert!(dto.validate_phone_number().is_err());
    }

    #[test]
    fn counter_requires_date_and_time() {
        let mut dto = RespondToRequestDto {
            response: RespondAction::Counter,
            message: None,
            counter_date: None,
            counter_time: None,
            counter_notes: None,
        };
        assert!(dto.validate_counter_offer().is_err());

        dto.counter_date = Some("2026-09-01".parse().unwrap());
        assert!(dto.validate_counter_offer().is_err());

        dto.counter_time = Some("14:30:00".parse().unwrap());
        assert!(dto.validate_counter_offer().is_ok());
    }

    #[test]
    fn accept_and_decline_skip_counter_validation() {
        for response in [RespondAction::Accept, RespondAction::Decline] {
            let dto = RespondToRequestDto {
                response,
                message: Some("ok".to_string()),
                counter_date: None,
                counter_time: None,
                counter_notes: None,
            };
            assert!(dto.validate_counter_offer().is_ok());
        }
    }

    #[test]
    fn actions_map_to_statuses_and_copy() {
        assert_eq!(RespondAction::Accept.new_status(), RequestStatus::Accepted);
        assert_eq!(RespondAction::Decline.new_status(), RequestStatus::Declined);
        assert_eq!(
            RespondAction::Counter.new_status(),
            RequestStatus::CounterOffered
        );
        assert_eq!(RespondAction::Accept.status_text(), "accepted");
        assert_eq!(RespondAction::Decline.status_text(), "declined");
        assert_eq!(
            RespondAction::Counter.status_text(),
            "updated with an alternative"
        );
    }

    #[test]
    fn respond_actions_deserialize_lowercase() {
        let dto: RespondToRequestDto =
            serde_json::from_str(r#"{"response": "counter"}"#).unwrap();
        assert_eq!(dto.response, RespondAction::Counter);
    }
}
