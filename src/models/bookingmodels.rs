// models/bookingmodels.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
    CounterOffered,
}

impl RequestStatus {
    pub fn to_str(&self) -> &str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Declined => "declined",
            RequestStatus::CounterOffered => "counter_offered",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn to_str(&self) -> &str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// One customer-preferred slot. Requests carry between one and three of these,
/// in the order the customer entered them.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PreferredDate {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Provider-proposed alternative slot, stored verbatim from the response form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CounterOffer {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct BookingRequest {
    pub id: Uuid,
    pub service_id: Uuid,
    pub customer_id: Uuid,
    pub provider_id: Uuid,
    pub preferred_dates: Json<Vec<PreferredDate>>,
    pub duration_hours: f64,
    pub location_details: Option<String>,
    pub notes: Option<String>,
    pub customer_phone: String,
    pub total_estimated_price: f64,
    pub status: RequestStatus,
    pub provider_response: Option<String>,
    pub counter_offer: Option<Json<CounterOffer>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub service_id: Uuid,
    pub customer_id: Uuid,
    pub provider_id: Uuid,
    pub booking_date: NaiveDate,
    pub booking_time: NaiveTime,
    pub notes: Option<String>,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_statuses_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(RequestStatus::CounterOffered).unwrap(),
            json!("counter_offered")
        );
        assert_eq!(
            serde_json::to_value(RequestStatus::Pending).unwrap(),
            json!("pending")
        );
        let parsed: RequestStatus = serde_json::from_value(json!("declined")).unwrap();
        assert_eq!(parsed, RequestStatus::Declined);
    }

    #[test]
    fn booking_statuses_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(BookingStatus::Completed).unwrap(),
            json!("completed")
        );
        let parsed: BookingStatus = serde_json::from_value(json!("cancelled")).unwrap();
        assert_eq!(parsed, BookingStatus::Cancelled);
    }
}
