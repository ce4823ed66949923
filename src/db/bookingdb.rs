// db/bookingdb.rs
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::types::Json;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::bookingdtos::ProviderStatsDto;
use crate::models::bookingmodels::{
    Booking, BookingRequest, CounterOffer, PreferredDate, RequestStatus,
};

#[async_trait]
pub trait BookingExt {
    #[allow(clippy::too_many_arguments)]
    async fn create_booking_request(
        &self,
        service_id: Uuid,
        customer_id: Uuid,
        provider_id: Uuid,
        preferred_dates: Vec<PreferredDate>,
        duration_hours: f64,
        location_details: Option<String>,
        notes: Option<String>,
        customer_phone: String,
        total_estimated_price: f64,
    ) -> Result<BookingRequest, Error>;

    async fn get_booking_request(
        &self,
        request_id: Uuid,
    ) -> Result<Option<BookingRequest>, Error>;

    async fn list_requests_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<BookingRequest>, Error>;

    async fn list_requests_by_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<BookingRequest>, Error>;

    /// Apply a provider's single response. Only a pending request can be
    /// updated; `None` means it was already resolved. `counter_offer` is
    /// written only when supplied; accept/decline leave whatever is stored
    /// untouched.
    async fn update_request_response(
        &self,
        request_id: Uuid,
        status: RequestStatus,
        provider_response: Option<String>,
        counter_offer: Option<CounterOffer>,
    ) -> Result<Option<BookingRequest>, Error>;

    async fn create_booking(
        &self,
        service_id: Uuid,
        customer_id: Uuid,
        provider_id: Uuid,
        booking_date: NaiveDate,
        booking_time: NaiveTime,
        notes: Option<String>,
        total_price: f64,
    ) -> Result<Booking, Error>;

    async fn list_bookings_by_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>, Error>;

    async fn list_bookings_by_provider(&self, provider_id: Uuid) -> Result<Vec<Booking>, Error>;

    async fn get_provider_stats(&self, provider_id: Uuid) -> Result<ProviderStatsDto, Error>;
}

#[async_trait]
impl BookingExt for DBClient {
    async fn create_booking_request(
        &self,
        service_id: Uuid,
        customer_id: Uuid,
        provider_id: Uuid,
        preferred_dates: Vec<PreferredDate>,
        duration_hours: f64,
        location_details: Option<String>,
        notes: Option<String>,
        customer_phone: String,
        total_estimated_price: f64,
    ) -> Result<BookingRequest, Error> {
        sqlx::query_as::<_, BookingRequest>(
            r#"
            INSERT INTO booking_requests
                (service_id, customer_id, provider_id, preferred_dates, duration_hours,
                 location_details, notes, customer_phone, total_estimated_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending'::request_status)
            RETURNING id, service_id, customer_id, provider_id, preferred_dates,
                      duration_hours, location_details, notes, customer_phone,
                      total_estimated_price, status, provider_response, counter_offer,
                      created_at, updated_at
            "#,
        )
        .bind(service_id)
        .bind(customer_id)
        .bind(provider_id)
        .bind(Json(preferred_dates))
        .bind(duration_hours)
        .bind(location_details)
        .bind(notes)
        .bind(customer_phone)
        .bind(total_estimated_price)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_booking_request(
        &self,
        request_id: Uuid,
    ) -> Result<Option<BookingRequest>, Error> {
        sqlx::query_as::<_, BookingRequest>(
            r#"
            SELECT id, service_id, customer_id, provider_id, preferred_dates,
                   duration_hours, location_details, notes, customer_phone,
                   total_estimated_price, status, provider_response, counter_offer,
                   created_at, updated_at
            FROM booking_requests
            WHERE id = $1
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_requests_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<BookingRequest>, Error> {
        sqlx::query_as::<_, BookingRequest>(
            r#"
            SELECT id, service_id, customer_id, provider_id, preferred_dates,
                   duration_hours, location_details, notes, customer_phone,
                   total_estimated_price, status, provider_response, counter_offer,
                   created_at, updated_at
            FROM booking_requests
            WHERE customer_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn list_requests_by_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<BookingRequest>, Error> {
        sqlx::query_as::<_, BookingRequest>(
            r#"
            SELECT id, service_id, customer_id, provider_id, preferred_dates,
                   duration_hours, location_details, notes, customer_phone,
                   total_estimated_price, status, provider_response, counter_offer,
                   created_at, updated_at
            FROM booking_requests
            WHERE provider_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_request_response(
        &self,
        request_id: Uuid,
        status: RequestStatus,
        provider_response: Option<String>,
        counter_offer: Option<CounterOffer>,
    ) -> Result<Option<BookingRequest>, Error> {
        sqlx::query_as::<_, BookingRequest>(
            r#"
            UPDATE booking_requests
            SET status = $2,
                provider_response = $3,
                counter_offer = COALESCE($4, counter_offer),
                updated_at = NOW()
            WHERE id = $1 AND status = 'pending'::request_status
            RETURNING id, service_id, customer_id, provider_id, preferred_dates,
                      duration_hours, location_details, notes, customer_phone,
                      total_estimated_price, status, provider_response, counter_offer,
                      created_at, updated_at
            "#,
        )
        .bind(request_id)
        .bind(status)
        .bind(provider_response)
        .bind(counter_offer.map(Json))
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_booking(
        &self,
        service_id: Uuid,
        customer_id: Uuid,
        provider_id: Uuid,
        booking_date: NaiveDate,
        booking_time: NaiveTime,
        notes: Option<String>,
        total_price: f64,
    ) -> Result<Booking, Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (service_id, customer_id, provider_id, booking_date, booking_time,
                 notes, total_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending'::booking_status)
            RETURNING id, service_id, customer_id, provider_id, booking_date,
                      booking_time, notes, total_price, status, created_at, updated_at
            "#,
        )
        .bind(service_id)
        .bind(customer_id)
        .bind(provider_id)
        .bind(booking_date)
        .bind(booking_time)
        .bind(notes)
        .bind(total_price)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_bookings_by_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>, Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, service_id, customer_id, provider_id, booking_date,
                   booking_time, notes, total_price, status, created_at, updated_at
            FROM bookings
            WHERE customer_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn list_bookings_by_provider(&self, provider_id: Uuid) -> Result<Vec<Booking>, Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, service_id, customer_id, provider_id, booking_date,
                   booking_time, notes, total_price, status, created_at, updated_at
            FROM bookings
            WHERE provider_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_provider_stats(&self, provider_id: Uuid) -> Result<ProviderStatsDto, Error> {
        sqlx::query_as::<_, ProviderStatsDto>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM services
                 WHERE provider_id = $1 AND is_active = TRUE) AS active_services,
                (SELECT COUNT(*) FROM bookings
                 WHERE provider_id = $1) AS total_bookings,
                (SELECT COUNT(*) FROM booking_requests
                 WHERE provider_id = $1 AND status = 'pending'::request_status) AS pending_requests,
                (SELECT COALESCE(SUM(total_price), 0)::float8 FROM bookings
                 WHERE provider_id = $1 AND status = 'completed'::booking_status) AS total_earnings
            "#,
        )
        .bind(provider_id)
        .fetch_one(&self.pool)
        .await
    }
}
