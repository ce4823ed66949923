// db/servicedb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::servicedtos::{CreateServiceDto, UpdateServiceDto};
use crate::models::servicemodel::{Service, ServiceCategory};

#[async_trait]
pub trait ServiceExt {
    async fn get_service(&self, service_id: Uuid) -> Result<Option<Service>, Error>;

    /// Public browse: active services, newest first, optionally narrowed by
    /// category and a free-text term over title/description/location.
    async fn list_active_services(
        &self,
        category: Option<ServiceCategory>,
        search: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Service>, Error>;

    async fn list_services_by_provider(&self, provider_id: Uuid) -> Result<Vec<Service>, Error>;

    async fn save_service(
        &self,
        provider_id: Uuid,
        dto: CreateServiceDto,
    ) -> Result<Service, Error>;

    async fn update_service(
        &self,
        service_id: Uuid,
        dto: UpdateServiceDto,
    ) -> Result<Service, Error>;
}

#[async_trait]
impl ServiceExt for DBClient {
    async fn get_service(&self, service_id: Uuid) -> Result<Option<Service>, Error> {
        sqlx::query_as::<_, Service>(
            r#"
            SELECT id, provider_id, title, description, category, price, pricing_model,
                   duration, location, image_url, qualifications, education, is_active,
                   created_at, updated_at
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(service_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_active_services(
        &self,
        category: Option<ServiceCategory>,
        search: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Service>, Error> {
        let search_pattern = search.map(|term| format!("%{}%", term));

        sqlx::query_as::<_, Service>(
            r#"
            SELECT id, provider_id, title, description, category, price, pricing_model,
                   duration, location, image_url, qualifications, education, is_active,
                   created_at, updated_at
            FROM services
            WHERE is_active = TRUE
              AND ($1::service_category IS NULL OR category = $1)
              AND ($2::text IS NULL
                   OR title ILIKE $2
                   OR description ILIKE $2
                   OR location ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(category)
        .bind(search_pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn list_services_by_provider(&self, provider_id: Uuid) -> Result<Vec<Service>, Error> {
        sqlx::query_as::<_, Service>(
            r#"
            SELECT id, provider_id, title, description, category, price, pricing_model,
                   duration, location, image_url, qualifications, education, is_active,
                   created_at, updated_at
            FROM services
            WHERE provider_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn save_service(
        &self,
        provider_id: Uuid,
        dto: CreateServiceDto,
    ) -> Result<Service, Error> {
        sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services
                (provider_id, title, description, category, price, pricing_model,
                 duration, location, image_url, qualifications, education, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, TRUE)
            RETURNING id, provider_id, title, description, category, price, pricing_model,
                      duration, location, image_url, qualifications, education, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(provider_id)
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.category)
        .bind(dto.price)
        .bind(dto.pricing_model)
        .bind(dto.duration)
        .bind(dto.location)
        .bind(dto.image_url)
        .bind(dto.qualifications)
        .bind(dto.education)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_service(
        &self,
        service_id: Uuid,
        dto: UpdateServiceDto,
    ) -> Result<Service, Error> {
        sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                price = COALESCE($5, price),
                pricing_model = COALESCE($6, pricing_model),
                duration = COALESCE($7, duration),
                location = COALESCE($8, location),
                image_url = COALESCE($9, image_url),
                qualifications = COALESCE($10, qualifications),
                education = COALESCE($11, education),
                is_active = COALESCE($12, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, provider_id, title, description, category, price, pricing_model,
                      duration, location, image_url, qualifications, education, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(service_id)
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.category)
        .bind(dto.price)
        .bind(dto.pricing_model)
        .bind(dto.duration)
        .bind(dto.location)
        .bind(dto.image_url)
        .bind(dto.qualifications)
        .bind(dto.education)
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
    }
}
