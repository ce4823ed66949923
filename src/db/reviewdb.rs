// db/reviewdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::reviewmodel::Review;

#[async_trait]
pub trait ReviewExt {
    async fn list_reviews_for_service(&self, service_id: Uuid) -> Result<Vec<Review>, Error>;

    async fn save_review(
        &self,
        service_id: Uuid,
        customer_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn list_reviews_for_service(&self, service_id: Uuid) -> Result<Vec<Review>, Error> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, service_id, customer_id, rating, comment, created_at
            FROM reviews
            WHERE service_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn save_review(
        &self,
        service_id: Uuid,
        customer_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, Error> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (service_id, customer_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, service_id, customer_id, rating, comment, created_at
            "#,
        )
        .bind(service_id)
        .bind(customer_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }
}
