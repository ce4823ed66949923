// db/userdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::userdtos::UpdateProfileDto;
use crate::models::usermodel::{User, UserType};

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        full_name: T,
        email: T,
        password: T,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<User, sqlx::Error>;

    async fn upgrade_user_type(
        &self,
        user_id: Uuid,
        user_type: UserType,
    ) -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        if let Some(user_id) = user_id {
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, full_name, email, password, phone, location, user_type,
                       business_name, bio, profile_image, created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
        } else if let Some(email) = email {
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, full_name, email, password, phone, location, user_type,
                       business_name, bio, profile_image, created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
        } else {
            Ok(None)
        }
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        full_name: T,
        email: T,
        password: T,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, full_name, email, password, phone, location, user_type,
                      business_name, bio, profile_image, created_at, updated_at
            "#,
        )
        .bind(full_name.into())
        .bind(email.into())
        .bind(password.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET user_type = COALESCE($2, user_type),
                bio = COALESCE($3, bio),
                location = COALESCE($4, location),
                phone = COALESCE($5, phone),
                business_name = COALESCE($6, business_name),
                profile_image = COALESCE($7, profile_image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, full_name, email, password, phone, location, user_type,
                      business_name, bio, profile_image, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(dto.user_type)
        .bind(dto.bio)
        .bind(dto.location)
        .bind(dto.phone)
        .bind(dto.business_name)
        .bind(dto.profile_image)
        .fetch_one(&self.pool)
        .await
    }

    async fn upgrade_user_type(
        &self,
        user_id: Uuid,
        user_type: UserType,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET user_type = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, full_name, email, password, phone, location, user_type,
                      business_name, bio, profile_image, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(user_type)
        .fetch_one(&self.pool)
        .await
    }
}
