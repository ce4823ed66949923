use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::models::usermodel::*;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub full_name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(
        length(min = 1, message = "Confirm Password is required"),
        must_match(other = "password", message = "passwords do not match")
    )]
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
}

/// Profile fields a user may change about themselves. Name and email are fixed
/// at registration.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    pub user_type: Option<UserType>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(min = 2, max = 255, message = "Location must be between 2-255 characters"))]
    pub location: Option<String>,

    #[validate(length(min = 10, max = 20, message = "Phone number must be between 10-20 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 100, message = "Business name must be at most 100 characters"))]
    pub business_name: Option<String>,

    #[validate(url(message = "Profile image must be a valid URL"))]
    pub profile_image: Option<String>,
}

impl UpdateProfileDto {
    pub fn validate_phone_number(&self) -> Result<(), ValidationError> {
        if let Some(phone) = &self.phone {
            let phone_regex =
                regex::Regex::new(r"^(\+?[0-9]{1,3}[- ]?)?[0-9]{3}[- ]?[0-9]{3}[- ]?[0-9]{4}$")
                    .map_err(|_| ValidationError::new("invalid_phone_regex"))?;

            if !phone_regex.is_match(phone) {
                let mut error = ValidationError::new("invalid_phone");
                error.message = Some(Cow::from(
                    "Phone number must be in a valid format (e.g., +1234567890 or 123-456-7890)",
                ));
                return Err(error);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub user_type: String,
    pub business_name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            full_name: user.full_name.to_owned(),
            email: user.email.to_owned(),
            phone: user.phone.clone(),
            location: user.location.clone(),
            user_type: user.user_type.to_str().to_string(),
            business_name: user.business_name.clone(),
            bio: user.bio.clone(),
            profile_image: user.profile_image.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// What other participants see about a user: no email, no phone.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PublicUserDto {
    pub id: String,
    pub full_name: String,
    pub user_type: String,
    pub business_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
}

impl PublicUserDto {
    pub fn from_user(user: &User) -> Self {
        PublicUserDto {
            id: user.id.to_string(),
            full_name: user.full_name.to_owned(),
            user_type: user.user_type.to_str().to_string(),
            business_name: user.business_name.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_dto_requires_matching_passwords() {
        let dto = RegisterUserDto {
            full_name: "Jess Lee".to_string(),
            email: "jess@example.com".to_string(),
            password: "hunter22".to_string(),
            password_confirm: "hunter23".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn update_profile_accepts_well_formed_phone() {
        let dto = UpdateProfileDto {
            phone: Some("+1 555 123 4567".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        assert!(dto.validate_phone_number().is_ok());
    }

    #[test]
    fn update_profile_rejects_malformed_phone() {
        let dto = UpdateProfileDto {
            phone: Some("call me maybe".to_string()),
            ..Default::default()
        };
        assert!(dto.validate_phone_number().is_err());
    }

    #[test]
    fn public_dto_hides_contact_details() {
        let json = serde_json::to_value(PublicUserDto {
            id: "abc".to_string(),
            full_name: "Sam".to_string(),
            user_type: "provider".to_string(),
            business_name: None,
            bio: None,
            location: None,
            profile_image: None,
        })
        .unwrap();
        assert!(json.get("email").is_none());
        assert!(json.get("phone").is_none());
    }
}
