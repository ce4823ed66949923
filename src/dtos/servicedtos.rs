use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dtos::userdtos::PublicUserDto;
use crate::models::reviewmodel::Review;
use crate::models::servicemodel::{PricingModel, Service, ServiceCategory};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceDto {
    #[validate(length(min = 1, max = 100, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 300, message = "Description must be 1-300 characters"))]
    pub description: String,

    pub category: ServiceCategory,

    #[validate(range(min = 0.01, message = "Price must be greater than zero"))]
    pub price: f64,

    pub pricing_model: PricingModel,

    #[validate(range(min = 0.5, message = "Duration must be at least half an hour"))]
    pub duration: f64,

    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(length(max = 300, message = "Qualifications must be at most 300 characters"))]
    pub qualifications: Option<String>,

    #[validate(length(max = 300, message = "Education must be at most 300 characters"))]
    pub education: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateServiceDto {
    #[validate(length(min = 1, max = 100, message = "Title is required"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 300, message = "Description must be 1-300 characters"))]
    pub description: Option<String>,

    pub category: Option<ServiceCategory>,

    #[validate(range(min = 0.01, message = "Price must be greater than zero"))]
    pub price: Option<f64>,

    pub pricing_model: Option<PricingModel>,

    #[validate(range(min = 0.5, message = "Duration must be at least half an hour"))]
    pub duration: Option<f64>,

    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(length(max = 300, message = "Qualifications must be at most 300 characters"))]
    pub qualifications: Option<String>,

    #[validate(length(max = 300, message = "Education must be at most 300 characters"))]
    pub education: Option<String>,

    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct ServiceQueryDto {
    pub category: Option<ServiceCategory>,
    #[validate(length(max = 100, message = "Search term too long"))]
    pub search: Option<String>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceData {
    pub service: Service,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceResponseDto {
    pub status: String,
    pub data: ServiceData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceListResponseDto {
    pub status: String,
    pub services: Vec<Service>,
    pub results: i64,
}

/// Detail view: the service plus the provider's public profile and reviews.
#[derive(Debug, Serialize)]
pub struct ServiceDetailDto {
    pub service: Service,
    pub provider: Option<PublicUserDto>,
    pub reviews: Vec<Review>,
    pub average_rating: Option<f64>,
}

impl ServiceDetailDto {
    pub fn average_of(reviews: &[Review]) -> Option<f64> {
        if reviews.is_empty() {
            return None;
        }
        let sum: i32 = reviews.iter().map(|r| r.rating).sum();
        Some(sum as f64 / reviews.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn review(rating: i32) -> Review {
        Review {
            id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            rating,
            comment: None,
            created_at: None,
        }
    }

    #[test]
    fn create_dto_rejects_zero_price() {
        let dto = CreateServiceDto {
            title: "Dog walking".to_string(),
            description: "Daily walks".to_string(),
            category: ServiceCategory::PetCare,
            price: 0.0,
            pricing_model: PricingModel::PerHour,
            duration: 1.0,
            location: None,
            image_url: None,
            qualifications: None,
            education: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn create_dto_rejects_long_description() {
        let dto = CreateServiceDto {
            title: "Dog walking".to_string(),
            description: "x".repeat(301),
            category: ServiceCategory::PetCare,
            price: 15.0,
            pricing_model: PricingModel::PerHour,
            duration: 1.0,
            location: None,
            image_url: None,
            qualifications: None,
            education: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn average_rating_over_reviews() {
        assert_eq!(ServiceDetailDto::average_of(&[]), None);
        let reviews = vec![review(5), review(4), review(4)];
        let avg = ServiceDetailDto::average_of(&reviews).unwrap();
        assert!((avg - 4.333333).abs() < 1e-5);
    }
}
