use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "service_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    PetCare,
    YardWork,
    Tutoring,
    HomeHelp,
    TechHelp,
    Errands,
    CarWash,
    Babysitting,
    GraphicDesign,
    SocialMedia,
    Beauty,
    EventWork,
    ArtCommissions,
    Photography,
}

impl ServiceCategory {
    pub fn to_str(&self) -> &str {
        match self {
            ServiceCategory::PetCare => "pet_care",
            ServiceCategory::YardWork => "yard_work",
            ServiceCategory::Tutoring => "tutoring",
            ServiceCategory::HomeHelp => "home_help",
            ServiceCategory::TechHelp => "tech_help",
            ServiceCategory::Errands => "errands",
            ServiceCategory::CarWash => "car_wash",
            ServiceCategory::Babysitting => "babysitting",
            ServiceCategory::GraphicDesign => "graphic_design",
            ServiceCategory::SocialMedia => "social_media",
            ServiceCategory::Beauty => "beauty",
            ServiceCategory::EventWork => "event_work",
            ServiceCategory::ArtCommissions => "art_commissions",
            ServiceCategory::Photography => "photography",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "pricing_model", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    PerJob,
    PerHour,
}

impl PricingModel {
    pub fn to_str(&self) -> &str {
        match self {
            PricingModel::PerJob => "per_job",
            PricingModel::PerHour => "per_hour",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Service {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ServiceCategory,
    pub price: f64,
    pub pricing_model: PricingModel,
    pub duration: f64,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub qualifications: Option<String>,
    pub education: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn categories_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(ServiceCategory::PetCare).unwrap(),
            json!("pet_care")
        );
        assert_eq!(
            serde_json::to_value(ServiceCategory::GraphicDesign).unwrap(),
            json!("graphic_design")
        );
        let parsed: ServiceCategory = serde_json::from_value(json!("yard_work")).unwrap();
        assert_eq!(parsed, ServiceCategory::YardWork);
    }

    #[test]
    fn pricing_models_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(PricingModel::PerJob).unwrap(),
            json!("per_job")
        );
        let parsed: PricingModel = serde_json::from_value(json!("per_hour")).unwrap();
        assert_eq!(parsed, PricingModel::PerHour);
    }
}
