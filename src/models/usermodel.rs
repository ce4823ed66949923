use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Customer,
    Provider,
    Both,
}

impl UserType {
    pub fn to_str(&self) -> &str {
        match self {
            UserType::Customer => "customer",
            UserType::Provider => "provider",
            UserType::Both => "both",
        }
    }

    /// Whether this account can receive booking requests.
    pub fn is_provider(&self) -> bool {
        matches!(self, UserType::Provider | UserType::Both)
    }

    /// Whether this account can submit booking requests.
    pub fn is_customer(&self) -> bool {
        matches!(self, UserType::Customer | UserType::Both)
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub user_type: UserType,
    pub business_name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Booking submissions require a reachable, human-identifiable customer.
    pub fn missing_profile_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push("full_name");
        }
        if self.location.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing.push("location");
        }
        if self.phone.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing.push("phone");
        }
        missing
    }

    pub fn profile_complete(&self) -> bool {
        self.missing_profile_fields().is_empty()
    }

    /// Display name used in conversations and emails.
    pub fn display_name(&self) -> &str {
        match self.business_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.full_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: uuid::Uuid::new_v4(),
            full_name: "Maya Torres".to_string(),
            email: "maya@example.com".to_string(),
            password: "hashed".to_string(),
            phone: Some("+15551234567".to_string()),
            location: Some("Maplewood, NJ".to_string()),
            user_type: UserType::Customer,
            business_name: None,
            bio: None,
            profile_image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn complete_profile_has_no_missing_fields() {
        let user = sample_user();
        assert!(user.profile_complete());
        assert!(user.missing_profile_fields().is_empty());
    }

    #[test]
    fn missing_phone_and_location_are_reported() {
        let mut user = sample_user();
        user.phone = None;
        user.location = Some("   ".to_string());
        assert_eq!(user.missing_profile_fields(), vec!["location", "phone"]);
        assert!(!user.profile_complete());
    }

    #[test]
    fn blank_full_name_is_reported() {
        let mut user = sample_user();
        user.full_name = "".to_string();
        assert_eq!(user.missing_profile_fields(), vec!["full_name"]);
    }

    #[test]
    fn business_name_wins_as_display_name() {
        let mut user = sample_user();
        assert_eq!(user.display_name(), "Maya Torres");
        user.business_name = Some("Maya's Pet Care".to_string());
        assert_eq!(user.display_name(), "Maya's Pet Care");
        user.business_name = Some("  ".to_string());
        assert_eq!(user.display_name(), "Maya Torres");
    }

    #[test]
    fn user_types_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(UserType::Both).unwrap(),
            serde_json::json!("both")
        );
        assert_eq!(
            serde_json::to_value(UserType::Provider).unwrap(),
            serde_json::json!("provider")
        );
        let parsed: UserType = serde_json::from_value(serde_json::json!("customer")).unwrap();
        assert_eq!(parsed, UserType::Customer);
    }

    #[test]
    fn both_type_acts_as_customer_and_provider() {
        assert!(UserType::Both.is_provider());
        assert!(UserType::Both.is_customer());
        assert!(!UserType::Customer.is_provider());
        assert!(!UserType::Provider.is_customer());
        assert_eq!(UserType::Both.to_str(), "both");
    }
}
