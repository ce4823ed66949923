use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::reviewmodel::Review;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewListResponseDto {
    pub status: String,
    pub reviews: Vec<Review>,
    pub results: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_must_be_in_range() {
        let mut dto = CreateReviewDto {
            rating: 5,
            comment: None,
        };
        assert!(dto.validate().is_ok());
        dto.rating = 0;
        assert!(dto.validate().is_err());
        dto.rating = 6;
        assert!(dto.validate().is_err());
    }
}
