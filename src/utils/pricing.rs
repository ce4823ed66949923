/// Pricing helpers for booking estimates.
///
/// Prices are plain dollar amounts. Hourly services multiply the rate by the
/// requested duration; fixed-price services charge the rate regardless of
/// duration.
use crate::models::servicemodel::PricingModel;

pub fn estimate_total(pricing_model: PricingModel, price: f64, duration_hours: f64) -> f64 {
    match pricing_model {
        PricingModel::PerHour => price * duration_hours,
        PricingModel::PerJob => price,
    }
}

/// Format a dollar amount the way it appears in emails: whole dollars without
/// cents, fractional amounts with two decimal places.
pub fn format_usd(amount: f64) -> String {
    if amount.fract().abs() < f64::EPSILON {
        format!("${}", amount as i64)
    } else {
        format!("${:.2}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_hour_multiplies_by_duration() {
        assert_eq!(estimate_total(PricingModel::PerHour, 15.0, 2.0), 30.0);
        assert_eq!(estimate_total(PricingModel::PerHour, 25.0, 1.5), 37.5);
    }

    #[test]
    fn test_per_job_ignores_duration() {
        assert_eq!(estimate_total(PricingModel::PerJob, 40.0, 3.0), 40.0);
        assert_eq!(estimate_total(PricingModel::PerJob, 40.0, 0.5), 40.0);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(30.0), "$30");
        assert_eq!(format_usd(37.5), "$37.50");
        assert_eq!(format_usd(0.0), "$0");
    }
}
