/// Date formatting shared by conversation messages and notification emails.
use chrono::{NaiveDate, NaiveTime};

/// "Friday, Aug 22, 2026 at 09:00" — the long form used when listing a
/// customer's preferred slots.
pub fn format_slot(date: NaiveDate, time: NaiveTime) -> String {
    format!(
        "{} at {}",
        date.format("%A, %b %-d, %Y"),
        time.format("%H:%M")
    )
}

/// "Aug 22, 2026" — the short form used in counter-offer copy.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_format_slot() {
        assert_eq!(
            format_slot(date(2026, 8, 21), time(9, 0)),
            "Friday, Aug 21, 2026 at 09:00"
        );
        assert_eq!(
            format_slot(date(2026, 12, 1), time(14, 30)),
            "Tuesday, Dec 1, 2026 at 14:30"
        );
    }

    #[test]
    fn test_format_short_date() {
        assert_eq!(format_short_date(date(2026, 8, 5)), "Aug 5, 2026");
        assert_eq!(format_short_date(date(2027, 1, 15)), "Jan 15, 2027");
    }

    #[test]
    fn test_format_clock_time() {
        assert_eq!(format_clock_time(time(9, 5)), "09:05");
        assert_eq!(format_clock_time(time(23, 59)), "23:59");
    }
}
