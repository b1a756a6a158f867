//! Defensive calendar helpers.
//!
//! Dates arrive from the form as plain strings and may be empty or
//! malformed; formatting never fails, it degrades to an empty label.

use chrono::{Datelike, NaiveDate, Weekday};

/// Parse an ISO `YYYY-MM-DD` form value. Empty or malformed input is `None`.
pub fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Format a date as `DD/MM/YYYY`, or `""` when absent.
pub fn format_dmy(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => String::new(),
    }
}

/// Format a date as `YYYY-MM-DD`, or `""` when absent.
pub fn format_iso(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Format a date with separators stripped (`YYYYMMDD`), for file names.
pub fn format_compact(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y%m%d").to_string(),
        None => String::new(),
    }
}

/// English day-of-week label for a date.
pub fn day_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// English month name for a 1-based month number, `""` if out of range.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

/// True when a date falls in the given month and year.
pub fn in_month(date: NaiveDate, month: u32, year: i32) -> bool {
    date.month() == month && date.year() == year
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso() {
        assert_eq!(
            parse_iso("2025-03-15"),
            NaiveDate::from_ymd_opt(2025, 3, 15)
        );
        assert_eq!(parse_iso(" 2025-03-15 "), NaiveDate::from_ymd_opt(2025, 3, 15));
        assert_eq!(parse_iso(""), None);
        assert_eq!(parse_iso("not-a-date"), None);
        assert_eq!(parse_iso("2025-13-01"), None);
    }

    #[test]
    fn test_format_dmy() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5);
        assert_eq!(format_dmy(date), "05/03/2025");
    }

    #[test]
    fn test_format_dmy_empty_input_is_empty_string() {
        // Absent dates format to "" rather than failing
        assert_eq!(format_dmy(None), "");
        assert_eq!(format_dmy(parse_iso("")), "");
        assert_eq!(format_dmy(parse_iso("garbage")), "");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(NaiveDate::from_ymd_opt(2025, 3, 5)), "20250305");
        assert_eq!(format_compact(None), "");
    }

    #[test]
    fn test_day_name() {
        // 2025-03-15 is a Saturday
        assert_eq!(day_name(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()), "Saturday");
        assert_eq!(day_name(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()), "Sunday");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn test_in_month() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert!(in_month(date, 3, 2025));
        assert!(!in_month(date, 4, 2025));
        assert!(!in_month(date, 3, 2024));
    }
}
