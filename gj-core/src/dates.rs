use chrono::{Duration, NaiveDate};

/// Format used for storage keys and the `date` attribute of every entry.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical `YYYY-MM-DD` key for `date`.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a canonical `YYYY-MM-DD` key back into a date.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

/// Generates a vector of `NaiveDate`s, inclusive of the start and end dates.
/// If `start` is after `end`, the resulting vector will be empty.
///
/// # Arguments
///
/// * `start` - The `NaiveDate` to start the range from (inclusive).
/// * `end` - The `NaiveDate` to end the range at (inclusive).
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use gj_core::dates::get_dates_in_range;
/// let start_date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
/// let end_date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
///
/// let dates = get_dates_in_range(start_date, end_date);
///
/// assert_eq!(dates.len(), 3);
/// assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn get_dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current += Duration::days(1);
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_key_is_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date_key(d), "2024-03-05");
    }

    #[test]
    fn parse_date_key_rejects_other_formats() {
        assert_eq!(
            parse_date_key("2024-03-05"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(parse_date_key("05/03/2024"), None);
        assert_eq!(parse_date_key("2024-02-30"), None);
    }

    #[test]
    fn range_is_empty_when_start_after_end() {
        let a = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert!(get_dates_in_range(a, b).is_empty());
    }
}
