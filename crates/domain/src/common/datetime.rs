//! DateTime parsing utilities with consistent error handling.

use chrono::{DateTime, NaiveDate, Utc};

/// Display format used for calendar dates shown to reviewers (`dd/mm/yyyy`).
pub const CALENDAR_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses an RFC3339 timestamp string, returning an error if parsing fails.
///
/// # Examples
///
/// ```
/// use tradeassoc_domain::common::parse_datetime;
/// use chrono::Datelike;
///
/// let dt = parse_datetime("2024-01-15T10:30:00Z").unwrap();
/// assert_eq!(dt.year(), 2024);
/// ```
///
/// # Errors
///
/// Returns `chrono::ParseError` if the string is not valid RFC3339.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Parses a calendar date from either `YYYY-MM-DD` or an RFC3339 timestamp.
///
/// Returns `None` for anything else. Callers decide how to display input
/// that fails to parse; nothing here guesses at other formats.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(trimmed).ok().map(|dt| dt.date_naive()))
}

/// Formats a date string for display, falling back to the raw input when it
/// cannot be parsed.
///
/// ```
/// use tradeassoc_domain::common::format_calendar_date;
///
/// assert_eq!(format_calendar_date("2024-03-31"), "31/03/2024");
/// assert_eq!(format_calendar_date("next tuesday"), "next tuesday");
/// ```
pub fn format_calendar_date(s: &str) -> String {
    match parse_calendar_date(s) {
        Some(date) => date.format(CALENDAR_DATE_FORMAT).to_string(),
        None => s.trim().to_string(),
    }
}
