use chrono::{Duration, NaiveDate};

use crate::consts::DATE_FORMAT;

/// Parse a "YYYY-MM-DD" day key. Anything else yields `None`.
pub(crate) fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Calendar-day arithmetic; saturates at chrono's date range
pub(crate) fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}
