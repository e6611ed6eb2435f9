//! Date-window filters over the activity history
//!
//! All windows are computed on calendar days relative to `today`, never on
//! elapsed hours. Records whose date does not parse fall outside every
//! window (they still count towards all-time totals).

use chrono::{Datelike, NaiveDate};

use crate::core::types::DailyActivity;
use crate::utils::{parse_day, shift_days};

fn filter_range(
    history: &[DailyActivity],
    start: NaiveDate,
    end_exclusive: NaiveDate,
) -> Vec<&DailyActivity> {
    history
        .iter()
        .filter(|record| {
            parse_day(&record.date).is_some_and(|d| d >= start && d < end_exclusive)
        })
        .collect()
}

/// Records dated `today`. Empty while today's entry is still pending upstream.
pub(crate) fn filter_today(history: &[DailyActivity], today: NaiveDate) -> Vec<&DailyActivity> {
    filter_range(history, today, shift_days(today, 1))
}

/// The last `n` calendar days ending with today: `[today-(n-1), today]`
pub(crate) fn filter_last_n_days(
    history: &[DailyActivity],
    today: NaiveDate,
    n: i64,
) -> Vec<&DailyActivity> {
    filter_range(history, shift_days(today, -(n - 1)), shift_days(today, 1))
}

/// Window `[today-(n_start-1), today-(n_end-1))`.
///
/// With `(14, 7)` this is the seven days right before `filter_last_n_days(.., 7)`.
pub(crate) fn filter_preceding_window(
    history: &[DailyActivity],
    today: NaiveDate,
    n_start: i64,
    n_end: i64,
) -> Vec<&DailyActivity> {
    filter_range(
        history,
        shift_days(today, -(n_start - 1)),
        shift_days(today, -(n_end - 1)),
    )
}

/// First and last day of the month `offset_months` away from today's month
pub(crate) fn month_bounds(today: NaiveDate, offset_months: i32) -> (NaiveDate, NaiveDate) {
    let index = today.year() * 12 + today.month0() as i32 + offset_months;
    let (year, month0) = (index.div_euclid(12), index.rem_euclid(12) as u32);
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(today);
    let next_index = index + 1;
    let next_first = NaiveDate::from_ymd_opt(
        next_index.div_euclid(12),
        next_index.rem_euclid(12) as u32 + 1,
        1,
    )
    .unwrap_or(today);
    (first, shift_days(next_first, -1))
}

/// Records inside a calendar month (0 = current, -1 = previous, ...)
pub(crate) fn filter_calendar_month(
    history: &[DailyActivity],
    today: NaiveDate,
    offset_months: i32,
) -> Vec<&DailyActivity> {
    let (first, last) = month_bounds(today, offset_months);
    filter_range(history, first, shift_days(last, 1))
}
