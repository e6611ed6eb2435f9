use chrono::NaiveDate;
use std::collections::HashMap;

use crate::core::types::DailyActivity;
use crate::utils::{parse_day, shift_days};

/// Consecutive active days ending today.
///
/// A missing record for today does not break the streak (the cache may not
/// have caught up yet); any gap or zero-message day before that ends it.
pub(crate) fn compute_streak(history: &[DailyActivity], today: NaiveDate) -> u64 {
    let mut by_date: HashMap<NaiveDate, u64> = HashMap::new();
    for record in history {
        if let Some(date) = parse_day(&record.date) {
            let slot = by_date.entry(date).or_default();
            *slot = slot.saturating_add(record.message_count);
        }
    }

    let mut streak = 0;
    let mut offset = 0i64;
    loop {
        match by_date.get(&shift_days(today, -offset)) {
            Some(&messages) if messages > 0 => streak += 1,
            None if offset == 0 => {}
            _ => break,
        }
        offset += 1;
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// `counts[0]` is the oldest day, the last element lands on `end`
    fn history_ending(end: NaiveDate, counts: &[u64]) -> Vec<DailyActivity> {
        let len = counts.len() as i64;
        counts
            .iter()
            .enumerate()
            .map(|(i, &messages)| DailyActivity {
                date: shift_days(end, i as i64 - (len - 1))
                    .format("%Y-%m-%d")
                    .to_string(),
                message_count: messages,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(compute_streak(&[], day(2026, 3, 14)), 0);
    }

    #[test]
    fn counts_today_when_present() {
        let today = day(2026, 3, 14);
        let history = history_ending(today, &[100; 14]);
        assert_eq!(compute_streak(&history, today), 14);
    }

    #[test]
    fn pending_today_keeps_streak_alive() {
        let today = day(2026, 3, 14);
        let history = history_ending(day(2026, 3, 13), &[3, 4, 5, 6]);
        assert_eq!(compute_streak(&history, today), 4);
    }

    #[test]
    fn zero_message_today_ends_streak() {
        let today = day(2026, 3, 14);
        let history = history_ending(today, &[5, 5, 0]);
        assert_eq!(compute_streak(&history, today), 0);
    }

    #[test]
    fn zero_day_in_past_truncates() {
        let today = day(2026, 3, 14);
        let history = history_ending(today, &[5, 5, 0, 5, 5]);
        assert_eq!(compute_streak(&history, today), 2);
    }

    #[test]
    fn missing_yesterday_ends_streak_even_with_pending_today() {
        let today = day(2026, 3, 14);
        let history = history_ending(day(2026, 3, 12), &[5, 5, 5]);
        assert_eq!(compute_streak(&history, today), 0);
    }

    #[test]
    fn order_of_records_does_not_matter() {
        let today = day(2026, 3, 14);
        let mut history = history_ending(today, &[1, 2, 3]);
        history.reverse();
        assert_eq!(compute_streak(&history, today), 3);
    }

    #[test]
    fn unpadded_dates_still_count() {
        let today = day(2026, 3, 9);
        let history: Vec<DailyActivity> = ["2026-3-7", "2026-3-8", "2026-03-09"]
            .iter()
            .map(|date| DailyActivity {
                date: date.to_string(),
                message_count: 1,
                ..Default::default()
            })
            .collect();
        assert_eq!(compute_streak(&history, today), 3);
    }
}
