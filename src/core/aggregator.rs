//! Summation over filtered activity and token series

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::core::types::{AggregatedStats, DailyActivity, DailyModelTokens, TokenAggregate};
use crate::utils::parse_day;

/// Sum a subset of activity records; sums saturate rather than overflow
pub(crate) fn aggregate<'a, I>(records: I) -> AggregatedStats
where
    I: IntoIterator<Item = &'a DailyActivity>,
{
    let mut stats = AggregatedStats::default();
    for record in records {
        stats.messages = stats.messages.saturating_add(record.message_count);
        stats.sessions = stats.sessions.saturating_add(record.session_count);
        stats.tool_calls = stats.tool_calls.saturating_add(record.tool_call_count);
        if record.message_count > 0 {
            stats.active_days += 1;
        }
    }
    stats
}

/// Sum tokens for the days present in `date_subset` only
pub(crate) fn aggregate_tokens(
    token_series: &[DailyModelTokens],
    date_subset: &[&DailyActivity],
) -> TokenAggregate {
    let dates: HashSet<NaiveDate> = date_subset
        .iter()
        .filter_map(|r| parse_day(&r.date))
        .collect();
    let mut result = TokenAggregate::default();

    for day in token_series {
        if !parse_day(&day.date).is_some_and(|d| dates.contains(&d)) {
            continue;
        }
        for (model, tokens) in &day.tokens_by_model {
            let slot = result.by_model.entry(model.clone()).or_default();
            *slot = slot.saturating_add(*tokens);
            result.total = result.total.saturating_add(*tokens);
        }
    }

    result
}
