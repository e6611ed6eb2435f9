use crate::core::UsageSummary;
use crate::output::format::format_compact;

/// One line for statusline/tmux integration:
/// "Today: 100 │ 7d: 700 │ All: 1.4K │ 🔥 14d"
pub(crate) fn compact_line(summary: &UsageSummary) -> String {
    let mut parts = vec![
        format!("Today: {}", format_compact(summary.today.stats.messages)),
        format!("7d: {}", format_compact(summary.last_7_days.stats.messages)),
        format!("All: {}", format_compact(summary.all_time.stats.messages)),
    ];
    if summary.streak > 1 {
        parts.push(format!("🔥 {}d", summary.streak));
    }
    parts.join(" │ ")
}
