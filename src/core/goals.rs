use serde::Serialize;

/// Progress towards one goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct GoalProgress {
    pub(crate) current: u64,
    pub(crate) goal: u64,
    /// Rounded percentage, clamped to 100
    pub(crate) percent: u8,
    pub(crate) met: bool,
}

/// `goal` is validated non-zero where goals are loaded; zero is treated as met.
pub(crate) fn progress(current: u64, goal: u64) -> GoalProgress {
    let percent = if goal == 0 {
        100
    } else {
        ((current as f64 * 100.0 / goal as f64).round()).min(100.0) as u8
    };
    GoalProgress {
        current,
        goal,
        percent,
        met: current >= goal,
    }
}
