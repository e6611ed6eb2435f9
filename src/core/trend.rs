use serde::Serialize;

/// Direction of a window total against the preceding equal-length window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Trend {
    Up,
    Down,
    Neutral,
}

/// More than 10% above `previous` is up, more than 10% below is down.
/// No previous data is neutral.
pub(crate) fn get_trend(current: u64, previous: u64) -> Trend {
    if previous == 0 {
        return Trend::Neutral;
    }
    let (current, previous) = (u128::from(current), u128::from(previous));
    if current * 10 > previous * 11 {
        Trend::Up
    } else if current * 10 < previous * 9 {
        Trend::Down
    } else {
        Trend::Neutral
    }
}
