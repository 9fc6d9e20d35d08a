//! Retention decisions.

use chrono::{DateTime, TimeDelta, Utc};

use crate::layout::LayoutError;

/// What the retention policy says about one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The base name does not match the pattern.
    NoMatch,
    /// The name matched but its date could not be parsed.
    UnparsableDate(LayoutError),
    /// The file is younger than the retention window.
    TooRecent { date: DateTime<Utc>, age: TimeDelta },
    /// The file reached the retention window and should be deleted.
    Expired { date: DateTime<Utc>, age: TimeDelta },
}

impl Decision {
    /// Whether the candidate should be deleted.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired { .. })
    }

    /// Age of the candidate, when a date was parsed.
    pub fn age(&self) -> Option<TimeDelta> {
        match self {
            Self::TooRecent { age, .. } | Self::Expired { age, .. } => Some(*age),
            Self::NoMatch | Self::UnparsableDate(_) => None,
        }
    }
}

/// Format an age in a compact human-readable way (`9d`, `3d 4h`, `-2d`).
pub fn format_age(age: TimeDelta) -> String {
    let sign = if age < TimeDelta::zero() { "-" } else { "" };
    let secs = age.num_seconds().unsigned_abs();

    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let minutes = (secs % 3600) / 60;

    if days > 0 && hours > 0 {
        format!("{sign}{days}d {hours}h")
    } else if days > 0 {
        format!("{sign}{days}d")
    } else if hours > 0 {
        format!("{sign}{hours}h")
    } else {
        format!("{sign}{minutes}m")
    }
}
