//! Retention evaluation for a single candidate.

use chrono::{DateTime, TimeDelta, Utc};

use logsweep_core::{ConfigError, DateLayout, DatePattern, Decision, SweepConfig};

/// Decides keep/delete for file names.
///
/// Holds only immutable inputs, so evaluating one name never affects the
/// next.
#[derive(Debug, Clone)]
pub struct RetentionEvaluator {
    pattern: DatePattern,
    layout: DateLayout,
    window: TimeDelta,
    now: DateTime<Utc>,
}

impl RetentionEvaluator {
    /// Compile the pattern and layout of `config`.
    pub fn new(config: &SweepConfig) -> Result<Self, ConfigError> {
        let pattern = DatePattern::compile(&config.pattern, &config.date_group)?;

        Ok(Self {
            pattern,
            layout: DateLayout::new(&config.layout),
            window: config.retention_window(),
            now: config.reference_time,
        })
    }

    /// Evaluate a base name.
    pub fn evaluate(&self, file_name: &str) -> Decision {
        let Some(captured) = self.pattern.capture_date(file_name) else {
            return Decision::NoMatch;
        };

        let date = match self.layout.parse(captured) {
            Ok(date) => date,
            Err(err) => return Decision::UnparsableDate(err),
        };

        // Future dates give a negative age and therefore stay
        let age = self.now - date;
        if age < self.window {
            Decision::TooRecent { date, age }
        } else {
            Decision::Expired { date, age }
        }
    }
}
