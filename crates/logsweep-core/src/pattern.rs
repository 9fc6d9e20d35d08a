//! File name patterns with a named date capture group.

use regex::Regex;

use crate::error::ConfigError;

/// Default name of the capture group holding the date.
pub const DEFAULT_DATE_GROUP: &str = "date";

/// A compiled file name pattern.
///
/// The date group is resolved to its positional index once, so matching a
/// candidate never looks the group up by name.
#[derive(Debug, Clone)]
pub struct DatePattern {
    regex: Regex,
    date_index: usize,
}

impl DatePattern {
    /// Compile `pattern` and resolve the capture group called `group`.
    pub fn compile(pattern: &str, group: &str) -> Result<Self, ConfigError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }

        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source: Box::new(source),
        })?;

        let date_index = regex
            .capture_names()
            .position(|name| name == Some(group))
            .ok_or_else(|| ConfigError::MissingDateGroup {
                group: group.to_string(),
            })?;

        Ok(Self { regex, date_index })
    }

    /// Positional index of the date group.
    pub fn date_index(&self) -> usize {
        self.date_index
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Match a base name and return the date substring.
    ///
    /// Returns `None` when the name does not match. A date group that did not
    /// take part in the match yields an empty string.
    pub fn capture_date<'n>(&self, name: &'n str) -> Option<&'n str> {
        let captures = self.regex.captures(name)?;
        Some(
            captures
                .get(self.date_index)
                .map_or("", |m| m.as_str()),
        )
    }
}
