//! Sweep configuration types.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use derive_builder::Builder;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::pattern::DEFAULT_DATE_GROUP;

/// Configuration for one sweep.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Builder)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "ConfigError")
)]
pub struct SweepConfig {
    /// Root directory to walk. An empty path means the current directory.
    #[builder(default = "PathBuf::from(\".\")")]
    pub root: PathBuf,

    /// Regular expression matched against each file's base name.
    pub pattern: String,

    /// Layout used to parse the captured date.
    #[builder(default)]
    pub layout: String,

    /// Retention window in days. Must be positive.
    pub keep_days: i64,

    /// Log deletions instead of performing them.
    #[builder(default = "false")]
    pub dry_run: bool,

    /// Name of the capture group holding the date.
    #[builder(default = "DEFAULT_DATE_GROUP.to_string()")]
    pub date_group: String,

    /// Maximum depth to traverse (None = unlimited).
    #[builder(default)]
    pub max_depth: Option<usize>,

    /// Follow symbolic links while walking.
    #[builder(default = "false")]
    pub follow_links: bool,

    /// Reference time for age calculations (default: now).
    #[builder(default = "Utc::now()")]
    pub reference_time: DateTime<Utc>,
}

impl SweepConfigBuilder {
    fn validate(&self) -> Result<(), ConfigError> {
        match self.pattern {
            Some(ref pattern) if !pattern.trim().is_empty() => {}
            _ => return Err(ConfigError::EmptyPattern),
        }

        let keep = self.keep_days.unwrap_or(0);
        if keep <= 0 {
            return Err(ConfigError::InvalidKeep { keep });
        }

        // Larger windows overflow the duration arithmetic
        if TimeDelta::try_days(keep).is_none() {
            return Err(ConfigError::InvalidKeep { keep });
        }

        Ok(())
    }
}

impl SweepConfig {
    /// Create a new sweep config builder.
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::default()
    }

    /// Root directory with blank input mapped to the current directory.
    ///
    /// Non-UTF-8 roots are used as given.
    pub fn effective_root(&self) -> PathBuf {
        let Some(root) = self.root.to_str() else {
            return self.root.clone();
        };
        match root.trim() {
            "" => PathBuf::from("."),
            trimmed => PathBuf::from(trimmed),
        }
    }

    /// Minimum age a file must reach before it is deleted.
    pub fn retention_window(&self) -> TimeDelta {
        TimeDelta::try_days(self.keep_days).unwrap_or(TimeDelta::MAX)
    }
}

/// Settings read from a TOML config file.
///
/// Every key is optional; keys use the same names as the command-line flags.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default, rename = "match")]
    pub pattern: Option<String>,

    #[serde(default)]
    pub layout: Option<String>,

    #[serde(default)]
    pub keep: Option<i64>,

    #[serde(default)]
    pub dry: Option<bool>,

    #[serde(default)]
    pub date_group: Option<String>,

    #[serde(default)]
    pub max_depth: Option<usize>,

    #[serde(default)]
    pub follow_links: Option<bool>,
}

impl FileConfig {
    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse config file contents. `path` is only used in error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Copy every key present in the file onto `builder`.
    pub fn apply(&self, builder: &mut SweepConfigBuilder) {
        if let Some(ref dir) = self.dir {
            builder.root(dir.clone());
        }
        if let Some(ref pattern) = self.pattern {
            builder.pattern(pattern.clone());
        }
        if let Some(ref layout) = self.layout {
            builder.layout(layout.clone());
        }
        if let Some(keep) = self.keep {
            builder.keep_days(keep);
        }
        if let Some(dry) = self.dry {
            builder.dry_run(dry);
        }
        if let Some(ref group) = self.date_group {
            builder.date_group(group.clone());
        }
        if let Some(depth) = self.max_depth {
            builder.max_depth(depth);
        }
        if let Some(follow) = self.follow_links {
            builder.follow_links(follow);
        }
    }
}
