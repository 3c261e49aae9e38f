//! Configuration for document locations and draw sizes.
//!
//! Configuration is layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. User config: `<config_dir>/tasknreward/config.json`
//! 3. Project config: `<project>/.tasknreward/config.json`
//! 4. Command-line overrides
//!
//! Every document path is an explicit value on [`TrackerConfig`]; relative
//! paths are resolved against the project directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, TaskRewardError};

const CONFIG_DIR_NAME: &str = "tasknreward";
const PROJECT_CONFIG_DIR: &str = ".tasknreward";
const CONFIG_FILE: &str = "config.json";

fn default_parameters_path() -> PathBuf {
    PathBuf::from("parameter.json")
}

fn default_record_path() -> PathBuf {
    PathBuf::from("record.json")
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("task.txt")
}

fn default_sample_size() -> usize {
    2
}

fn default_points_per_task() -> i64 {
    10
}

fn default_reset_limit() -> u32 {
    crate::record::DEFAULT_RESET_LIMIT
}

/// Tracker settings passed explicitly into every operation.
///
/// # Example config.json
///
/// ```json
/// {
///   "record_path": "/home/me/tasks/record.json",
///   "daily_sample_size": 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Parameters document (task and reward catalogs)
    #[serde(default = "default_parameters_path")]
    pub parameters_path: PathBuf,

    /// Record document (scores and task lists)
    #[serde(default = "default_record_path")]
    pub record_path: PathBuf,

    /// Task manifest edited by the user
    #[serde(default = "default_manifest_path")]
    pub manifest_path: PathBuf,

    /// Number of daily tasks drawn by `generate`
    #[serde(default = "default_sample_size")]
    pub daily_sample_size: usize,

    /// Daily score awarded per completed task
    #[serde(default = "default_points_per_task")]
    pub points_per_task: i64,

    /// Refresh budget for new records and after a day rollup
    #[serde(default = "default_reset_limit")]
    pub daily_reset_limit: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            parameters_path: default_parameters_path(),
            record_path: default_record_path(),
            manifest_path: default_manifest_path(),
            daily_sample_size: default_sample_size(),
            points_per_task: default_points_per_task(),
            daily_reset_limit: default_reset_limit(),
        }
    }
}

impl TrackerConfig {
    /// Load layered configuration for a project directory.
    ///
    /// Paths in the result are resolved against `project_dir`.
    pub fn load(project_dir: &Path) -> Result<Self> {
        ConfigLoader::new().load(project_dir)
    }

    /// Get the project-level config path.
    #[must_use]
    pub fn project_config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Get the user-level config path, if the platform has a config dir.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILE))
    }

    /// Resolve relative document paths against `project_dir`.
    #[must_use]
    pub fn resolved(mut self, project_dir: &Path) -> Self {
        self.parameters_path = project_dir.join(&self.parameters_path);
        self.record_path = project_dir.join(&self.record_path);
        self.manifest_path = project_dir.join(&self.manifest_path);
        self
    }

    #[must_use]
    pub fn with_parameters_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.parameters_path = path.into();
        self
    }

    #[must_use]
    pub fn with_record_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.record_path = path.into();
        self
    }

    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    #[must_use]
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.daily_sample_size = size;
        self
    }

    #[must_use]
    pub fn with_points_per_task(mut self, points: i64) -> Self {
        self.points_per_task = points;
        self
    }

    #[must_use]
    pub fn with_reset_limit(mut self, limit: u32) -> Self {
        self.daily_reset_limit = limit;
        self
    }

    /// Check field values.
    pub fn validate(&self) -> Result<()> {
        if self.daily_sample_size == 0 {
            return Err(TaskRewardError::InvalidConfig {
                field: "daily_sample_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.points_per_task < 0 {
            return Err(TaskRewardError::InvalidConfig {
                field: "points_per_task".into(),
                reason: "must not be negative".into(),
            });
        }
        Ok(())
    }
}

/// Loads configuration by merging each layer's JSON object over the last.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    user_config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader using the platform's user config location.
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_config_path: TrackerConfig::user_config_path(),
        }
    }

    /// Set a custom user config path.
    #[must_use]
    pub fn with_user_config(mut self, path: Option<PathBuf>) -> Self {
        self.user_config_path = path;
        self
    }

    /// Load and merge all layers for `project_dir`.
    pub fn load(&self, project_dir: &Path) -> Result<TrackerConfig> {
        let mut merged = serde_json::Value::Object(serde_json::Map::new());

        if let Some(ref user_path) = self.user_config_path {
            Self::load_and_merge(&mut merged, user_path)?;
        }
        Self::load_and_merge(&mut merged, &TrackerConfig::project_config_path(project_dir))?;

        let config: TrackerConfig = serde_json::from_value(merged)
            .map_err(|e| TaskRewardError::config(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config.resolved(project_dir))
    }

    /// Merge a config file into the accumulated value.
    ///
    /// Returns true if the file was loaded, false if it doesn't exist.
    fn load_and_merge(accumulated: &mut serde_json::Value, path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            TaskRewardError::config_with_path(format!("Failed to parse: {e}"), path.to_path_buf())
        })?;

        match (accumulated, value) {
            (serde_json::Value::Object(parent), serde_json::Value::Object(child)) => {
                parent.extend(child);
            }
            _ => {
                return Err(TaskRewardError::config_with_path(
                    "Config file must contain a JSON object",
                    path.to_path_buf(),
                ));
            }
        }

        debug!("Loaded config layer {}", path.display());
        Ok(true)
    }
}
