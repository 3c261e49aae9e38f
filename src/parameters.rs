//! Task and reward catalogs.
//!
//! The parameters document is read-only input. Every operation loads it
//! fresh; nothing in this crate writes it back.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DocumentKind, Result, TaskRewardError};
use crate::tier::{RewardTier, Tier};

/// Static task and reward catalogs.
///
/// Catalog entries are expected to be unique; sampling treats each entry
/// as a distinct task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(default)]
    pub daily_task_list: Vec<String>,
    #[serde(default)]
    pub monthly_task_list: Vec<String>,
    #[serde(default)]
    pub annually_task_list: Vec<String>,
    #[serde(default)]
    pub weekly_reward_list: Vec<String>,
    #[serde(default)]
    pub monthly_reward_list: Vec<String>,
    #[serde(default)]
    pub annually_reward_list: Vec<String>,
}

impl Parameters {
    /// Load the parameters document, failing with `MissingDocument` if absent.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TaskRewardError::missing(DocumentKind::Parameters, path));
            }
            Err(e) => return Err(e.into()),
        };

        let params: Parameters = serde_json::from_str(&contents)?;
        debug!(
            daily = params.daily_task_list.len(),
            monthly = params.monthly_task_list.len(),
            annual = params.annually_task_list.len(),
            "Loaded parameters from {}",
            path.display()
        );
        Ok(params)
    }

    /// Task catalog of a tier.
    #[must_use]
    pub fn tasks(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Daily => &self.daily_task_list,
            Tier::Monthly => &self.monthly_task_list,
            Tier::Annual => &self.annually_task_list,
        }
    }

    /// Reward catalog of a tier.
    #[must_use]
    pub fn rewards(&self, tier: RewardTier) -> &[String] {
        match tier {
            RewardTier::Weekly => &self.weekly_reward_list,
            RewardTier::Monthly => &self.monthly_reward_list,
            RewardTier::Annual => &self.annually_reward_list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_full_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("parameter.json");
        fs::write(
            &path,
            r#"{
                "daily_task_list": ["run", "read", "stretch"],
                "monthly_task_list": ["hike"],
                "annually_task_list": ["travel"],
                "weekly_reward_list": ["movie"],
                "monthly_reward_list": ["dinner"],
                "annually_reward_list": ["gadget"]
            }"#,
        )
        .unwrap();

        let params = Parameters::load(&path).unwrap();
        assert_eq!(params.tasks(Tier::Daily).len(), 3);
        assert_eq!(params.tasks(Tier::Annual), ["travel".to_string()]);
        assert_eq!(params.rewards(RewardTier::Weekly), ["movie".to_string()]);
        assert_eq!(params.rewards(RewardTier::Annual), ["gadget".to_string()]);
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let params: Parameters =
            serde_json::from_str(r#"{"daily_task_list": ["a"], "extra": 1}"#).unwrap();
        assert_eq!(params.tasks(Tier::Daily), ["a".to_string()]);
        assert!(params.tasks(Tier::Monthly).is_empty());
        assert!(params.rewards(RewardTier::Monthly).is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Parameters::load(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(
            err,
            TaskRewardError::MissingDocument {
                kind: DocumentKind::Parameters,
                ..
            }
        ));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("parameter.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(Parameters::load(&path), Err(TaskRewardError::Json(_))));
    }
}
