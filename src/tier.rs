//! Task and reward tiers.
//!
//! Tasks and scores are tracked on three tiers: daily, monthly and annual.
//! Rewards use a weekly tier in place of the daily one.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Tier of a task catalog, score counter or pending/completed pair.
///
/// # Example
///
/// ```
/// use tasknreward::tier::Tier;
///
/// assert_eq!(Tier::Daily.to_string(), "daily");
/// assert_eq!(Tier::ALL.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Resets every day
    #[value(alias = "d")]
    Daily,
    /// Running total for the month
    #[value(alias = "m")]
    Monthly,
    /// Running total for the year
    #[value(alias = "a")]
    Annual,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Daily, Tier::Monthly, Tier::Annual];

    /// The tier a rollup from this tier feeds, if any.
    #[must_use]
    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::Daily => Some(Tier::Monthly),
            Tier::Monthly => Some(Tier::Annual),
            Tier::Annual => None,
        }
    }

    /// Heading used when listing this tier.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Tier::Daily => "Daily",
            Tier::Monthly => "Monthly",
            Tier::Annual => "Annually",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Daily => write!(f, "daily"),
            Tier::Monthly => write!(f, "monthly"),
            Tier::Annual => write!(f, "annual"),
        }
    }
}

/// Tier of a reward catalog.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardTier {
    #[value(alias = "w")]
    Weekly,
    #[value(alias = "m")]
    Monthly,
    #[value(alias = "a")]
    Annual,
}

impl RewardTier {
    pub const ALL: [RewardTier; 3] = [RewardTier::Weekly, RewardTier::Monthly, RewardTier::Annual];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            RewardTier::Weekly => "Weekly",
            RewardTier::Monthly => "Monthly",
            RewardTier::Annual => "Annually",
        }
    }
}

/// Level filter for task and score listings.
///
/// `w` is accepted for daily as well, matching the historical score command.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum TaskLevel {
    #[default]
    All,
    #[value(alias = "d", alias = "w")]
    Daily,
    #[value(alias = "m")]
    Monthly,
    #[value(alias = "a")]
    Annual,
}

impl TaskLevel {
    /// Tiers selected by this filter, in display order.
    #[must_use]
    pub fn tiers(self) -> Vec<Tier> {
        match self {
            TaskLevel::All => Tier::ALL.to_vec(),
            TaskLevel::Daily => vec![Tier::Daily],
            TaskLevel::Monthly => vec![Tier::Monthly],
            TaskLevel::Annual => vec![Tier::Annual],
        }
    }
}

/// Level filter for reward listings.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum RewardLevel {
    #[default]
    All,
    #[value(alias = "w")]
    Weekly,
    #[value(alias = "m")]
    Monthly,
    #[value(alias = "a")]
    Annual,
}

impl RewardLevel {
    #[must_use]
    pub fn tiers(self) -> Vec<RewardTier> {
        match self {
            RewardLevel::All => RewardTier::ALL.to_vec(),
            RewardLevel::Weekly => vec![RewardTier::Weekly],
            RewardLevel::Monthly => vec![RewardTier::Monthly],
            RewardLevel::Annual => vec![RewardTier::Annual],
        }
    }
}
