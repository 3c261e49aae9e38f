//! The mutable score record.
//!
//! A [`Record`] holds everything that changes between invocations: the date
//! the daily cycle was generated for, the three score counters, the refresh
//! budget and a pending/completed task pair per tier.

pub mod store;

pub use store::{RecordStore, StagedWrite};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::ScoreLedger;
use crate::tier::Tier;

/// Refresh budget given to a freshly created record.
pub const DEFAULT_RESET_LIMIT: u32 = 3;

fn default_reset_limit() -> u32 {
    DEFAULT_RESET_LIMIT
}

/// Persisted per-period state for one user.
///
/// Missing fields take their defaults on load and unknown fields are
/// ignored, so hand-edited records keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Date the daily cycle was generated for
    #[serde(default)]
    pub date: Option<NaiveDate>,

    #[serde(flatten)]
    pub scores: ScoreLedger,

    /// Remaining refreshes for the current day
    #[serde(default = "default_reset_limit")]
    pub daily_reset_limit: u32,

    #[serde(default, rename = "d_pending_task_list")]
    daily_pending: Vec<String>,
    #[serde(default, rename = "d_completed_task_list")]
    daily_completed: Vec<String>,
    #[serde(default, rename = "m_pending_task_list")]
    monthly_pending: Vec<String>,
    #[serde(default, rename = "m_completed_task_list")]
    monthly_completed: Vec<String>,
    #[serde(default, rename = "a_pending_task_list")]
    annual_pending: Vec<String>,
    #[serde(default, rename = "a_completed_task_list")]
    annual_completed: Vec<String>,
}

impl Default for Record {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_LIMIT)
    }
}

impl Record {
    /// Create an empty record with the given refresh budget.
    #[must_use]
    pub fn new(daily_reset_limit: u32) -> Self {
        Self {
            date: None,
            scores: ScoreLedger::default(),
            daily_reset_limit,
            daily_pending: Vec::new(),
            daily_completed: Vec::new(),
            monthly_pending: Vec::new(),
            monthly_completed: Vec::new(),
            annual_pending: Vec::new(),
            annual_completed: Vec::new(),
        }
    }

    /// Pending tasks of a tier.
    #[must_use]
    pub fn pending(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Daily => &self.daily_pending,
            Tier::Monthly => &self.monthly_pending,
            Tier::Annual => &self.annual_pending,
        }
    }

    /// Completed tasks of a tier.
    #[must_use]
    pub fn completed(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Daily => &self.daily_completed,
            Tier::Monthly => &self.monthly_completed,
            Tier::Annual => &self.annual_completed,
        }
    }

    /// Replace a tier's pending list, leaving completed untouched.
    pub fn set_pending(&mut self, tier: Tier, pending: Vec<String>) {
        *self.lists_mut(tier).0 = pending;
    }

    /// Replace both lists of a tier.
    pub fn set_lists(&mut self, tier: Tier, pending: Vec<String>, completed: Vec<String>) {
        let (p, c) = self.lists_mut(tier);
        *p = pending;
        *c = completed;
    }

    /// Empty both lists of a tier.
    pub fn clear_lists(&mut self, tier: Tier) {
        self.set_lists(tier, Vec::new(), Vec::new());
    }

    /// Whether a daily cycle has been generated for `today`.
    #[must_use]
    pub fn is_generated_for(&self, today: NaiveDate) -> bool {
        self.date == Some(today)
    }

    fn lists_mut(&mut self, tier: Tier) -> (&mut Vec<String>, &mut Vec<String>) {
        match tier {
            Tier::Daily => (&mut self.daily_pending, &mut self.daily_completed),
            Tier::Monthly => (&mut self.monthly_pending, &mut self.monthly_completed),
            Tier::Annual => (&mut self.annual_pending, &mut self.annual_completed),
        }
    }
}
