//! tasknreward - Tasks & rewards tracker
//!
//! Keeps a catalog of recurring tasks and rewards, draws a small set of
//! daily tasks, lets the user re-roll that set a limited number of times,
//! and turns completed tasks into scores on daily, monthly and annual tiers.
//!
//! # Architecture
//!
//! - [`config`] - Layered configuration and document paths
//! - [`error`] - Error types and exit codes
//! - [`parameters`] - Task and reward catalogs (read-only)
//! - [`record`] - Persisted scores and task lists
//! - [`ledger`] - Score counters and their update rules
//! - [`selector`] - Random daily draws
//! - [`refresh`] - Bounded re-rolls of the pending draw
//! - [`reconcile`] - Completion detection from the edited manifest
//! - [`rollup`] - Explicit period close
//! - [`manifest`] - Plain-text task manifest
//! - [`tracker`] - Load, mutate and persist for each operation
//!
//! # Example
//!
//! ```rust,no_run
//! use tasknreward::{Tracker, TrackerConfig, UnrecognizedPolicy};
//!
//! let tracker = Tracker::new(TrackerConfig::load(std::path::Path::new("."))?);
//! let today = chrono::Local::now().date_naive();
//! let tasks = tracker.generate(today, &mut rand::thread_rng())?;
//! println!("{tasks:?}");
//!
//! // ... user deletes finished lines from task.txt ...
//! let outcome = tracker.complete(UnrecognizedPolicy::Ignore)?;
//! println!("Daily score: {}", outcome.daily_score);
//! # Ok::<(), tasknreward::TaskRewardError>(())
//! ```

pub mod config;
pub mod error;
pub mod ledger;
pub mod manifest;
pub mod parameters;
pub mod reconcile;
pub mod record;
pub mod refresh;
pub mod rollup;
pub mod selector;
pub mod tier;
pub mod tracker;

// Re-export commonly used types
pub use config::{ConfigLoader, TrackerConfig};
pub use error::{DocumentKind, Result, TaskRewardError};
pub use ledger::ScoreLedger;
pub use parameters::Parameters;
pub use reconcile::{Reconciliation, UnrecognizedPolicy};
pub use record::{Record, RecordStore};
pub use rollup::RollupSummary;
pub use tier::{RewardLevel, RewardTier, TaskLevel, Tier};
pub use tracker::{CompletionOutcome, RefreshOutcome, Tracker};
