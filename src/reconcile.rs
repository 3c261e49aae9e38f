//! Completion detection from the edited manifest.
//!
//! The user deletes a task's line from the manifest once it is done. The
//! reconciler diffs what is left against the record's pending list: lines
//! that are still pending stay pending, and every task of the cycle that is
//! no longer pending counts as completed. The daily score is then set to
//! the number of completed tasks times the points per task.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, TaskRewardError};
use crate::record::Record;
use crate::tier::Tier;

/// What to do with manifest lines that are not pending tasks.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnrecognizedPolicy {
    /// Drop them silently
    #[default]
    Ignore,
    /// Fail without touching the record
    Reject,
    /// Treat them as additional pending tasks
    Append,
}

/// Outcome of diffing a manifest against the pending list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Tasks still outstanding, in manifest order
    pub pending: Vec<String>,
    /// Tasks of the cycle that are no longer pending
    pub completed: Vec<String>,
    /// Manifest lines that matched no pending task
    pub unrecognized: Vec<String>,
}

impl Reconciliation {
    /// Daily score for this outcome.
    #[must_use]
    pub fn score(&self, points_per_task: i64) -> i64 {
        self.completed.len() as i64 * points_per_task
    }
}

/// Classify each manifest line and compute the new pending/completed pair.
///
/// `completed` keeps the order of pending-then-completed from the record and
/// is not deduplicated.
#[must_use]
pub fn classify(manifest: &[String], pending: &[String], completed: &[String]) -> Reconciliation {
    let mut retained = Vec::new();
    let mut unrecognized = Vec::new();
    for line in manifest {
        if pending.contains(line) {
            retained.push(line.clone());
        } else {
            unrecognized.push(line.clone());
        }
    }

    let newly_completed = pending
        .iter()
        .chain(completed)
        .filter(|task| !retained.contains(task))
        .cloned()
        .collect();

    Reconciliation {
        pending: retained,
        completed: newly_completed,
        unrecognized,
    }
}

/// Fold the manifest into the record's daily lists and daily score.
///
/// Under [`UnrecognizedPolicy::Append`] unrecognized lines join the pending
/// list after the retained ones, and are therefore never counted as
/// completed. Under [`UnrecognizedPolicy::Reject`] any unrecognized line
/// aborts with the record untouched.
pub fn complete(
    record: &mut Record,
    manifest: &[String],
    policy: UnrecognizedPolicy,
    points_per_task: i64,
) -> Result<Reconciliation> {
    let mut outcome = classify(
        manifest,
        record.pending(Tier::Daily),
        record.completed(Tier::Daily),
    );

    if !outcome.unrecognized.is_empty() {
        match policy {
            UnrecognizedPolicy::Ignore => {
                warn!(tasks = ?outcome.unrecognized, "Ignoring unrecognized manifest entries");
            }
            UnrecognizedPolicy::Reject => {
                return Err(TaskRewardError::UnrecognizedTasks {
                    tasks: outcome.unrecognized,
                });
            }
            UnrecognizedPolicy::Append => {
                outcome.pending.extend(outcome.unrecognized.iter().cloned());
                outcome.completed.retain(|task| !outcome.pending.contains(task));
            }
        }
    }

    record.set_lists(
        Tier::Daily,
        outcome.pending.clone(),
        outcome.completed.clone(),
    );
    record
        .scores
        .update(Tier::Daily, outcome.score(points_per_task));
    info!(
        pending = outcome.pending.len(),
        completed = outcome.completed.len(),
        score = record.scores.score(Tier::Daily),
        "Reconciled daily tasks"
    );
    Ok(outcome)
}
