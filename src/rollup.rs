//! Explicit period close.
//!
//! Scores only move up a tier when the user asks for it. Closing a day adds
//! the daily score to the monthly total and starts a fresh day; closing a
//! month adds the monthly total to the annual one and starts a fresh month.
//! There is nothing above the annual tier to close into.

use tracing::info;

use crate::error::{Result, TaskRewardError};
use crate::record::Record;
use crate::tier::Tier;

/// What a rollup moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollupSummary {
    pub from: Tier,
    pub into: Tier,
    /// Score added to `into`
    pub carried: i64,
}

/// Close the period of `tier`, carrying its score one tier up.
///
/// Closing a day also clears the daily lists and the generation date and
/// restores the refresh budget to `daily_reset_limit`.
pub fn rollup(record: &mut Record, tier: Tier, daily_reset_limit: u32) -> Result<RollupSummary> {
    let into = tier.next().ok_or(TaskRewardError::InvalidRollup { tier })?;

    let carried = record.scores.score(tier);
    record.scores.update(into, carried);
    record.scores.reset(tier);
    record.clear_lists(tier);

    if tier == Tier::Daily {
        record.date = None;
        record.daily_reset_limit = daily_reset_limit;
    }

    info!(%tier, %into, carried, "Rolled up scores");
    Ok(RollupSummary {
        from: tier,
        into,
        carried,
    })
}
