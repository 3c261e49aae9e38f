//! Operation facade over the record, parameters and manifest.
//!
//! Each operation loads the documents it needs from the paths in
//! [`TrackerConfig`] and computes the new record entirely in memory. It then
//! stages every document it changes and commits them together, manifest
//! first and record last. A failure at any step leaves every document as it
//! was.

use chrono::NaiveDate;
use rand::Rng;
use tracing::info;

use crate::config::TrackerConfig;
use crate::error::Result;
use crate::manifest;
use crate::parameters::Parameters;
use crate::reconcile::{self, Reconciliation, UnrecognizedPolicy};
use crate::record::{Record, RecordStore};
use crate::refresh;
use crate::rollup::{self, RollupSummary};
use crate::selector;
use crate::tier::Tier;

/// Result of a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub tasks: Vec<String>,
    /// Refreshes left for today
    pub remaining: u32,
}

/// Result of reconciling the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub reconciliation: Reconciliation,
    pub daily_score: i64,
}

/// Runs tracker operations against the configured documents.
#[derive(Debug, Clone)]
pub struct Tracker {
    config: TrackerConfig,
}

impl Tracker {
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn store(&self) -> RecordStore {
        RecordStore::new(&self.config.record_path)
    }

    /// Load the parameters document.
    pub fn parameters(&self) -> Result<Parameters> {
        Parameters::load(&self.config.parameters_path)
    }

    /// Load the record, creating it with defaults if absent.
    ///
    /// Returns the record and whether it was just created.
    pub fn scores(&self) -> Result<(Record, bool)> {
        self.store().load_or_create(self.config.daily_reset_limit)
    }

    /// Load the existing record.
    pub fn status(&self) -> Result<Record> {
        self.store().load()
    }

    /// Draw today's pending tasks and write them to the manifest.
    pub fn generate(&self, today: NaiveDate, rng: &mut impl Rng) -> Result<Vec<String>> {
        let params = self.parameters()?;
        let store = self.store();
        let mut record = store.load()?;

        let drawn = selector::generate(
            &mut record,
            params.tasks(Tier::Daily),
            self.config.daily_sample_size,
            today,
            rng,
        )?;

        let manifest = manifest::stage(&self.config.manifest_path, &drawn)?;
        let staged_record = store.stage(&record)?;
        store.commit(vec![manifest, staged_record])?;
        info!(%today, tasks = ?drawn, "Generated daily tasks");
        Ok(drawn)
    }

    /// Re-roll the pending tasks, spending one refresh.
    pub fn refresh(&self, rng: &mut impl Rng) -> Result<RefreshOutcome> {
        let store = self.store();
        let mut record = store.load()?;
        refresh::ensure_budget(&record)?;
        let params = self.parameters()?;

        let tasks = refresh::refresh(&mut record, params.tasks(Tier::Daily), rng)?;

        let manifest = manifest::stage(&self.config.manifest_path, &tasks)?;
        let staged_record = store.stage(&record)?;
        store.commit(vec![manifest, staged_record])?;
        Ok(RefreshOutcome {
            tasks,
            remaining: record.daily_reset_limit,
        })
    }

    /// Reconcile the edited manifest into the record.
    pub fn complete(&self, policy: UnrecognizedPolicy) -> Result<CompletionOutcome> {
        let lines = manifest::read(&self.config.manifest_path)?;
        let store = self.store();
        let mut record = store.load()?;

        let reconciliation =
            reconcile::complete(&mut record, &lines, policy, self.config.points_per_task)?;

        store.save(&record)?;
        Ok(CompletionOutcome {
            reconciliation,
            daily_score: record.scores.score(Tier::Daily),
        })
    }

    /// Close the period of `tier`.
    ///
    /// Closing a day also empties the manifest.
    pub fn rollup(&self, tier: Tier) -> Result<RollupSummary> {
        let store = self.store();
        let mut record = store.load()?;

        let summary = rollup::rollup(&mut record, tier, self.config.daily_reset_limit)?;

        let mut writes = Vec::with_capacity(2);
        if tier == Tier::Daily && self.config.manifest_path.exists() {
            writes.push(manifest::stage(&self.config.manifest_path, &[])?);
        }
        writes.push(store.stage(&record)?);
        store.commit(writes)?;
        Ok(summary)
    }

    /// Zero one tier's score.
    pub fn reset_score(&self, tier: Tier) -> Result<Record> {
        let store = self.store();
        let mut record = store.load()?;
        record.scores.reset(tier);
        store.save(&record)?;
        info!(%tier, "Reset score");
        Ok(record)
    }
}
