//! Three-tier score counters.
//!
//! The daily counter is a snapshot: every update overwrites it with today's
//! measure. Monthly and annual counters are running totals and only ever
//! grow between resets.

use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// Score counters for the daily, monthly and annual tiers.
///
/// Serialized inline into the record document as `daily_score`,
/// `monthly_score` and `annually_score`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    #[serde(default)]
    pub daily_score: i64,
    #[serde(default)]
    pub monthly_score: i64,
    #[serde(default, rename = "annually_score")]
    pub annual_score: i64,
}

impl ScoreLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a tier's counter.
    #[must_use]
    pub fn score(&self, tier: Tier) -> i64 {
        match tier {
            Tier::Daily => self.daily_score,
            Tier::Monthly => self.monthly_score,
            Tier::Annual => self.annual_score,
        }
    }

    /// Zero a tier's counter.
    pub fn reset(&mut self, tier: Tier) {
        *self.slot(tier) = 0;
    }

    /// Apply `delta` to a tier.
    ///
    /// Daily is overwritten with `delta`; monthly and annual add it.
    ///
    /// # Example
    ///
    /// ```
    /// use tasknreward::ledger::ScoreLedger;
    /// use tasknreward::tier::Tier;
    ///
    /// let mut ledger = ScoreLedger::new();
    /// ledger.update(Tier::Daily, 20);
    /// ledger.update(Tier::Daily, 10);
    /// ledger.update(Tier::Monthly, 20);
    /// ledger.update(Tier::Monthly, 10);
    /// assert_eq!(ledger.score(Tier::Daily), 10);
    /// assert_eq!(ledger.score(Tier::Monthly), 30);
    /// ```
    pub fn update(&mut self, tier: Tier, delta: i64) {
        match tier {
            Tier::Daily => self.daily_score = delta,
            Tier::Monthly | Tier::Annual => *self.slot(tier) += delta,
        }
    }

    fn slot(&mut self, tier: Tier) -> &mut i64 {
        match tier {
            Tier::Daily => &mut self.daily_score,
            Tier::Monthly => &mut self.monthly_score,
            Tier::Annual => &mut self.annual_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_update_overwrites() {
        let mut ledger = ScoreLedger::new();
        ledger.update(Tier::Daily, 30);
        ledger.update(Tier::Daily, 10);
        assert_eq!(ledger.score(Tier::Daily), 10);
    }

    #[test]
    fn test_monthly_and_annual_accumulate() {
        let mut ledger = ScoreLedger::new();
        for _ in 0..3 {
            ledger.update(Tier::Monthly, 20);
            ledger.update(Tier::Annual, 5);
        }
        assert_eq!(ledger.score(Tier::Monthly), 60);
        assert_eq!(ledger.score(Tier::Annual), 15);
        assert_eq!(ledger.score(Tier::Daily), 0);
    }

    #[test]
    fn test_reset_only_touches_named_tier() {
        let mut ledger = ScoreLedger {
            daily_score: 10,
            monthly_score: 40,
            annual_score: 90,
        };
        ledger.reset(Tier::Monthly);
        assert_eq!(ledger.score(Tier::Daily), 10);
        assert_eq!(ledger.score(Tier::Monthly), 0);
        assert_eq!(ledger.score(Tier::Annual), 90);
    }

    #[test]
    fn test_annual_field_name() {
        let ledger = ScoreLedger {
            daily_score: 1,
            monthly_score: 2,
            annual_score: 3,
        };
        let json = serde_json::to_value(ledger).unwrap();
        assert_eq!(json["annually_score"], 3);
    }
}
