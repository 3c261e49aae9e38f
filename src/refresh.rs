//! Bounded re-rolls of the daily pending list.
//!
//! Each successful refresh spends one unit of `daily_reset_limit`. The new
//! draw avoids the tasks currently pending; tasks already completed today
//! may be drawn again.

use rand::Rng;
use tracing::{debug, info};

use crate::error::{Result, TaskRewardError};
use crate::record::Record;
use crate::selector;
use crate::tier::Tier;

/// Fail with `RefreshExhausted` if no refreshes remain.
pub fn ensure_budget(record: &Record) -> Result<()> {
    if record.daily_reset_limit == 0 {
        return Err(TaskRewardError::RefreshExhausted);
    }
    Ok(())
}

/// Tasks eligible for a refresh: the catalog minus the current pending list.
#[must_use]
pub fn candidate_pool<'a>(catalog: &'a [String], pending: &[String]) -> Vec<&'a str> {
    catalog
        .iter()
        .filter(|task| !pending.contains(task))
        .map(String::as_str)
        .collect()
}

/// Replace the daily pending list with a draw of the same size from the
/// candidate pool.
///
/// On success the budget drops by exactly one. On any failure the record is
/// left as it was.
pub fn refresh(record: &mut Record, catalog: &[String], rng: &mut impl Rng) -> Result<Vec<String>> {
    ensure_budget(record)?;

    let pending = record.pending(Tier::Daily);
    let pool = candidate_pool(catalog, pending);
    debug!(pool = pool.len(), pending = pending.len(), "Refresh candidates");

    let drawn = selector::sample(&pool, pending.len(), rng)?;

    record.daily_reset_limit -= 1;
    record.set_pending(Tier::Daily, drawn.clone());
    info!(remaining = record.daily_reset_limit, "Refreshed daily tasks");
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn record_with(pending: &[&str], completed: &[&str], limit: u32) -> Record {
        let mut record = Record::new(limit);
        record.set_lists(Tier::Daily, strings(pending), strings(completed));
        record
    }

    #[test]
    fn test_refresh_avoids_previous_pending() {
        let catalog = strings(&["a", "b", "c", "d", "e", "f"]);
        for seed in 0..50 {
            let mut record = record_with(&["a", "b"], &[], 3);
            let drawn = refresh(&mut record, &catalog, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(drawn.len(), 2);
            assert!(!drawn.contains(&"a".to_string()));
            assert!(!drawn.contains(&"b".to_string()));
            assert_eq!(record.pending(Tier::Daily), drawn.as_slice());
        }
    }

    #[test]
    fn test_refresh_decrements_budget_by_one() {
        let catalog = strings(&["a", "b", "c", "d"]);
        let mut record = record_with(&["a", "b"], &[], 3);
        refresh(&mut record, &catalog, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(record.daily_reset_limit, 2);
    }

    #[test]
    fn test_refresh_exhausted_leaves_record_untouched() {
        let catalog = strings(&["a", "b", "c", "d"]);
        let mut record = record_with(&["a", "b"], &["x"], 0);
        let before = record.clone();

        let err = refresh(&mut record, &catalog, &mut StdRng::seed_from_u64(1)).unwrap_err();

        assert!(matches!(err, TaskRewardError::RefreshExhausted));
        assert_eq!(record, before);
    }

    #[test]
    fn test_refresh_insufficient_pool_keeps_budget() {
        let catalog = strings(&["a", "b", "c"]);
        let mut record = record_with(&["a", "b"], &[], 2);
        let before = record.clone();

        let err = refresh(&mut record, &catalog, &mut StdRng::seed_from_u64(1)).unwrap_err();

        assert!(matches!(
            err,
            TaskRewardError::InsufficientCatalog {
                requested: 2,
                available: 1
            }
        ));
        assert_eq!(record, before);
    }

    #[test]
    fn test_completed_tasks_remain_eligible() {
        let catalog = strings(&["a", "b", "done"]);
        let mut record = record_with(&["a", "b"], &["done"], 1);
        let pool = candidate_pool(&catalog, record.pending(Tier::Daily));
        assert_eq!(pool, vec!["done"]);

        let drawn = refresh(&mut record, &catalog, &mut StdRng::seed_from_u64(0));
        assert!(drawn.is_err());

        let mut record = record_with(&["a"], &["done"], 1);
        let drawn = refresh(&mut record, &catalog, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(drawn.len(), 1);
        assert_ne!(drawn[0], "a");
    }

    #[test]
    fn test_refresh_keeps_completed_list() {
        let catalog = strings(&["a", "b", "c", "d", "e"]);
        let mut record = record_with(&["a"], &["e"], 2);
        refresh(&mut record, &catalog, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(record.completed(Tier::Daily), ["e".to_string()]);
    }

    #[test]
    fn test_budget_runs_out() {
        let catalog = strings(&["a", "b", "c", "d", "e", "f"]);
        let mut record = record_with(&["a"], &[], 2);
        let mut rng = StdRng::seed_from_u64(11);

        assert!(refresh(&mut record, &catalog, &mut rng).is_ok());
        assert!(refresh(&mut record, &catalog, &mut rng).is_ok());
        assert!(matches!(
            refresh(&mut record, &catalog, &mut rng),
            Err(TaskRewardError::RefreshExhausted)
        ));
        assert_eq!(record.daily_reset_limit, 0);
    }
}
