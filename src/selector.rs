//! Daily task draws.
//!
//! A draw is a uniform random subset of the catalog, taken without
//! replacement. The order of the returned tasks is the draw order and is
//! what ends up in both the record and the manifest.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{Result, TaskRewardError};
use crate::record::Record;
use crate::tier::Tier;

/// Draw `count` distinct entries from `catalog`.
///
/// Fails with `InsufficientCatalog` when the catalog has fewer than `count`
/// entries.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use tasknreward::selector::sample;
///
/// let catalog = vec!["run".to_string(), "read".to_string(), "cook".to_string()];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let drawn = sample(&catalog, 2, &mut rng).unwrap();
/// assert_eq!(drawn.len(), 2);
/// assert!(drawn.iter().all(|t| catalog.contains(t)));
/// ```
pub fn sample<T>(catalog: &[T], count: usize, rng: &mut impl Rng) -> Result<Vec<String>>
where
    T: AsRef<str>,
{
    if catalog.len() < count {
        return Err(TaskRewardError::InsufficientCatalog {
            requested: count,
            available: catalog.len(),
        });
    }

    let drawn: Vec<String> = catalog
        .choose_multiple(rng, count)
        .map(|t| t.as_ref().to_string())
        .collect();
    debug!(?drawn, available = catalog.len(), "Drew tasks");
    Ok(drawn)
}

/// Start the daily cycle for `today`.
///
/// Replaces the daily pending list with a fresh draw and stamps the record
/// with the date. The completed list is left alone. Nothing is mutated if
/// the draw fails.
pub fn generate(
    record: &mut Record,
    catalog: &[String],
    count: usize,
    today: NaiveDate,
    rng: &mut impl Rng,
) -> Result<Vec<String>> {
    let drawn = sample(catalog, count, rng)?;
    record.date = Some(today);
    record.set_pending(Tier::Daily, drawn.clone());
    Ok(drawn)
}
