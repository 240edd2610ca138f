use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

use crate::data::precursor::TimsPrecursor;
use crate::data::ramp::Ramp;
use crate::error::SchedulingError;
use crate::scheduling::config::SchedulerConfig;
use crate::scheduling::overlap::find_overlaps;
use crate::scheduling::partition::partition_into_ramps;

/// Keep the `n` highest-intensity candidates. The sort is stable, candidates
/// with equal intensity stay in input order.
pub fn select_top_n(candidates: &[TimsPrecursor], n: usize) -> Vec<TimsPrecursor> {
    let mut ranked: Vec<TimsPrecursor> = candidates.to_vec();
    ranked.sort_by(|a, b| {
        b.intensity
            .partial_cmp(&a.intensity)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

/// Run one scheduling pass: validate the candidate set, keep the top
/// `max_precursors` by intensity, build the overlap map and partition into
/// ramps.
///
/// The pass is synchronous and deterministic, identical input produces an
/// identical ramp grouping. Any validation failure fails the whole
/// invocation, no partial ramp set is returned.
///
/// # Examples
///
/// ```
/// use schedcore::data::precursor::{MobilityWindow, TimsPrecursor};
/// use schedcore::scheduling::config::SchedulerConfig;
/// use schedcore::scheduling::selection::schedule;
///
/// let candidates = vec![
///     TimsPrecursor::new(1, 500.0, 2e4, 1.025, MobilityWindow::new(1.00, 1.05), vec![20.0]),
///     TimsPrecursor::new(2, 600.0, 1e4, 1.070, MobilityWindow::new(1.04, 1.10), vec![20.0]),
///     TimsPrecursor::new(3, 700.0, 3e4, 2.025, MobilityWindow::new(2.00, 2.05), vec![20.0]),
/// ];
/// let ramps = schedule(&candidates, &SchedulerConfig::default()).unwrap();
/// assert_eq!(ramps.len(), 2);
/// ```
pub fn schedule(
    candidates: &[TimsPrecursor],
    config: &SchedulerConfig,
) -> Result<Vec<Ramp>, SchedulingError> {
    // checked against the full candidate list, truncation must not hide a duplicate
    let mut seen: HashSet<u32> = HashSet::with_capacity(candidates.len());
    for candidate in candidates {
        if !seen.insert(candidate.feature_id) {
            return Err(SchedulingError::DuplicatePrecursor {
                feature_id: candidate.feature_id,
            });
        }
    }

    let selected = select_top_n(candidates, config.max_precursors);
    debug!(
        "scheduling {} of {} candidate precursors",
        selected.len(),
        candidates.len()
    );

    let overlaps = find_overlaps(&selected, config.mobility_decimals)?;
    let ramps = partition_into_ramps(&overlaps, &selected);
    debug!(
        "partitioned {} precursors into {} ramps",
        selected.len(),
        ramps.len()
    );

    Ok(ramps)
}
