use itertools::Itertools;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::data::precursor::TimsPrecursor;
use crate::error::SchedulingError;

/// Pairwise mobility overlap relation over a candidate set, keyed by feature
/// id. Every precursor of the candidate set has an entry, precursors without
/// overlap partners map to an empty set. The relation is symmetric and
/// non-reflexive.
pub type OverlapMap = HashMap<u32, BTreeSet<u32>>;

/// Build the overlap adjacency map for a candidate set.
///
/// Two precursors overlap iff their mobility windows, rounded to `decimals`
/// decimal digits, touch or intersect. The comparison is exhaustive over all
/// pairs, candidate sets are bounded by the batch size so the quadratic scan
/// stays cheap and deterministic.
///
/// # Arguments
///
/// * `precursors` - candidate set, must not contain the same feature id twice
/// * `decimals` - rounding precision of the mobility comparison
///
/// # Returns
///
/// * `Result<OverlapMap, SchedulingError>` - the adjacency map, or
///   `DuplicatePrecursor` if a feature id appears twice
///
/// # Examples
///
/// ```
/// use schedcore::data::precursor::{MobilityWindow, TimsPrecursor};
/// use schedcore::scheduling::overlap::find_overlaps;
///
/// let precursors = vec![
///     TimsPrecursor::new(1, 500.0, 1e4, 1.025, MobilityWindow::new(1.00, 1.05), vec![20.0]),
///     TimsPrecursor::new(2, 600.0, 1e4, 1.070, MobilityWindow::new(1.04, 1.10), vec![20.0]),
///     TimsPrecursor::new(3, 700.0, 1e4, 2.025, MobilityWindow::new(2.00, 2.05), vec![20.0]),
/// ];
/// let overlaps = find_overlaps(&precursors, 2).unwrap();
/// assert!(overlaps[&1].contains(&2));
/// assert!(overlaps[&3].is_empty());
/// ```
pub fn find_overlaps(
    precursors: &[TimsPrecursor],
    decimals: u32,
) -> Result<OverlapMap, SchedulingError> {
    let mut seen: HashSet<u32> = HashSet::with_capacity(precursors.len());
    for precursor in precursors {
        if !seen.insert(precursor.feature_id) {
            return Err(SchedulingError::DuplicatePrecursor {
                feature_id: precursor.feature_id,
            });
        }
    }

    let mut overlaps: OverlapMap = precursors
        .iter()
        .map(|p| (p.feature_id, BTreeSet::new()))
        .collect();

    for (a, b) in precursors.iter().tuple_combinations() {
        if a.overlaps_with(b, decimals) {
            overlaps.entry(a.feature_id).or_default().insert(b.feature_id);
            overlaps.entry(b.feature_id).or_default().insert(a.feature_id);
        }
    }

    Ok(overlaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::precursor::MobilityWindow;

    fn precursor(id: u32, lower: f64, upper: f64) -> TimsPrecursor {
        TimsPrecursor::new(
            id,
            500.0 + id as f64,
            1e4,
            (lower + upper) / 2.0,
            MobilityWindow::new(lower, upper),
            vec![20.0, 35.0],
        )
    }

    #[test]
    fn test_empty_input() {
        let overlaps = find_overlaps(&[], 2).unwrap();
        assert!(overlaps.is_empty());
    }

    #[test]
    fn test_touching_windows_overlap() {
        let precursors = vec![
            precursor(1, 1.00, 1.05),
            precursor(2, 1.04, 1.10),
            precursor(3, 2.00, 2.05),
        ];
        let overlaps = find_overlaps(&precursors, 2).unwrap();

        assert_eq!(overlaps.len(), 3);
        assert!(overlaps[&1].contains(&2));
        assert!(overlaps[&2].contains(&1));
        assert!(overlaps[&3].is_empty());
    }

    #[test]
    fn test_symmetric_and_irreflexive() {
        let precursors = vec![
            precursor(1, 0.80, 0.90),
            precursor(2, 0.85, 0.95),
            precursor(3, 0.88, 0.98),
        ];
        let overlaps = find_overlaps(&precursors, 2).unwrap();

        for (id, partners) in &overlaps {
            assert!(!partners.contains(id));
            for partner in partners {
                assert!(overlaps[partner].contains(id));
            }
        }
    }

    #[test]
    fn test_rounding_precision_is_configurable() {
        // Gap of 0.004, below two-decimal resolution
        let precursors = vec![precursor(1, 0.900, 0.948), precursor(2, 0.952, 1.000)];

        let coarse = find_overlaps(&precursors, 2).unwrap();
        assert!(coarse[&1].contains(&2));

        let fine = find_overlaps(&precursors, 3).unwrap();
        assert!(fine[&1].is_empty());
    }

    #[test]
    fn test_duplicate_identity_is_rejected() {
        let precursors = vec![precursor(1, 1.00, 1.05), precursor(1, 2.00, 2.05)];
        let result = find_overlaps(&precursors, 2);
        assert_eq!(
            result,
            Err(SchedulingError::DuplicatePrecursor { feature_id: 1 })
        );
    }
}
