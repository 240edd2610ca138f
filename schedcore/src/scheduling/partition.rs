use std::cmp::Reverse;

use crate::data::precursor::TimsPrecursor;
use crate::data::ramp::Ramp;
use crate::scheduling::overlap::OverlapMap;

/// Partition a candidate set into acquisition ramps of mutually
/// non-overlapping precursors.
///
/// Greedy independent-set extraction: precursors are processed by descending
/// overlap degree (stable sort, ties keep input order), each unplaced
/// precursor seeds a new ramp, and the remaining candidates are scanned in
/// input order and added when they overlap neither the seed nor any member
/// already accepted into the ramp. Seeding with the most-constrained
/// precursors first keeps the ramp count low, the result is reproducible but
/// not guaranteed minimal.
///
/// Every precursor of `precursors` ends up in exactly one ramp. Precursors
/// missing from the overlap map are treated as overlap-free.
pub fn partition_into_ramps(overlaps: &OverlapMap, precursors: &[TimsPrecursor]) -> Vec<Ramp> {
    let overlaps_with = |id: u32, other: u32| -> bool {
        overlaps.get(&id).is_some_and(|partners| partners.contains(&other))
    };

    let mut order: Vec<usize> = (0..precursors.len()).collect();
    order.sort_by_key(|&i| {
        Reverse(
            overlaps
                .get(&precursors[i].feature_id)
                .map_or(0, |partners| partners.len()),
        )
    });

    let mut placed = vec![false; precursors.len()];
    let mut ramps: Vec<Ramp> = Vec::new();

    for &seed in &order {
        if placed[seed] {
            continue;
        }
        placed[seed] = true;
        let mut members: Vec<TimsPrecursor> = vec![precursors[seed].clone()];

        for (candidate_idx, candidate) in precursors.iter().enumerate() {
            if placed[candidate_idx] {
                continue;
            }
            let conflicts = members
                .iter()
                .any(|member| overlaps_with(member.feature_id, candidate.feature_id));
            if !conflicts {
                placed[candidate_idx] = true;
                members.push(candidate.clone());
            }
        }

        ramps.push(Ramp::new(members));
    }

    ramps
}
