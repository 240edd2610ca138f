use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, HashMap};

use crate::data::precursor::TimsPrecursor;
use crate::error::SchedulingError;

/// Acquisition counters of a single precursor, one per requested collision
/// energy. Energies are kept in ascending order, which is also the tie-break
/// order when several counters share the minimum.
#[derive(Clone, Debug, Default)]
pub struct EnergyLedger {
    counts: BTreeMap<OrderedFloat<f64>, u32>,
}

impl EnergyLedger {
    pub fn new(energies: &[f64]) -> EnergyLedger {
        EnergyLedger {
            counts: energies.iter().map(|&e| (OrderedFloat(e), 0)).collect(),
        }
    }

    pub fn total_acquired(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Minimum counter across the requested energies, 0 for an empty ledger.
    pub fn min_count(&self) -> u32 {
        self.counts.values().copied().min().unwrap_or(0)
    }

    pub fn count_for(&self, energy: f64) -> u32 {
        self.counts.get(&OrderedFloat(energy)).copied().unwrap_or(0)
    }

    /// Energy with the smallest counter. Ties resolve to the lowest energy,
    /// the map iterates in ascending order and only a strictly smaller count
    /// displaces the current best.
    pub fn least_used(&self) -> Option<f64> {
        let mut best: Option<(f64, u32)> = None;
        for (&energy, &count) in &self.counts {
            match best {
                Some((_, best_count)) if count >= best_count => {}
                _ => best = Some((energy.into_inner(), count)),
            }
        }
        best.map(|(energy, _)| energy)
    }

    /// True once every requested energy has at least `target` spectra. An
    /// empty ledger has nothing left to acquire.
    pub fn is_saturated(&self, target: u32) -> bool {
        self.counts.values().all(|&count| count >= target)
    }

    fn increment(&mut self, energy: f64) -> Option<u32> {
        self.counts.get_mut(&OrderedFloat(energy)).map(|count| {
            *count += 1;
            *count
        })
    }
}

/// Tracks how many spectra have been acquired per precursor and collision
/// energy, so acquisition effort is spread evenly across the requested
/// energies of each precursor.
///
/// Ledgers are owned here, keyed by feature id, and are disjoint across
/// precursors, mutating one precursor's ledger never touches another. The
/// tracker knows nothing about ramps or overlap, the instrument driver
/// queries it independently of how ramps were formed. Drivers reporting
/// completions from several threads wrap the tracker in a single mutex,
/// `record_acquisition` takes `&mut self`.
#[derive(Clone, Debug, Default)]
pub struct CollisionEnergyTracker {
    ledgers: HashMap<u32, EnergyLedger>,
}

impl CollisionEnergyTracker {
    pub fn new() -> CollisionEnergyTracker {
        CollisionEnergyTracker::default()
    }

    /// Sum of all per-energy counters of the precursor.
    pub fn total_acquired(&self, precursor: &TimsPrecursor) -> u32 {
        self.ledgers
            .get(&precursor.feature_id)
            .map_or(0, EnergyLedger::total_acquired)
    }

    /// Minimum counter across the precursor's requested energies, the
    /// saturation measure of the acquisition loop.
    pub fn min_acquired_count(&self, precursor: &TimsPrecursor) -> u32 {
        self.ledgers
            .get(&precursor.feature_id)
            .map_or(0, EnergyLedger::min_count)
    }

    /// Counter for a specific energy, 0 for an energy not in the ledger.
    pub fn count_for(&self, precursor: &TimsPrecursor, energy: f64) -> u32 {
        self.ledgers
            .get(&precursor.feature_id)
            .map_or(0, |ledger| ledger.count_for(energy))
    }

    /// The requested energy with the smallest counter, ties broken by
    /// ascending energy. Fails for a precursor without requested energies.
    pub fn least_used_energy(&self, precursor: &TimsPrecursor) -> Result<f64, SchedulingError> {
        let least = match self.ledgers.get(&precursor.feature_id) {
            Some(ledger) => ledger.least_used(),
            // Untouched precursor, all counters are zero
            None => precursor
                .collision_energies
                .iter()
                .copied()
                .min_by_key(|&energy| OrderedFloat(energy)),
        };
        least.ok_or(SchedulingError::EmptyEnergySet {
            feature_id: precursor.feature_id,
        })
    }

    /// Record one acquired spectrum and return the new counter value.
    /// Reporting an energy that was never requested for the precursor is a
    /// driver/configuration mismatch and is rejected instead of silently
    /// extending the ledger.
    pub fn record_acquisition(
        &mut self,
        precursor: &TimsPrecursor,
        energy: f64,
    ) -> Result<u32, SchedulingError> {
        let ledger = self
            .ledgers
            .entry(precursor.feature_id)
            .or_insert_with(|| EnergyLedger::new(&precursor.collision_energies));
        ledger.increment(energy).ok_or(SchedulingError::UnknownEnergy {
            feature_id: precursor.feature_id,
            energy,
        })
    }

    /// True once every requested energy of the precursor has at least
    /// `target` spectra.
    pub fn is_fully_acquired(&self, precursor: &TimsPrecursor, target: u32) -> bool {
        match self.ledgers.get(&precursor.feature_id) {
            Some(ledger) => ledger.is_saturated(target),
            None => target == 0 || precursor.collision_energies.is_empty(),
        }
    }
}
