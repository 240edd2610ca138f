use serde::{Deserialize, Serialize};

use crate::data::precursor::TimsPrecursor;

/// A group of mutually non-overlapping precursors acquired together in one
/// acquisition ramp. Ramps are produced by the partitioner and are not
/// modified afterwards, the member list is therefore read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    precursors: Vec<TimsPrecursor>,
}

impl Ramp {
    pub fn new(precursors: Vec<TimsPrecursor>) -> Ramp {
        Ramp { precursors }
    }

    pub fn precursors(&self) -> &[TimsPrecursor] {
        &self.precursors
    }

    pub fn len(&self) -> usize {
        self.precursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.precursors.is_empty()
    }

    pub fn contains_feature(&self, feature_id: u32) -> bool {
        self.precursors.iter().any(|p| p.feature_id == feature_id)
    }

    pub fn feature_ids(&self) -> Vec<u32> {
        self.precursors.iter().map(|p| p.feature_id).collect()
    }
}
