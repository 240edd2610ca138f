use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// Input-validation failures of the scheduling core.
///
/// All variants are synchronous caller errors, there are no transient or
/// retryable failures, the core performs no I/O. A failed invocation must be
/// discarded as a whole, a partially built ramp set could request physically
/// unisolable co-fragmentation on the instrument.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulingError {
    /// A least-used-energy query was made for a precursor that requests no
    /// collision energies.
    EmptyEnergySet { feature_id: u32 },
    /// An acquisition was reported for a collision energy that was never
    /// requested for the precursor, the driver and the scheduling
    /// configuration disagree.
    UnknownEnergy { feature_id: u32, energy: f64 },
    /// The candidate set contains the same feature identity twice.
    DuplicatePrecursor { feature_id: u32 },
}

impl Display for SchedulingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingError::EmptyEnergySet { feature_id } => {
                write!(f, "precursor {} has no requested collision energies", feature_id)
            }
            SchedulingError::UnknownEnergy { feature_id, energy } => {
                write!(
                    f,
                    "collision energy {} was never requested for precursor {}",
                    energy, feature_id
                )
            }
            SchedulingError::DuplicatePrecursor { feature_id } => {
                write!(f, "candidate set contains precursor {} more than once", feature_id)
            }
        }
    }
}

impl Error for SchedulingError {}
