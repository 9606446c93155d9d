//! Non-fatal findings raised while validating a job.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// A validation finding that does not stop execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationWarning {
    /// A circuit never measures, so its classical register stays zero.
    MissingMeasurements {
        /// Circuit name.
        circuit: String,
    },
    /// Asking a shot simulator for one shot to read the state is deprecated.
    SingleShotStatevector,
    /// The shot count was overridden to 1.
    ShotsCoerced {
        /// Circuit name, or `None` for the job-wide setting.
        circuit: Option<String>,
        /// The shot count that was requested, if any.
        requested: Option<u32>,
    },
}

impl ValidationWarning {
    /// Emit the finding through `tracing`.
    pub fn emit(&self) {
        match self {
            ValidationWarning::ShotsCoerced { .. } => info!("{self}"),
            _ => warn!("{self}"),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::MissingMeasurements { circuit } => write!(
                f,
                "no measurements in circuit '{circuit}', classical register will remain all zeros"
            ),
            ValidationWarning::SingleShotStatevector => f.write_str(
                "getting the statevector from a shot simulator by setting shots=1 is \
                 deprecated; use the statevector simulator or place explicit snapshot \
                 instructions",
            ),
            ValidationWarning::ShotsCoerced { circuit, .. } => {
                f.write_str("statevector simulator only supports 1 shot. Setting shots=1")?;
                if let Some(name) = circuit {
                    write!(f, " for circuit {name}")?;
                }
                f.write_str(".")
            }
        }
    }
}
