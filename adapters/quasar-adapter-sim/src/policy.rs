//! Execution policies distinguishing the simulator flavours.
//!
//! Both backends share one pipeline. An [`ExecutionPolicy`] supplies the
//! pieces that differ: validation rules, the shot clamp, and the final-state
//! capture hooks run before and after the shot loop.

use tracing::warn;

use quasar_hal::{ExperimentData, HalError, HalResult, ValidationWarning};
use quasar_ir::{Circuit, Operation, Program, Qobj, SnapshotSlot};

use crate::snapshot::SnapshotStore;

/// Snapshot label the final state used to be filed under by older
/// statevector simulators.
pub const LEGACY_FINAL_STATE_LABEL: &str = "32767";

/// Validation rules and pipeline hooks of one simulator flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionPolicy {
    /// Warn when the whole job runs a single shot.
    pub warn_single_shot: bool,
    /// Warn about circuits without any measurement.
    pub warn_missing_measurements: bool,
    /// Reject circuits containing `measure` or `reset`.
    pub reject_non_unitary: bool,
    /// Run exactly one shot per circuit.
    pub force_single_shot: bool,
    /// Capture the end-of-circuit state and publish it as `statevector`.
    pub capture_final_state: bool,
}

impl ExecutionPolicy {
    /// The shot-based simulator.
    pub fn qasm() -> Self {
        Self {
            warn_single_shot: true,
            warn_missing_measurements: true,
            reject_non_unitary: false,
            force_single_shot: false,
            capture_final_state: false,
        }
    }

    /// The final-statevector simulator.
    pub fn statevector() -> Self {
        Self {
            warn_single_shot: false,
            warn_missing_measurements: false,
            reject_non_unitary: true,
            force_single_shot: true,
            capture_final_state: true,
        }
    }

    /// Check a job without modifying it.
    pub fn validate(&self, qobj: &Qobj) -> HalResult<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();

        if self.force_single_shot {
            if qobj.config.shots != 1 {
                warnings.push(ValidationWarning::ShotsCoerced {
                    circuit: None,
                    requested: Some(qobj.config.shots),
                });
            }
        } else {
            if qobj.config.shots == 0 {
                return Err(HalError::InvalidShots(
                    "job requests 0 shots; at least 1 is required".into(),
                ));
            }
            if self.warn_single_shot && qobj.config.shots == 1 {
                warnings.push(ValidationWarning::SingleShotStatevector);
            }
        }

        for circuit in &qobj.experiments {
            self.validate_circuit(circuit, &mut warnings)?;
        }
        Ok(warnings)
    }

    fn validate_circuit(
        &self,
        circuit: &Circuit,
        warnings: &mut Vec<ValidationWarning>,
    ) -> HalResult<()> {
        if self.reject_non_unitary
            && circuit
                .instructions
                .iter()
                .any(|inst| inst.is_measure() || inst.is_reset())
        {
            return Err(HalError::InvalidCircuit(format!(
                "In circuit {}: statevector simulator does not support measure or reset.",
                circuit.name()
            )));
        }

        if self.force_single_shot {
            if circuit.config.is_some() && circuit.shots() != Some(1) {
                warnings.push(ValidationWarning::ShotsCoerced {
                    circuit: Some(circuit.name().to_string()),
                    requested: circuit.shots(),
                });
            }
        } else if circuit.shots() == Some(0) {
            return Err(HalError::InvalidShots(format!(
                "circuit '{}' requests 0 shots",
                circuit.name()
            )));
        }

        if self.warn_missing_measurements && !circuit.has_measurements() {
            warnings.push(ValidationWarning::MissingMeasurements {
                circuit: circuit.name().to_string(),
            });
        }
        Ok(())
    }

    /// Rewrite the job's shot settings.
    pub fn apply_overrides(&self, qobj: &mut Qobj) {
        if !self.force_single_shot {
            return;
        }
        qobj.config.shots = 1;
        for config in qobj.experiments.iter_mut().filter_map(|c| c.config.as_mut()) {
            config.shots = Some(1);
        }
    }

    /// Hook run on a compiled program before its shot loop.
    pub fn prepare(&self, program: &mut Program) {
        if !self.capture_final_state {
            return;
        }
        let legacy = SnapshotSlot::Label(LEGACY_FINAL_STATE_LABEL.into());
        if program
            .ops
            .iter()
            .any(|op| matches!(&op.operation, Operation::Snapshot { slot } if *slot == legacy))
        {
            warn!(
                circuit = %program.name,
                "snapshot label \"{LEGACY_FINAL_STATE_LABEL}\" is reported as an ordinary snapshot, not as the final statevector"
            );
        }
        program.push(Operation::Snapshot {
            slot: SnapshotSlot::FinalState,
        });
    }

    /// Hook moving captured states into the result payload.
    pub fn collect(&self, mut snapshots: SnapshotStore, data: &mut ExperimentData) {
        if self.capture_final_state {
            data.statevector = snapshots.take_final_state();
        }
        data.snapshots = snapshots.into_snapshots();
    }
}
