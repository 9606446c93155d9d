//! Simulator backend implementation.

use std::time::Instant;
use tracing::{debug, error, instrument};

use quasar_hal::{
    Backend, BackendConfig, BackendConfiguration, BackendFactory, ExperimentData,
    ExperimentResult, HalError, HalResult, JobResult, ValidationWarning,
};
use quasar_ir::{Circuit, Program, Qobj};

use crate::executor::ShotExecutor;
use crate::format::format_counts;
use crate::policy::ExecutionPolicy;
use crate::statevector::{DEFAULT_MAX_QUBITS, StatevectorKernel};

/// Local simulator backend.
///
/// Runs every circuit of a job on a fresh [`StatevectorKernel`]. The
/// [`ExecutionPolicy`] decides whether it behaves as the shot-based qasm
/// simulator or as the final-statevector simulator.
#[derive(Debug, Clone)]
pub struct SimulatorBackend {
    /// Descriptive metadata.
    configuration: BackendConfiguration,
    /// Flavour-specific rules.
    policy: ExecutionPolicy,
    /// Maximum number of qubits supported.
    max_qubits: u32,
}

impl SimulatorBackend {
    fn with_policy(configuration: BackendConfiguration, policy: ExecutionPolicy) -> Self {
        Self {
            configuration,
            policy,
            max_qubits: DEFAULT_MAX_QUBITS as u32,
        }
    }

    /// The shot-based simulator.
    pub fn qasm() -> Self {
        Self::with_policy(
            BackendConfiguration::qasm_simulator(),
            ExecutionPolicy::qasm(),
        )
    }

    /// The final-statevector simulator.
    pub fn statevector() -> Self {
        Self::with_policy(
            BackendConfiguration::statevector_simulator(),
            ExecutionPolicy::statevector(),
        )
    }

    /// Set the qubit limit.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// The qubit limit.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    /// The policy in force.
    pub fn policy(&self) -> &ExecutionPolicy {
        &self.policy
    }

    /// Execute one circuit; its own seed and shot count win over the defaults.
    #[instrument(skip(self, circuit), fields(circuit = %circuit.name()))]
    fn run_circuit(
        &self,
        circuit: &Circuit,
        default_seed: u64,
        job_shots: u32,
    ) -> HalResult<ExperimentResult> {
        let seed = circuit.seed().unwrap_or(default_seed);
        let shots = circuit.shots().unwrap_or(job_shots);

        let mut program = Program::compile(circuit)?;
        self.policy.prepare(&mut program);
        debug!(
            "Starting simulation: {} qubits, {} ops, {} shots",
            program.num_qubits(),
            program.ops.len(),
            shots
        );

        let mut kernel = StatevectorKernel::new(seed).with_max_qubits(self.max_qubits as usize);
        let outcome = ShotExecutor::new(self.name()).run(&mut kernel, &program, shots)?;

        let mut data = ExperimentData {
            counts: format_counts(&outcome.counts, &program.cregs),
            classical_state: outcome.classical_state,
            ..ExperimentData::default()
        };
        self.policy.collect(outcome.snapshots, &mut data);

        Ok(ExperimentResult::done(circuit.name(), seed, shots, data)
            .with_time_taken(outcome.elapsed.as_secs_f64()))
    }
}

/// Seed for the `index`-th circuit of a job. Circuit 0 uses the job seed
/// itself; later circuits are spread by a Weyl increment so identical
/// circuits draw different streams.
fn circuit_seed(job_seed: u64, index: usize) -> u64 {
    job_seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::qasm()
    }
}

impl Backend for SimulatorBackend {
    fn configuration(&self) -> &BackendConfiguration {
        &self.configuration
    }

    fn validate(&self, qobj: &Qobj) -> HalResult<Vec<ValidationWarning>> {
        for circuit in &qobj.experiments {
            if circuit.num_qubits() > self.max_qubits {
                return Err(HalError::CircuitTooLarge(format!(
                    "Circuit '{}' has {} qubits but simulator only supports {}",
                    circuit.name(),
                    circuit.num_qubits(),
                    self.max_qubits
                )));
            }
        }
        self.policy.validate(qobj)
    }

    #[instrument(skip(self, qobj), fields(backend = %self.name(), qobj_id = %qobj.qobj_id))]
    fn run(&self, mut qobj: Qobj) -> HalResult<JobResult> {
        let start = Instant::now();

        for warning in self.validate(&qobj)? {
            warning.emit();
        }
        self.policy.apply_overrides(&mut qobj);

        let job_seed = qobj
            .config
            .seed
            .unwrap_or_else(|| u64::from(rand::random::<u32>()));
        debug!(
            "Running {} circuits, seed {}",
            qobj.experiments.len(),
            job_seed
        );

        let results = qobj
            .experiments
            .iter()
            .enumerate()
            .map(|(index, circuit)| {
                self.run_circuit(circuit, circuit_seed(job_seed, index), qobj.config.shots)
                    .map_err(|err| {
                        let err = err.in_circuit(circuit.name());
                        error!("{err}");
                        err
                    })
            })
            .collect::<HalResult<Vec<_>>>()?;

        Ok(JobResult::completed(
            self.name(),
            qobj.qobj_id,
            results,
            start.elapsed().as_secs_f64(),
        ))
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let backend = match config.name.as_str() {
            "qasm" | "quasar_qasm_simulator" => Self::qasm(),
            "statevector" | "quasar_statevector_simulator" => Self::statevector(),
            other => {
                return Err(HalError::Configuration(format!(
                    "unknown simulator '{other}'; expected 'qasm' or 'statevector'"
                )));
            }
        };

        if let Some(kernel) = config.extra_str("kernel") {
            if kernel != "statevector" {
                return Err(HalError::SimulatorUnavailable(format!(
                    "kernel '{kernel}' is not available; only 'statevector' is built in"
                )));
            }
        }

        let max_qubits = match config.extra_u64("max_qubits") {
            Some(n) => u32::try_from(n)
                .ok()
                .filter(|&n| n <= 30)
                .ok_or_else(|| {
                    HalError::Configuration(format!("max_qubits {n} is out of range (at most 30)"))
                })?,
            None => DEFAULT_MAX_QUBITS as u32,
        };

        Ok(backend.with_max_qubits(max_qubits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_names() {
        assert_eq!(SimulatorBackend::qasm().name(), "quasar_qasm_simulator");
        assert_eq!(
            SimulatorBackend::statevector().name(),
            "quasar_statevector_simulator"
        );
    }

    #[test]
    fn test_bell_state() {
        let backend = SimulatorBackend::qasm();
        let job = Qobj::new("bell", vec![Circuit::bell()], 1000).with_seed(5);
        let result = backend.run(job).unwrap();

        let counts = result.results[0].counts();
        assert_eq!(counts.total_shots(), 1000);
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert!(counts.get("00") > 400);
        assert!(counts.get("11") > 400);
    }

    #[test]
    fn test_circuit_too_large() {
        let backend = SimulatorBackend::qasm().with_max_qubits(3);
        let job = Qobj::new("big", vec![Circuit::ghz(4)], 10);
        assert!(matches!(
            backend.validate(&job),
            Err(HalError::CircuitTooLarge(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let backend = SimulatorBackend::from_config(
            BackendConfig::new("statevector").with_extra("max_qubits", serde_json::json!(8)),
        )
        .unwrap();
        assert_eq!(backend.name(), "quasar_statevector_simulator");
        assert_eq!(backend.max_qubits(), 8);
        assert_eq!(backend.policy(), &ExecutionPolicy::statevector());

        assert!(matches!(
            SimulatorBackend::from_config(BackendConfig::new("ibm")),
            Err(HalError::Configuration(_))
        ));
        assert!(matches!(
            SimulatorBackend::from_config(
                BackendConfig::new("qasm").with_extra("kernel", serde_json::json!("qulacs"))
            ),
            Err(HalError::SimulatorUnavailable(_))
        ));
    }

    #[test]
    fn test_seed_reporting() {
        let backend = SimulatorBackend::qasm();
        let job = Qobj::new(
            "seeds",
            vec![Circuit::bell(), Circuit::bell().with_seed(99)],
            10,
        )
        .with_seed(7);
        let result = backend.run(job).unwrap();
        assert_eq!(result.results[0].seed, 7);
        assert_eq!(result.results[1].seed, 99);

        let unseeded = backend
            .run(Qobj::new("u", vec![Circuit::bell()], 10))
            .unwrap();
        assert!(unseeded.results[0].seed <= u64::from(u32::MAX));
    }
}
