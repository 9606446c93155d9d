//! The per-circuit shot loop.

use num_complex::Complex64;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use quasar_hal::{Counts, HalResult};
use quasar_ir::Program;

use crate::classical::ClassicalState;
use crate::dispatch::Dispatcher;
use crate::kernel::Kernel;
use crate::snapshot::SnapshotStore;

/// What one circuit's shot loop produced.
#[derive(Debug, Clone)]
pub struct CircuitOutcome {
    /// Histogram of bare bitstrings (no register separators).
    pub counts: Counts,
    /// Every state captured by snapshot operations.
    pub snapshots: SnapshotStore,
    /// Final classical value, reported for single-shot runs only.
    pub classical_state: Option<u64>,
    /// Wall-clock time of the loop.
    pub elapsed: Duration,
}

/// Runs a compiled program for a number of shots.
#[derive(Debug, Clone, Copy)]
pub struct ShotExecutor<'a> {
    backend: &'a str,
}

impl<'a> ShotExecutor<'a> {
    /// Create an executor that reports errors as coming from `backend`.
    pub fn new(backend: &'a str) -> Self {
        Self { backend }
    }

    /// Execute `program` `shots` times on `kernel`.
    ///
    /// The register is allocated once. From the second shot on, the kernel
    /// is flushed and the cached ground state injected instead of
    /// reallocating; the register size never changes within a circuit.
    /// Any dispatch failure aborts the loop.
    pub fn run<K: Kernel>(
        &self,
        kernel: &mut K,
        program: &Program,
        shots: u32,
    ) -> HalResult<CircuitOutcome> {
        let start = Instant::now();
        let num_qubits = program.num_qubits() as usize;
        let qureg = kernel.allocate_qureg(num_qubits)?;

        let ground_state = (shots > 1).then(|| {
            let mut state = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
            state[0] = Complex64::new(1.0, 0.0);
            state
        });

        let mut counts = Counts::new();
        let mut snapshots = SnapshotStore::new();
        let mut classical = ClassicalState::new(program.num_clbits());

        for shot in 0..shots {
            classical.reset();
            if shot > 0 {
                if let Some(ground) = &ground_state {
                    kernel.flush();
                    kernel.set_amplitudes(ground, &qureg)?;
                }
            }

            let mut dispatcher = Dispatcher::new(self.backend, kernel, &qureg, &mut snapshots);
            for op in &program.ops {
                dispatcher.execute(op, &mut classical)?;
            }

            // Leave no qubit in superposition; the classical state is untouched.
            let kernel = dispatcher.kernel();
            for &qubit in &qureg {
                kernel.measure(qubit)?;
            }
            kernel.flush();

            let outcome = classical.to_bitstring();
            trace!(shot, outcome = %outcome, "shot finished");
            counts.insert(outcome, 1);
        }

        let elapsed = start.elapsed();
        debug!(
            circuit = %program.name,
            shots,
            outcomes = counts.len(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "shot loop finished"
        );

        Ok(CircuitOutcome {
            counts,
            snapshots,
            classical_state: (shots == 1).then(|| classical.value()),
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statevector::StatevectorKernel;
    use quasar_hal::HalError;
    use quasar_ir::{Circuit, SnapshotSlot};

    fn execute(circuit: &Circuit, shots: u32, seed: u64) -> HalResult<CircuitOutcome> {
        let program = Program::compile(circuit)?;
        let mut kernel = StatevectorKernel::new(seed);
        ShotExecutor::new("test_sim").run(&mut kernel, &program, shots)
    }

    #[test]
    fn test_x_gate_every_shot() {
        let mut circuit = Circuit::with_size("x", 2, 2);
        circuit.u3(std::f64::consts::PI, 0.0, std::f64::consts::PI, 1).measure_all();
        let outcome = execute(&circuit, 50, 1).unwrap();
        // Ground state reinjection means every shot starts from |00⟩.
        assert_eq!(outcome.counts.get("10"), 50);
        assert_eq!(outcome.counts.len(), 1);
        assert_eq!(outcome.classical_state, None);
    }

    #[test]
    fn test_single_shot_reports_classical_state() {
        let mut circuit = Circuit::with_size("x", 1, 3);
        circuit.u3(std::f64::consts::PI, 0.0, 0.0, 0).measure(0, 2);
        let outcome = execute(&circuit, 1, 1).unwrap();
        assert_eq!(outcome.classical_state, Some(0b100));
        assert_eq!(outcome.counts.get("100"), 1);
    }

    #[test]
    fn test_unmeasured_qubits_leave_classical_state_zero() {
        let mut circuit = Circuit::with_size("h", 2, 2);
        circuit.h(0).h(1);
        let outcome = execute(&circuit, 20, 3).unwrap();
        assert_eq!(outcome.counts.get("00"), 20);
    }

    #[test]
    fn test_snapshot_per_shot() {
        let mut circuit = Circuit::with_size("snap", 1, 1);
        circuit.h(0).snapshot("mid").measure(0, 0);
        let outcome = execute(&circuit, 4, 9).unwrap();
        let captured = outcome
            .snapshots
            .get(&SnapshotSlot::Label("mid".into()))
            .unwrap();
        assert_eq!(captured.len(), 4);
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for state in captured {
            assert!((state[0].re - sqrt2_inv).abs() < 1e-10);
            assert!((state[1].re - sqrt2_inv).abs() < 1e-10);
        }
    }

    #[test]
    fn test_zero_clbits_key() {
        let mut circuit = Circuit::with_size("bare", 1, 0);
        circuit.h(0);
        let outcome = execute(&circuit, 3, 0).unwrap();
        assert_eq!(outcome.counts.get("0"), 3);
    }

    #[test]
    fn test_reset_aborts_loop() {
        let mut circuit = Circuit::with_size("r", 1, 1);
        circuit.h(0).measure(0, 0).reset(0);
        let err = execute(&circuit, 10, 0).unwrap_err();
        assert!(matches!(err, HalError::UnsupportedOperation { .. }));
    }
}
