//! Instruction dispatch onto the kernel.

use std::f64::consts::FRAC_PI_2;

use quasar_hal::{HalError, HalResult};
use quasar_ir::{Op, Operation, QubitId};

use crate::classical::ClassicalState;
use crate::kernel::{Axis, Kernel, NativeGate, QubitHandle};
use crate::snapshot::SnapshotStore;

/// Executes operations of one circuit against a kernel.
///
/// Borrows everything that lives for the whole circuit. The classical state
/// belongs to the current shot and is lent per call.
pub struct Dispatcher<'a, K: Kernel> {
    backend: &'a str,
    kernel: &'a mut K,
    qureg: &'a [QubitHandle],
    snapshots: &'a mut SnapshotStore,
}

impl<'a, K: Kernel> Dispatcher<'a, K> {
    /// Create a dispatcher over an allocated register.
    pub fn new(
        backend: &'a str,
        kernel: &'a mut K,
        qureg: &'a [QubitHandle],
        snapshots: &'a mut SnapshotStore,
    ) -> Self {
        Self {
            backend,
            kernel,
            qureg,
            snapshots,
        }
    }

    /// The kernel being driven.
    pub fn kernel(&mut self) -> &mut K {
        &mut *self.kernel
    }

    /// Execute one operation.
    ///
    /// `reset` and unrecognized operations fail whether or not their
    /// condition holds. Everything else is skipped without touching the
    /// kernel when its condition is false.
    pub fn execute(&mut self, op: &Op, classical: &mut ClassicalState) -> HalResult<()> {
        let screened = !matches!(
            op.operation,
            Operation::Reset { .. } | Operation::Unrecognized { .. }
        );
        if screened {
            if let Some(cond) = op.condition {
                if !classical.evaluate_conditional(cond.mask, cond.val) {
                    return Ok(());
                }
            }
        }

        match &op.operation {
            Operation::U3 {
                qubit,
                theta,
                phi,
                lambda,
            } => {
                let q = self.handle(*qubit)?;
                self.kernel.apply_rotation(Axis::Z, *lambda, q)?;
                self.kernel.apply_rotation(Axis::Y, *theta, q)?;
                self.kernel.apply_rotation(Axis::Z, *phi, q)
            }
            Operation::U1 { qubit, lambda } => {
                let q = self.handle(*qubit)?;
                self.kernel.apply_rotation(Axis::Z, *lambda, q)
            }
            Operation::U2 { qubit, phi, lambda } => {
                let q = self.handle(*qubit)?;
                self.kernel.apply_rotation(Axis::Z, lambda - FRAC_PI_2, q)?;
                self.kernel.apply_rotation(Axis::X, FRAC_PI_2, q)?;
                self.kernel.apply_rotation(Axis::Z, phi + FRAC_PI_2, q)
            }
            Operation::T { qubit } => self.native(NativeGate::T, &[*qubit]),
            Operation::H { qubit } => self.native(NativeGate::H, &[*qubit]),
            Operation::S { qubit } => self.native(NativeGate::S, &[*qubit]),
            Operation::Cx { control, target } => self.native(NativeGate::Cx, &[*control, *target]),
            Operation::Id | Operation::Barrier => Ok(()),
            Operation::Measure { qubit, clbit } => {
                let q = self.handle(*qubit)?;
                let outcome = self.kernel.measure(q)?;
                classical.set_bit(clbit.0, outcome);
                Ok(())
            }
            Operation::Snapshot { slot } => {
                self.kernel.flush();
                self.snapshots.record(slot, self.kernel.amplitudes());
                Ok(())
            }
            Operation::Reset { .. } => Err(HalError::UnsupportedOperation {
                backend: self.backend.to_string(),
                operation: op.operation.name().to_string(),
            }),
            Operation::Unrecognized { name } => Err(HalError::UnrecognizedOperation {
                backend: self.backend.to_string(),
                operation: name.clone(),
            }),
        }
    }

    fn native(&mut self, gate: NativeGate, qubits: &[QubitId]) -> HalResult<()> {
        let handles = qubits
            .iter()
            .map(|&q| self.handle(q))
            .collect::<HalResult<Vec<_>>>()?;
        self.kernel.apply_gate(gate, &handles)
    }

    fn handle(&self, qubit: QubitId) -> HalResult<QubitHandle> {
        self.qureg.get(qubit.0 as usize).copied().ok_or_else(|| {
            HalError::Kernel(format!(
                "{qubit} is outside the {}-qubit register",
                self.qureg.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use quasar_ir::{ClassicalCondition, ClbitId, SnapshotSlot};

    /// Records every kernel call.
    #[derive(Default)]
    struct RecordingKernel {
        calls: Vec<String>,
        next_measurement: bool,
    }

    impl Kernel for RecordingKernel {
        fn allocate_qureg(&mut self, n: usize) -> HalResult<Vec<QubitHandle>> {
            Ok((0..n).map(QubitHandle).collect())
        }

        fn apply_rotation(&mut self, axis: Axis, angle: f64, qubit: QubitHandle) -> HalResult<()> {
            self.calls.push(format!("r{axis:?}({angle:.4}) {}", qubit.0));
            Ok(())
        }

        fn apply_gate(&mut self, gate: NativeGate, qubits: &[QubitHandle]) -> HalResult<()> {
            let operands: Vec<_> = qubits.iter().map(|q| q.0.to_string()).collect();
            self.calls.push(format!("{gate:?} {}", operands.join(",")));
            Ok(())
        }

        fn measure(&mut self, qubit: QubitHandle) -> HalResult<bool> {
            self.calls.push(format!("measure {}", qubit.0));
            Ok(self.next_measurement)
        }

        fn flush(&mut self) {
            self.calls.push("flush".into());
        }

        fn amplitudes(&self) -> Vec<Complex64> {
            vec![Complex64::new(1.0, 0.0)]
        }

        fn set_amplitudes(&mut self, _: &[Complex64], _: &[QubitHandle]) -> HalResult<()> {
            self.calls.push("set".into());
            Ok(())
        }
    }

    fn run(
        ops: &[Op],
        kernel: &mut RecordingKernel,
        classical: &mut ClassicalState,
    ) -> HalResult<()> {
        let qureg: Vec<_> = (0..3).map(QubitHandle).collect();
        let mut snapshots = SnapshotStore::new();
        let mut dispatcher = Dispatcher::new("test_sim", kernel, &qureg, &mut snapshots);
        for op in ops {
            dispatcher.execute(op, classical)?;
        }
        Ok(())
    }

    #[test]
    fn test_u3_decomposition_order() {
        let mut kernel = RecordingKernel::default();
        let op = Op::new(Operation::U3 {
            qubit: QubitId(1),
            theta: 0.1,
            phi: 0.2,
            lambda: 0.3,
        });
        run(&[op], &mut kernel, &mut ClassicalState::new(0)).unwrap();
        assert_eq!(
            kernel.calls,
            vec!["rZ(0.3000) 1", "rY(0.1000) 1", "rZ(0.2000) 1"]
        );
    }

    #[test]
    fn test_u2_decomposition() {
        let mut kernel = RecordingKernel::default();
        let op = Op::new(Operation::U2 {
            qubit: QubitId(0),
            phi: 0.0,
            lambda: FRAC_PI_2,
        });
        run(&[op], &mut kernel, &mut ClassicalState::new(0)).unwrap();
        assert_eq!(
            kernel.calls,
            vec!["rZ(0.0000) 0", "rX(1.5708) 0", "rZ(1.5708) 0"]
        );
    }

    #[test]
    fn test_no_ops_touch_nothing() {
        let mut kernel = RecordingKernel::default();
        run(
            &[Op::new(Operation::Id), Op::new(Operation::Barrier)],
            &mut kernel,
            &mut ClassicalState::new(0),
        )
        .unwrap();
        assert!(kernel.calls.is_empty());
    }

    #[test]
    fn test_false_condition_skips_kernel() {
        let mut kernel = RecordingKernel::default();
        let mut op = Op::new(Operation::H { qubit: QubitId(0) });
        op.condition = Some(ClassicalCondition::new(0b1, 1));
        run(&[op.clone()], &mut kernel, &mut ClassicalState::new(1)).unwrap();
        assert!(kernel.calls.is_empty());

        let mut classical = ClassicalState::new(1);
        classical.set_bit(0, true);
        run(&[op], &mut kernel, &mut classical).unwrap();
        assert_eq!(kernel.calls, vec!["H 0"]);
    }

    #[test]
    fn test_measure_sets_classical_bit() {
        let mut kernel = RecordingKernel {
            next_measurement: true,
            ..RecordingKernel::default()
        };
        let mut classical = ClassicalState::new(3);
        let op = Op::new(Operation::Measure {
            qubit: QubitId(2),
            clbit: ClbitId(1),
        });
        run(&[op], &mut kernel, &mut classical).unwrap();
        assert_eq!(classical.value(), 0b010);
        assert_eq!(kernel.calls, vec!["measure 2"]);
    }

    #[test]
    fn test_snapshot_flushes_first() {
        let mut kernel = RecordingKernel::default();
        let qureg = vec![QubitHandle(0)];
        let mut snapshots = SnapshotStore::new();
        let slot = SnapshotSlot::Label("s".into());
        {
            let mut dispatcher = Dispatcher::new("test_sim", &mut kernel, &qureg, &mut snapshots);
            dispatcher
                .execute(
                    &Op::new(Operation::Snapshot { slot: slot.clone() }),
                    &mut ClassicalState::new(0),
                )
                .unwrap();
        }
        assert_eq!(kernel.calls, vec!["flush"]);
        assert_eq!(snapshots.get(&slot).map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_reset_fails_even_when_condition_false() {
        let mut kernel = RecordingKernel::default();
        let mut op = Op::new(Operation::Reset { qubit: QubitId(0) });
        op.condition = Some(ClassicalCondition::new(0b1, 1));
        let err = run(&[op], &mut kernel, &mut ClassicalState::new(1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "reset operation not yet implemented for test_sim"
        );
    }

    #[test]
    fn test_unrecognized_names_backend() {
        let mut kernel = RecordingKernel::default();
        let op = Op::new(Operation::Unrecognized { name: "ccx".into() });
        let err = run(&[op], &mut kernel, &mut ClassicalState::new(0)).unwrap_err();
        assert!(matches!(
            err,
            HalError::UnrecognizedOperation { ref backend, ref operation }
                if backend == "test_sim" && operation == "ccx"
        ));
    }
}
