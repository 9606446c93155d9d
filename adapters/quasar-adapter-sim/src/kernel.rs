//! Interface to the state-vector simulation kernel.
//!
//! The shot executor drives the kernel only through [`Kernel`]: rotations
//! and a handful of native gates, mid-circuit measurement, an explicit
//! flush of buffered work, and whole-state read and write.

use num_complex::Complex64;

use quasar_hal::HalResult;

/// Handle of a qubit allocated by a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitHandle(pub usize);

/// Rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Rotation about X.
    X,
    /// Rotation about Y.
    Y,
    /// Rotation about Z.
    Z,
}

/// Gates the kernel implements natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeGate {
    /// Hadamard.
    H,
    /// S = diag(1, i).
    S,
    /// T = diag(1, e^{iπ/4}).
    T,
    /// CNOT; operands are `[control, target]`.
    Cx,
}

impl NativeGate {
    /// Number of qubit operands.
    pub fn arity(self) -> usize {
        match self {
            NativeGate::H | NativeGate::S | NativeGate::T => 1,
            NativeGate::Cx => 2,
        }
    }
}

/// A state-vector simulation kernel.
///
/// Gate requests may be buffered. [`Kernel::amplitudes`] only reflects work
/// that has been flushed, and [`Kernel::set_amplitudes`] requires an empty
/// buffer, so callers flush before reading or injecting state.
pub trait Kernel {
    /// Allocate `n` fresh qubits in |0⟩.
    fn allocate_qureg(&mut self, n: usize) -> HalResult<Vec<QubitHandle>>;

    /// Apply a rotation by `angle` about `axis`.
    fn apply_rotation(&mut self, axis: Axis, angle: f64, qubit: QubitHandle) -> HalResult<()>;

    /// Apply a native gate.
    fn apply_gate(&mut self, gate: NativeGate, qubits: &[QubitHandle]) -> HalResult<()>;

    /// Measure a qubit in the computational basis, collapsing the state.
    fn measure(&mut self, qubit: QubitHandle) -> HalResult<bool>;

    /// Apply all buffered work.
    fn flush(&mut self);

    /// The full amplitude vector as of the last flush.
    fn amplitudes(&self) -> Vec<Complex64>;

    /// Replace the state with `amplitudes`, ordered by `qureg`: bit `k` of
    /// an amplitude's index is the value of `qureg[k]`.
    fn set_amplitudes(&mut self, amplitudes: &[Complex64], qureg: &[QubitHandle])
    -> HalResult<()>;
}
