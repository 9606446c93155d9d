//! Built-in statevector kernel.

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use quasar_hal::{HalError, HalResult};

use crate::kernel::{Axis, Kernel, NativeGate, QubitHandle};

/// Default register limit (16 MiB of amplitudes).
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// A buffered gate request.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Rotation(Axis, f64, usize),
    Gate(NativeGate, usize, usize),
}

/// Dense statevector kernel.
///
/// Qubit handle `k` is bit `k` of the basis-state index. Gate requests are
/// queued and applied on [`Kernel::flush`]; measurement flushes implicitly.
pub struct StatevectorKernel {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of allocated qubits.
    num_qubits: usize,
    /// Allocation limit.
    max_qubits: usize,
    /// Gate requests not yet applied.
    pending: Vec<Pending>,
    /// Measurement randomness.
    rng: StdRng,
}

impl StatevectorKernel {
    /// Create an empty kernel whose measurements are driven by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            amplitudes: vec![Complex64::new(1.0, 0.0)],
            num_qubits: 0,
            max_qubits: DEFAULT_MAX_QUBITS,
            pending: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Set the allocation limit.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Number of allocated qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of queued gate requests.
    pub fn pending_ops(&self) -> usize {
        self.pending.len()
    }

    fn index(&self, qubit: QubitHandle) -> HalResult<usize> {
        if qubit.0 < self.num_qubits {
            Ok(qubit.0)
        } else {
            Err(HalError::Kernel(format!(
                "qubit handle {} not allocated ({} qubits)",
                qubit.0, self.num_qubits
            )))
        }
    }

    fn apply(&mut self, op: Pending) {
        match op {
            Pending::Rotation(Axis::X, theta, q) => self.apply_rx(q, theta),
            Pending::Rotation(Axis::Y, theta, q) => self.apply_ry(q, theta),
            Pending::Rotation(Axis::Z, theta, q) => self.apply_rz(q, theta),
            Pending::Gate(NativeGate::H, q, _) => self.apply_h(q),
            Pending::Gate(NativeGate::S, q, _) => self.apply_phase(q, PI / 2.0),
            Pending::Gate(NativeGate::T, q, _) => self.apply_phase(q, PI / 4.0),
            Pending::Gate(NativeGate::Cx, control, target) => self.apply_cx(control, target),
        }
    }

    // =========================================================================
    // Gate implementations
    // =========================================================================

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == 0 {
                *amp *= phase_0;
            } else {
                *amp *= phase_1;
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    /// Probability that `qubit` reads 1.
    fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Project `qubit` onto `outcome` and renormalize.
    fn collapse(&mut self, qubit: usize, outcome: bool, probability: f64) {
        let mask = 1 << qubit;
        let norm = probability.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                if norm > 0.0 {
                    *amp /= norm;
                }
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
    }
}

impl Kernel for StatevectorKernel {
    fn allocate_qureg(&mut self, n: usize) -> HalResult<Vec<QubitHandle>> {
        let total = self.num_qubits + n;
        if total > self.max_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "register of {total} qubits exceeds the simulator limit of {}",
                self.max_qubits
            )));
        }
        self.flush();
        // New qubits occupy the high bits, so existing amplitudes keep their
        // indices and the rest of the vector starts at zero.
        self.amplitudes.resize(1 << total, Complex64::new(0.0, 0.0));
        let handles = (self.num_qubits..total).map(QubitHandle).collect();
        self.num_qubits = total;
        Ok(handles)
    }

    fn apply_rotation(&mut self, axis: Axis, angle: f64, qubit: QubitHandle) -> HalResult<()> {
        let q = self.index(qubit)?;
        self.pending.push(Pending::Rotation(axis, angle, q));
        Ok(())
    }

    fn apply_gate(&mut self, gate: NativeGate, qubits: &[QubitHandle]) -> HalResult<()> {
        if qubits.len() != gate.arity() {
            return Err(HalError::Kernel(format!(
                "{gate:?} takes {} qubits, got {}",
                gate.arity(),
                qubits.len()
            )));
        }
        let first = self.index(qubits[0])?;
        let second = match qubits.get(1) {
            Some(&q) => self.index(q)?,
            None => first,
        };
        if gate == NativeGate::Cx && first == second {
            return Err(HalError::Kernel(format!(
                "CX control and target are both qubit {first}"
            )));
        }
        self.pending.push(Pending::Gate(gate, first, second));
        Ok(())
    }

    fn measure(&mut self, qubit: QubitHandle) -> HalResult<bool> {
        let q = self.index(qubit)?;
        self.flush();
        let p1 = self.probability_one(q);
        let r: f64 = self.rng.r#gen();
        let outcome = r < p1;
        self.collapse(q, outcome, if outcome { p1 } else { 1.0 - p1 });
        Ok(outcome)
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for op in pending {
            self.apply(op);
        }
    }

    fn amplitudes(&self) -> Vec<Complex64> {
        self.amplitudes.clone()
    }

    fn set_amplitudes(
        &mut self,
        amplitudes: &[Complex64],
        qureg: &[QubitHandle],
    ) -> HalResult<()> {
        if !self.pending.is_empty() {
            return Err(HalError::Kernel(
                "set_amplitudes called with unflushed gates".into(),
            ));
        }
        if qureg.len() != self.num_qubits || amplitudes.len() != self.amplitudes.len() {
            return Err(HalError::Kernel(format!(
                "state of {} amplitudes over {} qubits does not match the {}-qubit register",
                amplitudes.len(),
                qureg.len(),
                self.num_qubits
            )));
        }
        let bits = qureg
            .iter()
            .map(|&q| self.index(q))
            .collect::<HalResult<Vec<_>>>()?;
        let mut seen = 0usize;
        for &b in &bits {
            if seen & (1 << b) != 0 {
                return Err(HalError::Kernel(format!("qubit {b} listed twice")));
            }
            seen |= 1 << b;
        }

        for (j, &amp) in amplitudes.iter().enumerate() {
            let i = bits
                .iter()
                .enumerate()
                .filter(|&(k, _)| j & (1 << k) != 0)
                .fold(0, |acc, (_, &b)| acc | (1 << b));
            self.amplitudes[i] = amp;
        }
        Ok(())
    }
}
