//! Circuits (experiments) and a small builder API.

use serde::{Deserialize, Serialize};

use crate::instruction::{Instruction, Param};
use crate::layout::RegisterMap;
use crate::qubit::BitLabel;

/// Header describing a circuit's registers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitHeader {
    /// Name of the circuit.
    pub name: String,
    /// One label per qubit of the flattened quantum register.
    #[serde(default)]
    pub qubit_labels: Vec<BitLabel>,
    /// One label per bit of the flattened classical register.
    #[serde(default)]
    pub clbit_labels: Vec<BitLabel>,
}

/// Per-circuit overrides of the job configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitConfig {
    /// Shot count for this circuit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u32>,
    /// Random seed for this circuit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// A quantum circuit: header plus ordered instruction list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Register declarations and name.
    pub header: CircuitHeader,
    /// Instructions in execution order.
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    /// Optional overrides of the job configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<CircuitConfig>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: CircuitHeader {
                name: name.into(),
                ..CircuitHeader::default()
            },
            instructions: vec![],
            config: None,
        }
    }

    /// Create a circuit with one quantum register `q` and one classical register `c`.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        if num_qubits > 0 {
            circuit.add_qreg("q", num_qubits);
        }
        if num_clbits > 0 {
            circuit.add_creg("c", num_clbits);
        }
        circuit
    }

    /// Name of the circuit.
    pub fn name(&self) -> &str {
        &self.header.name
    }

    /// Append a quantum register.
    pub fn add_qreg(&mut self, name: &str, size: u32) -> &mut Self {
        self.header
            .qubit_labels
            .extend((0..size).map(|i| BitLabel::new(name, i)));
        self
    }

    /// Append a classical register.
    pub fn add_creg(&mut self, name: &str, size: u32) -> &mut Self {
        self.header
            .clbit_labels
            .extend((0..size).map(|i| BitLabel::new(name, i)));
        self
    }

    /// Quantum register layout.
    pub fn qregs(&self) -> RegisterMap {
        RegisterMap::from_labels(&self.header.qubit_labels)
    }

    /// Classical register layout.
    pub fn cregs(&self) -> RegisterMap {
        RegisterMap::from_labels(&self.header.clbit_labels)
    }

    /// Size of the flattened quantum register.
    pub fn num_qubits(&self) -> u32 {
        self.qregs().num_bits()
    }

    /// Size of the flattened classical register.
    pub fn num_clbits(&self) -> u32 {
        self.cregs().num_bits()
    }

    /// Shot count override, if any.
    pub fn shots(&self) -> Option<u32> {
        self.config.as_ref().and_then(|c| c.shots)
    }

    /// Seed override, if any.
    pub fn seed(&self) -> Option<u64> {
        self.config.as_ref().and_then(|c| c.seed)
    }

    /// Override the shot count for this circuit.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.config.get_or_insert_with(CircuitConfig::default).shots = Some(shots);
        self
    }

    /// Override the seed for this circuit.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.get_or_insert_with(CircuitConfig::default).seed = Some(seed);
        self
    }

    /// Check whether any instruction is a measurement.
    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    /// Append a raw instruction.
    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    fn gate(&mut self, name: &str, qubits: &[u32], params: &[f64]) -> &mut Self {
        self.push(
            Instruction::new(name)
                .with_qubits(qubits.iter().copied())
                .with_params(params.iter().copied().map(Param::Number)),
        )
    }

    /// Apply U3(θ, φ, λ).
    pub fn u3(&mut self, theta: f64, phi: f64, lambda: f64, qubit: u32) -> &mut Self {
        self.gate("u3", &[qubit], &[theta, phi, lambda])
    }

    /// Apply U2(φ, λ).
    pub fn u2(&mut self, phi: f64, lambda: f64, qubit: u32) -> &mut Self {
        self.gate("u2", &[qubit], &[phi, lambda])
    }

    /// Apply U1(λ).
    pub fn u1(&mut self, lambda: f64, qubit: u32) -> &mut Self {
        self.gate("u1", &[qubit], &[lambda])
    }

    /// Apply Hadamard.
    pub fn h(&mut self, qubit: u32) -> &mut Self {
        self.gate("h", &[qubit], &[])
    }

    /// Apply S.
    pub fn s(&mut self, qubit: u32) -> &mut Self {
        self.gate("s", &[qubit], &[])
    }

    /// Apply T.
    pub fn t(&mut self, qubit: u32) -> &mut Self {
        self.gate("t", &[qubit], &[])
    }

    /// Apply identity.
    pub fn id(&mut self, qubit: u32) -> &mut Self {
        self.gate("id", &[qubit], &[])
    }

    /// Apply CNOT.
    pub fn cx(&mut self, control: u32, target: u32) -> &mut Self {
        self.gate("cx", &[control, target], &[])
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: u32, clbit: u32) -> &mut Self {
        self.push(
            Instruction::new("measure")
                .with_qubits([qubit])
                .with_clbits([clbit]),
        )
    }

    /// Measure qubit `i` into classical bit `i` for every qubit.
    pub fn measure_all(&mut self) -> &mut Self {
        for i in 0..self.num_qubits().min(self.num_clbits()) {
            self.measure(i, i);
        }
        self
    }

    /// Reset a qubit.
    pub fn reset(&mut self, qubit: u32) -> &mut Self {
        self.push(Instruction::new("reset").with_qubits([qubit]))
    }

    /// Barrier across the given qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = u32>) -> &mut Self {
        self.push(Instruction::new("barrier").with_qubits(qubits))
    }

    /// Snapshot the state vector under `label`.
    pub fn snapshot(&mut self, label: impl Into<String>) -> &mut Self {
        self.push(Instruction::new("snapshot").with_params([Param::Text(label.into())]))
    }

    /// Make the most recently added instruction conditional.
    pub fn c_if(&mut self, mask: u64, val: u64) -> &mut Self {
        if let Some(last) = self.instructions.last_mut() {
            last.conditional = Some(crate::ClassicalCondition::new(mask, val));
        }
        self
    }

    /// Create a Bell state circuit with measurements.
    pub fn bell() -> Self {
        let mut circuit = Self::with_size("bell", 2, 2);
        circuit.h(0).cx(0, 1).measure(0, 0).measure(1, 1);
        circuit
    }

    /// Create an n-qubit GHZ state circuit with measurements.
    pub fn ghz(n: u32) -> Self {
        let mut circuit = Self::with_size(format!("ghz_{n}"), n, n);
        if n == 0 {
            return circuit;
        }
        circuit.h(0);
        for i in 0..n - 1 {
            circuit.cx(i, i + 1);
        }
        circuit.measure_all();
        circuit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_size_registers() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.qregs().get("q").map(|r| r.size), Some(3));
    }

    #[test]
    fn test_bell_circuit() {
        let circuit = Circuit::bell();
        assert_eq!(circuit.instructions.len(), 4);
        assert!(circuit.has_measurements());
    }

    #[test]
    fn test_ghz_circuit() {
        let circuit = Circuit::ghz(4);
        // H + 3 CX + 4 measure
        assert_eq!(circuit.instructions.len(), 8);
        assert_eq!(circuit.num_qubits(), 4);
    }

    #[test]
    fn test_c_if_attaches_to_last() {
        let mut circuit = Circuit::with_size("cond", 1, 1);
        circuit.h(0).t(0).c_if(1, 1);
        assert!(circuit.instructions[0].conditional.is_none());
        assert_eq!(
            circuit.instructions[1].conditional,
            Some(crate::ClassicalCondition::new(1, 1))
        );
    }

    #[test]
    fn test_overrides() {
        let circuit = Circuit::new("o").with_shots(7).with_seed(11);
        assert_eq!(circuit.shots(), Some(7));
        assert_eq!(circuit.seed(), Some(11));
        assert_eq!(Circuit::new("n").shots(), None);
    }
}
