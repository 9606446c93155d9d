//! Descriptive backend metadata.

use serde::{Deserialize, Serialize};

/// Basis gates accepted by the simulator backends.
pub const SIMULATOR_BASIS_GATES: &str = "u1,u2,u3,cx,id,h,s,t";

/// Static description of a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfiguration {
    /// Backend name, also used in error messages.
    pub name: String,
    /// Project URL.
    pub url: String,
    /// Whether the backend is a simulator.
    pub simulator: bool,
    /// Whether the backend runs in-process.
    pub local: bool,
    /// Human-readable description.
    pub description: String,
    /// Qubit connectivity.
    pub coupling_map: String,
    /// Comma-separated basis gate names.
    pub basis_gates: String,
}

impl BackendConfiguration {
    fn local_simulator(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            url: "https://github.com/quasar-sim/quasar".into(),
            simulator: true,
            local: true,
            description: description.into(),
            coupling_map: "all-to-all".into(),
            basis_gates: SIMULATOR_BASIS_GATES.into(),
        }
    }

    /// Configuration of the shot-based simulator.
    pub fn qasm_simulator() -> Self {
        Self::local_simulator("quasar_qasm_simulator", "Quasar statevector shot simulator")
    }

    /// Configuration of the final-statevector simulator.
    pub fn statevector_simulator() -> Self {
        Self::local_simulator(
            "quasar_statevector_simulator",
            "Quasar statevector simulator for qobj files",
        )
    }

    /// Basis gate names as a list.
    pub fn basis_gates(&self) -> Vec<&str> {
        self.basis_gates.split(',').map(str::trim).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let qasm = BackendConfiguration::qasm_simulator();
        let sv = BackendConfiguration::statevector_simulator();
        assert_ne!(qasm.name, sv.name);
        assert!(qasm.simulator && qasm.local);
        assert_eq!(
            qasm.basis_gates(),
            vec!["u1", "u2", "u3", "cx", "id", "h", "s", "t"]
        );
    }
}
