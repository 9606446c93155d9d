//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The simulation kernel cannot be constructed.
    #[error("Simulator unavailable: {0}")]
    SimulatorUnavailable(String),

    /// The backend knows the operation but does not implement it.
    #[error("{operation} operation not yet implemented for {backend}")]
    UnsupportedOperation {
        /// Backend name.
        backend: String,
        /// Operation name.
        operation: String,
    },

    /// The operation is not part of the backend's instruction set.
    #[error("{backend} encountered unrecognized operation \"{operation}\"")]
    UnrecognizedOperation {
        /// Backend name.
        backend: String,
        /// Operation name as received.
        operation: String,
    },

    /// The circuit is rejected by backend validation.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Execution of one circuit aborted.
    #[error("In circuit '{circuit}': {source}")]
    CircuitFailed {
        /// Name of the failed circuit.
        circuit: String,
        /// What went wrong.
        #[source]
        source: Box<HalError>,
    },

    /// The simulation kernel rejected a request.
    #[error("Kernel error: {0}")]
    Kernel(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Circuit could not be compiled.
    #[error(transparent)]
    Ir(#[from] quasar_ir::IrError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HalError {
    /// Attribute this error to a circuit.
    pub fn in_circuit(self, circuit: impl Into<String>) -> Self {
        HalError::CircuitFailed {
            circuit: circuit.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error, looking through circuit attribution.
    pub fn root(&self) -> &HalError {
        match self {
            HalError::CircuitFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_backend_and_operation() {
        let err = HalError::UnrecognizedOperation {
            backend: "quasar_qasm_simulator".into(),
            operation: "ccx".into(),
        };
        assert_eq!(
            err.to_string(),
            "quasar_qasm_simulator encountered unrecognized operation \"ccx\""
        );
    }

    #[test]
    fn test_root_through_circuit_failure() {
        let err = HalError::UnsupportedOperation {
            backend: "sim".into(),
            operation: "reset".into(),
        }
        .in_circuit("c1");
        assert!(err.to_string().starts_with("In circuit 'c1': reset"));
        assert!(matches!(err.root(), HalError::UnsupportedOperation { .. }));
    }
}
