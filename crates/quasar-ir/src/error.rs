//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building or compiling a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A gate was given fewer numeric parameters than it needs.
    #[error("Operation '{operation}' requires {expected} parameters, got {got}")]
    MissingParameter {
        /// Name of the operation.
        operation: String,
        /// Number of parameters required.
        expected: usize,
        /// Number of parameters provided.
        got: usize,
    },

    /// A parameter has the wrong type (for example a string angle).
    #[error("Operation '{operation}' parameter {index} is not a number")]
    NonNumericParameter {
        /// Name of the operation.
        operation: String,
        /// Position of the offending parameter.
        index: usize,
    },

    /// An operation was given fewer qubit or clbit operands than it needs.
    #[error("Operation '{operation}' requires {expected} {kind} operands, got {got}")]
    MissingOperand {
        /// Name of the operation.
        operation: String,
        /// `"qubit"` or `"clbit"`.
        kind: &'static str,
        /// Number of operands required.
        expected: usize,
        /// Number of operands provided.
        got: usize,
    },

    /// Qubit index outside the flattened quantum register.
    #[error("Qubit {qubit} out of range in '{operation}' (circuit has {num_qubits} qubits)")]
    QubitOutOfRange {
        /// Name of the operation.
        operation: String,
        /// The offending index.
        qubit: u32,
        /// Size of the flattened quantum register.
        num_qubits: u32,
    },

    /// Classical bit index outside the flattened classical register.
    #[error("Classical bit {clbit} out of range in '{operation}' (circuit has {num_clbits} bits)")]
    ClbitOutOfRange {
        /// Name of the operation.
        operation: String,
        /// The offending index.
        clbit: u32,
        /// Size of the flattened classical register.
        num_clbits: u32,
    },

    /// The classical register does not fit the packed classical state.
    #[error("Circuit declares {0} classical bits, at most 64 are supported")]
    ClassicalWidthExceeded(u32),

    /// A conditional clause could not be decoded.
    #[error("Invalid conditional value: {0}")]
    InvalidCondition(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
