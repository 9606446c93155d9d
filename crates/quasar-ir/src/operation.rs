//! Typed operations over the fixed instruction set.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::instruction::ClassicalCondition;
use crate::qubit::{ClbitId, QubitId};

/// Where a snapshot is filed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SnapshotSlot {
    /// A caller-chosen label.
    Label(String),
    /// The implicit end-of-circuit state captured by statevector backends.
    ///
    /// Never produced by parsing; it cannot collide with a caller label.
    FinalState,
}

impl fmt::Display for SnapshotSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSlot::Label(label) => f.write_str(label),
            SnapshotSlot::FinalState => f.write_str("<final state>"),
        }
    }
}

/// One operation of the supported instruction set, with its operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Generic single-qubit unitary U(θ, φ, λ).
    U3 {
        /// Target qubit.
        qubit: QubitId,
        /// θ.
        theta: f64,
        /// φ.
        phi: f64,
        /// λ.
        lambda: f64,
    },
    /// Phase-only unitary U1(λ).
    U1 {
        /// Target qubit.
        qubit: QubitId,
        /// λ.
        lambda: f64,
    },
    /// Two-parameter unitary U2(φ, λ).
    U2 {
        /// Target qubit.
        qubit: QubitId,
        /// φ.
        phi: f64,
        /// λ.
        lambda: f64,
    },
    /// π/8 gate.
    T {
        /// Target qubit.
        qubit: QubitId,
    },
    /// Hadamard.
    H {
        /// Target qubit.
        qubit: QubitId,
    },
    /// π/4 phase gate.
    S {
        /// Target qubit.
        qubit: QubitId,
    },
    /// Controlled-NOT.
    Cx {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// Identity.
    Id,
    /// Measure a qubit into a classical bit.
    Measure {
        /// Measured qubit.
        qubit: QubitId,
        /// Destination bit.
        clbit: ClbitId,
    },
    /// Reset a qubit to |0⟩.
    Reset {
        /// Target qubit.
        qubit: QubitId,
    },
    /// Capture the full state vector.
    Snapshot {
        /// Destination slot.
        slot: SnapshotSlot,
    },
    /// Scheduling barrier.
    Barrier,
    /// An operation outside the supported set.
    Unrecognized {
        /// Name as received.
        name: String,
    },
}

impl Operation {
    /// Canonical name of the operation.
    pub fn name(&self) -> &str {
        match self {
            Operation::U3 { .. } => "u3",
            Operation::U1 { .. } => "u1",
            Operation::U2 { .. } => "u2",
            Operation::T { .. } => "t",
            Operation::H { .. } => "h",
            Operation::S { .. } => "s",
            Operation::Cx { .. } => "cx",
            Operation::Id => "id",
            Operation::Measure { .. } => "measure",
            Operation::Reset { .. } => "reset",
            Operation::Snapshot { .. } => "snapshot",
            Operation::Barrier => "barrier",
            Operation::Unrecognized { name } => name,
        }
    }
}

/// An operation together with its optional conditional clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Op {
    /// The operation.
    pub operation: Operation,
    /// Run only when this condition holds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ClassicalCondition>,
}

impl Op {
    /// An unconditional op.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            condition: None,
        }
    }
}

impl From<Operation> for Op {
    fn from(operation: Operation) -> Self {
        Self::new(operation)
    }
}
