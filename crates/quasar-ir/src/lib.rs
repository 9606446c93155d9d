//! Quasar Job and Circuit Representation
//!
//! This crate holds the data model shared by every Quasar backend: the job
//! structure a caller submits ([`Qobj`]), its circuits ([`Circuit`]) and the
//! executable form a simulator consumes ([`Program`]).
//!
//! # Overview
//!
//! Circuits arrive in a JSON wire format: a header listing every quantum and
//! classical bit as a `(register, index)` label, and an ordered list of named
//! instructions. Compiling a circuit resolves the register layout once,
//! maps instruction names onto the closed [`Operation`] set, and checks every
//! operand against the flattened registers.
//!
//! # Example: Compiling a Bell State
//!
//! ```rust
//! use quasar_ir::{Circuit, Operation, Program};
//!
//! let circuit = Circuit::bell();
//! let program = Program::compile(&circuit).unwrap();
//!
//! assert_eq!(program.num_qubits(), 2);
//! assert!(matches!(program.ops[0].operation, Operation::H { .. }));
//! ```
//!
//! # Supported Instructions
//!
//! | Name | Operands | Parameters |
//! |------|----------|------------|
//! | `U`, `u3` | 1 qubit | θ, φ, λ |
//! | `u2` | 1 qubit | φ, λ |
//! | `u1` | 1 qubit | λ |
//! | `h`, `s`, `t` | 1 qubit | – |
//! | `CX`, `cx` | 2 qubits | – |
//! | `id`, `u0` | – | – |
//! | `measure` | 1 qubit, 1 clbit | – |
//! | `reset` | 1 qubit | – |
//! | `snapshot` | – | label |
//! | `barrier` | any | – |
//!
//! Any other name compiles to [`Operation::Unrecognized`] and is rejected by
//! the backend when the instruction is reached.

pub mod circuit;
pub mod error;
pub mod instruction;
pub mod layout;
pub mod operation;
pub mod program;
pub mod qobj;
pub mod qubit;

pub use circuit::{Circuit, CircuitConfig, CircuitHeader};
pub use error::{IrError, IrResult};
pub use instruction::{ClassicalCondition, Instruction, Param};
pub use layout::{Register, RegisterMap, register_sizes};
pub use operation::{Op, Operation, SnapshotSlot};
pub use program::{MAX_CLBITS, Program};
pub use qobj::{Qobj, QobjConfig};
pub use qubit::{BitLabel, ClbitId, QubitId};
