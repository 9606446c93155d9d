//! Quasar Local Statevector Simulators
//!
//! This crate executes Quasar jobs on an in-process statevector kernel. Two
//! backends share one pipeline and differ only in their [`ExecutionPolicy`]:
//!
//! - **qasm simulator**: runs each circuit for the requested number of shots
//!   and returns a histogram of classical outcomes, plus any snapshots.
//! - **statevector simulator**: runs measurement-free circuits once and
//!   returns the final amplitude vector.
//!
//! # Pipeline
//!
//! ```text
//!   Circuit ──compile──→ Program ──ShotExecutor──→ raw counts ──format──→ ExperimentResult
//!                          │            │
//!                     policy.prepare   Dispatcher ──→ Kernel
//! ```
//!
//! The shot loop allocates the register once and reinjects the ground state
//! between shots, so each shot costs one pass over the program plus one
//! amplitude copy.
//!
//! # Memory
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//! | 25 | ~512 MB |
//!
//! # Example
//!
//! ```ignore
//! use quasar_adapter_sim::SimulatorBackend;
//! use quasar_hal::Backend;
//! use quasar_ir::{Circuit, Qobj};
//!
//! let backend = SimulatorBackend::qasm();
//! let job = Qobj::new("bell", vec![Circuit::bell()], 1000);
//! let result = backend.run(job)?;
//!
//! // Expect ~50% "00" and ~50% "11"
//! println!("Results: {:?}", result.results[0].counts());
//! ```

pub mod classical;
pub mod dispatch;
pub mod executor;
pub mod format;
pub mod kernel;
pub mod policy;
mod simulator;
pub mod snapshot;
pub mod statevector;

pub use classical::ClassicalState;
pub use dispatch::Dispatcher;
pub use executor::{CircuitOutcome, ShotExecutor};
pub use format::{format_counts, format_key};
pub use kernel::{Axis, Kernel, NativeGate, QubitHandle};
pub use policy::ExecutionPolicy;
pub use simulator::SimulatorBackend;
pub use snapshot::SnapshotStore;
pub use statevector::StatevectorKernel;
