//! Quasar Backend Abstraction Layer
//!
//! This crate defines what every Quasar backend shares: the [`Backend`]
//! trait, backend metadata ([`BackendConfiguration`]), instance configuration
//! ([`BackendConfig`] and [`BackendFactory`]), the error type, non-fatal
//! [`ValidationWarning`]s and the result records returned for a job.
//!
//! # Example: Running a Job
//!
//! ```ignore
//! use quasar_adapter_sim::SimulatorBackend;
//! use quasar_hal::Backend;
//! use quasar_ir::{Circuit, Qobj};
//!
//! let backend = SimulatorBackend::qasm();
//! let job = Qobj::new("bell-job", vec![Circuit::bell()], 1000).with_seed(7);
//! let result = backend.run(job)?;
//!
//! let counts = result.results[0].counts();
//! println!("00: {}, 11: {}", counts.get("00"), counts.get("11"));
//! ```
//!
//! # Result Layout
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `counts` | histogram keyed by register-separated bitstrings |
//! | `snapshots` | label → captured state vectors, one per shot |
//! | `classical_state` | final classical register value of a 1-shot run |
//! | `statevector` | final state (statevector backend) |

pub mod backend;
pub mod configuration;
pub mod error;
pub mod job;
pub mod result;
pub mod validation;

pub use backend::{Backend, BackendConfig, BackendFactory};
pub use configuration::{BackendConfiguration, SIMULATOR_BASIS_GATES};
pub use error::{HalError, HalResult};
pub use job::{EXPERIMENT_DONE, JOB_COMPLETED, JobId};
pub use result::{Counts, ExperimentData, ExperimentResult, JobResult, SnapshotData, Snapshots};
pub use validation::ValidationWarning;
