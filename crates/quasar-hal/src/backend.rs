//! Backend trait and configuration.
//!
//! The [`Backend`] trait defines the lifecycle for running a job:
//!
//! ```text
//!   configuration() ──→ validate() ──→ run()
//!     (sync, &ref)       (pure)        (blocking)
//! ```
//!
//! `run()` executes every circuit of the job in order and returns when the
//! last one finishes. The first failing circuit aborts the job.

use std::fmt;

use serde::{Deserialize, Serialize};

use quasar_ir::Qobj;

use crate::configuration::BackendConfiguration;
use crate::error::HalResult;
use crate::result::JobResult;
use crate::validation::ValidationWarning;

/// Configuration for a backend instance.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add extra configuration.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an extra key as an unsigned integer.
    pub fn extra_u64(&self, key: &str) -> Option<u64> {
        self.extra.get(key).and_then(serde_json::Value::as_u64)
    }

    /// Read an extra key as a string.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_json::Value::as_str)
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for quantum backends.
///
/// # Contract
///
/// - `configuration()` is synchronous and infallible.
/// - `validate()` does not modify the job. Fatal problems are returned as
///   `Err`; non-fatal findings are returned as warnings.
/// - `run()` validates, emits every warning through `tracing`, applies the
///   backend's job overrides and executes. It fails with the first circuit
///   error; no partial result is returned.
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str {
        &self.configuration().name
    }

    /// Get the static description of this backend.
    fn configuration(&self) -> &BackendConfiguration;

    /// Validate a job against backend constraints.
    fn validate(&self, qobj: &Qobj) -> HalResult<Vec<ValidationWarning>>;

    /// Execute a job.
    fn run(&self, qobj: Qobj) -> HalResult<JobResult>;
}

/// Construction of a backend from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_accessors() {
        let config = BackendConfig::new("sim")
            .with_extra("max_qubits", serde_json::json!(12))
            .with_extra("kernel", serde_json::json!("statevector"));
        assert_eq!(config.extra_u64("max_qubits"), Some(12));
        assert_eq!(config.extra_str("kernel"), Some("statevector"));
        assert_eq!(config.extra_u64("kernel"), None);
    }

    #[test]
    fn test_config_from_json_flattens_extras() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"name": "sim", "max_qubits": 5}"#).unwrap();
        assert_eq!(config.name, "sim");
        assert_eq!(config.extra_u64("max_qubits"), Some(5));
    }
}
