//! The job structure submitted to a backend.

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::IrResult;

/// Job-wide execution configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QobjConfig {
    /// Number of shots for every circuit without its own override.
    #[serde(default = "default_shots")]
    pub shots: u32,
    /// Random seed; a fresh one is drawn when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_shots() -> u32 {
    1024
}

impl Default for QobjConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            seed: None,
        }
    }
}

/// A job: configuration plus one or more circuits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Qobj {
    /// Caller-chosen job identifier.
    #[serde(default)]
    pub qobj_id: String,
    /// Job-wide configuration.
    #[serde(default)]
    pub config: QobjConfig,
    /// Circuits to execute, in order.
    pub experiments: Vec<Circuit>,
}

impl Qobj {
    /// Create a job from circuits with the given shot count.
    pub fn new(qobj_id: impl Into<String>, experiments: Vec<Circuit>, shots: u32) -> Self {
        Self {
            qobj_id: qobj_id.into(),
            config: QobjConfig { shots, seed: None },
            experiments,
        }
    }

    /// Set the job seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Parse a job from JSON.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the job to pretty JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
