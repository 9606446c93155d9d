//! Circuit instructions in their wire form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::qubit::{ClbitId, QubitId};

/// An instruction parameter: an angle, or a label for snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    /// Numeric parameter.
    Number(f64),
    /// Free-form text parameter.
    Text(String),
}

impl Param {
    /// The numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Param::Number(v) => Some(*v),
            Param::Text(_) => None,
        }
    }
}

impl fmt::Display for Param {
    /// Integral numbers render without a fractional part, so the snapshot
    /// label `1` and `"1"` name the same slot.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[allow(clippy::cast_possible_truncation)]
            Param::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            Param::Number(v) => write!(f, "{v}"),
            Param::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Number(v)
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Text(s.to_string())
    }
}

/// Conditional execution clause.
///
/// The instruction runs only when the classical register, masked by `mask`
/// and shifted down to the mask's lowest set bit, equals `val`. On the wire
/// both fields are hex strings such as `"0x3"`; plain integers are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalCondition {
    /// Bits of the classical register the condition looks at.
    #[serde(serialize_with = "to_hex", deserialize_with = "from_hex")]
    pub mask: u64,
    /// Expected value of the selected sub-field.
    #[serde(serialize_with = "to_hex", deserialize_with = "from_hex")]
    pub val: u64,
}

impl ClassicalCondition {
    /// Create a new condition.
    pub fn new(mask: u64, val: u64) -> Self {
        Self { mask, val }
    }
}

/// Parse a `0x`-prefixed (or bare) hexadecimal string.
pub fn parse_hex(s: &str) -> IrResult<u64> {
    let digits = s
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u64::from_str_radix(digits, 16).map_err(|_| IrError::InvalidCondition(s.to_string()))
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn to_hex<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:#x}"))
}

fn from_hex<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum HexOrInt {
        Int(u64),
        Hex(String),
    }

    match HexOrInt::deserialize(deserializer)? {
        HexOrInt::Int(v) => Ok(v),
        HexOrInt::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
    }
}

/// A circuit instruction as received from the caller.
///
/// The name is kept as text here; [`crate::Program::compile`] turns it into
/// a typed [`crate::Operation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Operation name (`"u3"`, `"cx"`, `"measure"`, ...).
    pub name: String,
    /// Qubit operands.
    #[serde(default)]
    pub qubits: Vec<QubitId>,
    /// Classical bit operands.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    /// Optional conditional clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<ClassicalCondition>,
}

impl Instruction {
    /// Create an instruction with no operands.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            params: vec![],
            conditional: None,
        }
    }

    /// Set the qubit operands.
    #[must_use]
    pub fn with_qubits(mut self, qubits: impl IntoIterator<Item = u32>) -> Self {
        self.qubits = qubits.into_iter().map(QubitId).collect();
        self
    }

    /// Set the classical bit operands.
    #[must_use]
    pub fn with_clbits(mut self, clbits: impl IntoIterator<Item = u32>) -> Self {
        self.clbits = clbits.into_iter().map(ClbitId).collect();
        self
    }

    /// Set the parameters.
    #[must_use]
    pub fn with_params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params = params.into_iter().collect();
        self
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        self.name == "measure"
    }

    /// Check if this is a reset.
    pub fn is_reset(&self) -> bool {
        self.name == "reset"
    }
}
