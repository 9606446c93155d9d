//! Register layout resolution.
//!
//! Circuit headers list every bit as a `(register, index)` label. The layout
//! groups consecutive labels that share a register name into one register
//! whose size is one plus the largest index seen, and assigns each register a
//! global bit offset in order of first appearance.
//!
//! Labels for one register must form a contiguous run. A register whose
//! labels are interleaved with another register's is split into several
//! entries; the map is then wrong but resolution never fails. Sizes and
//! offsets saturate at `u32::MAX` so absurd indices cannot overflow.

use serde::{Deserialize, Serialize};

use crate::qubit::BitLabel;

/// Ordered `(register name, size)` pairs for a list of bit labels.
pub fn register_sizes(labels: &[BitLabel]) -> Vec<(String, u32)> {
    let mut sizes: Vec<(String, u32)> = Vec::new();
    for label in labels {
        match sizes.last_mut() {
            Some((name, size)) if *name == label.register => {
                *size = (*size).max(label.index.saturating_add(1));
            }
            _ => sizes.push((label.register.clone(), label.index.saturating_add(1))),
        }
    }
    sizes
}

/// A named register placed in the flattened bit space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    /// Register name.
    pub name: String,
    /// Global index of the register's bit 0.
    pub offset: u32,
    /// Number of bits in the register.
    pub size: u32,
}

/// Register name to `(offset, size)` mapping, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMap {
    registers: Vec<Register>,
}

impl RegisterMap {
    /// Resolve the layout of a list of bit labels.
    pub fn from_labels(labels: &[BitLabel]) -> Self {
        let mut offset: u32 = 0;
        let registers = register_sizes(labels)
            .into_iter()
            .map(|(name, size)| {
                let register = Register { name, offset, size };
                offset = offset.saturating_add(size);
                register
            })
            .collect();
        Self { registers }
    }

    /// Total number of bits across all registers, saturating at `u32::MAX`.
    pub fn num_bits(&self) -> u32 {
        self.registers
            .iter()
            .fold(0u32, |total, r| total.saturating_add(r.size))
    }

    /// Number of registers.
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    /// Check whether no register is declared.
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Look up a register by name (first match).
    pub fn get(&self, name: &str) -> Option<&Register> {
        self.registers.iter().find(|r| r.name == name)
    }

    /// Iterate over registers in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Register> {
        self.registers.iter()
    }
}
