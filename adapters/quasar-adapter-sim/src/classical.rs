//! Packed classical register state for one shot.

/// The concatenated classical registers of the current shot.
///
/// Bit `k` of the value is classical bit `k` of the flattened register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassicalState {
    value: u64,
    width: u32,
}

impl ClassicalState {
    /// Create a zeroed state of `width` bits.
    pub fn new(width: u32) -> Self {
        Self { value: 0, width }
    }

    /// Zero every bit.
    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Current packed value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Number of classical bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Evaluate a conditional clause.
    ///
    /// A zero mask is unconditional. Otherwise the masked field is shifted
    /// down to bit 0 and compared with `expected`, so a clause can test any
    /// contiguous sub-field of the register.
    pub fn evaluate_conditional(&self, mask: u64, expected: u64) -> bool {
        if mask == 0 {
            return true;
        }
        let shift = mask.trailing_zeros();
        ((self.value & mask) >> shift) == expected
    }

    /// Store a measurement result in bit `bit`.
    pub fn set_bit(&mut self, bit: u32, value: bool) {
        let mask = 1u64 << bit;
        self.value &= !mask;
        if value {
            self.value |= mask;
        }
    }

    /// Render the value as a zero-padded binary string, bit 0 rightmost.
    pub fn to_bitstring(&self) -> String {
        format!("{:0width$b}", self.value, width = self.width as usize)
    }
}
