//! Register-separated histogram keys.

use quasar_hal::Counts;
use quasar_ir::RegisterMap;

/// Split a bare bitstring at classical register boundaries.
///
/// `key` is MSB first, so register `r` occupies the characters ending
/// `r.offset` from the right. The last-declared register comes out leftmost.
/// Keys are returned unchanged when there are no registers or the key does
/// not span the layout.
pub fn format_key(key: &str, registers: &RegisterMap) -> String {
    let width = key.len();
    if registers.is_empty() || registers.num_bits() as usize != width {
        return key.to_string();
    }
    let fields: Vec<&str> = registers
        .iter()
        .rev()
        .map(|reg| {
            let end = width - reg.offset as usize;
            &key[end - reg.size as usize..end]
        })
        .collect();
    fields.join(" ")
}

/// Apply [`format_key`] to every key of a histogram.
pub fn format_counts(counts: &Counts, registers: &RegisterMap) -> Counts {
    counts
        .iter()
        .map(|(key, &count)| (format_key(key, registers), count))
        .collect()
}
