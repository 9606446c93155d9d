//! Per-circuit store of captured state vectors.

use num_complex::Complex64;
use std::collections::BTreeMap;

use quasar_hal::{SnapshotData, Snapshots};
use quasar_ir::SnapshotSlot;

/// Captured amplitude vectors, per slot, in shot order.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    slots: BTreeMap<SnapshotSlot, Vec<Vec<Complex64>>>,
}

impl SnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a captured state to `slot`.
    pub fn record(&mut self, slot: &SnapshotSlot, amplitudes: Vec<Complex64>) {
        self.slots.entry(slot.clone()).or_default().push(amplitudes);
    }

    /// Vectors captured under `slot`.
    pub fn get(&self, slot: &SnapshotSlot) -> Option<&[Vec<Complex64>]> {
        self.slots.get(slot).map(Vec::as_slice)
    }

    /// Remove the implicit final-state slot and return its first vector.
    pub fn take_final_state(&mut self) -> Option<Vec<Complex64>> {
        self.slots
            .remove(&SnapshotSlot::FinalState)
            .and_then(|states| states.into_iter().next())
    }

    /// Check whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Convert the labelled slots into result records.
    ///
    /// Returns `None` when no labelled slot holds data.
    pub fn into_snapshots(self) -> Option<Snapshots> {
        let snapshots: Snapshots = self
            .slots
            .into_iter()
            .filter_map(|(slot, statevector)| match slot {
                SnapshotSlot::Label(label) => Some((label, SnapshotData { statevector })),
                SnapshotSlot::FinalState => None,
            })
            .collect();
        (!snapshots.is_empty()).then_some(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(re: f64) -> Vec<Complex64> {
        vec![Complex64::new(re, 0.0)]
    }

    #[test]
    fn test_record_in_shot_order() {
        let mut store = SnapshotStore::new();
        let slot = SnapshotSlot::Label("a".into());
        store.record(&slot, state(1.0));
        store.record(&slot, state(2.0));
        assert_eq!(store.get(&slot), Some(&[state(1.0), state(2.0)][..]));
    }

    #[test]
    fn test_final_state_kept_apart_from_labels() {
        let mut store = SnapshotStore::new();
        store.record(&SnapshotSlot::Label("32767".into()), state(0.5));
        store.record(&SnapshotSlot::FinalState, state(1.0));

        assert_eq!(store.take_final_state(), Some(state(1.0)));
        assert_eq!(store.take_final_state(), None);

        let snapshots = store.into_snapshots().unwrap();
        assert_eq!(snapshots["32767"].statevector, vec![state(0.5)]);
    }

    #[test]
    fn test_empty_store_has_no_snapshots() {
        assert!(SnapshotStore::new().into_snapshots().is_none());

        let mut store = SnapshotStore::new();
        store.record(&SnapshotSlot::FinalState, state(1.0));
        assert!(!store.is_empty());
        assert!(store.into_snapshots().is_none());
    }
}
