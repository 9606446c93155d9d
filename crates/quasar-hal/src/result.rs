//! Execution result types.
//!
//! Bitstring ordering: the rightmost character is classical bit 0. Keys of
//! a formatted histogram carry one space between classical registers, the
//! last-declared register leftmost, e.g. `"1 01"` for registers `c` (2 bits)
//! then `d` (1 bit).

use chrono::{DateTime, Utc};
use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::job::{EXPERIMENT_DONE, JOB_COMPLETED, JobId};

/// Measurement counts from circuit execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    /// Map from bitstring to count.
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counts from an iterator of (bitstring, count) pairs.
    /// Duplicate bitstrings are accumulated, consistent with `insert()`.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut counts = Self::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }

    /// Insert a count for a bitstring.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_default() += count;
    }

    /// Get the count for a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over (bitstring, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Get the total number of shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Get the most frequent bitstring.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts.iter().max_by_key(|&(_, count)| count)
    }

    /// Get probabilities for each bitstring.
    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        let total = self.total_shots() as f64;
        if total == 0.0 {
            return FxHashMap::default();
        }
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total))
            .collect()
    }

    /// Get sorted counts (by count descending, then bitstring).
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut items: Vec<_> = self.counts.iter().collect();
        items.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        items
    }

    /// Get the number of unique bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if counts are empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// State vectors captured at one snapshot label, in shot order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotData {
    /// One amplitude vector per shot that reached the snapshot.
    pub statevector: Vec<Vec<Complex64>>,
}

/// Snapshots keyed by label.
pub type Snapshots = BTreeMap<String, SnapshotData>;

/// Data payload of one circuit's result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentData {
    /// Histogram of formatted outcomes.
    pub counts: Counts,
    /// Captured snapshots, when the circuit took any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshots: Option<Snapshots>,
    /// Final classical register value of a single-shot run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classical_state: Option<u64>,
    /// Final state vector (statevector backends only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statevector: Option<Vec<Complex64>>,
}

/// Result record of one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// Circuit name.
    pub name: String,
    /// Seed the circuit ran with.
    pub seed: u64,
    /// Shots executed.
    pub shots: u32,
    /// Result payload.
    pub data: ExperimentData,
    /// Status string (`"DONE"`).
    pub status: String,
    /// Whether the circuit succeeded.
    pub success: bool,
    /// Wall-clock time of the shot loop, in seconds.
    pub time_taken: f64,
}

impl ExperimentResult {
    /// A successful result.
    pub fn done(name: impl Into<String>, seed: u64, shots: u32, data: ExperimentData) -> Self {
        Self {
            name: name.into(),
            seed,
            shots,
            data,
            status: EXPERIMENT_DONE.into(),
            success: true,
            time_taken: 0.0,
        }
    }

    /// Set the elapsed time.
    #[must_use]
    pub fn with_time_taken(mut self, seconds: f64) -> Self {
        self.time_taken = seconds;
        self
    }

    /// The counts histogram.
    pub fn counts(&self) -> &Counts {
        &self.data.counts
    }
}

/// Result of a whole job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    /// Name of the backend that ran the job.
    pub backend_name: String,
    /// Caller's job identifier.
    pub qobj_id: String,
    /// Backend-assigned job identifier.
    pub job_id: JobId,
    /// Completion time.
    pub date: DateTime<Utc>,
    /// One record per circuit, in submission order.
    pub results: Vec<ExperimentResult>,
    /// Status string (`"COMPLETED"`).
    pub status: String,
    /// Whether every circuit succeeded.
    pub success: bool,
    /// Wall-clock time of the whole job, in seconds.
    pub time_taken: f64,
}

impl JobResult {
    /// A completed job.
    pub fn completed(
        backend_name: impl Into<String>,
        qobj_id: impl Into<String>,
        results: Vec<ExperimentResult>,
        time_taken: f64,
    ) -> Self {
        Self {
            backend_name: backend_name.into(),
            qobj_id: qobj_id.into(),
            job_id: JobId::random(),
            date: Utc::now(),
            success: results.iter().all(|r| r.success),
            results,
            status: JOB_COMPLETED.into(),
            time_taken,
        }
    }

    /// Find the result of a circuit by name.
    pub fn get(&self, name: &str) -> Option<&ExperimentResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_basic() {
        let mut counts = Counts::new();
        counts.insert("00", 500);
        counts.insert("11", 500);

        assert_eq!(counts.get("00"), 500);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total_shots(), 1000);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_counts_accumulate_duplicates() {
        let counts = Counts::from_pairs([("0", 3), ("1", 1), ("0", 2)]);
        assert_eq!(counts.get("0"), 5);
        assert_eq!(counts.most_frequent(), Some((&"0".to_string(), &5)));
    }

    #[test]
    fn test_counts_probabilities() {
        let counts = Counts::from_pairs([("00", 300), ("11", 700)]);
        let probs = counts.probabilities();
        assert!((probs["00"] - 0.3).abs() < 1e-10);
        assert!(Counts::new().probabilities().is_empty());
    }

    #[test]
    fn test_sorted_is_stable_on_ties() {
        let counts = Counts::from_pairs([("10", 5), ("01", 5), ("11", 9)]);
        let keys: Vec<_> = counts.sorted().into_iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["11", "01", "10"]);
    }

    #[test]
    fn test_experiment_result_serialization() {
        let data = ExperimentData {
            counts: Counts::from_pairs([("01 1", 4)]),
            classical_state: Some(3),
            ..ExperimentData::default()
        };
        let result = ExperimentResult::done("c", 42, 4, data).with_time_taken(0.5);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "DONE");
        assert_eq!(json["data"]["counts"]["01 1"], 4);
        assert_eq!(json["data"]["classical_state"], 3);
        assert!(json["data"].get("snapshots").is_none());
        assert!(json["data"].get("statevector").is_none());
    }

    #[test]
    fn test_amplitudes_serialize_as_pairs() {
        let data = ExperimentData {
            statevector: Some(vec![Complex64::new(0.5, -0.5)]),
            ..ExperimentData::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["statevector"][0], serde_json::json!([0.5, -0.5]));
    }

    #[test]
    fn test_job_result_success_flag() {
        let ok = ExperimentResult::done("a", 1, 1, ExperimentData::default());
        let job = JobResult::completed("sim", "q1", vec![ok], 0.1);
        assert!(job.success);
        assert_eq!(job.status, "COMPLETED");
        assert!(job.get("a").is_some());
        assert!(job.get("b").is_none());
    }
}
