//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use quasar_adapter_sim::SimulatorBackend;
use quasar_hal::{BackendConfig, BackendFactory, JobResult};
use quasar_ir::Qobj;

/// Maximum number of outcomes printed per circuit.
const MAX_ROWS: usize = 16;

/// Load a job from a JSON file.
pub fn load_job(path: &str) -> Result<Qobj> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    Qobj::from_json(&source).with_context(|| format!("Failed to parse job file: {path}"))
}

/// Create a simulator by name.
pub fn create_backend(name: &str) -> Result<SimulatorBackend> {
    let name = name.to_lowercase();
    let name = match name.as_str() {
        "sim" | "simulator" => "qasm",
        "sv" => "statevector",
        other => other,
    };
    SimulatorBackend::from_config(BackendConfig::new(name))
        .with_context(|| format!("Unknown backend: '{name}'. Available: qasm, statevector"))
}

/// Write a result as pretty JSON.
pub fn write_result(result: &JobResult, path: &str) -> Result<()> {
    let json = result.to_json()?;
    fs::write(path, json).with_context(|| format!("Failed to write file: {path}"))
}

/// Print job results in a table format.
#[allow(clippy::cast_precision_loss)]
pub fn print_results(result: &JobResult) {
    for experiment in &result.results {
        println!(
            "\n{} {} ({} shots, seed {}):",
            style("✓").green().bold(),
            style(&experiment.name).bold(),
            experiment.shots,
            experiment.seed
        );

        let counts = experiment.counts();
        let sorted = counts.sorted();
        let total = counts.total_shots() as f64;

        for (bitstring, count) in sorted.iter().take(MAX_ROWS) {
            let prob = **count as f64 / total * 100.0;
            let bar_len = (prob / 2.0).round() as usize;
            let bar: String = "█".repeat(bar_len);

            println!(
                "  {}: {:>6} ({:>5.2}%) {}",
                style(bitstring).cyan(),
                count,
                prob,
                style(bar).green()
            );
        }

        if sorted.len() > MAX_ROWS {
            println!("  ... and {} more outcomes", sorted.len() - MAX_ROWS);
        }

        if let Some(state) = &experiment.data.statevector {
            println!("  Statevector ({} amplitudes):", state.len());
            for (index, amplitude) in state.iter().enumerate().take(MAX_ROWS) {
                println!(
                    "    |{index}⟩ {:>9.5} {:+.5}i",
                    amplitude.re, amplitude.im
                );
            }
        }

        if let Some(snapshots) = &experiment.data.snapshots {
            let labels: Vec<_> = snapshots.keys().map(String::as_str).collect();
            println!("  Snapshots: {}", labels.join(", "));
        }

        println!(
            "  Execution time: {} ms",
            style(format!("{:.3}", experiment.time_taken * 1000.0)).yellow()
        );
    }
}
