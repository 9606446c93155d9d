//! Run command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use quasar_hal::Backend;

use super::common::{create_backend, load_job, print_results, write_result};

/// Execute the run command.
pub fn execute(
    input: &str,
    backend: &str,
    shots: Option<u32>,
    seed: Option<u64>,
    output: Option<&str>,
    format: &str,
) -> Result<()> {
    if !matches!(format, "table" | "json") {
        anyhow::bail!("Unknown format: '{format}'. Available: table, json");
    }

    let mut job = load_job(input)?;
    if let Some(shots) = shots {
        job.config.shots = shots;
    }
    if let Some(seed) = seed {
        job.config.seed = Some(seed);
    }
    debug!(
        qobj_id = %job.qobj_id,
        circuits = job.experiments.len(),
        shots = job.config.shots,
        "Loaded job"
    );

    let backend_impl = create_backend(backend)?;

    if format == "table" {
        println!(
            "{} Running {} on {} ({} circuits, {} shots)",
            style("→").cyan().bold(),
            style(input).green(),
            style(backend_impl.name()).yellow(),
            job.experiments.len(),
            job.config.shots
        );
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Simulating...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = backend_impl.run(job);
    spinner.finish_and_clear();
    let result = result?;

    if let Some(path) = output {
        write_result(&result, path)?;
        if format == "table" {
            println!("  Result written to {}", style(path).green());
        }
    }

    match format {
        "json" => println!("{}", result.to_json()?),
        _ => print_results(&result),
    }

    Ok(())
}
