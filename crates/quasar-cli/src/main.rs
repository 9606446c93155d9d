//! Quasar Command-Line Interface
//!
//! The main entry point for the `quasar` tool: run a job file on one of the
//! local simulators, list the simulators, or print version information.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{backends, run};
use quasar_adapter_sim::SimulatorBackend;
use quasar_hal::Backend;

/// Quasar - statevector simulation of quantum circuit jobs
#[derive(Parser)]
#[command(name = "quasar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a job file on a simulator
    Run {
        /// Input job file (JSON)
        #[arg(short, long)]
        input: String,

        /// Simulator to use (qasm, statevector)
        #[arg(short, long, default_value = "qasm")]
        backend: String,

        /// Override the job's shot count
        #[arg(short, long, env = "QUASAR_SHOTS")]
        shots: Option<u32>,

        /// Override the job's seed
        #[arg(long, env = "QUASAR_SEED")]
        seed: Option<u64>,

        /// Write the JSON result to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List available backends
    Backends,

    /// Show version information
    Version,
}

/// Print the version line followed by the built-in simulators.
fn print_version() {
    println!(
        "{} {}",
        style("quasar").cyan().bold(),
        style(env!("CARGO_PKG_VERSION")).yellow()
    );
    for backend in [SimulatorBackend::qasm(), SimulatorBackend::statevector()] {
        println!(
            "  {:<30} up to {} qubits",
            backend.name(),
            backend.max_qubits()
        );
    }
    println!("{}", style(&SimulatorBackend::qasm().configuration().url).dim());
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            input,
            backend,
            shots,
            seed,
            output,
            format,
        } => run::execute(
            &input,
            &backend,
            shots,
            seed,
            output.as_deref(),
            &format,
        ),

        Commands::Backends => {
            backends::execute();
            Ok(())
        }

        Commands::Version => {
            print_version();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
