//! Backends command implementation.

use console::style;

use quasar_adapter_sim::SimulatorBackend;
use quasar_hal::Backend;

/// Execute the backends command.
pub fn execute() {
    println!("{} Available backends:\n", style("Quasar").cyan().bold());

    for (alias, backend) in [
        ("qasm", SimulatorBackend::qasm()),
        ("statevector", SimulatorBackend::statevector()),
    ] {
        let config = backend.configuration();
        println!(
            "  {} {} {}",
            style("●").green(),
            style(alias).bold(),
            if config.local { "(local)" } else { "" }
        );
        println!("    Name: {}", config.name);
        println!("    {}", config.description);
        println!("    Qubits: {}", backend.max_qubits());
        println!("    Coupling: {}", config.coupling_map);
        println!("    Gates: {}", config.basis_gates().join(", "));
        println!();
    }
}
