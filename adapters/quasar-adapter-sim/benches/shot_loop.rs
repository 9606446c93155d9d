//! Benchmarks for the simulator shot loop
//!
//! Run with: cargo bench -p quasar-adapter-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::f64::consts::PI;

use quasar_adapter_sim::{ShotExecutor, StatevectorKernel};
use quasar_ir::{Circuit, Program};

/// Benchmark GHZ circuits over shot counts
fn bench_ghz_shots(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz_shots");
    let program = Program::compile(&Circuit::ghz(8)).unwrap();

    for shots in &[1u32, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("ghz_8", shots), shots, |b, &shots| {
            b.iter(|| {
                let mut kernel = StatevectorKernel::new(7);
                ShotExecutor::new("bench")
                    .run(&mut kernel, black_box(&program), black_box(shots))
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark register width at a fixed shot count
fn bench_register_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_width");

    for &n in &[4u32, 8, 12, 16] {
        let mut circuit = Circuit::with_size("layers", n, n);
        for q in 0..n {
            circuit.u3(PI / 3.0, PI / 5.0, PI / 7.0, q);
        }
        for q in 0..n - 1 {
            circuit.cx(q, q + 1);
        }
        circuit.measure_all();
        let program = Program::compile(&circuit).unwrap();

        group.bench_with_input(BenchmarkId::new("qubits", n), &program, |b, program| {
            b.iter(|| {
                let mut kernel = StatevectorKernel::new(1);
                ShotExecutor::new("bench")
                    .run(&mut kernel, black_box(program), 100)
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ghz_shots, bench_register_width);
criterion_main!(benches);
