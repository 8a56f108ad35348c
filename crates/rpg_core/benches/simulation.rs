//! Simulation benchmarks for rpg_core.
//!
//! Run with: `cargo bench -p rpg_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rpg_core::config::SimulationConfig;
use rpg_core::simulation::Simulation;

fn seeded() -> Simulation {
    match Simulation::with_config(SimulationConfig::seeded(42)) {
        Ok(sim) => sim,
        Err(err) => panic!("reference config rejected: {err}"),
    }
}

/// Runs simulation benchmarks for the rpg_core crate.
pub fn simulation_benchmark(c: &mut Criterion) {
    c.bench_function("tick_reference_world", |b| {
        let mut sim = seeded();
        b.iter(|| black_box(sim.tick().elapsed_ticks));
    });

    c.bench_function("attack_adjacent_enemy", |b| {
        b.iter_batched(
            || {
                let mut sim = seeded();
                // Next to rabbit 5 at (350, 250)
                sim.world_mut().player.position = rpg_core::geometry::Point::new(355, 255);
                sim
            },
            |mut sim| black_box(sim.resolve_attack()),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("move_cycle", |b| {
        let mut sim = seeded();
        b.iter(|| {
            for direction in ["up", "right", "down", "left"] {
                black_box(sim.move_player(direction).player.position);
            }
        });
    });

    c.bench_function("state_hash", |b| {
        let sim = seeded();
        b.iter(|| black_box(sim.state_hash()));
    });
}

criterion_group!(benches, simulation_benchmark);
criterion_main!(benches);
