//! Reproducibility testing utilities.
//!
//! Provides a harness for verifying that the simulation produces identical
//! results given identical seeds and inputs.
//!
//! # Testing Strategy
//!
//! The simulation draws damage rolls and idle wandering from one RNG owned
//! by the [`Simulation`]. Given the same seed and the same action script,
//! two runs must end in the same state. Sources of divergence include:
//!
//! - **Unseeded RNGs**: a config without a seed draws from entropy.
//! - **Iteration order**: enemies act in roster order, never in hash order.
//! - **Hidden state**: anything that affects play must be in the world.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: each module checks its own rules
//! 2. **Property tests**: random action scripts must still replay exactly
//! 3. **Integration tests**: full scenarios are reproducible
//! 4. **Parallel tests**: running N simulations on threads all match

use std::collections::BTreeSet;
use std::thread;

use rpg_core::simulation::Simulation;

use crate::fixtures::{run_script, ScriptedAction};

/// Final state hashes from replaying one script several times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    /// Final hash of each run, in run order.
    pub final_hashes: Vec<u64>,
    /// Length of the replayed script.
    pub actions: usize,
}

impl ReplayReport {
    /// True when every run ended on the same hash.
    #[must_use]
    pub fn is_reproducible(&self) -> bool {
        self.final_hashes.windows(2).all(|pair| pair[0] == pair[1])
    }

    /// The distinct final hashes, ascending.
    #[must_use]
    pub fn distinct_hashes(&self) -> Vec<u64> {
        self.final_hashes.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// Fail the test unless every run matched.
    ///
    /// # Panics
    ///
    /// Panics listing every final hash if the runs disagree.
    pub fn assert_reproducible(&self) {
        assert!(
            self.is_reproducible(),
            "{} replays of a {}-action script ended in {} different states: {:?}",
            self.final_hashes.len(),
            self.actions,
            self.distinct_hashes().len(),
            self.final_hashes
        );
    }
}

/// Replay `script` on `runs` fresh simulations from `setup_fn`.
///
/// ```
/// use rpg_test_utils::determinism::replay_runs;
/// use rpg_test_utils::fixtures::{fresh_simulation, ScriptedAction};
///
/// let script = [ScriptedAction::Attack, ScriptedAction::Tick, ScriptedAction::Tick];
/// replay_runs(3, || fresh_simulation(42), &script).assert_reproducible();
/// ```
pub fn replay_runs<F>(runs: usize, setup_fn: F, script: &[ScriptedAction]) -> ReplayReport
where
    F: Fn() -> Simulation,
{
    let final_hashes = (0..runs)
        .map(|_| {
            let mut sim = setup_fn();
            run_script(&mut sim, script);
            sim.state_hash()
        })
        .collect();

    ReplayReport {
        final_hashes,
        actions: script.len(),
    }
}

/// Tick two simulations from the same setup and compare final hashes.
pub fn verify_simulation_determinism<F>(setup_fn: F, num_ticks: usize) -> bool
where
    F: Fn() -> Simulation,
{
    replay_runs(2, setup_fn, &vec![ScriptedAction::Tick; num_ticks]).is_reproducible()
}

/// Replay an action script on two simulations from the same setup and
/// compare final hashes.
pub fn verify_script_determinism<F>(setup_fn: F, script: &[ScriptedAction]) -> bool
where
    F: Fn() -> Simulation,
{
    replay_runs(2, setup_fn, script).is_reproducible()
}

/// Compare two runs tick by tick and report the first tick where they differ.
///
/// Returns `None` if the runs never diverge, `Some(0)` if they already
/// differ before the first tick.
pub fn find_first_divergence<F>(setup_fn: F, num_ticks: u64) -> Option<u64>
where
    F: Fn() -> Simulation,
{
    let mut sim1 = setup_fn();
    let mut sim2 = setup_fn();

    if sim1.state_hash() != sim2.state_hash() {
        return Some(0);
    }

    for tick in 1..=num_ticks {
        sim1.tick();
        sim2.tick();

        if sim1.state_hash() != sim2.state_hash() {
            return Some(tick);
        }
    }

    None
}

/// Result of parallel simulation runs.
#[derive(Debug, Clone)]
pub struct ParallelSimResult {
    /// Final state hash from each simulation.
    pub hashes: Vec<u64>,
    /// Number of ticks each simulation ran.
    pub ticks: u64,
}

impl ParallelSimResult {
    /// Check if all simulations produced identical results.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.hashes.windows(2).all(|w| w[0] == w[1])
    }
}

/// Run N simulations on scoped threads and collect their final hashes.
///
/// # Panics
///
/// Panics if a simulation thread panics.
pub fn run_parallel_simulations<F>(
    setup_fn: F,
    num_sims: usize,
    num_ticks: u64,
) -> ParallelSimResult
where
    F: Fn() -> Simulation + Sync,
{
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..num_sims)
            .map(|_| {
                s.spawn(|| {
                    let mut sim = setup_fn();
                    for _ in 0..num_ticks {
                        sim.tick();
                    }
                    sim.state_hash()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(hash) => hash,
                Err(_) => panic!("simulation thread panicked"),
            })
            .collect()
    });

    ParallelSimResult {
        hashes,
        ticks: num_ticks,
    }
}

/// Proptest strategies for simulation testing.
///
/// These strategies generate random but reproducible inputs for
/// property-based testing.
pub mod strategies {
    use proptest::prelude::*;
    use rpg_core::components::Direction;
    use rpg_core::config::{MAP_HEIGHT, MAP_WIDTH};
    use rpg_core::data::EnemyKind;
    use rpg_core::geometry::Point;

    use crate::fixtures::ScriptedAction;

    /// Generate one of the four directions.
    pub fn arb_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    /// Generate a direction name as a client might send it: any case, or
    /// occasionally garbage.
    pub fn arb_direction_name() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => arb_direction().prop_map(|d| d.as_str().to_string()),
            2 => arb_direction().prop_map(|d| d.as_str().to_ascii_uppercase()),
            1 => "[a-z]{0,8}",
        ]
    }

    /// Generate an enemy kind.
    pub fn arb_enemy_kind() -> impl Strategy<Value = EnemyKind> {
        prop::sample::select(EnemyKind::ALL.to_vec())
    }

    /// Generate a point on the reference map, edges included.
    pub fn arb_map_point() -> impl Strategy<Value = Point> {
        (0..=MAP_WIDTH, 0..=MAP_HEIGHT).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Generate a point near the reference player start.
    pub fn arb_point_near_start(radius: i32) -> impl Strategy<Value = Point> {
        (-radius..=radius, -radius..=radius).prop_map(|(dx, dy)| Point::new(400 + dx, 300 + dy))
    }

    /// Generate an RNG seed.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// Generate a single client action. Resets are rare.
    pub fn arb_action() -> impl Strategy<Value = ScriptedAction> {
        prop_oneof![
            6 => arb_direction().prop_map(|direction| ScriptedAction::Move { direction }),
            3 => Just(ScriptedAction::Attack),
            4 => Just(ScriptedAction::Tick),
            1 => Just(ScriptedAction::Reset),
        ]
    }

    /// Generate an action script of up to `max_len` actions.
    pub fn arb_script(max_len: usize) -> impl Strategy<Value = Vec<ScriptedAction>> {
        proptest::collection::vec(arb_action(), 0..max_len)
    }
}
