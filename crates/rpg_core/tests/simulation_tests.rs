//! End-to-end scenarios against the public action API.
//!
//! Each test drives a seeded [`Simulation`] the way a transport layer
//! would, one action at a time, and checks the returned world.

use rpg_core::prelude::*;
use rpg_core::world::{ENEMY_SPAWNS, OBSTACLE_LAYOUT};
use rpg_test_utils::fixtures::{
    cleared_world, dead_player, fresh_simulation, simulation_with_enemy, simulation_with_player_at,
    PLAYER_START,
};

// =============================================================================
// Movement
// =============================================================================

#[test]
fn test_three_steps_up_from_start() {
    let mut sim = fresh_simulation(1);
    sim.move_player("up");
    sim.move_player("up");
    let world = sim.move_player("up");

    assert_eq!(world.player.position, Point::new(400, 291));
    assert_eq!(world.player.facing, Direction::Up);
}

#[test]
fn test_blocked_move_still_turns_player() {
    // Rock at (420, 450, 48, 48); standing just above it
    let mut sim = simulation_with_player_at(1, Point::new(440, 440));

    let outcome = sim.request_move("down");

    assert_eq!(
        outcome,
        MoveOutcome::Blocked {
            obstacle: ObstacleKind::Rock
        }
    );
    assert_eq!(sim.get_state().player.position, Point::new(440, 440));
    assert_eq!(sim.get_state().player.facing, Direction::Down);
}

#[test]
fn test_passable_kinds_still_block() {
    // Bush at (80, 250, 32, 32) is passable by its stats but blocks movement
    let mut sim = simulation_with_player_at(1, Point::new(122, 266));

    assert_eq!(
        sim.request_move("left"),
        MoveOutcome::Blocked {
            obstacle: ObstacleKind::Bush
        }
    );
}

#[test]
fn test_edges_of_map() {
    let mut sim = simulation_with_player_at(1, Point::new(400, 1));
    assert_eq!(sim.request_move("up"), MoveOutcome::OutOfBounds);

    let mut sim = simulation_with_player_at(1, Point::new(400, 597));
    assert!(sim.request_move("down").is_applied());
    assert_eq!(sim.get_state().player.position, Point::new(400, 600));
    assert_eq!(sim.request_move("down"), MoveOutcome::OutOfBounds);
}

// =============================================================================
// Combat
// =============================================================================

#[test]
fn test_player_on_rabbit_kills_it_within_ten_swings() {
    // Rabbit 3 spawns at (650, 120)
    let mut sim = simulation_with_player_at(1, Point::new(650, 120));
    let exp_before = sim.get_state().player.exp;

    for _ in 0..10 {
        sim.attack();
        if sim.get_state().enemy(3).is_none() {
            break;
        }
    }

    let world = sim.get_state();
    assert!(world.enemy(3).is_none());
    assert!(world.player.exp >= exp_before + 15);
    assert_eq!(world.enemies.len(), 6);
}

#[test]
fn test_kill_pays_table_rewards() {
    for kind in EnemyKind::ALL {
        let mut sim = simulation_with_enemy(5, kind, PLAYER_START);
        sim.world_mut().enemies[0].health.current = 1;

        let report = sim.resolve_attack().unwrap_or_default();
        let stats = kind.stats();

        assert_eq!(report.kills.len(), 1);
        assert_eq!(sim.get_state().player.score, stats.score_reward);
        assert_eq!(sim.get_state().player.exp, stats.exp_reward);
        assert!(sim.get_state().enemies.is_empty());
        assert!(sim.get_state().is_victory());
    }
}

#[test]
fn test_attack_radius_reaches_edge() {
    // Enemy 5 (Rabbit) at (350, 250) is 50 units from (380, 290)
    let mut sim = simulation_with_player_at(1, Point::new(380, 290));
    let report = sim.resolve_attack().unwrap_or_default();

    let ids: Vec<_> = report.hits.iter().map(|hit| hit.enemy_id).collect();
    assert_eq!(ids, vec![5]);
    assert_eq!(sim.get_state().last_action, "attack");
}

#[test]
fn test_goblin_closes_in_and_hits() {
    let mut sim = simulation_with_enemy(1, EnemyKind::Goblin, Point::new(400, 330));
    let mut damage = 0;

    for _ in 0..10 {
        if let Some(report) = sim.advance() {
            damage += report.damage_taken;
        }
    }

    // Starts 30 away, steps 1 per tick, hits from 25 inward
    assert!(damage > 0);
    assert_eq!(sim.get_state().player.hp(), 100 - damage);
    assert_eq!(damage % 10, 0);
}

#[test]
fn test_rabbit_runs_from_player() {
    let mut sim = simulation_with_enemy(1, EnemyKind::Rabbit, Point::new(400, 340));
    for _ in 0..5 {
        sim.tick();
    }
    let rabbit = sim.get_state().enemies[0].position;
    assert_eq!(rabbit, Point::new(400, 350));
    assert_eq!(sim.get_state().player.hp(), 100);
}

#[test]
fn test_exp_carries_across_several_levels() {
    let mut sim = fresh_simulation(1);
    let levels = sim.world_mut().player.gain_exp(250);
    let player = &sim.get_state().player;

    assert_eq!(levels, 2);
    assert_eq!(player.level, 3);
    assert_eq!(player.exp, 50);
    assert_eq!(player.max_hp(), 140);
    assert_eq!(player.hp(), 140);
    assert_eq!(player.attack, 35);
    assert_eq!(player.defense, 9);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_dead_player_freezes_world() {
    let mut sim = dead_player(1);
    let before = sim.get_state().clone();

    let after_move = sim.move_player("right").clone();
    assert_eq!(after_move.player.position, before.player.position);

    let after_tick = sim.tick();
    assert_eq!(after_tick.enemies, before.enemies);
    assert_eq!(after_tick.elapsed_ticks, before.elapsed_ticks);
    assert!(after_tick.is_game_over());
}

#[test]
fn test_reset_restores_reference_layout() {
    let mut sim = cleared_world(1);
    {
        let world = sim.world_mut();
        world.player.position = Point::new(10, 10);
        world.player.gain_exp(430);
        world.player.add_score(900);
        world.player.health.current = 3;
        world.paused = true;
    }

    let world = sim.reset();

    assert_eq!(world.enemies.len(), ENEMY_SPAWNS.len());
    assert_eq!(world.obstacles.len(), OBSTACLE_LAYOUT.len());
    assert_eq!(world.player.position, PLAYER_START);
    assert_eq!((world.player.hp(), world.player.max_hp()), (100, 100));
    assert_eq!(world.player.level, 1);
    assert_eq!(world.player.exp, 0);
    assert_eq!(world.player.score, 0);
    assert!(!world.paused);
    assert_eq!(world.last_action, "reset");
}

#[test]
fn test_enemy_lookup() {
    let sim = fresh_simulation(1);
    let enemy = sim.enemy(2).cloned();
    assert_eq!(enemy.map(|e| e.kind), Ok(EnemyKind::Troll));
    assert_eq!(sim.enemy(42).err(), Some(GameError::EnemyNotFound(42)));
}
