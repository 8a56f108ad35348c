//! Combat resolution between the player and enemies.
//!
//! - The player swings at every enemy within the attack radius at once.
//!   Each hit rolls `attack + offset` and always deals at least 1.
//! - Enemies deal `attack - defense` to the player, again at least 1.
//! - Kills grant the species' exp and score rewards and remove the enemy
//!   from the roster within the same call.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::EnemyId;
use crate::config::SimulationConfig;
use crate::data::EnemyKind;
use crate::enemy::Enemy;
use crate::player::Player;
use crate::world::World;

/// Minimum damage floor - attacks always deal at least 1 damage.
pub const MIN_DAMAGE: u32 = 1;

/// One enemy struck by a player swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    /// Enemy that was struck.
    pub enemy_id: EnemyId,
    /// Its species.
    pub kind: EnemyKind,
    /// Rolled damage of the hit.
    pub damage: u32,
    /// Whether the hit killed it.
    pub killed: bool,
}

/// Rewards paid out for one kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kill {
    /// Enemy that died.
    pub enemy_id: EnemyId,
    /// Its species.
    pub kind: EnemyKind,
    /// Experience granted.
    pub exp: u32,
    /// Score granted.
    pub score: u32,
}

/// Everything that happened during one player attack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    /// Every enemy struck, in roster order.
    pub hits: Vec<Hit>,
    /// Every enemy killed, in roster order.
    pub kills: Vec<Kill>,
    /// Levels the player gained from the kills.
    pub levels_gained: u32,
}

impl AttackReport {
    /// Total experience granted by this attack.
    #[must_use]
    pub fn exp_gained(&self) -> u32 {
        self.kills.iter().map(|kill| kill.exp).sum()
    }

    /// Total score granted by this attack.
    #[must_use]
    pub fn score_gained(&self) -> u32 {
        self.kills.iter().map(|kill| kill.score).sum()
    }
}

/// Roll the damage of one player hit: `max(1, attack + offset)` with the
/// offset drawn uniformly from `roll_min..=roll_max`.
pub fn roll_player_damage<R: Rng + ?Sized>(
    attack: u32,
    roll_min: i32,
    roll_max: i32,
    rng: &mut R,
) -> u32 {
    let offset = rng.gen_range(roll_min..=roll_max);
    let damage = i64::from(attack) + i64::from(offset);
    damage.clamp(i64::from(MIN_DAMAGE), i64::from(u32::MAX)) as u32
}

/// Resolve one player attack against every enemy in range.
///
/// Returns `None` without touching the world when the player is dead or
/// already mid-attack. The `attacking` flag is raised for the duration of
/// the call and lowered before returning.
pub fn player_attack<R: Rng + ?Sized>(
    world: &mut World,
    config: &SimulationConfig,
    rng: &mut R,
) -> Option<AttackReport> {
    if !world.player.is_alive() || world.player.attacking {
        return None;
    }

    world.player.attacking = true;
    let origin = world.player.position;
    let level_before = world.player.level;
    let mut report = AttackReport::default();

    let mut index = 0;
    while index < world.enemies.len() {
        let enemy = &mut world.enemies[index];
        if enemy.distance_to(origin) > config.attack_radius {
            index += 1;
            continue;
        }

        let damage = roll_player_damage(
            world.player.attack,
            config.damage_roll_min,
            config.damage_roll_max,
            rng,
        );
        enemy.take_damage(damage);
        let killed = !enemy.is_alive();
        tracing::debug!(enemy = enemy.id, kind = %enemy.kind, damage, hp = enemy.health.current, "Player hit enemy");
        report.hits.push(Hit {
            enemy_id: enemy.id,
            kind: enemy.kind,
            damage,
            killed,
        });

        if !killed {
            index += 1;
            continue;
        }

        let dead = world.enemies.remove(index);
        let stats = dead.stats();
        world.player.gain_exp(stats.exp_reward);
        world.player.add_score(stats.score_reward);
        tracing::info!(
            enemy = dead.id,
            kind = %dead.kind,
            exp = stats.exp_reward,
            score = stats.score_reward,
            "Enemy defeated"
        );
        report.kills.push(Kill {
            enemy_id: dead.id,
            kind: dead.kind,
            exp: stats.exp_reward,
            score: stats.score_reward,
        });
    }

    report.levels_gained = world.player.level - level_before;
    world.player.attacking = false;
    Some(report)
}

/// Let an enemy strike the player if it is within its attack range.
///
/// `distance` is the enemy-to-player distance measured before the enemy
/// moved this tick. Returns the damage dealt, or `None` when no attack
/// happened.
pub fn enemy_attack(enemy: &mut Enemy, player: &mut Player, distance: f64) -> Option<u32> {
    if distance > enemy.stats().attack_range || enemy.attacking {
        return None;
    }

    enemy.attacking = true;
    let damage = player.take_damage(enemy.attack);
    tracing::debug!(enemy = enemy.id, kind = %enemy.kind, damage, player_hp = player.hp(), "Enemy hit player");
    enemy.attacking = false;
    Some(damage)
}
