//! Static stat tables for every enemy and obstacle kind.
//!
//! Each closed kind enumeration indexes a single table row; no other
//! module switches on kinds to look up numbers. Rows are plain data so
//! they can be serialized for clients that render legends or tooltips.
//!
//! **Note:** This module contains no IO - it only defines data types.

mod enemy_data;
mod obstacle_data;

pub use enemy_data::{Behavior, EnemyKind, EnemyStats};
pub use obstacle_data::{ObstacleKind, ObstacleStats};
