//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Injected RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_hit};
pub use spawn::{obstacle_pair, should_spawn, spawn_pair, top_height};
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, ObstacleSide, Player, RunSummary, tilt_for,
};
pub use tick::{jump, press, start, tick};
