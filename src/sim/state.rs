//! Game state and core simulation types
//!
//! Everything a frame reads or writes lives in [`GameState`], so the
//! simulation can be driven without a canvas.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the action key (before the first run or after a crash)
    Idle,
    /// Active gameplay
    Running,
}

/// Which half of a spawned pair an obstacle is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleSide {
    Top,
    Bottom,
}

/// Things that happened during a frame or on input, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new run began
    Started,
    /// Jump impulse applied
    Jumped,
    /// A pair of obstacles entered at the right edge
    PairSpawned { frame: u64 },
    /// An obstacle left the playfield; carries the score after the increment
    ObstacleCleared { score: u32 },
    /// The player hit an obstacle and the run ended
    Crashed(RunSummary),
}

/// Outcome of a finished run, shown on the idle screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u32,
    /// Best score after this run was taken into account
    pub high_score: u32,
    /// This run beat the previous best
    pub new_record: bool,
}

/// Derive the sprite tilt (degrees) from vertical velocity
///
/// Sign follows `dy`; magnitude is `dy * factor` capped at `max_tilt`.
#[inline]
pub fn tilt_for(dy: f32, factor: f32, max_tilt: f32) -> f32 {
    if dy > 0.0 {
        (dy * factor).min(max_tilt)
    } else {
        (dy * factor).max(-max_tilt)
    }
}

/// The player's cube
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; `x` never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/frame, positive = down)
    pub dy: f32,
    pub gravity: f32,
    pub jump_power: f32,
    /// Cosmetic rotation in degrees, within ±max tilt
    pub tilt: f32,
}

impl Player {
    pub fn new(tuning: &Tuning, surface_height: f32) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, surface_height / 2.0),
            size: Vec2::splat(tuning.player_size),
            dy: 0.0,
            gravity: tuning.gravity,
            jump_power: tuning.jump_power,
            tilt: 0.0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Set the upward impulse, regardless of current velocity
    pub fn jump(&mut self) {
        self.dy = self.jump_power;
    }

    /// Apply gravity, move, update tilt and clamp to `[0, surface_height - height]`
    ///
    /// Touching the floor or ceiling kills vertical velocity. Returns true when
    /// the position was clamped.
    pub fn integrate(&mut self, surface_height: f32, tilt_factor: f32, max_tilt: f32) -> bool {
        self.dy += self.gravity;
        self.pos.y += self.dy;
        self.tilt = tilt_for(self.dy, tilt_factor, max_tilt);

        let floor = (surface_height - self.size.y).max(0.0);
        if self.pos.y > floor {
            self.pos.y = floor;
            self.dy = 0.0;
            return true;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.dy = 0.0;
            return true;
        }
        false
    }
}

/// One column piece scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub side: ObstacleSide,
    /// Top-left corner; `y` never changes
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Fully past the left edge of the playfield
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Playfield size in pixels, fixed for the lifetime of the state
    pub surface: Vec2,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Frames since the current run started
    pub frame_count: u64,
    pub score: u32,
    pub high_score: u32,
    /// Result of the most recent run, if any
    pub last_run: Option<RunSummary>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game for a playfield of the given size
    ///
    /// Heights too small to fit the spawn gap are raised to the minimum.
    pub fn new(surface: Vec2, tuning: Tuning, high_score: u32) -> Self {
        let surface = Vec2::new(
            surface.x.max(tuning.player_x + tuning.player_size),
            surface.y.max(tuning.min_surface_height()),
        );
        Self {
            surface,
            player: Player::new(&tuning, surface.y),
            tuning,
            phase: GamePhase::Idle,
            obstacles: Vec::new(),
            frame_count: 0,
            score: 0,
            high_score,
            last_run: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
