//! Cube Jump - a one-button side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `render`: Backend-agnostic drawing of a frame onto a `Canvas`
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (storage, input)
//! - `tuning`: Data-driven game balance
//! - `game`: Session driver tying simulation, persistence and drawing together

pub mod game;
pub mod highscores;
pub mod platform;
pub mod render;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, LoopControl};
pub use highscores::HighScore;
pub use settings::{Palette, Settings, Theme};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration applied every frame (pixels/frame²)
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity set by a jump (negative = up)
    pub const JUMP_POWER: f32 = -10.0;

    /// Player box
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 50.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    /// Vertical opening between a top and bottom obstacle
    pub const OBSTACLE_GAP: f32 = 200.0;
    /// Minimum height of the top obstacle
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Frames between obstacle pairs
    pub const SPAWN_INTERVAL: u64 = 90;
    /// Leftward obstacle speed (pixels/frame)
    pub const SCROLL_SPEED: f32 = 5.0;

    /// Visual tilt limit (degrees)
    pub const MAX_TILT: f32 = 20.0;
    /// Degrees of tilt per unit of vertical velocity
    pub const TILT_FACTOR: f32 = 2.0;

    /// HUD text sizes (pixels)
    pub const SCORE_FONT_PX: f32 = 24.0;
    pub const PROMPT_FONT_PX: f32 = 48.0;
}
