//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a page (or the headless
//! runner) can override values without a rebuild. Missing fields fall back
//! to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_power: f32,
    pub player_x: f32,
    pub player_size: f32,
    pub obstacle_width: f32,
    pub gap: f32,
    pub spawn_margin: f32,
    pub spawn_interval: u64,
    pub scroll_speed: f32,
    pub max_tilt: f32,
    pub tilt_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            player_x: PLAYER_X,
            player_size: PLAYER_SIZE,
            obstacle_width: OBSTACLE_WIDTH,
            gap: OBSTACLE_GAP,
            spawn_margin: SPAWN_MARGIN,
            spawn_interval: SPAWN_INTERVAL,
            scroll_speed: SCROLL_SPEED,
            max_tilt: MAX_TILT,
            tilt_factor: TILT_FACTOR,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; unspecified fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Like [`Tuning::from_json`], but logs and falls back to defaults on bad input
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) if !json.trim().is_empty() => match Self::from_json(json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning ({e}), using defaults");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Smallest playfield height that still fits a gap between two margins
    pub fn min_surface_height(&self) -> f32 {
        self.gap + 2.0 * self.spawn_margin
    }

    fn sanitized(mut self) -> Self {
        // spawn cadence is a modulus
        self.spawn_interval = self.spawn_interval.max(1);
        self.max_tilt = self.max_tilt.abs();
        self.player_size = self.player_size.max(1.0);
        self.obstacle_width = self.obstacle_width.max(1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.gravity, 0.5);
        assert_eq!(t.jump_power, -10.0);
        assert_eq!(t.gap, 200.0);
        assert_eq!(t.spawn_interval, 90);
        assert_eq!(t.min_surface_height(), 300.0);
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{ "gravity": 0.8, "spawn_interval": 60 }"#).unwrap();
        assert_eq!(t.gravity, 0.8);
        assert_eq!(t.spawn_interval, 60);
        assert_eq!(t.jump_power, JUMP_POWER);
    }

    #[test]
    fn test_zero_interval_is_sanitized() {
        let t = Tuning::from_json(r#"{ "spawn_interval": 0 }"#).unwrap();
        assert_eq!(t.spawn_interval, 1);
    }

    #[test]
    fn test_malformed_falls_back() {
        assert_eq!(Tuning::from_json_or_default(Some("{ nope")), Tuning::default());
        assert_eq!(Tuning::from_json_or_default(None), Tuning::default());
        assert_eq!(Tuning::from_json_or_default(Some("  ")), Tuning::default());
    }
}
