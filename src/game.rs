//! Session driver
//!
//! [`Game`] owns everything a host page needs between frames: the
//! simulation state, the spawn RNG, the persisted preferences and the
//! latest frame's draw list. The host forwards key presses, calls
//! [`Game::frame`] once per display refresh while it returns
//! [`LoopControl::Continue`], and replays [`Game::draw_list`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscores::HighScore;
use crate::platform::{Action, KeyValueStore};
use crate::render::{DrawList, draw_frame, draw_idle};
use crate::settings::{Palette, Settings, Theme};
use crate::sim::{self, GameEvent, GameState};
use crate::tuning::Tuning;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

pub struct Game<S: KeyValueStore> {
    state: GameState,
    rng: Pcg32,
    seed: u64,
    settings: Settings,
    high_score: HighScore,
    store: S,
    draw_list: DrawList,
}

impl<S: KeyValueStore> Game<S> {
    /// Load preferences from `store` and show the idle screen
    pub fn new(surface: Vec2, tuning: Tuning, seed: u64, store: S) -> Self {
        let settings = Settings::load(&store);
        let high_score = HighScore::load(&store);
        let state = GameState::new(surface, tuning, high_score.best);
        let draw_list = DrawList::new(state.surface);
        let mut game = Self {
            state,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            settings,
            high_score,
            store,
            draw_list,
        };
        game.redraw();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    pub fn palette(&self) -> Palette {
        self.settings.theme.palette()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Commands for the most recently drawn frame
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Apply a key press immediately
    ///
    /// [`GameEvent::Started`] means the host must start its frame loop.
    pub fn handle_action(&mut self, action: Action) -> GameEvent {
        match action {
            Action::Jump => sim::press(&mut self.state),
        }
    }

    /// Run one frame: simulate, then draw the result
    pub fn frame(&mut self) -> LoopControl {
        if !self.state.is_running() {
            self.redraw();
            return LoopControl::Stop;
        }

        for event in sim::tick(&mut self.state, &mut self.rng) {
            if let GameEvent::Crashed(run) = event {
                if run.new_record && self.high_score.record(run.score) {
                    self.high_score.save(&mut self.store);
                }
                self.redraw();
                return LoopControl::Stop;
            }
        }

        self.redraw();
        LoopControl::Continue
    }

    /// Flip and persist the theme; the current screen is redrawn in the new colours
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.settings.toggle_theme();
        self.settings.save(&mut self.store);
        self.redraw();
        theme
    }

    fn redraw(&mut self) {
        let palette = self.palette();
        if self.state.is_running() {
            draw_frame(&self.state, &palette, &mut self.draw_list);
        } else {
            draw_idle(&self.state, &palette, &mut self.draw_list);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use crate::render::{DrawCommand, START_PROMPT};
    use crate::sim::{GamePhase, Obstacle, ObstacleSide};

    fn game(store: MemoryStore) -> Game<MemoryStore> {
        Game::new(Vec2::new(800.0, 600.0), Tuning::default(), 1234, store)
    }

    /// Park an obstacle on top of the player so the next frame crashes
    fn force_crash(game: &mut Game<MemoryStore>, score: u32) {
        game.state.score = score;
        game.state.frame_count = 1;
        let y = game.state.player.pos.y;
        game.state.obstacles.push(Obstacle {
            id: 999,
            side: ObstacleSide::Bottom,
            pos: Vec2::new(55.0, y),
            size: Vec2::new(50.0, 50.0),
        });
    }

    #[test]
    fn test_starts_idle_with_prompt() {
        let game = game(MemoryStore::new());
        assert_eq!(game.state().phase, GamePhase::Idle);
        assert_eq!(game.draw_list().texts().collect::<Vec<_>>(), vec![START_PROMPT]);
    }

    #[test]
    fn test_idle_frame_stops_loop() {
        let mut game = game(MemoryStore::new());
        assert_eq!(game.frame(), LoopControl::Stop);
        assert_eq!(game.state().frame_count, 0);
    }

    #[test]
    fn test_start_then_run_frames() {
        let mut game = game(MemoryStore::new());
        assert_eq!(game.handle_action(Action::Jump), GameEvent::Started);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().player.pos.y, 300.0);

        assert_eq!(game.frame(), LoopControl::Continue);
        assert_eq!(game.state().frame_count, 1);
        assert_eq!(game.state().obstacles.len(), 2);
        // player + two obstacles
        assert_eq!(game.draw_list().rects().count(), 3);
    }

    #[test]
    fn test_jump_impulse_while_running() {
        let mut game = game(MemoryStore::new());
        game.handle_action(Action::Jump);
        game.state.player.dy = 8.0;
        assert_eq!(game.handle_action(Action::Jump), GameEvent::Jumped);
        assert_eq!(game.state().player.dy, -10.0);
    }

    #[test]
    fn test_crash_with_record_persists_high_score() {
        let mut game = game(MemoryStore::new().with_entry("highScore", "4"));
        assert_eq!(game.high_score(), 4);
        game.handle_action(Action::Jump);
        force_crash(&mut game, 6);

        assert_eq!(game.frame(), LoopControl::Stop);
        assert_eq!(game.state().phase, GamePhase::Idle);
        assert_eq!(game.high_score(), 6);
        assert_eq!(game.store().get("highScore").unwrap().as_deref(), Some("6"));
        let texts: Vec<_> = game.draw_list().texts().collect();
        assert!(texts.contains(&"Game Over! Your score: 6"));
        assert!(texts.contains(&START_PROMPT));
    }

    #[test]
    fn test_crash_without_record_leaves_store_alone() {
        let mut game = game(MemoryStore::new().with_entry("highScore", "9"));
        game.handle_action(Action::Jump);
        force_crash(&mut game, 9);

        assert_eq!(game.frame(), LoopControl::Stop);
        assert_eq!(game.high_score(), 9);
        assert_eq!(game.store().get("highScore").unwrap().as_deref(), Some("9"));
    }

    #[test]
    fn test_restart_after_crash() {
        let mut game = game(MemoryStore::new());
        game.handle_action(Action::Jump);
        force_crash(&mut game, 2);
        game.frame();

        assert_eq!(game.handle_action(Action::Jump), GameEvent::Started);
        assert_eq!(game.state().score, 0);
        assert!(game.state().obstacles.is_empty());
        assert_eq!(game.frame(), LoopControl::Continue);
    }

    #[test]
    fn test_theme_toggle_persists_and_recolours() {
        let mut game = game(MemoryStore::new());
        assert_eq!(game.theme(), Theme::Light);
        assert_eq!(game.toggle_theme(), Theme::Dark);
        assert_eq!(game.store().get("darkMode").unwrap().as_deref(), Some("enabled"));

        game.handle_action(Action::Jump);
        game.frame();
        let player_color = game.draw_list().commands.iter().find_map(|c| match c {
            DrawCommand::Rect { color, .. } => Some(*color),
            _ => None,
        });
        assert_eq!(player_color, Some(Palette::DARK.player));
    }

    #[test]
    fn test_loads_dark_theme() {
        let game = game(MemoryStore::new().with_entry("darkMode", "enabled"));
        assert_eq!(game.theme(), Theme::Dark);
    }
}
