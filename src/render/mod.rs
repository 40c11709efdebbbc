//! Frame composition
//!
//! Turns a [`GameState`] into drawing calls on a [`Canvas`]. The canvas is a
//! minimal 2D surface (clear, fill colour, rectangles, text) so the same
//! code drives the WebGPU back end and the tests.

use glam::Vec2;

use crate::consts::{PROMPT_FONT_PX, SCORE_FONT_PX};
use crate::settings::Palette;
use crate::sim::{Aabb, GameState};

pub const START_PROMPT: &str = "Press Space to Start";

/// Horizontal anchoring of text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// 2D drawing surface with a fixed pixel size (origin top-left, y down)
pub trait Canvas {
    fn size(&self) -> Vec2;
    /// Erase everything drawn so far
    fn clear(&mut self);
    fn set_fill_color(&mut self, color: [f32; 4]);
    /// Fill `rect` rotated by `rotation_deg` (clockwise) around its own centre
    fn fill_rect(&mut self, rect: Aabb, rotation_deg: f32);
    /// Draw text with its baseline at `pos.y`
    fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, align: TextAlign);
}

/// A recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect {
        rect: Aabb,
        rotation_deg: f32,
        color: [f32; 4],
    },
    Text {
        text: String,
        pos: Vec2,
        font_px: f32,
        align: TextAlign,
        color: [f32; 4],
    },
}

/// Canvas that records commands for a back end to replay
#[derive(Debug, Clone)]
pub struct DrawList {
    size: Vec2,
    fill: [f32; 4],
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            fill: [0.0, 0.0, 0.0, 1.0],
            commands: Vec::new(),
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Aabb, f32, [f32; 4])> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect {
                rect,
                rotation_deg,
                color,
            } => Some((rect, *rotation_deg, *color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn set_fill_color(&mut self, color: [f32; 4]) {
        self.fill = color;
    }

    fn fill_rect(&mut self, rect: Aabb, rotation_deg: f32) {
        self.commands.push(DrawCommand::Rect {
            rect,
            rotation_deg,
            color: self.fill,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            font_px,
            align,
            color: self.fill,
        });
    }
}

/// Draw a running frame: player, obstacles, then the score block
pub fn draw_frame(state: &GameState, palette: &Palette, canvas: &mut impl Canvas) {
    canvas.clear();

    canvas.set_fill_color(palette.player);
    canvas.fill_rect(state.player.aabb(), state.player.tilt);

    canvas.set_fill_color(palette.obstacle);
    for obstacle in &state.obstacles {
        canvas.fill_rect(obstacle.aabb(), 0.0);
    }

    draw_score(state, palette, canvas);
}

/// Current score above the best score, bottom-left
pub fn draw_score(state: &GameState, palette: &Palette, canvas: &mut impl Canvas) {
    let height = canvas.size().y;
    canvas.set_fill_color(palette.text);
    canvas.fill_text(
        &state.score.to_string(),
        Vec2::new(10.0, height - 60.0),
        SCORE_FONT_PX,
        TextAlign::Left,
    );
    canvas.fill_text(
        &format!("HI: {}", state.high_score),
        Vec2::new(10.0, height - 30.0),
        SCORE_FONT_PX,
        TextAlign::Left,
    );
}

/// Draw the idle screen: last run's result (if any) and the start prompt
pub fn draw_idle(state: &GameState, palette: &Palette, canvas: &mut impl Canvas) {
    canvas.clear();
    let center = canvas.size() * 0.5;
    canvas.set_fill_color(palette.text);

    if let Some(run) = state.last_run {
        canvas.fill_text(
            &format!("Game Over! Your score: {}", run.score),
            Vec2::new(center.x, center.y - PROMPT_FONT_PX * 1.5),
            SCORE_FONT_PX * 1.5,
            TextAlign::Center,
        );
        if run.new_record {
            canvas.fill_text(
                "New high score!",
                Vec2::new(center.x, center.y - PROMPT_FONT_PX * 0.75),
                SCORE_FONT_PX,
                TextAlign::Center,
            );
        }
    }

    canvas.fill_text(START_PROMPT, center, PROMPT_FONT_PX, TextAlign::Center);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Theme;
    use crate::sim::{Obstacle, ObstacleSide, RunSummary, start};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Vec2::new(800.0, 600.0), Tuning::default(), 5)
    }

    #[test]
    fn test_frame_draws_player_obstacles_and_score() {
        let mut state = state();
        start(&mut state);
        state.player.tilt = -12.0;
        state.score = 3;
        state.obstacles.push(Obstacle {
            id: 1,
            side: ObstacleSide::Top,
            pos: Vec2::new(400.0, 0.0),
            size: Vec2::new(50.0, 120.0),
        });

        let palette = Theme::Light.palette();
        let mut list = DrawList::new(state.surface);
        draw_frame(&state, &palette, &mut list);

        assert_eq!(list.commands[0], DrawCommand::Clear);
        let rects: Vec<_> = list.rects().collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(*rects[0].0, Aabb::from_xywh(50.0, 300.0, 50.0, 50.0));
        assert_eq!(rects[0].1, -12.0);
        assert_eq!(rects[0].2, palette.player);
        assert_eq!(rects[1].2, palette.obstacle);

        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts, vec!["3", "HI: 5"]);
    }

    #[test]
    fn test_score_text_positions() {
        let state = state();
        let mut list = DrawList::new(state.surface);
        draw_score(&state, &Theme::Dark.palette(), &mut list);
        match &list.commands[1] {
            DrawCommand::Text {
                pos, font_px, color, ..
            } => {
                assert_eq!(*pos, Vec2::new(10.0, 570.0));
                assert_eq!(*font_px, 24.0);
                assert_eq!(*color, [1.0, 1.0, 1.0, 1.0]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_idle_shows_prompt_only_before_first_run() {
        let state = state();
        let mut list = DrawList::new(state.surface);
        draw_idle(&state, &Theme::Light.palette(), &mut list);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec![START_PROMPT]);
        assert_eq!(list.rects().count(), 0);
        match list.commands.last() {
            Some(DrawCommand::Text { pos, align, .. }) => {
                assert_eq!(*pos, Vec2::new(400.0, 300.0));
                assert_eq!(*align, TextAlign::Center);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_idle_shows_game_over_notice() {
        let mut state = state();
        state.last_run = Some(RunSummary {
            score: 8,
            high_score: 8,
            new_record: true,
        });
        let mut list = DrawList::new(state.surface);
        draw_idle(&state, &Theme::Light.palette(), &mut list);
        assert_eq!(
            list.texts().collect::<Vec<_>>(),
            vec!["Game Over! Your score: 8", "New high score!", START_PROMPT]
        );
    }

    #[test]
    fn test_clear_discards_previous_commands() {
        let mut list = DrawList::new(Vec2::new(10.0, 10.0));
        list.fill_rect(Aabb::from_xywh(0.0, 0.0, 1.0, 1.0), 0.0);
        list.clear();
        assert_eq!(list.commands, vec![DrawCommand::Clear]);
    }
}
