//! Per-frame simulation tick
//!
//! One call to [`tick`] advances a running game by exactly one display
//! frame. Input handlers call [`press`] directly between frames.

use rand::Rng;

use super::collision::first_hit;
use super::spawn::{should_spawn, spawn_pair};
use super::state::{GameEvent, GamePhase, GameState, Player, RunSummary};

/// Begin a new run: reset counters, recentre the player and clear obstacles
pub fn start(state: &mut GameState) -> GameEvent {
    state.frame_count = 0;
    state.score = 0;
    state.player = Player::new(&state.tuning, state.surface.y);
    state.obstacles.clear();
    state.phase = GamePhase::Running;
    log::info!("Run started (best so far: {})", state.high_score);
    GameEvent::Started
}

/// Apply the jump impulse; ignored unless a run is in progress
///
/// Works mid-air, so jumps can be chained.
pub fn jump(state: &mut GameState) -> Option<GameEvent> {
    if !state.is_running() {
        return None;
    }
    state.player.jump();
    Some(GameEvent::Jumped)
}

/// The single action key: starts a run when idle, jumps while running
pub fn press(state: &mut GameState) -> GameEvent {
    match state.phase {
        GamePhase::Idle => start(state),
        GamePhase::Running => {
            state.player.jump();
            GameEvent::Jumped
        }
    }
}

/// Advance the game state by one frame
///
/// Does nothing while idle. On a collision the run ends, the state returns
/// to [`GamePhase::Idle`] and the frame counter is left untouched.
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    let tuning = &state.tuning;
    let (tilt_factor, max_tilt) = (tuning.tilt_factor, tuning.max_tilt);
    state.player.integrate(state.surface.y, tilt_factor, max_tilt);

    if should_spawn(state.frame_count, state.tuning.spawn_interval) {
        spawn_pair(state, rng);
        events.push(GameEvent::PairSpawned {
            frame: state.frame_count,
        });
    }

    advance_obstacles(state, &mut events);

    if let Some(hit) = first_hit(&state.player.aabb(), &state.obstacles) {
        log::debug!("Player hit obstacle {} ({:?})", hit.id, hit.side);
        let summary = end_run(state);
        events.push(GameEvent::Crashed(summary));
        return events;
    }

    state.frame_count += 1;
    events
}

/// Scroll every obstacle left and retire those that have left the playfield
///
/// Each retired obstacle is worth one point.
fn advance_obstacles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let speed = state.tuning.scroll_speed;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }

    let before = state.obstacles.len();
    state.obstacles.retain(|o| !o.is_offscreen());
    let cleared = before - state.obstacles.len();

    for _ in 0..cleared {
        state.score += 1;
        events.push(GameEvent::ObstacleCleared { score: state.score });
    }
    if cleared > 0 {
        log::debug!("Cleared {} obstacle(s), score {}", cleared, state.score);
    }
}

fn end_run(state: &mut GameState) -> RunSummary {
    let new_record = state.score > state.high_score;
    if new_record {
        state.high_score = state.score;
    }
    let summary = RunSummary {
        score: state.score,
        high_score: state.high_score,
        new_record,
    };
    state.last_run = Some(summary);
    state.phase = GamePhase::Idle;
    log::info!(
        "Game over after {} frames: score {} (best {}{})",
        state.frame_count,
        summary.score,
        summary.high_score,
        if new_record { ", new record" } else { "" }
    );
    summary
}
