//! Obstacle pair generation
//!
//! A pair is a top column hanging from the ceiling and a bottom column
//! standing on the floor, separated by a fixed vertical gap whose position
//! is drawn uniformly from the injected RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleSide};
use crate::tuning::Tuning;

/// True on frames that spawn a new pair
#[inline]
pub fn should_spawn(frame_count: u64, interval: u64) -> bool {
    frame_count % interval.max(1) == 0
}

/// Map a unit sample in `[0, 1)` to the height of the top column
///
/// The result lies in `[margin, surface_height - gap + margin)`, so near the
/// top of the range the bottom column has no visible height.
#[inline]
pub fn top_height(unit: f32, surface_height: f32, tuning: &Tuning) -> f32 {
    unit * (surface_height - tuning.gap) + tuning.spawn_margin
}

/// Build a top/bottom pair at horizontal position `x`
pub fn obstacle_pair(
    ids: (u32, u32),
    x: f32,
    top_height: f32,
    surface_height: f32,
    tuning: &Tuning,
) -> [Obstacle; 2] {
    let bottom_y = top_height + tuning.gap;
    [
        Obstacle {
            id: ids.0,
            side: ObstacleSide::Top,
            pos: Vec2::new(x, 0.0),
            size: Vec2::new(tuning.obstacle_width, top_height),
        },
        Obstacle {
            id: ids.1,
            side: ObstacleSide::Bottom,
            pos: Vec2::new(x, bottom_y),
            size: Vec2::new(tuning.obstacle_width, surface_height - top_height - tuning.gap),
        },
    ]
}

/// Append a freshly randomized pair at the right edge of the playfield
pub fn spawn_pair<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let unit: f32 = rng.random();
    let surface_height = state.surface.y;
    let top = top_height(unit, surface_height, &state.tuning);
    let ids = (state.next_entity_id(), state.next_entity_id());
    let pair = obstacle_pair(ids, state.surface.x, top, surface_height, &state.tuning);
    log::debug!(
        "Frame {}: spawned pair {}/{} with gap at y={:.1}",
        state.frame_count,
        ids.0,
        ids.1,
        top
    );
    state.obstacles.extend(pair);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_spawn_cadence() {
        assert!(should_spawn(0, 90));
        assert!(!should_spawn(1, 90));
        assert!(!should_spawn(89, 90));
        assert!(should_spawn(90, 90));
        assert!(should_spawn(180, 90));
    }

    #[test]
    fn test_top_height_bounds() {
        let tuning = Tuning::default();
        assert_eq!(top_height(0.0, 600.0, &tuning), 50.0);
        // unit sample is half-open, so the top end approaches 450
        assert!(top_height(0.999_99, 600.0, &tuning) < 450.0);
        assert!(top_height(0.999_99, 600.0, &tuning) > 449.9);
    }

    #[test]
    fn test_spawn_pair_at_right_edge() {
        let mut state = GameState::new(Vec2::new(800.0, 600.0), Tuning::default(), 0);
        let mut rng = Pcg32::seed_from_u64(42);
        spawn_pair(&mut state, &mut rng);

        assert_eq!(state.obstacles.len(), 2);
        let (top, bottom) = (&state.obstacles[0], &state.obstacles[1]);
        assert_eq!(top.side, ObstacleSide::Top);
        assert_eq!(bottom.side, ObstacleSide::Bottom);
        assert_eq!(top.pos, Vec2::new(800.0, 0.0));
        assert_eq!(bottom.pos.x, 800.0);
        assert_eq!(top.size.x, 50.0);
        assert_ne!(top.id, bottom.id);
    }

    #[test]
    fn test_same_seed_same_pairs() {
        let mut a = GameState::new(Vec2::new(800.0, 600.0), Tuning::default(), 0);
        let mut b = a.clone();
        let mut rng_a = Pcg32::seed_from_u64(7);
        let mut rng_b = Pcg32::seed_from_u64(7);
        for _ in 0..5 {
            spawn_pair(&mut a, &mut rng_a);
            spawn_pair(&mut b, &mut rng_b);
        }
        let heights_a: Vec<f32> = a.obstacles.iter().map(|o| o.size.y).collect();
        let heights_b: Vec<f32> = b.obstacles.iter().map(|o| o.size.y).collect();
        assert_eq!(heights_a, heights_b);
    }

    proptest! {
        #[test]
        fn prop_gap_is_exact(unit in 0.0f32..1.0, height in 300.0f32..2000.0) {
            let tuning = Tuning::default();
            let top_h = top_height(unit, height, &tuning);
            let [top, bottom] = obstacle_pair((1, 2), 800.0, top_h, height, &tuning);

            prop_assert!(top_h >= 50.0 && top_h <= height - 150.0 + EPS);
            prop_assert!((bottom.pos.y - (top.pos.y + top.size.y) - 200.0).abs() < EPS);
            prop_assert!((top.size.y + 200.0 + bottom.size.y - height).abs() < EPS);
            // the gap may run up to one margin past the floor
            prop_assert!(bottom.pos.y < height + 50.0 + EPS);
        }

        #[test]
        fn prop_spawns_only_on_interval(frame in 0u64..100_000, interval in 1u64..500) {
            prop_assert_eq!(should_spawn(frame, interval), frame % interval == 0);
        }
    }
}
