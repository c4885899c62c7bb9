//! Obstacle spawning and difficulty progression

use rand::Rng;

use super::state::{Obstacle, RunState};
use crate::consts::*;

/// Accumulate `dt` and emit a new obstacle once the spawn interval elapses
pub fn maybe_spawn(dt: f32, run: &mut RunState) -> Option<Obstacle> {
    run.spawn_accumulator += dt;
    if run.spawn_accumulator < run.spawn_interval {
        return None;
    }
    run.spawn_accumulator = 0.0;
    Some(spawn_obstacle(run))
}

/// Tighten the spawn interval every few seconds of play.
///
/// Returns true when a difficulty step happened.
pub fn advance_difficulty(dt: f32, run: &mut RunState) -> bool {
    run.difficulty_elapsed += dt;
    if run.difficulty_elapsed > DIFFICULTY_PERIOD && run.spawn_interval > MIN_SPAWN_INTERVAL {
        run.spawn_interval = (run.spawn_interval * DIFFICULTY_FACTOR).max(MIN_SPAWN_INTERVAL);
        run.difficulty_elapsed = 0.0;
        log::debug!("Spawn interval tightened to {:.3}s", run.spawn_interval);
        return true;
    }
    false
}

/// Descent speed for a new obstacle: random base plus a score ramp
pub fn obstacle_speed(score: u32, jitter: f32) -> f32 {
    OBSTACLE_BASE_SPEED
        + jitter * OBSTACLE_SPEED_JITTER
        + score.min(OBSTACLE_SPEED_SCORE_CAP) as f32 * OBSTACLE_SPEED_PER_SCORE
}

/// Roll a new obstacle just above the field
fn spawn_obstacle(run: &mut RunState) -> Obstacle {
    let field = run.field;
    let score = run.score;
    let phase_seed = run.next_phase_seed();
    let rng = &mut run.rng;

    let w = rng.random_range(OBSTACLE_MIN_WIDTH..OBSTACLE_MAX_WIDTH) as f32;
    // Fits within [margin, width - w - margin]
    let span = (field.width - w - 2.0 * OBSTACLE_SPAWN_MARGIN).max(0.0);
    let x = (rng.random::<f32>() * span + OBSTACLE_SPAWN_MARGIN).floor();
    let vy = obstacle_speed(score, rng.random::<f32>());
    let hue = rng.random_range(OBSTACLE_HUE_MIN..OBSTACLE_HUE_MAX);
    let h = OBSTACLE_BASE_HEIGHT + rng.random::<f32>() * OBSTACLE_HEIGHT_JITTER;

    Obstacle {
        x,
        y: OBSTACLE_SPAWN_Y,
        w,
        h,
        vy,
        hue,
        phase_seed,
    }
}
