//! Simulation step
//!
//! Advances a run by one slice of time: player movement, difficulty, spawning,
//! obstacle motion, scoring and collision detection, in that order.

use serde::{Deserialize, Serialize};

use super::collision::first_collision;
use super::spawner::{advance_difficulty, maybe_spawn};
use super::state::{Player, RunState};
use crate::consts::MILESTONE_EVERY;

/// Desired horizontal motion for a single step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerIntent {
    /// Signed velocity in pixels/s (keyboard)
    Velocity(f32),
    /// Field x the player's centre should snap to (pointer/touch drag)
    Target(f32),
}

impl Default for PlayerIntent {
    fn default() -> Self {
        PlayerIntent::Velocity(0.0)
    }
}

/// What happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Nothing notable
    Continue,
    /// This many obstacles left the field (score already updated)
    Dodged(u32),
    /// The player hit an obstacle; the run is over
    Collided,
}

/// Advance the run by `dt` seconds
pub fn step(run: &mut RunState, intent: PlayerIntent, dt: f32) -> StepResult {
    apply_intent(&mut run.player, intent, dt);
    run.player.clamp_to(&run.field);

    advance_difficulty(dt, run);
    if let Some(obstacle) = maybe_spawn(dt, run) {
        run.obstacles.push(obstacle);
    }

    for obstacle in &mut run.obstacles {
        obstacle.advance(dt);
    }

    let exit_line = run.field.exit_line();
    let before = run.obstacles.len();
    run.obstacles.retain(|o| o.y <= exit_line);
    let dodged = (before - run.obstacles.len()) as u32;
    run.score += dodged;

    if first_collision(&run.player, &run.obstacles).is_some() {
        return StepResult::Collided;
    }

    if dodged > 0 {
        StepResult::Dodged(dodged)
    } else {
        StepResult::Continue
    }
}

/// Move the player according to the intent (unclamped)
fn apply_intent(player: &mut Player, intent: PlayerIntent, dt: f32) {
    match intent {
        PlayerIntent::Velocity(vx) => {
            player.vx = vx.clamp(-player.speed, player.speed);
            player.x += player.vx * dt;
        }
        PlayerIntent::Target(target_x) => {
            player.vx = 0.0;
            player.x = target_x - player.w / 2.0;
        }
    }
}

/// True when going from `prev` to `score` passes a multiple of ten
pub fn crossed_milestone(prev: u32, score: u32) -> bool {
    score > prev && prev / MILESTONE_EVERY != score / MILESTONE_EVERY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Field, Obstacle};
    use proptest::prelude::*;

    /// A run that will not spawn anything on its own
    fn quiet_run() -> RunState {
        let mut run = RunState::new(12345);
        run.spawn_interval = f32::MAX;
        run
    }

    fn obstacle(x: f32, y: f32, w: f32, h: f32, vy: f32) -> Obstacle {
        Obstacle {
            x,
            y,
            w,
            h,
            vy,
            hue: 240,
            phase_seed: 0,
        }
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let mut run = RunState::new(1);
        let start_x = run.player.x;
        let result = step(&mut run, PlayerIntent::Velocity(PLAYER_SPEED), 0.0);
        assert_eq!(result, StepResult::Continue);
        assert_eq!(run.player.x, start_x);
        assert!(run.obstacles.is_empty());
        assert_eq!(run.spawn_accumulator, 0.0);
    }

    #[test]
    fn test_player_clamped_at_left_wall() {
        let mut run = quiet_run();
        run.player.x = 6.0;
        step(&mut run, PlayerIntent::Velocity(-600.0), 1.0);
        assert_eq!(run.player.x, 6.0);
    }

    #[test]
    fn test_player_clamped_at_right_wall() {
        let mut run = quiet_run();
        step(&mut run, PlayerIntent::Velocity(600.0), 2.0);
        assert_eq!(run.player.x, FIELD_WIDTH - 6.0 - PLAYER_WIDTH);
    }

    #[test]
    fn test_velocity_is_capped() {
        let mut run = quiet_run();
        let start_x = run.player.x;
        step(&mut run, PlayerIntent::Velocity(10_000.0), 0.01);
        assert_eq!(run.player.vx, PLAYER_SPEED);
        assert!((run.player.x - (start_x + 6.0)).abs() < 1e-4);
    }

    #[test]
    fn test_target_centres_player() {
        let mut run = quiet_run();
        step(&mut run, PlayerIntent::Target(100.0), 0.0);
        assert_eq!(run.player.x, 100.0 - PLAYER_WIDTH / 2.0);
        assert_eq!(run.player.vx, 0.0);

        // Off-field target is clamped
        step(&mut run, PlayerIntent::Target(-50.0), 0.0);
        assert_eq!(run.player.x, 6.0);
    }

    #[test]
    fn test_obstacle_falls_out_and_scores() {
        let mut run = quiet_run();
        run.obstacles.push(obstacle(5.0, -20.0, 96.0, 20.0, 120.0));

        let dt = 1.0 / 60.0;
        let mut t = 0.0;
        while t < 4.17 {
            assert_eq!(step(&mut run, PlayerIntent::default(), dt), StepResult::Continue);
            t += dt;
        }
        assert_eq!(run.obstacles.len(), 1);
        assert!((run.obstacles[0].y - 480.0).abs() < 3.0);

        // Leaves once it is more than 40 px past the bottom edge
        let mut dodged = None;
        for _ in 0..60 {
            if let StepResult::Dodged(n) = step(&mut run, PlayerIntent::default(), dt) {
                dodged = Some(n);
                break;
            }
        }
        assert_eq!(dodged, Some(1));
        assert_eq!(run.score, 1);
        assert!(run.obstacles.is_empty());
    }

    #[test]
    fn test_removal_threshold_is_strict() {
        let mut run = quiet_run();
        let exit = run.field.exit_line();
        run.obstacles.push(obstacle(5.0, exit, 20.0, 20.0, 0.0));
        assert_eq!(step(&mut run, PlayerIntent::default(), 0.01), StepResult::Continue);
        assert_eq!(run.obstacles.len(), 1);

        run.obstacles[0].y = exit + 0.001;
        assert_eq!(step(&mut run, PlayerIntent::default(), 0.01), StepResult::Dodged(1));
        assert_eq!(run.score, 1);
    }

    #[test]
    fn test_collision_reported() {
        let mut run = quiet_run();
        run.player.x = 100.0;
        run.player.y = 440.0;
        run.obstacles.push(obstacle(120.0, 445.0, 40.0, 16.0, 0.0));
        assert_eq!(step(&mut run, PlayerIntent::default(), 0.0), StepResult::Collided);
    }

    #[test]
    fn test_collision_wins_over_dodge() {
        let mut run = quiet_run();
        let exit = run.field.exit_line();
        run.obstacles.push(obstacle(5.0, exit + 1.0, 20.0, 20.0, 0.0));
        let p = run.player.bounds();
        run.obstacles.push(obstacle(p.min.x, p.min.y, 10.0, 10.0, 0.0));
        assert_eq!(step(&mut run, PlayerIntent::default(), 0.0), StepResult::Collided);
        assert_eq!(run.score, 1);
    }

    #[test]
    fn test_spawn_then_advance_same_step() {
        let mut run = RunState::new(5);
        let result = step(&mut run, PlayerIntent::default(), INITIAL_SPAWN_INTERVAL);
        assert_eq!(result, StepResult::Continue);
        assert_eq!(run.obstacles.len(), 1);
        // Spawned at -20 and moved in the same step
        assert!(run.obstacles[0].y > OBSTACLE_SPAWN_Y);
    }

    #[test]
    fn test_sway_phase_is_stable_across_removals() {
        let mut run = quiet_run();
        let mut a = obstacle(200.0, run.field.exit_line() + 5.0, 20.0, 20.0, 0.0);
        a.phase_seed = 0;
        let mut b = obstacle(200.0, 0.0, 20.0, 20.0, 0.0);
        b.phase_seed = 7;
        run.obstacles.push(a);
        run.obstacles.push(b.clone());

        step(&mut run, PlayerIntent::default(), 0.1);
        assert_eq!(run.obstacles.len(), 1);

        let mut expected = b;
        expected.advance(0.1);
        assert_eq!(run.obstacles[0].x, expected.x);
        assert_eq!(run.obstacles[0].phase_seed, 7);
    }

    #[test]
    fn test_crossed_milestone() {
        assert!(!crossed_milestone(0, 0));
        assert!(!crossed_milestone(3, 9));
        assert!(crossed_milestone(9, 10));
        assert!(crossed_milestone(8, 11));
        assert!(crossed_milestone(19, 20));
        assert!(!crossed_milestone(10, 11));
    }

    #[test]
    fn test_obstacles_are_not_clamped() {
        let mut run = quiet_run();
        run.obstacles.push(obstacle(-30.0, 0.0, 20.0, 20.0, 0.0));
        step(&mut run, PlayerIntent::default(), 0.0);
        assert_eq!(run.obstacles[0].x, -30.0);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            intents in prop::collection::vec(
                prop_oneof![
                    (-5_000.0f32..5_000.0).prop_map(PlayerIntent::Velocity),
                    (-1_000.0f32..1_000.0).prop_map(PlayerIntent::Target),
                ],
                1..100,
            ),
            dt in 0.0f32..0.1,
        ) {
            let mut run = RunState::with_field(Field::default(), 77);
            for intent in intents {
                step(&mut run, intent, dt);
                prop_assert!(run.player.x >= 6.0);
                prop_assert!(run.player.x + run.player.w <= run.field.width - 6.0 + 1e-3);
            }
        }

        #[test]
        fn prop_score_counts_removals(steps in 1usize..400, seed in any::<u64>()) {
            let mut run = RunState::new(seed);
            // Lift the player far above the field so nothing can hit it
            run.player.y = -10_000.0;
            for _ in 0..steps {
                let before_score = run.score;
                let before_count = run.obstacles.len();
                let result = step(&mut run, PlayerIntent::default(), 1.0 / 30.0);
                let spawned = run.obstacles.len() + (run.score - before_score) as usize - before_count;
                prop_assert!(spawned <= 1);
                if let StepResult::Dodged(n) = result {
                    prop_assert_eq!(run.score - before_score, n);
                }
                prop_assert!(run.obstacles.iter().all(|o| o.y <= run.field.exit_line()));
            }
        }
    }
}
