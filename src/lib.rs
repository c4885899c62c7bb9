//! Dodge - dodge the falling blocks
//!
//! Core modules:
//! - `sim`: Simulation (clock, entities, spawning, collisions, step)
//! - `game`: Run state machine, events and high score bookkeeping
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Input translation (keys, pointer, touch)
//! - `persistence`: High score storage backends
//! - `audio`: Tone cues for scoring and collisions

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, GameEvent, RunSummary};
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Gap the player keeps from either side wall
    pub const WALL_MARGIN: f32 = 6.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 14.0;
    /// Distance from the bottom of the field to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 40.0;
    /// Maximum horizontal speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 600.0;

    /// Obstacles start fully above the field
    pub const OBSTACLE_SPAWN_Y: f32 = -20.0;
    /// Obstacles are dodged once they fall this far past the bottom edge
    pub const OBSTACLE_EXIT_MARGIN: f32 = 40.0;
    pub const OBSTACLE_MIN_WIDTH: u32 = 20;
    pub const OBSTACLE_MAX_WIDTH: u32 = 96;
    pub const OBSTACLE_SPAWN_MARGIN: f32 = 5.0;
    pub const OBSTACLE_BASE_HEIGHT: f32 = 16.0;
    pub const OBSTACLE_HEIGHT_JITTER: f32 = 28.0;
    pub const OBSTACLE_BASE_SPEED: f32 = 120.0;
    pub const OBSTACLE_SPEED_JITTER: f32 = 120.0;
    /// Score beyond which the speed ramp stops growing
    pub const OBSTACLE_SPEED_SCORE_CAP: u32 = 400;
    pub const OBSTACLE_SPEED_PER_SCORE: f32 = 0.15;
    pub const OBSTACLE_HUE_MIN: u16 = 200;
    pub const OBSTACLE_HUE_MAX: u16 = 320;

    /// Sway: x += sin((y + seed * PHASE) * FREQ) * AMPLITUDE * dt
    pub const SWAY_PHASE_STEP: f32 = 13.0;
    pub const SWAY_FREQUENCY: f32 = 0.01;
    pub const SWAY_AMPLITUDE: f32 = 8.0;

    /// Spawn pacing (seconds)
    pub const INITIAL_SPAWN_INTERVAL: f32 = 0.9;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.35;
    pub const DIFFICULTY_PERIOD: f32 = 3.0;
    pub const DIFFICULTY_FACTOR: f32 = 0.98;

    /// Largest frame delta the clock will report (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Largest slice a frame is simulated in (seconds)
    pub const MAX_STEP_DT: f32 = 1.0 / 60.0;

    /// A milestone cue plays every time the score crosses a multiple of this
    pub const MILESTONE_EVERY: u32 = 10;
}
