//! Game state and core simulation types
//!
//! Everything a single run owns lives here. A fresh `RunState` is built for
//! every new game.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu, before the first start or after leaving a finished run
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Frozen because the window lost focus
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// The rectangular play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    /// Smallest x the player's left edge may take
    #[inline]
    pub fn min_player_x(&self) -> f32 {
        WALL_MARGIN
    }

    /// Largest x the player's left edge may take
    #[inline]
    pub fn max_player_x(&self, player_width: f32) -> f32 {
        self.width - WALL_MARGIN - player_width
    }

    /// Obstacles below this line have been dodged
    #[inline]
    pub fn exit_line(&self) -> f32 {
        self.height + OBSTACLE_EXIT_MARGIN
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    /// Fixed once the run starts
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Horizontal velocity (pixels/s, signed)
    pub vx: f32,
    /// Velocity cap
    pub speed: f32,
}

impl Player {
    /// Create a player centred horizontally near the bottom of the field
    pub fn centered(field: &Field) -> Self {
        Self {
            x: field.width / 2.0 - PLAYER_WIDTH / 2.0,
            y: field.height - PLAYER_BOTTOM_OFFSET,
            w: PLAYER_WIDTH,
            h: PLAYER_HEIGHT,
            vx: 0.0,
            speed: PLAYER_SPEED,
        }
    }

    /// Pull x back inside the walls
    pub fn clamp_to(&mut self, field: &Field) {
        let max_x = field.max_player_x(self.w);
        if self.x > max_x {
            self.x = max_x;
        }
        if self.x < field.min_player_x() {
            self.x = field.min_player_x();
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.w, self.h)
    }
}

/// A falling block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Descent speed (pixels/s, never negative)
    pub vy: f32,
    /// Cosmetic hue in degrees
    pub hue: u16,
    /// Spawn counter value, used as the sway phase offset
    pub phase_seed: u32,
}

impl Obstacle {
    /// Fall for `dt` seconds and sway sideways
    pub fn advance(&mut self, dt: f32) {
        self.y += self.vy * dt;
        let phase = (self.y + self.phase_seed as f32 * SWAY_PHASE_STEP) * SWAY_FREQUENCY;
        self.x += phase.sin() * SWAY_AMPLITUDE * dt;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.w, self.h)
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    pub field: Field,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Obstacles dodged this run
    pub score: u32,
    /// Seconds since the last difficulty step
    pub difficulty_elapsed: f32,
    /// Seconds since the last spawn
    pub spawn_accumulator: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    pub phase: GamePhase,
    /// Seed the run was started with
    pub seed: u64,
    pub(crate) rng: Pcg32,
    next_spawn: u32,
}

impl RunState {
    /// Create an idle run on the default field
    pub fn new(seed: u64) -> Self {
        Self::with_field(Field::default(), seed)
    }

    /// Create an idle run on a custom field
    pub fn with_field(field: Field, seed: u64) -> Self {
        Self {
            field,
            player: Player::centered(&field),
            obstacles: Vec::new(),
            score: 0,
            difficulty_elapsed: 0.0,
            spawn_accumulator: 0.0,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
            phase: GamePhase::Idle,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_spawn: 0,
        }
    }

    /// Allocate the next sway phase seed
    pub fn next_phase_seed(&mut self) -> u32 {
        let seed = self.next_spawn;
        self.next_spawn = self.next_spawn.wrapping_add(1);
        seed
    }

    /// Number of obstacles spawned so far this run
    pub fn spawned(&self) -> u32 {
        self.next_spawn
    }
}
