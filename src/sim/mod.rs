//! Simulation module
//!
//! All gameplay rules live here. This module stays pure:
//! - Time comes in as explicit deltas
//! - Seeded RNG only
//! - Obstacles are processed in spawn order
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{Aabb, first_collision};
pub use spawner::{advance_difficulty, maybe_spawn};
pub use state::{Field, GamePhase, Obstacle, Player, RunState};
pub use tick::{PlayerIntent, StepResult, crossed_milestone, step};
