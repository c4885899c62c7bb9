//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys, mouse, touch)
//! - Run seeds

pub mod input;

pub use input::{InputController, Steer, screen_to_field};

/// Fresh seed for a new run
#[cfg(target_arch = "wasm32")]
pub fn run_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Fresh seed for a new run
#[cfg(not(target_arch = "wasm32"))]
pub fn run_seed() -> u64 {
    rand::random()
}
