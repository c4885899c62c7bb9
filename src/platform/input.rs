//! Raw device events to player intent
//!
//! Keys drive a velocity, pointer/touch drags drive an absolute target. The
//! most recently used modality wins. Event handlers mutate the controller and
//! the frame loop samples `intent()` once per frame, so the simulation always
//! sees a whole value.

use crate::consts::{FIELD_WIDTH, PLAYER_SPEED};
use crate::sim::PlayerIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modality {
    Keys,
    Pointer,
}

/// Direction a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

impl Steer {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" => Some(Steer::Left),
            "ArrowRight" | "d" => Some(Steer::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputController {
    field_width: f32,
    speed: f32,
    left: bool,
    right: bool,
    dragging: bool,
    target: Option<f32>,
    modality: Modality,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, PLAYER_SPEED)
    }
}

impl InputController {
    pub fn new(field_width: f32, speed: f32) -> Self {
        Self {
            field_width,
            speed,
            left: false,
            right: false,
            dragging: false,
            target: None,
            modality: Modality::Keys,
        }
    }

    /// Key pressed. Returns true if the key steers the player.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    /// Key released. Returns true if the key steers the player.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, down: bool) -> bool {
        match Steer::from_key(key) {
            Some(Steer::Left) => self.left = down,
            Some(Steer::Right) => self.right = down,
            None => return false,
        }
        self.modality = Modality::Keys;
        true
    }

    /// Mouse button or finger down at `client_x` (relative to the canvas)
    pub fn pointer_down(&mut self, client_x: f32, displayed_width: f32) {
        self.dragging = true;
        self.track(client_x, displayed_width);
    }

    /// Pointer moved; only counts while dragging
    pub fn pointer_move(&mut self, client_x: f32, displayed_width: f32) {
        if self.dragging {
            self.track(client_x, displayed_width);
        }
    }

    /// Mouse button or finger released
    pub fn pointer_up(&mut self) {
        self.dragging = false;
        self.target = None;
        self.modality = Modality::Keys;
    }

    /// Drop every held key and drag (focus lost, new run)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.pointer_up();
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn track(&mut self, client_x: f32, displayed_width: f32) {
        self.target = Some(screen_to_field(client_x, displayed_width, self.field_width));
        self.modality = Modality::Pointer;
    }

    /// Current intent, sampled once per frame
    pub fn intent(&self) -> PlayerIntent {
        match (self.modality, self.target) {
            (Modality::Pointer, Some(x)) => PlayerIntent::Target(x),
            _ => PlayerIntent::Velocity(self.key_velocity()),
        }
    }

    fn key_velocity(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -self.speed,
            (false, true) => self.speed,
            _ => 0.0,
        }
    }
}

/// Map a canvas-relative x into field space, clamped to the canvas
pub fn screen_to_field(client_x: f32, displayed_width: f32, field_width: f32) -> f32 {
    if displayed_width <= 0.0 {
        return 0.0;
    }
    client_x.clamp(0.0, displayed_width) * (field_width / displayed_width)
}
