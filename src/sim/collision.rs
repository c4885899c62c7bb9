//! Axis-aligned box collision
//!
//! Player and obstacles are plain rectangles, so overlap is four strict
//! comparisons. Boxes that merely share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Grow the box by the given amounts on each side
    pub fn expand(&self, left_right: f32, top: f32, bottom: f32) -> Self {
        Self::new(
            self.min.x - left_right,
            self.min.y - top,
            self.size.x + 2.0 * left_right,
            self.size.y + top + bottom,
        )
    }
}

/// Index of the first obstacle (in spawn order) touching the player
pub fn first_collision(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let player_box = player.bounds();
    obstacles
        .iter()
        .position(|obstacle| player_box.intersects(&obstacle.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Field;
    use proptest::prelude::*;

    fn obstacle_at(x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle {
            x,
            y,
            w,
            h,
            vy: 0.0,
            hue: 200,
            phase_seed: 0,
        }
    }

    #[test]
    fn test_overlapping_boxes_collide() {
        let player = Aabb::new(100.0, 440.0, 64.0, 14.0);
        let obstacle = Aabb::new(120.0, 445.0, 40.0, 16.0);
        assert!(player.intersects(&obstacle));
        assert!(obstacle.intersects(&player));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        // Right edge
        assert!(!a.intersects(&Aabb::new(10.0, 0.0, 10.0, 10.0)));
        // Bottom edge
        assert!(!a.intersects(&Aabb::new(0.0, 10.0, 10.0, 10.0)));
        // Corner
        assert!(!a.intersects(&Aabb::new(10.0, 10.0, 10.0, 10.0)));
        // Left and top
        assert!(!a.intersects(&Aabb::new(-10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Aabb::new(0.0, -10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_overlap_on_one_axis_only() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Aabb::new(5.0, 50.0, 10.0, 10.0)));
        assert!(!a.intersects(&Aabb::new(50.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_first_collision_is_spawn_order() {
        let mut player = Player::centered(&Field::default());
        player.x = 100.0;
        player.y = 440.0;
        let obstacles = vec![
            obstacle_at(0.0, 0.0, 20.0, 20.0),
            obstacle_at(120.0, 445.0, 40.0, 16.0),
            obstacle_at(110.0, 430.0, 40.0, 16.0),
        ];
        assert_eq!(first_collision(&player, &obstacles), Some(1));
        assert_eq!(first_collision(&player, &obstacles[..1]), None);
    }

    #[test]
    fn test_expand() {
        let glow = Aabb::new(10.0, 20.0, 64.0, 14.0).expand(8.0, 10.0, 20.0);
        assert_eq!(glow, Aabb::new(2.0, 10.0, 80.0, 44.0));
    }

    proptest! {
        #[test]
        fn prop_intersects_matches_strict_interval_overlap(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            aw in 0.0f32..50.0, ah in 0.0f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            bw in 0.0f32..50.0, bh in 0.0f32..50.0,
        ) {
            let a = Aabb::new(ax, ay, aw, ah);
            let b = Aabb::new(bx, by, bw, bh);
            let x_overlap = ax < bx + bw && bx < ax + aw;
            let y_overlap = ay < by + bh && by < ay + ah;
            prop_assert_eq!(a.intersects(&b), x_overlap && y_overlap);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}
