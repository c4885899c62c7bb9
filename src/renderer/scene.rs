//! Scene building: run snapshot to triangle list
//!
//! Pure CPU side, so the draw order and geometry are testable without a GPU.
//! Painter's order: background, player glow, player, obstacles (each with a
//! highlight), HUD strip on top.

use glam::Vec2;

use super::shapes::{CORNER_SEGMENTS, hsl_to_rgba, rect, rounded_rect};
use super::vertex::{Vertex, colors};
use crate::sim::{Aabb, Obstacle, Player, RunState};

/// Corner radius for player and obstacles
pub const CORNER_RADIUS: f32 = 6.0;
/// Height of the translucent strip behind the HUD
pub const HUD_STRIP_HEIGHT: f32 = 40.0;

/// Obstacle fill colour: hsl(hue, 70%, 55%)
pub fn obstacle_color(hue: u16) -> [f32; 4] {
    hsl_to_rgba(hue as f32, 0.7, 0.55, 1.0)
}

/// Glow rectangle around the player
pub fn glow_bounds(player: &Player) -> Aabb {
    player.bounds().expand(8.0, 10.0, 20.0)
}

/// Highlight rectangle near an obstacle's top-left corner
pub fn highlight_bounds(obstacle: &Obstacle) -> Aabb {
    Aabb::new(
        obstacle.x + 6.0,
        obstacle.y + 4.0,
        (obstacle.w * 0.2).max(6.0),
        (obstacle.h * 0.25).min(6.0),
    )
}

/// Build the full frame for a run
pub fn build_scene(run: &RunState, glow: bool) -> Vec<Vertex> {
    let field = Vec2::new(run.field.width, run.field.height);
    let player = &run.player;
    let mut vertices = Vec::with_capacity(64 + run.obstacles.len() * 72);

    vertices.extend(rect(Vec2::ZERO, field, colors::BACKGROUND));

    if glow {
        let glow = glow_bounds(player);
        vertices.extend(rect(glow.min, glow.size, colors::PLAYER_GLOW));
    }
    vertices.extend(rounded_rect(
        Vec2::new(player.x, player.y),
        Vec2::new(player.w, player.h),
        CORNER_RADIUS,
        colors::PLAYER,
        CORNER_SEGMENTS,
    ));

    for obstacle in &run.obstacles {
        vertices.extend(rounded_rect(
            Vec2::new(obstacle.x, obstacle.y),
            Vec2::new(obstacle.w, obstacle.h),
            CORNER_RADIUS,
            obstacle_color(obstacle.hue),
            CORNER_SEGMENTS,
        ));
        let highlight = highlight_bounds(obstacle);
        vertices.extend(rect(highlight.min, highlight.size, colors::HIGHLIGHT));
    }

    vertices.extend(rect(
        Vec2::ZERO,
        Vec2::new(field.x, HUD_STRIP_HEIGHT),
        colors::HUD_STRIP,
    ));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUNDED: usize = ((CORNER_SEGMENTS + 1) * 4 * 3) as usize;

    fn obstacle(x: f32, y: f32, w: f32, h: f32, hue: u16) -> Obstacle {
        Obstacle {
            x,
            y,
            w,
            h,
            vy: 150.0,
            hue,
            phase_seed: 0,
        }
    }

    #[test]
    fn test_empty_run_layers() {
        let run = RunState::new(1);
        let verts = build_scene(&run, true);
        // background + glow + player + hud strip
        assert_eq!(verts.len(), 6 + 6 + ROUNDED + 6);
        assert_eq!(verts[0].color, colors::BACKGROUND);
        assert_eq!(verts[6].color, colors::PLAYER_GLOW);
        assert_eq!(verts[12].color, colors::PLAYER);
        assert_eq!(verts.last().map(|v| v.color), Some(colors::HUD_STRIP));
    }

    #[test]
    fn test_glow_toggle() {
        let run = RunState::new(1);
        let with = build_scene(&run, true);
        let without = build_scene(&run, false);
        assert_eq!(with.len() - without.len(), 6);
        assert!(without.iter().all(|v| v.color != colors::PLAYER_GLOW));
    }

    #[test]
    fn test_obstacles_drawn_in_order_with_highlight() {
        let mut run = RunState::new(1);
        run.obstacles.push(obstacle(50.0, 100.0, 40.0, 20.0, 200));
        run.obstacles.push(obstacle(200.0, 150.0, 60.0, 30.0, 300));

        let verts = build_scene(&run, false);
        let first = 6 + ROUNDED;
        assert_eq!(verts[first].color, obstacle_color(200));
        assert_eq!(verts[first + ROUNDED].color, colors::HIGHLIGHT);
        assert_eq!(verts[first + ROUNDED + 6].color, obstacle_color(300));
    }

    #[test]
    fn test_glow_geometry() {
        let run = RunState::new(1);
        let glow = glow_bounds(&run.player);
        assert_eq!(glow.min, Vec2::new(run.player.x - 8.0, run.player.y - 10.0));
        assert_eq!(glow.size, Vec2::new(80.0, 44.0));
    }

    #[test]
    fn test_highlight_geometry() {
        // Narrow, short block: width floor of 6, height 0.25h
        let highlight = highlight_bounds(&obstacle(10.0, 20.0, 20.0, 16.0, 250));
        assert_eq!(highlight.min, Vec2::new(16.0, 24.0));
        assert_eq!(highlight.size, Vec2::new(6.0, 4.0));

        // Wide, tall block: 0.2w, height capped at 6
        let highlight = highlight_bounds(&obstacle(0.0, 0.0, 90.0, 40.0, 250));
        assert!((highlight.size - Vec2::new(18.0, 6.0)).abs().max_element() < 1e-4);
    }
}
