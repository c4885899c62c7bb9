//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in field coordinates (y down).

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;

/// Segments per rounded corner
pub const CORNER_SEGMENTS: u32 = 4;

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a rectangle with rounded corners
///
/// The radius is clamped to half the shorter side. Built as a fan around the
/// centre, which is fine since the outline is convex.
pub fn rounded_rect(
    min: Vec2,
    size: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let r = radius.min(size.x * 0.5).min(size.y * 0.5);
    if r <= 0.0 || segments == 0 {
        return rect(min, size, color);
    }

    let max = min + size;
    // Corner centres in outline order, with the angle each arc starts at
    let corners = [
        (Vec2::new(min.x + r, min.y + r), PI),
        (Vec2::new(max.x - r, min.y + r), PI + FRAC_PI_2),
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), FRAC_PI_2),
    ];

    let mut outline = Vec::with_capacity(((segments + 1) * 4) as usize);
    for (centre, start) in corners {
        for i in 0..=segments {
            let theta = start + (i as f32 / segments as f32) * FRAC_PI_2;
            outline.push(centre + Vec2::new(theta.cos(), theta.sin()) * r);
        }
    }

    let centre = min + size * 0.5;
    let mut vertices = Vec::with_capacity(outline.len() * 3);
    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        vertices.push(Vertex::new(centre.x, centre.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }

    vertices
}

/// Convert an HSL colour (hue in degrees, saturation/lightness 0-1) to RGBA
pub fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, alpha]
}
