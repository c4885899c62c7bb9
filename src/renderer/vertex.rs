//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// #031018
    pub const BACKGROUND: [f32; 4] = [3.0 / 255.0, 16.0 / 255.0, 24.0 / 255.0, 1.0];
    /// #4ee1a4
    pub const PLAYER: [f32; 4] = [78.0 / 255.0, 225.0 / 255.0, 164.0 / 255.0, 1.0];
    pub const PLAYER_GLOW: [f32; 4] = [78.0 / 255.0, 225.0 / 255.0, 164.0 / 255.0, 0.12];
    pub const HIGHLIGHT: [f32; 4] = [1.0, 1.0, 1.0, 0.06];
    pub const HUD_STRIP: [f32; 4] = [1.0, 1.0, 1.0, 0.03];
}
