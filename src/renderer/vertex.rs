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

/// Shared palette. Values are the sRGB hex colours of the page theme.
pub mod colors {
    /// #0b0f14
    pub const BACKGROUND: [f32; 4] = [0.043, 0.059, 0.078, 1.0];
    /// #e7edf6
    pub const FOREGROUND: [f32; 4] = [0.906, 0.929, 0.965, 1.0];
    /// #9aa7b5
    pub const MUTED: [f32; 4] = [0.604, 0.655, 0.710, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// #22c55e
    pub const SNAKE: [f32; 4] = [0.133, 0.773, 0.369, 1.0];
    /// #ef4444
    pub const FOOD: [f32; 4] = [0.937, 0.267, 0.267, 1.0];

    /// Same colour at a different opacity
    pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }
}
