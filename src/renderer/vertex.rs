//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

    /// Same vertex with its alpha scaled
    pub fn faded(self, alpha: f32) -> Self {
        let [r, g, b, a] = self.color;
        Self {
            color: [r, g, b, a * alpha],
            ..self
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
    pub const PLAYER: [f32; 4] = [0.0, 0.82, 1.0, 1.0];
    pub const SHIP: [f32; 4] = [1.0, 0.28, 0.34, 1.0];
    pub const METEOR: [f32; 4] = [1.0, 0.65, 0.01, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const HEAL: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const WEAPON: [f32; 4] = [1.0, 0.67, 0.0, 1.0];
    /// Player contact sparks
    pub const IMPACT: [f32; 4] = [1.0, 0.65, 0.0, 1.0];
    /// Enemy wreckage
    pub const DEBRIS: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
