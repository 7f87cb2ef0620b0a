//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in surface pixels (y down) with a straight-alpha color
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

    /// Same vertex with its alpha scaled by `factor`
    pub fn faded(self, factor: f32) -> Self {
        let [r, g, b, a] = self.color;
        Self {
            position: self.position,
            color: [r, g, b, a * factor],
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

/// Fixed colors for scene elements
pub mod colors {
    pub const GROUND_TOP: [f32; 4] = [0.420, 0.310, 0.208, 1.0]; // #6B4F35
    pub const GROUND_BOTTOM: [f32; 4] = [0.627, 0.471, 0.333, 1.0]; // #A07855
    pub const GRASS_ROOT: [f32; 4] = [0.0, 0.502, 0.0, 1.0]; // #008000
    pub const GRASS_TIP: [f32; 4] = [0.235, 0.702, 0.443, 1.0]; // #3CB371
    pub const PIPE_EDGE: [f32; 4] = [0.663, 0.663, 0.663, 1.0]; // #A9A9A9
    pub const PIPE_CENTER: [f32; 4] = [0.412, 0.412, 0.412, 1.0]; // #696969
    pub const CAP_EDGE: [f32; 4] = [0.412, 0.412, 0.412, 1.0]; // #696969
    pub const CAP_CENTER: [f32; 4] = [0.286, 0.286, 0.286, 1.0]; // #494949
    pub const PIPE_HIGHLIGHT: [f32; 4] = [1.0, 1.0, 1.0, 0.2];
    pub const CLOUD_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.1];
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PUPIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const THEME_BUTTON: [f32; 4] = [0.204, 0.596, 0.859, 1.0]; // #3498DB
    pub const PAUSE_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const GAME_OVER_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
}
