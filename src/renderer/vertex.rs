//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color.
/// Scene vertices carry surface pixels; the pipeline maps them to NDC.
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

/// Expand a packed `0xRRGGBB` colour
pub const fn hex_to_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Same colour with its alpha scaled by `factor`
pub fn fade(color: [f32; 4], factor: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * factor.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    use super::hex_to_rgba;

    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const GRID: [f32; 4] = [0.0, 1.0, 1.0, 0.05];
    pub const BAR_BACK: [f32; 4] = hex_to_rgba(0x333333, 1.0);
    pub const PLAYER_HEALTH: [f32; 4] = hex_to_rgba(0x00ff00, 1.0);
    pub const ENEMY_HEALTH: [f32; 4] = hex_to_rgba(0xff0000, 1.0);
    pub const PICKUP: [f32; 4] = hex_to_rgba(0x00ff00, 1.0);
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const WHEEL_BACK: [f32; 4] = [0.0, 0.0, 0.0, 0.95];
    pub const WHEEL_GREEN: [f32; 4] = hex_to_rgba(0x00ff00, 0.95);
    pub const WHEEL_HIGHLIGHT: [f32; 4] = [0.0, 1.0, 0.0, 0.3];
    pub const WHEEL_TIMER: [f32; 4] = [0.0, 1.0, 0.0, 0.5];
}
