// Vertex structure shared by the ground and sprite pipelines

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Position + UV vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Texture coordinates (UV)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec3, tex_coords: Vec2) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
        }
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Tex Coords
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Unit quad centered at the origin in the XY plane, for billboards.
pub fn unit_quad() -> ([Vertex; 4], [u16; 6]) {
    let vertices = [
        Vertex::new(Vec3::new(-0.5, -0.5, 0.0), Vec2::new(0.0, 1.0)),
        Vertex::new(Vec3::new(0.5, -0.5, 0.0), Vec2::new(1.0, 1.0)),
        Vertex::new(Vec3::new(0.5, 0.5, 0.0), Vec2::new(1.0, 0.0)),
        Vertex::new(Vec3::new(-0.5, 0.5, 0.0), Vec2::new(0.0, 0.0)),
    ];
    let indices = [0, 1, 2, 0, 2, 3];
    (vertices, indices)
}

/// Quad of the given half-extent lying flat in the XZ plane at `y`.
pub fn floor_quad(half_extent: f32, y: f32) -> ([Vertex; 4], [u16; 6]) {
    let vertices = [
        Vertex::new(Vec3::new(-half_extent, y, -half_extent), Vec2::new(0.0, 0.0)),
        Vertex::new(Vec3::new(half_extent, y, -half_extent), Vec2::new(1.0, 0.0)),
        Vertex::new(Vec3::new(half_extent, y, half_extent), Vec2::new(1.0, 1.0)),
        Vertex::new(Vec3::new(-half_extent, y, half_extent), Vec2::new(0.0, 1.0)),
    ];
    let indices = [0, 2, 1, 0, 3, 2];
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_stride() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, 20);
        assert_eq!(desc.attributes.len(), 2);
    }

    #[test]
    fn test_floor_quad_is_flat() {
        let (vertices, indices) = floor_quad(5.0, 0.0);
        assert!(vertices.iter().all(|v| v.position[1] == 0.0));
        assert_eq!(indices.len(), 6);
    }
}
