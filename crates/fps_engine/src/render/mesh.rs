//! Mesh representation for surface quads
//!
//! Pure vertex/index data for the renderer. Every collision surface is drawn
//! as one textured quad built from its corners.

use bytemuck::{Pod, Zeroable};

use crate::physics::collision::CollisionSurface;

/// Texture repeats per texture-sized span of a surface
const TEXTURE_REPEAT: f32 = 10.0;

/// 3D vertex data structure for rendering
///
/// # Memory Layout
/// The `#[repr(C)]` attribute keeps the layout stable for GPU buffer uploads.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Vertex and index data for one drawable
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Triangle indices into `vertices`
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from vertex and index data
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Build the textured quad for a surface
    ///
    /// Vertices are lower-left, upper-left, lower-right, upper-right. The
    /// triangles `0 1 2` and `2 1 3` are clockwise seen from the front.
    /// Texture coordinates tile the texture across the surface.
    ///
    /// # Arguments
    /// * `surface` - Surface providing corners and normal
    /// * `texture_size` - Texture width and height in texels
    pub fn surface_quad(surface: &CollisionSurface, texture_size: (f32, f32)) -> Self {
        let (texture_width, texture_height) = texture_size;
        let u = surface.width() / texture_width.max(1.0) * TEXTURE_REPEAT;
        let v = surface.height() / texture_height.max(1.0) * TEXTURE_REPEAT;

        let normal: [f32; 3] = surface.normal().into();
        let corners = surface.corners();

        let vertices = vec![
            Vertex::new(corners.lower_left.into(), normal, [0.0, v]),
            Vertex::new(corners.upper_left.into(), normal, [0.0, 0.0]),
            Vertex::new(corners.lower_right.into(), normal, [u, v]),
            Vertex::new(corners.upper_right.into(), normal, [u, 0.0]),
        ];

        Self::new(vertices, vec![0, 1, 2, 2, 1, 3])
    }

    /// Vertex bytes ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index bytes ready for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
