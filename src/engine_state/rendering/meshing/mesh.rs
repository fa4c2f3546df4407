//! Mesh data structures for voxel rendering.
//!
//! A [`Mesh`] is plain CPU-side geometry. It never touches a GPU API; renderers
//! receive its bytes through [`MeshUpload`](crate::engine_state::rendering::MeshUpload).

use cgmath::Vector3;

use super::face::Face;
use crate::engine_state::rendering::{MeshUpload, Vertex};

/// Triangle geometry of one chunk.
///
/// Faces are stored as six non-indexed vertices each, so `indices` stays empty
/// for meshes built by the chunk mesher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// The vertex data, three per triangle
    pub vertices: Vec<Vertex>,
    /// Optional index data into `vertices`
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Appends the two triangles of `face`.
    pub fn push_face(&mut self, face: &Face) -> &mut Self {
        self.vertices.extend_from_slice(&face.vertices());
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of quads, assuming the non-indexed six-vertex layout.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, or `None` for non-indexed meshes.
    pub fn index_bytes(&self) -> Option<&[u8]> {
        if self.indices.is_empty() {
            None
        } else {
            Some(bytemuck::cast_slice(&self.indices))
        }
    }

    /// Describes this mesh for [`Renderer::upload_mesh`](crate::engine_state::rendering::Renderer::upload_mesh).
    pub fn upload(&self) -> MeshUpload<'_> {
        MeshUpload {
            vertex_bytes: self.vertex_bytes(),
            vertex_count: self.vertex_count(),
            index_bytes: self.index_bytes(),
            layout: Vertex::layout(),
        }
    }
}

/// Anything that produces geometry the renderer can draw.
pub trait Drawable {
    /// The mesh in object space.
    fn geometry(&self) -> &Mesh;

    /// World-space translation applied when drawing.
    fn origin(&self) -> Vector3<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{
        block::{block_side::BlockSide, block_type::BlockType},
        coordinates::BlockSubPos,
    };

    #[test]
    fn push_face_adds_six_vertices() {
        let mut mesh = Mesh::new();
        let face = Face::new(BlockSubPos::new(0, 0, 0), BlockType::STONE, BlockSide::TOP);
        mesh.push_face(&face).push_face(&face);

        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex_bytes().len(), 12 * std::mem::size_of::<Vertex>());
        assert!(mesh.index_bytes().is_none());
    }

    #[test]
    fn index_bytes_present_when_indexed() {
        let mesh = Mesh {
            vertices: Vec::new(),
            indices: vec![0, 1, 2],
        };
        assert_eq!(mesh.index_bytes().map(<[u8]>::len), Some(12));
    }
}
