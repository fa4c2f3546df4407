//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex format produced by the chunk mesher and a
//! backend-neutral description of its memory layout that renderers use to bind
//! the uploaded bytes.

use std::mem::size_of;

use crate::engine_state::voxels::block::block_type::BlockType;

/// A vertex of a chunk mesh.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Block Type: u32 (4 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the chunk origin
    pub position: [f32; 3],
    /// Outward normal of the face this vertex belongs to
    pub normal: [f32; 3],
    /// Atlas texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
    /// Raw block type value
    pub block_type: u32,
}

/// Scalar format of one vertex attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexFormat {
    Float32x2,
    Float32x3,
    Uint32,
}

impl VertexFormat {
    /// Size of the attribute in bytes.
    pub const fn size(self) -> usize {
        match self {
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Uint32 => 4,
        }
    }
}

/// One attribute of a vertex layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub offset: usize,
    pub shader_location: u32,
    pub format: VertexFormat,
}

/// Describes how vertices are laid out in an uploaded buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    pub array_stride: usize,
    pub attributes: &'static [VertexAttribute],
}

const VERTEX_ATTRIBUTES: [VertexAttribute; 4] = [
    VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: VertexFormat::Float32x3,
    },
    VertexAttribute {
        offset: size_of::<[f32; 3]>(),
        shader_location: 1,
        format: VertexFormat::Float32x3,
    },
    VertexAttribute {
        offset: size_of::<[f32; 6]>(),
        shader_location: 2,
        format: VertexFormat::Float32x2,
    },
    VertexAttribute {
        offset: size_of::<[f32; 8]>(),
        shader_location: 3,
        format: VertexFormat::Uint32,
    },
];

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - Chunk-local position
    /// * `normal` - Outward face normal
    /// * `tex_coords` - Atlas UV coordinates
    /// * `block_type` - The block this vertex belongs to
    pub fn new(
        position: [f32; 3],
        normal: [f32; 3],
        tex_coords: [f32; 2],
        block_type: BlockType,
    ) -> Self {
        Vertex {
            position,
            normal,
            tex_coords,
            block_type: block_type.to_raw() as u32,
        }
    }

    /// Returns the vertex buffer layout description.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: normal (vec3<f32>)
    /// - `location = 2`: tex_coords (vec2<f32>)
    /// - `location = 3`: block_type (u32)
    pub fn layout() -> VertexLayout {
        VertexLayout {
            array_stride: size_of::<Vertex>(),
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_covers_the_whole_vertex() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 36);

        let mut expected_offset = 0;
        for attribute in layout.attributes {
            assert_eq!(attribute.offset, expected_offset);
            expected_offset += attribute.format.size();
        }
        assert_eq!(expected_offset, layout.array_stride);
    }

    #[test]
    fn vertex_casts_to_bytes() {
        let vertex = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.25], BlockType::GRASS);
        let bytes: &[u8] = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), size_of::<Vertex>());
        assert_eq!(&bytes[32..36], &3u32.to_ne_bytes());
    }
}
