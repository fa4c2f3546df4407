//! Mesh generation for voxel rendering.
//!
//! This module converts chunk block data into triangle meshes that a
//! [`Renderer`](super::Renderer) can upload.
//!
//! # Architecture
//! - [`ChunkMesher`]: face-culling mesher; tests each solid block against its six
//!   neighbours and emits one quad per block face that borders air
//! - [`Face`]: the quad on one side of a block, with the six per-side corner templates
//! - [`Mesh`]: plain vertex/index data, independent of any graphics API
//! - [`Drawable`]: capability of anything that produces a mesh and a world origin
//!
//! # Usage
//! ```
//! use voxel_world::engine_state::rendering::meshing::ChunkMesher;
//! use voxel_world::engine_state::voxels::{
//!     block::block_type::BlockType, chunk::chunk_data::ChunkData, coordinates::ChunkPos,
//! };
//!
//! let mut data = ChunkData::new();
//! data.set(1, 1, 1, BlockType::STONE);
//!
//! let mesh = ChunkMesher::new(ChunkPos::new(0, 0, 0), &data, None).draw_cubes();
//! assert_eq!(mesh.face_count(), 6);
//! ```
//!
//! # Performance Considerations
//! - One pass over the solid blocks of a chunk, six constant-time tests each
//! - Border tests call into the generator instead of locking neighbouring chunks,
//!   so meshing can run on any worker thread

mod face;
mod mesh;
mod mesher;

pub use face::Face;
pub use mesh::{Drawable, Mesh};
pub use mesher::ChunkMesher;
