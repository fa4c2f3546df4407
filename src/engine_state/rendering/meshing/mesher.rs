//! Face-culling chunk mesher.
//!
//! For every solid block the mesher tests its six neighbours and emits one quad
//! for each neighbour that is air. Neighbours outside the chunk are resolved
//! through the world generator, so chunk borders render correctly without the
//! neighbouring chunk being loaded. Without a generator, anything outside the
//! chunk counts as air.

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, block_type::BlockType},
    chunk::{chunk_data::ChunkData, chunk_iteration::ChunkBlockIterator},
    coordinates::{BlockSubPos, ChunkPos, WorldPos},
    world_gen::WorldGen,
};

use super::{face::Face, mesh::Mesh};

/// Builds the mesh of one chunk.
pub struct ChunkMesher<'a> {
    position: ChunkPos,
    data: &'a ChunkData,
    generator: Option<&'a WorldGen>,
}

impl<'a> ChunkMesher<'a> {
    pub fn new(position: ChunkPos, data: &'a ChunkData, generator: Option<&'a WorldGen>) -> Self {
        ChunkMesher {
            position,
            data,
            generator,
        }
    }

    /// The block at `position`, looking past the chunk edge through the generator.
    fn block_at(&self, position: BlockSubPos) -> BlockType {
        if let Some((x, y, z)) = position.to_index() {
            return self.data.at(x, y, z);
        }

        match self.generator {
            Some(generator) => {
                let world_pos = WorldPos::new(
                    self.position,
                    position.x as i64,
                    position.y as i64,
                    position.z as i64,
                );
                generator.block_at(&world_pos, true)
            }
            None => BlockType::AIR,
        }
    }

    /// Whether a face separates `inner` from its direct neighbour `outer`.
    ///
    /// True only when `inner` lies in this chunk and is solid, `outer` is one
    /// step away along a single axis, and `outer` is air.
    pub fn should_draw_face(&self, inner: BlockSubPos, outer: BlockSubPos) -> bool {
        let Some((x, y, z)) = inner.to_index() else {
            return false;
        };

        let offset = outer - inner;
        if offset.zero_count() != 2 || BlockSide::from_offset(offset).is_none() {
            return false;
        }

        let inner_type = self.data.at(x, y, z);
        let outer_type = self.block_at(outer);

        outer_type.is_air() && !inner_type.is_air()
    }

    /// Emits the face between `inner` and `outer` into `mesh` if it is visible.
    ///
    /// Returns whether a face was emitted.
    pub fn draw_face(&self, mesh: &mut Mesh, inner: BlockSubPos, outer: BlockSubPos) -> bool {
        if !self.should_draw_face(inner, outer) {
            return false;
        }
        let Some(side) = BlockSide::from_offset(outer - inner) else {
            return false;
        };
        let Some((x, y, z)) = inner.to_index() else {
            return false;
        };

        mesh.push_face(&Face::new(inner, self.data.at(x, y, z), side));
        true
    }

    /// Meshes the whole chunk.
    ///
    /// Air never emits a face, so only solid blocks are visited.
    pub fn draw_cubes(&self) -> Mesh {
        let mut mesh = Mesh::new();

        for (position, _) in ChunkBlockIterator::new(self.data) {
            for side in BlockSide::all() {
                self.draw_face(&mut mesh, position, position + side.offset());
            }
        }

        mesh
    }
}
