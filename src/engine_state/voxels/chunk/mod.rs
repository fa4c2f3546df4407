//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a 16x16x16 block of voxel data
//! together with the mesh built from it.
//!
//! ## Storage
//!
//! Block types live in a dense [`ChunkData`](chunk_data::ChunkData) buffer of
//! `CHUNK_VOLUME` entries, one `u16` per block. Dense storage keeps `at` and
//! `set` O(1), which the generator and mesher call once per block.
//!
//! ## Meshing
//!
//! A chunk is meshed once when it is built. Faces on the chunk border look up
//! the neighbouring block through the generator, so a chunk's mesh never
//! depends on which neighbours happen to be loaded.

use cgmath::Vector3;
use log::trace;
use web_time::Instant;

use crate::core::error::Result;
use crate::engine_state::rendering::{
    meshing::{ChunkMesher, Drawable, Mesh},
    MeshHandle, Renderer,
};

use super::{coordinates::ChunkPos, storage::ChunkStore, world_gen::WorldGen};
use chunk_data::ChunkData;

pub mod chunk_data;
pub mod chunk_iteration;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_SIZE: usize = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_SIZE²).
pub const CHUNK_PLANE_SIZE: usize = CHUNK_SIZE * CHUNK_SIZE;
/// The total number of blocks in a chunk (CHUNK_SIZE³).
pub const CHUNK_VOLUME: usize = CHUNK_PLANE_SIZE * CHUNK_SIZE;

/// A loaded chunk: its position, its blocks and its mesh.
///
/// The mesh is owned here; the GPU copy is referenced by `mesh_handle` once a
/// renderer has uploaded it.
#[derive(Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    position: ChunkPos,
    data: ChunkData,
    mesh: Mesh,
    /// Handle of the uploaded mesh, `None` until uploaded.
    mesh_handle: Option<MeshHandle>,
}

impl Chunk {
    /// Builds a chunk at the origin from externally supplied data.
    ///
    /// Without a generator, everything outside the chunk meshes as air.
    pub fn from_data(data: ChunkData) -> Self {
        Chunk::with_data(ChunkPos::default(), data, None)
    }

    /// Builds a chunk at `position` from existing data, such as a stored chunk.
    pub fn with_data(position: ChunkPos, data: ChunkData, generator: Option<&WorldGen>) -> Self {
        let start = Instant::now();
        let mesh = ChunkMesher::new(position, &data, generator).draw_cubes();

        trace!(
            "Meshed chunk {:?}: {} faces in {:?}",
            position,
            mesh.face_count(),
            start.elapsed()
        );

        Chunk {
            position,
            data,
            mesh,
            mesh_handle: None,
        }
    }

    /// Generates and meshes the chunk at `position`.
    ///
    /// Fails with `WorldError::Allocation` if the block buffer cannot be allocated.
    pub fn generate(position: ChunkPos, generator: &WorldGen) -> Result<Self> {
        let start = Instant::now();
        let mut data = ChunkData::try_new()?;
        generator.generate_chunk(position, Some(&mut data));
        trace!("Generated chunk {:?} in {:?}", position, start.elapsed());

        Ok(Chunk::with_data(position, data, Some(generator)))
    }

    /// Builds the chunk at `position` from `store` if it has it, otherwise generates it.
    pub fn load_or_generate(
        position: ChunkPos,
        generator: &WorldGen,
        store: Option<&dyn ChunkStore>,
    ) -> Result<Self> {
        match store.and_then(|store| store.load(position)) {
            Some(data) => Ok(Chunk::with_data(position, data, Some(generator))),
            None => Chunk::generate(position, generator),
        }
    }

    pub fn position(&self) -> ChunkPos {
        self.position
    }

    pub fn data(&self) -> &ChunkData {
        &self.data
    }

    pub fn mesh_handle(&self) -> Option<MeshHandle> {
        self.mesh_handle
    }

    pub fn set_mesh_handle(&mut self, handle: MeshHandle) {
        self.mesh_handle = Some(handle);
    }

    /// Removes the mesh handle so the caller can release it.
    pub fn take_mesh_handle(&mut self) -> Option<MeshHandle> {
        self.mesh_handle.take()
    }

    /// Uploads the mesh unless it is empty or already uploaded.
    ///
    /// Returns the handle the chunk holds afterwards.
    pub fn upload_mesh(&mut self, renderer: &mut dyn Renderer) -> Option<MeshHandle> {
        if self.mesh_handle.is_none() && !self.mesh.is_empty() {
            self.mesh_handle = Some(renderer.upload_mesh(self.mesh.upload()));
        }
        self.mesh_handle
    }

    /// Destroys the uploaded mesh, if any.
    pub fn release_mesh(&mut self, renderer: &mut dyn Renderer) {
        if let Some(handle) = self.mesh_handle.take() {
            renderer.destroy_mesh(handle);
        }
    }
}

impl Drawable for Chunk {
    fn geometry(&self) -> &Mesh {
        &self.mesh
    }

    fn origin(&self) -> Vector3<f64> {
        self.position.world_offset()
    }
}
