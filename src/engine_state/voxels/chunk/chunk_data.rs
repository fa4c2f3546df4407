//! # Chunk Data Module
//!
//! Dense block storage for one chunk.
//!
//! Blocks live in a flat vector of `CHUNK_VOLUME` entries. The linear index is
//! `x * CHUNK_SIZE² + y * CHUNK_SIZE + z`; the serialized form written by
//! [`ChunkData::to_bytes`] follows the same order and must stay bit-compatible.

use crate::core::error::{Result, WorldError};
use crate::engine_state::voxels::block::{block_type::BlockType, BlockTypeSize};

use super::{CHUNK_PLANE_SIZE, CHUNK_SIZE, CHUNK_VOLUME};

/// Raw block values of a chunk indexed as `[z][y][x]`.
pub type RawChunkArray = [[[BlockTypeSize; CHUNK_SIZE]; CHUNK_SIZE]; CHUNK_SIZE];

/// Bytes used per block in the serialized form.
pub const BYTES_PER_BLOCK: usize = std::mem::size_of::<BlockTypeSize>();

/// The block types of one chunk.
///
/// A fresh `ChunkData` is all `AIR`. It owns its storage; clones are deep.
#[derive(Clone, PartialEq, Eq)]
pub struct ChunkData {
    blocks: Vec<BlockType>,
}

impl std::fmt::Debug for ChunkData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkData")
            .field("solid_blocks", &self.solid_count())
            .finish()
    }
}

impl Default for ChunkData {
    fn default() -> Self {
        ChunkData::new()
    }
}

impl ChunkData {
    /// Creates a chunk filled with air.
    pub fn new() -> Self {
        ChunkData {
            blocks: vec![BlockType::AIR; CHUNK_VOLUME],
        }
    }

    /// Creates a chunk filled with air, reporting allocation failure instead of aborting.
    pub fn try_new() -> Result<Self> {
        let mut blocks = Vec::new();
        blocks.try_reserve_exact(CHUNK_VOLUME)?;
        blocks.resize(CHUNK_VOLUME, BlockType::AIR);
        Ok(ChunkData { blocks })
    }

    /// Builds chunk data from raw values indexed `[z][y][x]`.
    ///
    /// Unknown values become `AIR`.
    pub fn from_raw(raw: &RawChunkArray) -> Self {
        let mut data = ChunkData::new();
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for z in 0..CHUNK_SIZE {
                    data.set(x, y, z, BlockType::from_raw(raw[z][y][x]));
                }
            }
        }
        data
    }

    /// Decodes the little-endian form written by [`ChunkData::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let expected = CHUNK_VOLUME * BYTES_PER_BLOCK;
        if bytes.len() != expected {
            return Err(WorldError::InvalidChunkBytes {
                expected,
                actual: bytes.len(),
            });
        }

        let mut blocks = Vec::new();
        blocks.try_reserve_exact(CHUNK_VOLUME)?;
        blocks.extend(
            bytes
                .chunks_exact(BYTES_PER_BLOCK)
                .map(|pair| BlockType::from_raw(BlockTypeSize::from_le_bytes([pair[0], pair[1]]))),
        );
        Ok(ChunkData { blocks })
    }

    /// Encodes every block as a little-endian `u16` in linear index order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.blocks
            .iter()
            .flat_map(|block| block.to_raw().to_le_bytes())
            .collect()
    }

    #[inline]
    fn xyz_to_index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(
            x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_SIZE,
            "chunk access out of range: ({x}, {y}, {z})"
        );
        x * CHUNK_PLANE_SIZE + y * CHUNK_SIZE + z
    }

    /// The block at a chunk-local position.
    ///
    /// Callers guarantee every coordinate is below `CHUNK_SIZE`; debug builds assert it.
    #[inline]
    pub fn at(&self, x: usize, y: usize, z: usize) -> BlockType {
        self.blocks[Self::xyz_to_index(x, y, z)]
    }

    /// Overwrites the block at a chunk-local position.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: BlockType) -> &mut Self {
        let index = Self::xyz_to_index(x, y, z);
        self.blocks[index] = block;
        self
    }

    /// The raw linear buffer.
    pub fn as_slice(&self) -> &[BlockType] {
        &self.blocks
    }

    /// Number of non-air blocks.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_air()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.is_air())
    }
}
