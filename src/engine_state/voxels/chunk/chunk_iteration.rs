//! # Chunk Iteration Module
//!
//! This module provides an iterator over the non-air blocks of a chunk.
//!
//! The iterator walks the flat block buffer in linear index order
//! (`x`, then `y`, then `z` fastest) and decodes each index back into a
//! chunk-local position. Air is skipped, so callers that only care about solid
//! blocks (the mesher, statistics) never branch on it themselves.

use crate::engine_state::voxels::{block::block_type::BlockType, coordinates::BlockSubPos};

use super::{chunk_data::ChunkData, CHUNK_PLANE_SIZE, CHUNK_SIZE};

/// An iterator over all non-air blocks in a chunk.
///
/// Yields `(position, block_type)` pairs where `position` is always in range.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk data being iterated over
    data: &'a ChunkData,
    /// Next linear index to inspect
    current_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first block.
    pub fn new(data: &'a ChunkData) -> Self {
        ChunkBlockIterator {
            data,
            current_offset: 0,
        }
    }

    /// Converts a linear index to its chunk-local position.
    fn index_to_position(index: usize) -> BlockSubPos {
        let x = index / CHUNK_PLANE_SIZE;
        let y = (index / CHUNK_SIZE) % CHUNK_SIZE;
        let z = index % CHUNK_SIZE;
        BlockSubPos::new(x as i16, y as i16, z as i16)
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (BlockSubPos, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        let blocks = self.data.as_slice();

        while self.current_offset < blocks.len() {
            let index = self.current_offset;
            self.current_offset += 1;

            let block = blocks[index];
            if !block.is_air() {
                return Some((Self::index_to_position(index), block));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.as_slice().len() - self.current_offset;
        (0, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chunk_yields_nothing() {
        let data = ChunkData::new();
        assert_eq!(ChunkBlockIterator::new(&data).count(), 0);
    }

    #[test]
    fn yields_solid_blocks_with_positions() {
        let mut data = ChunkData::new();
        data.set(0, 0, 0, BlockType::STONE)
            .set(15, 3, 7, BlockType::GRASS)
            .set(2, 15, 0, BlockType::WATER);

        let blocks: Vec<_> = ChunkBlockIterator::new(&data).collect();
        assert_eq!(
            blocks,
            vec![
                (BlockSubPos::new(0, 0, 0), BlockType::STONE),
                (BlockSubPos::new(2, 15, 0), BlockType::WATER),
                (BlockSubPos::new(15, 3, 7), BlockType::GRASS),
            ]
        );
    }

    #[test]
    fn every_position_matches_at() {
        let mut data = ChunkData::new();
        for i in 0..CHUNK_SIZE {
            data.set(i, (i * 3) % CHUNK_SIZE, (i * 7) % CHUNK_SIZE, BlockType::WOOD);
        }

        let mut count = 0;
        for (pos, block) in ChunkBlockIterator::new(&data) {
            let (x, y, z) = pos.to_index().unwrap();
            assert_eq!(data.at(x, y, z), block);
            count += 1;
        }
        assert_eq!(count, data.solid_count());
    }
}
