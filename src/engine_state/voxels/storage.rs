//! # Chunk Storage Module
//!
//! Persistence hook consulted ahead of procedural generation.
//!
//! When a chunk is evicted its block data is offered to a [`ChunkStore`]; when a
//! position is streamed back in, the store is asked first and the generator only
//! runs on a miss. [`MemoryChunkStore`] keeps the most recently evicted chunks
//! in memory behind an LRU bound.

use std::num::NonZeroUsize;

use log::trace;
use lru::LruCache;

use crate::core::MtResource;

use super::{chunk::chunk_data::ChunkData, coordinates::ChunkPos};

/// Saves and restores chunk block data by position.
///
/// Stores are shared between the driver thread and chunk workers, so both
/// methods take `&self`.
pub trait ChunkStore: Send + Sync {
    /// The stored data for `position`, if any.
    fn load(&self, position: ChunkPos) -> Option<ChunkData>;

    /// Stores `data` for `position`, replacing any previous entry.
    fn save(&self, position: ChunkPos, data: &ChunkData);
}

/// An in-memory, LRU-bounded chunk store.
///
/// Clones share the same cache.
#[derive(Clone)]
pub struct MemoryChunkStore {
    chunks: MtResource<LruCache<ChunkPos, ChunkData>>,
}

impl MemoryChunkStore {
    /// Creates a store holding at most `capacity` chunks.
    pub fn new(capacity: NonZeroUsize) -> Self {
        MemoryChunkStore {
            chunks: MtResource::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.get().is_empty()
    }

    pub fn contains(&self, position: ChunkPos) -> bool {
        self.chunks.get().contains(&position)
    }
}

impl ChunkStore for MemoryChunkStore {
    fn load(&self, position: ChunkPos) -> Option<ChunkData> {
        let data = self.chunks.get_mut().get(&position).cloned();
        if data.is_some() {
            trace!("Chunk store hit for {:?}", position);
        }
        data
    }

    fn save(&self, position: ChunkPos, data: &ChunkData) {
        if let Some((dropped, _)) = self.chunks.get_mut().push(position, data.clone()) {
            if dropped != position {
                trace!("Chunk store full, dropped {:?}", dropped);
            }
        }
    }
}
