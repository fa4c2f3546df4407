//! # World Module
//!
//! This module provides the `World` struct which owns the loaded chunks of the
//! voxel world.
//!
//! ## Architecture
//!
//! Loaded chunks are kept in a `Vec` sorted by [`ChunkPos`]. Lookup and the
//! insertion point are found by binary search (O(log n)); inserting shifts the
//! tail (O(n)). No two chunks share a position.
//!
//! Positions whose chunk is being built on a worker are tracked separately as
//! *pending*. A pending position is not in the chunk collection, so eviction
//! never touches it, and streaming does not request it twice.
//!
//! ```text
//! Unloaded --mark_pending--> Pending --insert_built_chunk--> Loaded --evict_distant--> (dropped)
//!     \__________________insert_chunk (inline build)_________/
//! ```
//!
//! ## Streaming
//!
//! [`StreamingCursor`] walks a cube of candidate offsets around the observer,
//! one index per request, so the whole load volume is visited over many frames
//! instead of stalling one.

use std::collections::BTreeSet;

use cgmath::{MetricSpace, Point3};
use log::{debug, warn};

use crate::core::error::Result;

use super::{
    chunk::Chunk,
    coordinates::ChunkPos,
    storage::ChunkStore,
    world_gen::WorldGen,
};

/// Result of inserting a chunk position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new chunk was built and stored at this index.
    Inserted(usize),
    /// A chunk already existed at this index; nothing changed.
    AlreadyPresent(usize),
}

impl InsertOutcome {
    /// Index of the chunk in the sorted collection.
    pub fn index(&self) -> usize {
        match *self {
            InsertOutcome::Inserted(index) | InsertOutcome::AlreadyPresent(index) => index,
        }
    }

    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }

    /// `1` for a new chunk, `0` when it was already present.
    ///
    /// Failures are reported through `WorldError::status_code` as `-1`.
    pub fn status_code(&self) -> i8 {
        match self {
            InsertOutcome::Inserted(_) => 1,
            InsertOutcome::AlreadyPresent(_) => 0,
        }
    }
}

/// Load state of a chunk position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkState {
    Unloaded,
    /// A worker is building the chunk.
    Pending,
    Loaded,
}

/// The loaded chunks of the voxel world, sorted by position.
#[derive(Debug, Default)]
pub struct World {
    chunks: Vec<Chunk>,
    pending: BTreeSet<ChunkPos>,
}

impl World {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        World::default()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Loaded chunks in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Index of the chunk at `position` in the sorted collection.
    pub fn lookup_index(&self, position: ChunkPos) -> Option<usize> {
        self.chunks
            .binary_search_by(|chunk| chunk.position().cmp(&position))
            .ok()
    }

    pub fn get_chunk(&self, position: ChunkPos) -> Option<&Chunk> {
        self.lookup_index(position).map(|index| &self.chunks[index])
    }

    /// The chunk at `index` in sorted order, as returned by an [`InsertOutcome`].
    pub fn get_chunk_at_index_mut(&mut self, index: usize) -> Option<&mut Chunk> {
        self.chunks.get_mut(index)
    }

    pub fn chunk_state(&self, position: ChunkPos) -> ChunkState {
        if self.lookup_index(position).is_some() {
            ChunkState::Loaded
        } else if self.pending.contains(&position) {
            ChunkState::Pending
        } else {
            ChunkState::Unloaded
        }
    }

    /// Marks an unloaded position as being built elsewhere.
    ///
    /// Returns `false` if the position is already loaded or pending.
    pub fn mark_pending(&mut self, position: ChunkPos) -> bool {
        if self.lookup_index(position).is_some() {
            return false;
        }
        self.pending.insert(position)
    }

    /// Clears the pending mark of `position`. Returns whether it was pending.
    pub fn clear_pending(&mut self, position: ChunkPos) -> bool {
        self.pending.remove(&position)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Generates, meshes and inserts the chunk at `position` unless it is already loaded.
    ///
    /// On error the collection is left unmodified.
    pub fn insert_chunk(&mut self, position: ChunkPos, generator: &WorldGen) -> Result<InsertOutcome> {
        self.insert_chunk_from(position, generator, None)
    }

    /// Like [`World::insert_chunk`], restoring the chunk from `store` when it has it.
    pub fn insert_chunk_from(
        &mut self,
        position: ChunkPos,
        generator: &WorldGen,
        store: Option<&dyn ChunkStore>,
    ) -> Result<InsertOutcome> {
        let index = match self.insertion_point(position) {
            Ok(index) => return Ok(InsertOutcome::AlreadyPresent(index)),
            Err(index) => index,
        };

        self.reserve_one(position)?;
        let chunk = Chunk::load_or_generate(position, generator, store).map_err(|err| {
            warn!("Failed to build chunk {:?}: {}", position, err);
            err
        })?;

        self.chunks.insert(index, chunk);
        self.pending.remove(&position);
        debug!("Inserted chunk {:?} at index {}", position, index);
        Ok(InsertOutcome::Inserted(index))
    }

    /// Inserts a chunk that was built elsewhere, such as on a worker.
    ///
    /// If a chunk already exists at that position the new one is dropped.
    /// Either way the position is no longer pending.
    pub fn insert_built_chunk(&mut self, chunk: Chunk) -> Result<InsertOutcome> {
        let position = chunk.position();
        self.pending.remove(&position);

        let index = match self.insertion_point(position) {
            Ok(index) => return Ok(InsertOutcome::AlreadyPresent(index)),
            Err(index) => index,
        };

        self.reserve_one(position)?;
        self.chunks.insert(index, chunk);
        debug!("Inserted built chunk {:?} at index {}", position, index);
        Ok(InsertOutcome::Inserted(index))
    }

    /// Removes every chunk whose origin is farther than `max_distance` from `observer`.
    ///
    /// Distances are Euclidean, in world units. A chunk exactly at `max_distance`
    /// stays. The removed chunks are returned so the caller can release their
    /// meshes and persist their data.
    pub fn evict_distant(&mut self, observer: Point3<f64>, max_distance: f64) -> Vec<Chunk> {
        let mut evicted = Vec::new();
        let mut kept = Vec::with_capacity(self.chunks.len());

        for chunk in self.chunks.drain(..) {
            if chunk.position().world_origin().distance(observer) > max_distance {
                debug!("Evicting chunk {:?}", chunk.position());
                evicted.push(chunk);
            } else {
                kept.push(chunk);
            }
        }

        self.chunks = kept;
        evicted
    }

    fn insertion_point(&self, position: ChunkPos) -> std::result::Result<usize, usize> {
        self.chunks
            .binary_search_by(|chunk| chunk.position().cmp(&position))
    }

    fn reserve_one(&mut self, position: ChunkPos) -> Result<()> {
        self.chunks.try_reserve(1).map_err(|err| {
            warn!("Failed to grow chunk collection for {:?}", position);
            err.into()
        })
    }
}

/// Largest streaming cube edge, in chunks. Larger values are clamped.
pub const MAX_STREAMING_EDGE: u32 = 1024;

/// Deterministic walk over a cube of chunk offsets centred on the observer.
///
/// For an edge length `L`, index `i` maps to
/// `(i / L / L - L / 2, (i / L) % L - L / 2, i % L - L / 2)`. The cursor
/// advances before producing an offset and wraps after `L³` steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingCursor {
    edge: u64,
    index: u64,
}

impl StreamingCursor {
    pub fn new(load_distance: u32) -> Self {
        StreamingCursor {
            edge: u64::from(load_distance.clamp(1, MAX_STREAMING_EDGE)),
            index: 0,
        }
    }

    /// Number of distinct offsets in one full sweep.
    pub fn volume(&self) -> u64 {
        self.edge * self.edge * self.edge
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn edge(&self) -> u64 {
        self.edge
    }

    /// The offset for `index` in a cube of edge `edge`.
    pub fn offset_for(index: u64, edge: u64) -> ChunkPos {
        let half = (edge / 2) as i64;
        ChunkPos::new(
            (index / edge / edge) as i64 - half,
            ((index / edge) % edge) as i64 - half,
            (index % edge) as i64 - half,
        )
    }

    /// Advances the cursor and returns the next offset relative to the observer's chunk.
    pub fn next_offset(&mut self) -> ChunkPos {
        self.index = (self.index + 1) % self.volume();
        Self::offset_for(self.index, self.edge)
    }
}

impl Iterator for StreamingCursor {
    type Item = ChunkPos;

    fn next(&mut self) -> Option<ChunkPos> {
        Some(self.next_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::{chunk_data::ChunkData, CHUNK_SIZE};

    fn positions(world: &World) -> Vec<ChunkPos> {
        world.iter().map(Chunk::position).collect()
    }

    #[test]
    fn insert_keeps_collection_sorted() {
        let generator = WorldGen::new(0);
        let mut world = World::new();
        for (x, y, z) in [(3, 0, 0), (-1, 2, 0), (0, 0, 0), (0, -5, 9), (-1, 2, -1)] {
            world.insert_chunk(ChunkPos::new(x, y, z), &generator).unwrap();
        }

        let positions = positions(&world);
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
        assert_eq!(world.len(), 5);
    }

    #[test]
    fn insertion_is_idempotent() {
        let generator = WorldGen::new(0);
        let mut world = World::new();
        let position = ChunkPos::new(1, 1, 1);

        let first = world.insert_chunk(position, &generator).unwrap();
        let second = world.insert_chunk(position, &generator).unwrap();

        assert_eq!(first, InsertOutcome::Inserted(0));
        assert_eq!(second, InsertOutcome::AlreadyPresent(0));
        assert_eq!((first.status_code(), second.status_code()), (1, 0));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn lookup_finds_only_loaded_positions() {
        let generator = WorldGen::new(0);
        let mut world = World::new();
        world.insert_chunk(ChunkPos::new(0, 0, 0), &generator).unwrap();
        world.insert_chunk(ChunkPos::new(0, 0, 2), &generator).unwrap();

        assert_eq!(world.lookup_index(ChunkPos::new(0, 0, 2)), Some(1));
        assert_eq!(world.lookup_index(ChunkPos::new(0, 0, 1)), None);
        assert!(world.get_chunk(ChunkPos::new(0, 0, 0)).is_some());
    }

    #[test]
    fn pending_lifecycle() {
        let mut world = World::new();
        let position = ChunkPos::new(4, 0, 0);

        assert_eq!(world.chunk_state(position), ChunkState::Unloaded);
        assert!(world.mark_pending(position));
        assert!(!world.mark_pending(position));
        assert_eq!(world.chunk_state(position), ChunkState::Pending);

        let chunk = Chunk::with_data(position, ChunkData::new(), None);
        assert!(world.insert_built_chunk(chunk).unwrap().is_inserted());
        assert_eq!(world.chunk_state(position), ChunkState::Loaded);
        assert_eq!(world.pending_count(), 0);
        assert!(!world.mark_pending(position));
    }

    #[test]
    fn duplicate_built_chunk_is_dropped() {
        let mut world = World::new();
        let position = ChunkPos::new(0, 0, 0);
        world
            .insert_built_chunk(Chunk::with_data(position, ChunkData::new(), None))
            .unwrap();
        let outcome = world
            .insert_built_chunk(Chunk::with_data(position, ChunkData::new(), None))
            .unwrap();

        assert_eq!(outcome, InsertOutcome::AlreadyPresent(0));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn eviction_threshold_is_strict() {
        let load_distance = 2.0;
        let unload_buffer = 2.0;
        let threshold = load_distance * CHUNK_SIZE as f64 + unload_buffer;

        for (distance, evicted) in [
            (threshold + 1.0, true),
            (threshold, false),
            (threshold - 1.0, false),
        ] {
            let mut world = World::new();
            let position = ChunkPos::new(0, 0, 0);
            world
                .insert_built_chunk(Chunk::with_data(position, ChunkData::new(), None))
                .unwrap();

            let observer = Point3::new(0.0, distance, 0.0);
            let removed = world.evict_distant(observer, threshold);

            assert_eq!(removed.len() == 1, evicted, "distance {distance}");
            assert_eq!(world.chunk_state(position) == ChunkState::Loaded, !evicted);
        }
    }

    #[test]
    fn eviction_checks_every_chunk() {
        let mut world = World::new();
        for x in 0..6 {
            world
                .insert_built_chunk(Chunk::with_data(ChunkPos::new(x, 0, 0), ChunkData::new(), None))
                .unwrap();
        }

        let evicted = world.evict_distant(Point3::new(-1000.0, 0.0, 0.0), 10.0);
        assert_eq!(evicted.len(), 6);
        assert!(world.is_empty());
    }

    #[test]
    fn pending_positions_survive_eviction() {
        let mut world = World::new();
        let position = ChunkPos::new(100, 0, 0);
        world.mark_pending(position);

        world.evict_distant(Point3::new(0.0, 0.0, 0.0), 1.0);
        assert_eq!(world.chunk_state(position), ChunkState::Pending);
    }

    #[test]
    fn cursor_matches_index_formula() {
        let mut cursor = StreamingCursor::new(4);
        assert_eq!(cursor.volume(), 64);

        // Pre-increment: the first offset is index 1.
        assert_eq!(cursor.next_offset(), ChunkPos::new(-2, -2, -1));
        assert_eq!(StreamingCursor::offset_for(0, 4), ChunkPos::new(-2, -2, -2));
        assert_eq!(StreamingCursor::offset_for(63, 4), ChunkPos::new(1, 1, 1));
        assert_eq!(StreamingCursor::offset_for(4 * 4 + 4 + 1, 4), ChunkPos::new(-1, -1, -1));
    }

    #[test]
    fn cursor_visits_the_whole_cube_once_per_sweep() {
        let cursor = StreamingCursor::new(3);
        let mut seen: Vec<ChunkPos> = cursor.take(27).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 27);
        assert!(seen.contains(&ChunkPos::new(0, 0, 0)));
        assert!(seen.iter().all(|p| (-1..=1).contains(&p.x)));
    }

    #[test]
    fn huge_load_distance_is_clamped() {
        let mut cursor = StreamingCursor::new(1 << 22);
        assert_eq!(cursor.edge(), u64::from(MAX_STREAMING_EDGE));
        assert_eq!(cursor.volume(), 1024 * 1024 * 1024);

        let half = i64::from(MAX_STREAMING_EDGE / 2);
        assert_eq!(cursor.next_offset(), ChunkPos::new(-half, -half, 1 - half));
    }
}
