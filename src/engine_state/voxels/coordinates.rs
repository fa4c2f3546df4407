//! # Coordinate Module
//!
//! Integer coordinate algebra for an effectively unbounded voxel world.
//!
//! * `ChunkPos` names a chunk in chunk space (one unit per chunk).
//! * `WorldPos` names a block as a chunk plus an in-chunk offset, so large worlds
//!   never need a single flat coordinate that could lose precision.
//! * `BlockSubPos` is a signed offset inside one chunk, allowed to overhang by
//!   one block on each side while testing face adjacency.
//!
//! All splitting of absolute coordinates uses floor division: `-1` with a chunk
//! size of 16 is chunk `-1`, offset `15`.

use std::ops::{Add, Mul, Sub};

use cgmath::{Point3, Vector3};

use super::chunk::CHUNK_SIZE;

/// Splits an absolute coordinate into `(chunk, offset)` for a chunk edge of `size`.
///
/// The offset is always in `[0, size)`.
///
/// ```
/// use voxel_world::engine_state::voxels::coordinates::split_coordinate;
///
/// assert_eq!(split_coordinate(-1, 16), (-1, 15));
/// assert_eq!(split_coordinate(16, 16), (1, 0));
/// ```
#[inline]
pub fn split_coordinate(value: i64, size: i64) -> (i64, i64) {
    debug_assert!(size > 0, "chunk size must be positive");
    (value.div_euclid(size), value.rem_euclid(size))
}

/// Inverse of [`split_coordinate`].
#[inline]
pub fn join_coordinate(chunk: i64, offset: i64, size: i64) -> i64 {
    chunk * size + offset
}

/// Position of a chunk in chunk space.
///
/// The derived ordering compares `x`, then `y`, then `z`. This is the sort key
/// of the loaded chunk collection and must stay lexicographic for the binary
/// search in `World` to be correct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl ChunkPos {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        ChunkPos { x, y, z }
    }

    /// The chunk containing a floating point world position.
    pub fn containing(position: Point3<f64>) -> Self {
        let size = CHUNK_SIZE as f64;
        ChunkPos {
            x: (position.x / size).floor() as i64,
            y: (position.y / size).floor() as i64,
            z: (position.z / size).floor() as i64,
        }
    }

    /// World-space position of this chunk's origin corner (`self * CHUNK_SIZE`).
    pub fn world_origin(&self) -> Point3<f64> {
        let origin = *self * CHUNK_SIZE as i64;
        Point3::new(origin.x as f64, origin.y as f64, origin.z as f64)
    }

    /// Same as [`ChunkPos::world_origin`], as a translation vector for the renderer.
    pub fn world_offset(&self) -> Vector3<f64> {
        let origin = self.world_origin();
        Vector3::new(origin.x, origin.y, origin.z)
    }
}

impl Add for ChunkPos {
    type Output = ChunkPos;

    fn add(self, rhs: ChunkPos) -> ChunkPos {
        ChunkPos::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for ChunkPos {
    type Output = ChunkPos;

    fn sub(self, rhs: ChunkPos) -> ChunkPos {
        ChunkPos::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i64> for ChunkPos {
    type Output = ChunkPos;

    fn mul(self, scalar: i64) -> ChunkPos {
        ChunkPos::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

/// Absolute position of a block: a chunk plus an offset inside it.
///
/// Invariant: every offset is in `[0, CHUNK_SIZE)` and
/// `abs = chunk * CHUNK_SIZE + offset` on each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WorldPos {
    chunk_pos: ChunkPos,
    sub_x: i64,
    sub_y: i64,
    sub_z: i64,
}

impl WorldPos {
    /// A block position given relative to the origin of `chunk_pos`.
    ///
    /// Offsets outside the chunk are folded into the chunk position, so
    /// `WorldPos::new(c, -1, 0, 0)` lands in the chunk to the left of `c`.
    pub fn new(chunk_pos: ChunkPos, block_x: i64, block_y: i64, block_z: i64) -> Self {
        let mut pos = WorldPos {
            chunk_pos,
            ..WorldPos::default()
        };
        pos.set_x(block_x).set_y(block_y).set_z(block_z);
        pos
    }

    /// A block position given in absolute block coordinates.
    pub fn from_absolute(x: i64, y: i64, z: i64) -> Self {
        WorldPos::new(ChunkPos::default(), x, y, z)
    }

    pub fn chunk_pos(&self) -> ChunkPos {
        self.chunk_pos
    }

    pub fn sub_x(&self) -> i64 {
        self.sub_x
    }

    pub fn sub_y(&self) -> i64 {
        self.sub_y
    }

    pub fn sub_z(&self) -> i64 {
        self.sub_z
    }

    /// Sets the x offset relative to the current chunk, renormalizing.
    ///
    /// The whole-chunk part of `value` is added to the stored chunk x.
    pub fn set_x(&mut self, value: i64) -> &mut Self {
        let (delta, sub) = split_coordinate(value, CHUNK_SIZE as i64);
        self.sub_x = sub;
        self.chunk_pos.x += delta;
        self
    }

    /// See [`WorldPos::set_x`].
    pub fn set_y(&mut self, value: i64) -> &mut Self {
        let (delta, sub) = split_coordinate(value, CHUNK_SIZE as i64);
        self.sub_y = sub;
        self.chunk_pos.y += delta;
        self
    }

    /// See [`WorldPos::set_x`].
    pub fn set_z(&mut self, value: i64) -> &mut Self {
        let (delta, sub) = split_coordinate(value, CHUNK_SIZE as i64);
        self.sub_z = sub;
        self.chunk_pos.z += delta;
        self
    }

    pub fn abs_x(&self) -> i64 {
        join_coordinate(self.chunk_pos.x, self.sub_x, CHUNK_SIZE as i64)
    }

    pub fn abs_y(&self) -> i64 {
        join_coordinate(self.chunk_pos.y, self.sub_y, CHUNK_SIZE as i64)
    }

    pub fn abs_z(&self) -> i64 {
        join_coordinate(self.chunk_pos.z, self.sub_z, CHUNK_SIZE as i64)
    }

    /// The position one block above, in the same normalized form.
    pub fn above(&self) -> WorldPos {
        WorldPos::new(self.chunk_pos, self.sub_x, self.sub_y + 1, self.sub_z)
    }
}

/// Signed block offset inside a chunk.
///
/// Valid blocks are in `[0, CHUNK_SIZE)`; `-1` and `CHUNK_SIZE` address the
/// neighbouring chunk's boundary layer during face tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlockSubPos {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl BlockSubPos {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        BlockSubPos { x, y, z }
    }

    /// True if the position names a block of this chunk.
    pub fn is_in_range(&self) -> bool {
        let size = CHUNK_SIZE as i16;
        (0..size).contains(&self.x) && (0..size).contains(&self.y) && (0..size).contains(&self.z)
    }

    /// Number of axes on which the offset is zero.
    pub fn zero_count(&self) -> usize {
        [self.x, self.y, self.z].iter().filter(|v| **v == 0).count()
    }

    /// Chunk-local vertex position of this block corner.
    pub fn to_local(&self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }

    /// The in-chunk indices, if the position is in range.
    pub fn to_index(&self) -> Option<(usize, usize, usize)> {
        self.is_in_range()
            .then(|| (self.x as usize, self.y as usize, self.z as usize))
    }
}

impl Add for BlockSubPos {
    type Output = BlockSubPos;

    fn add(self, rhs: BlockSubPos) -> BlockSubPos {
        BlockSubPos::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for BlockSubPos {
    type Output = BlockSubPos;

    fn sub(self, rhs: BlockSubPos) -> BlockSubPos {
        BlockSubPos::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn split_and_join_round_trip_for_several_sizes() {
        for size in [1_i64, 4, 16, 17] {
            for value in -3 * size - 2..=3 * size + 2 {
                let (chunk, offset) = split_coordinate(value, size);
                assert!((0..size).contains(&offset), "offset {offset} for {value}/{size}");
                assert_eq!(join_coordinate(chunk, offset, size), value);
            }
        }
    }

    #[test]
    fn negative_one_lands_in_previous_chunk() {
        let pos = WorldPos::from_absolute(-1, -1, -1);
        assert_eq!(pos.chunk_pos(), ChunkPos::new(-1, -1, -1));
        assert_eq!(pos.sub_x(), CHUNK_SIZE as i64 - 1);
        assert_eq!(pos.abs_x(), -1);
    }

    #[test]
    fn world_pos_round_trips_boundaries() {
        let size = CHUNK_SIZE as i64;
        for value in [0, 1, -1, size, -size, size - 1, -size - 1, 1_000_003, -1_000_003] {
            let pos = WorldPos::from_absolute(value, value, value);
            assert_eq!(pos.abs_x(), value);
            assert_eq!(pos.abs_y(), value);
            assert_eq!(pos.abs_z(), value);
        }
    }

    #[test]
    fn overhang_offsets_fold_into_neighbour_chunk() {
        let size = CHUNK_SIZE as i64;
        let base = ChunkPos::new(3, -2, 0);

        let right = WorldPos::new(base, size, 0, 0);
        assert_eq!(right.chunk_pos(), ChunkPos::new(4, -2, 0));
        assert_eq!(right.sub_x(), 0);

        let below = WorldPos::new(base, 0, -1, 0);
        assert_eq!(below.chunk_pos(), ChunkPos::new(3, -3, 0));
        assert_eq!(below.sub_y(), size - 1);
        assert_eq!(below.abs_y(), -2 * size - 1);
    }

    #[test]
    fn above_crosses_chunk_top() {
        let size = CHUNK_SIZE as i64;
        let top = WorldPos::new(ChunkPos::new(0, 0, 0), 2, size - 1, 5);
        let above = top.above();
        assert_eq!(above.chunk_pos(), ChunkPos::new(0, 1, 0));
        assert_eq!(above.abs_y(), size);
        assert_eq!(above.abs_x(), 2);
    }

    #[test]
    fn chunk_pos_arithmetic() {
        let a = ChunkPos::new(1, 2, 3);
        let b = ChunkPos::new(-4, 5, 0);
        assert_eq!(a + b, ChunkPos::new(-3, 7, 3));
        assert_eq!(a - b, ChunkPos::new(5, -3, 3));
        assert_eq!(a * 3, ChunkPos::new(3, 6, 9));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(ChunkPos::new(0, 9, 9) < ChunkPos::new(1, 0, 0));
        assert!(ChunkPos::new(1, 0, 9) < ChunkPos::new(1, 1, 0));
        assert!(ChunkPos::new(1, 1, 0) < ChunkPos::new(1, 1, 1));
        assert!(ChunkPos::new(-1, 5, 5) < ChunkPos::new(0, -5, -5));
    }

    #[test]
    fn ordering_is_total_and_transitive() {
        let mut positions = Vec::new();
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    positions.push(ChunkPos::new(x, y, z));
                }
            }
        }

        for a in &positions {
            for b in &positions {
                let relations = [a < b, a == b, a > b];
                assert_eq!(relations.iter().filter(|r| **r).count(), 1);

                for c in &positions {
                    if a < b && b < c {
                        assert_eq!(a.cmp(c), Ordering::Less);
                    }
                }
            }
        }
    }

    #[test]
    fn containing_uses_floor() {
        let size = CHUNK_SIZE as f64;
        assert_eq!(ChunkPos::containing(Point3::new(0.5, 0.5, 0.5)), ChunkPos::new(0, 0, 0));
        assert_eq!(ChunkPos::containing(Point3::new(-0.5, size, -size)), ChunkPos::new(-1, 1, -1));
    }

    #[test]
    fn world_origin_scales_by_chunk_size() {
        let size = CHUNK_SIZE as f64;
        let origin = ChunkPos::new(2, -1, 0).world_origin();
        assert_eq!(origin, Point3::new(2.0 * size, -size, 0.0));
    }

    #[test]
    fn sub_pos_range_and_zero_count() {
        let size = CHUNK_SIZE as i16;
        assert!(BlockSubPos::new(0, 0, 0).is_in_range());
        assert!(BlockSubPos::new(size - 1, size - 1, size - 1).is_in_range());
        assert!(!BlockSubPos::new(-1, 0, 0).is_in_range());
        assert!(!BlockSubPos::new(0, size, 0).is_in_range());

        let offset = BlockSubPos::new(4, 4, 5) - BlockSubPos::new(4, 4, 4);
        assert_eq!(offset, BlockSubPos::new(0, 0, 1));
        assert_eq!(offset.zero_count(), 2);
        assert_eq!(BlockSubPos::new(1, 1, 0).zero_count(), 1);
    }
}
