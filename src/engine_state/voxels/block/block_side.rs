//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and maps neighbour
//! offsets to the face they expose.

use cgmath::Vector3;

use crate::engine_state::voxels::coordinates::BlockSubPos;

/// The six faces of a block, named after the direction of their outward normal.
///
/// The order is: [LEFT, RIGHT, BOTTOM, TOP, FRONT, BACK]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// Facing negative X
    LEFT = 0,

    /// Facing positive X
    RIGHT = 1,

    /// Facing negative Y
    BOTTOM = 2,

    /// Facing positive Y
    TOP = 3,

    /// Facing negative Z
    FRONT = 4,

    /// Facing positive Z
    BACK = 5,
}

impl BlockSide {
    /// Returns all six faces in a consistent order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// Offset from a block to the neighbour this face looks at.
    pub fn offset(self) -> BlockSubPos {
        match self {
            BlockSide::LEFT => BlockSubPos::new(-1, 0, 0),
            BlockSide::RIGHT => BlockSubPos::new(1, 0, 0),
            BlockSide::BOTTOM => BlockSubPos::new(0, -1, 0),
            BlockSide::TOP => BlockSubPos::new(0, 1, 0),
            BlockSide::FRONT => BlockSubPos::new(0, 0, -1),
            BlockSide::BACK => BlockSubPos::new(0, 0, 1),
        }
    }

    /// Unit outward normal.
    pub fn normal(self) -> Vector3<f32> {
        let offset = self.offset();
        Vector3::new(offset.x as f32, offset.y as f32, offset.z as f32)
    }

    /// The face exposed towards `offset`, if it names a direct neighbour.
    ///
    /// Returns `None` unless exactly one axis is non-zero and that axis moves
    /// by exactly one block.
    pub fn from_offset(offset: BlockSubPos) -> Option<BlockSide> {
        match (offset.x, offset.y, offset.z) {
            (-1, 0, 0) => Some(BlockSide::LEFT),
            (1, 0, 0) => Some(BlockSide::RIGHT),
            (0, -1, 0) => Some(BlockSide::BOTTOM),
            (0, 1, 0) => Some(BlockSide::TOP),
            (0, 0, -1) => Some(BlockSide::FRONT),
            (0, 0, 1) => Some(BlockSide::BACK),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_round_trip() {
        for side in BlockSide::all() {
            assert_eq!(BlockSide::from_offset(side.offset()), Some(side));
        }
    }

    #[test]
    fn non_neighbour_offsets_have_no_side() {
        assert_eq!(BlockSide::from_offset(BlockSubPos::new(0, 0, 0)), None);
        assert_eq!(BlockSide::from_offset(BlockSubPos::new(1, 1, 0)), None);
        assert_eq!(BlockSide::from_offset(BlockSubPos::new(0, 2, 0)), None);
    }

    #[test]
    fn normals_are_unit_length() {
        use cgmath::InnerSpace;
        for side in BlockSide::all() {
            assert_eq!(side.normal().magnitude2(), 1.0);
        }
    }
}
