//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world and
//! their conversion from the raw `u16` values used by stored chunk data.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminants are the on-disk values of a serialized chunk and must not
/// be reordered. `AIR` is the empty block; every visibility test treats it as
/// the only non-solid value.
#[repr(u16)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
pub enum BlockType {
    /// Empty space.
    #[default]
    AIR = 0x00,

    /// Bedrock of the generated terrain.
    STONE = 0x01,

    /// Grass that has another block on top of it.
    DIRT = 0x02,

    /// Exposed surface block.
    GRASS = 0x03,

    WATER = 0x04,
    GLASS = 0x05,
    WOOD = 0x06,
    LEAVES = 0x07,
}

/// Number of block types, `AIR` included.
pub const BLOCK_TYPE_COUNT: usize = 8;

impl BlockType {
    /// Converts a raw stored value to a `BlockType`.
    ///
    /// Values past the last known block decode to `AIR`, matching how stored
    /// chunks from newer versions degrade.
    pub fn from_raw(raw: BlockTypeSize) -> Self {
        num::FromPrimitive::from_u16(raw).unwrap_or(BlockType::AIR)
    }

    /// The raw stored value.
    pub fn to_raw(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockType::AIR
    }

    /// Every block type in discriminant order.
    pub fn all() -> [BlockType; BLOCK_TYPE_COUNT] {
        [
            BlockType::AIR,
            BlockType::STONE,
            BlockType::DIRT,
            BlockType::GRASS,
            BlockType::WATER,
            BlockType::GLASS,
            BlockType::WOOD,
            BlockType::LEAVES,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_round_trip() {
        for block in BlockType::all() {
            assert_eq!(BlockType::from_raw(block.to_raw()), block);
        }
    }

    #[test]
    fn unknown_values_decode_to_air() {
        assert_eq!(BlockType::from_raw(8), BlockType::AIR);
        assert_eq!(BlockType::from_raw(u16::MAX), BlockType::AIR);
    }

    #[test]
    fn only_air_is_air() {
        let air_count = BlockType::all().iter().filter(|b| b.is_air()).count();
        assert_eq!(air_count, 1);
        assert_eq!(BlockType::default(), BlockType::AIR);
    }
}
