//! # Block Module
//!
//! Block type definitions, block faces and the static texture atlas lookup.

use block_type::{BlockType, BLOCK_TYPE_COUNT};

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to store block types.
pub type BlockTypeSize = u16;

/// Tiles per row (and per column) of the square texture atlas.
pub const ATLAS_TILES_PER_ROW: usize = 4;

/// Edge length of one atlas tile in UV space.
pub const ATLAS_TILE_SIZE: f32 = 1.0 / ATLAS_TILES_PER_ROW as f32;

/// A rectangle of the texture atlas in UV space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl UvRect {
    const EMPTY: UvRect = UvRect {
        min: [0.0, 0.0],
        max: [0.0, 0.0],
    };

    const fn new(min: [f32; 2], max: [f32; 2]) -> UvRect {
        UvRect { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min == self.max
    }
}

/// Atlas region of each block type, indexed by `BlockType` as a `usize`.
///
/// `AIR` is never drawn and owns no tile.
pub static BLOCK_TYPE_TO_UV_RECT: [UvRect; BLOCK_TYPE_COUNT] = [
    UvRect::EMPTY,                              // AIR
    UvRect::new([0.0, 0.0], [0.25, 0.25]),      // STONE
    UvRect::new([0.25, 0.0], [0.5, 0.25]),      // DIRT
    UvRect::new([0.5, 0.0], [0.75, 0.25]),      // GRASS
    UvRect::new([0.75, 0.0], [1.0, 0.25]),      // WATER
    UvRect::new([0.0, 0.25], [0.25, 0.5]),      // GLASS
    UvRect::new([0.25, 0.25], [0.5, 0.5]),      // WOOD
    UvRect::new([0.5, 0.25], [0.75, 0.5]),      // LEAVES
];

/// The atlas region used for every face of `block_type`.
pub fn uv_rect(block_type: BlockType) -> UvRect {
    BLOCK_TYPE_TO_UV_RECT[block_type as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_blocks_have_distinct_tiles() {
        let rects: Vec<UvRect> = BlockType::all()
            .into_iter()
            .filter(|b| !b.is_air())
            .map(uv_rect)
            .collect();

        for (i, a) in rects.iter().enumerate() {
            assert!(!a.is_empty());
            for b in &rects[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn tiles_stay_inside_the_atlas() {
        for block in BlockType::all() {
            let rect = uv_rect(block);
            for v in rect.min.iter().chain(rect.max.iter()) {
                assert!((0.0..=1.0).contains(v));
            }
        }
    }

    #[test]
    fn air_has_no_tile() {
        assert!(uv_rect(BlockType::AIR).is_empty());
    }
}
