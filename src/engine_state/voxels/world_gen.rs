//! # World Generation Module
//!
//! Deterministic terrain: a pure function from an absolute block position to a
//! block type, plus bulk filling of a chunk.
//!
//! ## Terrain profiles
//!
//! * [`TerrainProfile::Periodic`] layers sine and cosine waves:
//!   `stone_height = (sin(x / 10) + cos(z / 10)) * 5` and a 3D surface field
//!   `sin(x / 2) + cos(z / 2) + sin(y / 2)` thresholded at `2.5`. It ignores the
//!   seed and is the canonical terrain.
//! * [`TerrainProfile::Perlin`] samples seeded Perlin noise for the same two
//!   fields.
//!
//! Both profiles bury grass one level deep: a grass block with anything but air
//! directly above it becomes dirt. The block above is queried without burial so
//! the lookup never recurses further.
//!
//! Because every query depends only on the absolute position, adjacent chunks
//! agree on their shared boundary without any coordination.

use log::trace;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::{
    block::block_type::BlockType,
    chunk::{chunk_data::ChunkData, CHUNK_SIZE},
    coordinates::{ChunkPos, WorldPos},
};

/// Horizontal period divisor of the stone height waves.
const STONE_FREQUENCY: f64 = 10.0;
/// Amplitude of the stone height waves.
const STONE_AMPLITUDE: f64 = 5.0;
/// Period divisor of the 3D surface field.
const SURFACE_FREQUENCY: f64 = 2.0;
/// Surface field value above which grass is placed.
const SURFACE_THRESHOLD: f64 = 2.5;

/// Scaling factor applied to world coordinates when sampling the stone height noise.
const PERLIN_HEIGHT_SCALE: f64 = 0.02;
/// Stone height range of the Perlin profile, in blocks.
const PERLIN_HEIGHT_AMPLITUDE: f64 = 16.0;
/// Scaling factor applied to world coordinates when sampling the surface noise.
const PERLIN_SURFACE_SCALE: f64 = 0.1;
/// Surface noise value above which grass is placed.
const PERLIN_SURFACE_THRESHOLD: f64 = 0.2;

/// Absolute position of the optional debug marker block.
pub const DEBUG_MARKER_POSITION: (i64, i64, i64) = (20, 20, 20);

/// The terrain function used by a [`WorldGen`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainProfile {
    /// Layered sine/cosine terrain.
    #[default]
    Periodic,
    /// Seeded Perlin noise terrain.
    Perlin,
}

/// Immutable generator parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub terrain: TerrainProfile,
    /// Forces the block at [`DEBUG_MARKER_POSITION`] to stone.
    pub debug_marker: bool,
}

/// Seeded procedural world generator.
///
/// `WorldGen` holds no mutable state, so one instance can be shared between
/// worker threads behind an `Arc`.
#[derive(Clone)]
pub struct WorldGen {
    config: GeneratorConfig,
    perlin: Perlin,
}

impl std::fmt::Debug for WorldGen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldGen")
            .field("config", &self.config)
            .finish()
    }
}

impl WorldGen {
    /// A periodic-terrain generator with the given seed.
    pub fn new(seed: u64) -> Self {
        WorldGen::with_config(GeneratorConfig {
            seed,
            ..GeneratorConfig::default()
        })
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        WorldGen {
            config,
            perlin: Perlin::new(config.seed as u32),
        }
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Fills `data` with the terrain of the chunk at `position`.
    ///
    /// `None` leaves nothing to fill and returns without doing any work.
    pub fn generate_chunk(&self, position: ChunkPos, data: Option<&mut ChunkData>) -> &Self {
        let Some(data) = data else {
            trace!("Skipping generation of chunk {position:?}: no output buffer");
            return self;
        };

        for z in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    let world_pos = WorldPos::new(position, x as i64, y as i64, z as i64);
                    data.set(x, y, z, self.block_at(&world_pos, true));
                }
            }
        }

        self
    }

    /// The block type at an absolute position.
    ///
    /// With `do_recurse`, grass that has a non-air block directly above it is
    /// reported as dirt.
    pub fn block_at(&self, position: &WorldPos, do_recurse: bool) -> BlockType {
        let x = position.abs_x();
        let y = position.abs_y();
        let z = position.abs_z();

        if self.config.debug_marker && (x, y, z) == DEBUG_MARKER_POSITION {
            return BlockType::STONE;
        }

        let (stone_height, is_surface) = match self.config.terrain {
            TerrainProfile::Periodic => self.periodic_fields(x, y, z),
            TerrainProfile::Perlin => self.perlin_fields(x, y, z),
        };

        if (y as f64) < stone_height {
            return BlockType::STONE;
        }
        if !is_surface {
            return BlockType::AIR;
        }

        if do_recurse && !self.block_at(&position.above(), false).is_air() {
            BlockType::DIRT
        } else {
            BlockType::GRASS
        }
    }

    /// Stone height at a column and whether the surface field places grass at `y`.
    fn periodic_fields(&self, x: i64, y: i64, z: i64) -> (f64, bool) {
        let (x, y, z) = (x as f64, y as f64, z as f64);

        let stone_height = Self::stone_height(x, z);
        let surface = (x / SURFACE_FREQUENCY).sin()
            + (z / SURFACE_FREQUENCY).cos()
            + (y / SURFACE_FREQUENCY).sin();

        (stone_height, surface > SURFACE_THRESHOLD)
    }

    fn perlin_fields(&self, x: i64, y: i64, z: i64) -> (f64, bool) {
        let (x, y, z) = (x as f64, y as f64, z as f64);

        let stone_height = self
            .perlin
            .get([x * PERLIN_HEIGHT_SCALE, z * PERLIN_HEIGHT_SCALE])
            * PERLIN_HEIGHT_AMPLITUDE;
        let surface = self.perlin.get([
            x * PERLIN_SURFACE_SCALE,
            y * PERLIN_SURFACE_SCALE,
            z * PERLIN_SURFACE_SCALE,
        ]);

        (stone_height, surface > PERLIN_SURFACE_THRESHOLD)
    }

    /// Height below which the periodic profile places stone.
    pub fn stone_height(x: f64, z: f64) -> f64 {
        ((x / STONE_FREQUENCY).sin() + (z / STONE_FREQUENCY).cos()) * STONE_AMPLITUDE
    }
}
