//! # Engine Configuration
//!
//! Runtime settings for the world driver, loaded from JSON. Every field has a
//! default, so a partial file (or `{}`) is a valid configuration.
//!
//! ```json
//! {
//!     "seed": 42,
//!     "terrain": "periodic",
//!     "load_distance": 6,
//!     "unload_buffer": 2.0,
//!     "chunk_lookups_per_frame": 4,
//!     "num_workers": 2
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WorldError};
use crate::engine_state::voxels::world::MAX_STREAMING_EDGE;
use crate::engine_state::voxels::world_gen::{GeneratorConfig, TerrainProfile};

/// Chunks per edge of the cubic streaming volume.
pub const DEFAULT_LOAD_DISTANCE: u32 = 10;
/// Extra world units past the render distance before a chunk is evicted.
pub const DEFAULT_UNLOAD_BUFFER: f64 = 2.0;
/// Candidate chunk positions examined per frame.
pub const DEFAULT_CHUNK_LOOKUPS_PER_FRAME: usize = 1;
/// Evicted chunks kept in the in-memory chunk store.
pub const DEFAULT_STORE_CAPACITY: usize = 256;

/// Settings for the generator, the streaming loop and the worker pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World seed. `None` picks a random seed at startup.
    pub seed: Option<u64>,
    /// Terrain function used by the generator.
    pub terrain: TerrainProfile,
    /// Force the debug marker block at (20, 20, 20) to stone.
    pub debug_marker: bool,
    /// Edge length, in chunks, of the cube of candidate positions around the observer.
    pub load_distance: u32,
    /// World units added to the render distance before eviction.
    pub unload_buffer: f64,
    /// Candidate positions scheduled per frame.
    pub chunk_lookups_per_frame: usize,
    /// Worker threads for chunk generation. Zero builds chunks inline on the driver thread.
    pub num_workers: usize,
    /// Capacity of the evicted-chunk store. Zero disables the store.
    pub store_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            seed: None,
            terrain: TerrainProfile::default(),
            debug_marker: false,
            load_distance: DEFAULT_LOAD_DISTANCE,
            unload_buffer: DEFAULT_UNLOAD_BUFFER,
            chunk_lookups_per_frame: DEFAULT_CHUNK_LOOKUPS_PER_FRAME,
            num_workers: 0,
            store_capacity: DEFAULT_STORE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.load_distance == 0 {
            return Err(WorldError::InvalidConfig(
                "load_distance must be at least 1".to_string(),
            ));
        }
        if self.load_distance > MAX_STREAMING_EDGE {
            return Err(WorldError::InvalidConfig(format!(
                "load_distance must be at most {} (got {})",
                MAX_STREAMING_EDGE, self.load_distance
            )));
        }
        if !self.unload_buffer.is_finite() || self.unload_buffer < 0.0 {
            return Err(WorldError::InvalidConfig(format!(
                "unload_buffer must be a finite, non-negative number (got {})",
                self.unload_buffer
            )));
        }
        Ok(())
    }

    /// Generator settings, resolving a missing seed to a random one.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            seed: self.seed.unwrap_or_else(|| fastrand::u64(..)),
            terrain: self.terrain,
            debug_marker: self.debug_marker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.load_distance, 10);
        assert_eq!(config.unload_buffer, 2.0);
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config = EngineConfig::from_json_str(
            r#"{ "seed": 9, "terrain": "perlin", "load_distance": 3, "num_workers": 2 }"#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.terrain, TerrainProfile::Perlin);
        assert_eq!(config.load_distance, 3);
        assert_eq!(config.num_workers, 2);
        assert_eq!(config.chunk_lookups_per_frame, 1);
    }

    #[test]
    fn zero_load_distance_is_rejected() {
        let result = EngineConfig::from_json_str(r#"{ "load_distance": 0 }"#);
        assert!(matches!(result, Err(WorldError::InvalidConfig(_))));
    }

    #[test]
    fn oversized_load_distance_is_rejected() {
        let result = EngineConfig::from_json_str(r#"{ "load_distance": 4194304 }"#);
        assert!(matches!(result, Err(WorldError::InvalidConfig(_))));

        let largest = format!(r#"{{ "load_distance": {} }}"#, MAX_STREAMING_EDGE);
        assert!(EngineConfig::from_json_str(&largest).is_ok());
    }

    #[test]
    fn missing_seed_is_randomised() {
        let config = EngineConfig::default();
        assert_eq!(config.seed, None);

        // Two random draws colliding is possible but vanishingly unlikely.
        let seeds: Vec<u64> = (0..4).map(|_| config.generator_config().seed).collect();
        assert!(seeds.windows(2).any(|pair| pair[0] != pair[1]));
        assert_eq!(config.generator_config().terrain, config.terrain);
    }

    #[test]
    fn negative_unload_buffer_is_rejected() {
        let result = EngineConfig::from_json_str(r#"{ "unload_buffer": -1.0 }"#);
        assert!(matches!(result, Err(WorldError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let result = EngineConfig::from_json_str("{ load_distance: ");
        assert!(matches!(result, Err(WorldError::Json(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = EngineConfig::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(WorldError::Io(_))));
    }

    #[test]
    fn explicit_seed_is_kept() {
        let config = EngineConfig {
            seed: Some(1234),
            ..EngineConfig::default()
        };
        assert_eq!(config.generator_config().seed, 1234);
    }
}
