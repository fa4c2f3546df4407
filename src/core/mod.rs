//! # Core Module
//!
//! Shared primitives used throughout the voxel world: the thread-safe resource
//! container, the crate error type and the engine configuration.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted resource with read-write locking
//! - `WorldError`: Error type for allocation, storage codec and configuration failures
//! - `EngineConfig`: JSON-backed settings for generation, streaming and workers
//!
//! ## Usage
//! ```rust
//! use voxel_world::core::{EngineConfig, MtResource};
//!
//! let config = EngineConfig::from_json_str(r#"{ "load_distance": 4 }"#).unwrap();
//! assert_eq!(config.load_distance, 4);
//!
//! let counter = MtResource::new(0);
//! *counter.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod config;
pub mod error;
pub mod mt_resource;

pub use config::EngineConfig;
pub use error::{Result, WorldError};
pub use mt_resource::MtResource;
