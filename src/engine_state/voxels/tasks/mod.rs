//! # Voxel Task System
//!
//! Tasks that build chunks on worker threads. The driver thread publishes them
//! through the `TaskManager` and applies their results.

pub mod chunk_generation_task;

pub use chunk_generation_task::{ChunkGenerationTask, ChunkGenerationTaskResult};
