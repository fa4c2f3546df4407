//! # Camera State Management
//!
//! The world reads exactly one thing from the camera: its position, once per
//! frame. [`Observer`] is that seam. [`camera::Camera`] is a minimal
//! implementation used by the demo binary and the tests.
//!
//! ## Chunk Position
//!
//! The observer's chunk is `floor(position / CHUNK_SIZE)` per axis, see
//! [`ChunkPos::containing`](crate::engine_state::voxels::coordinates::ChunkPos::containing).

use cgmath::Point3;

pub mod camera;

pub use camera::Camera;

/// Anything with a position in world space that chunks are streamed around.
pub trait Observer {
    /// Current world-space position.
    fn position(&self) -> Point3<f64>;
}

impl Observer for Point3<f64> {
    fn position(&self) -> Point3<f64> {
        *self
    }
}
