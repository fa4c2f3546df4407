//! # Voxel World Core
//!
//! This module contains the voxel data model and the chunk manager: how blocks
//! are addressed, stored, generated and kept loaded around an observer.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Coordinates**: `ChunkPos`, `WorldPos` and `BlockSubPos`, with floor-division
//!   normalisation so negative positions map to the right chunk
//! * **Block**: Block types, the six block sides and the texture atlas lookup
//! * **Chunk**: A 16x16x16 dense block array plus the mesh built from it
//! * **World generation**: A deterministic, seedable terrain function
//! * **World**: The sorted collection of loaded chunks and the streaming cursor
//! * **Storage**: Saved chunk data consulted before generation
//! * **Tasks**: Chunk builds executed on worker threads
//!
//! ## Data Flow
//!
//! 1. The driver picks a candidate position near the observer
//! 2. The chunk is restored from the store or generated, then meshed
//! 3. The chunk is inserted at its sorted position and its mesh is uploaded
//! 4. Chunks that drift out of range are evicted, their meshes destroyed and
//!    their data offered to the store
//!
//! ## Thread Safety
//!
//! * `WorldGen` is immutable after construction and shared as `Arc<WorldGen>`
//! * Chunk stores synchronise internally
//! * `World` is only mutated on the driver thread

pub mod block;
pub mod chunk;
pub mod coordinates;
pub mod storage;
pub mod tasks;
pub mod world;
pub mod world_gen;
