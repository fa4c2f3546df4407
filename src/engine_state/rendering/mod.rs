//! Rendering system for the voxel engine.
//!
//! This module contains the mesh side of rendering: the vertex format, the chunk
//! mesher and the [`Renderer`] contract through which meshes reach a graphics
//! backend. Nothing here depends on a GPU API; [`HeadlessRenderer`] implements
//! the contract with plain bookkeeping.

pub mod meshing;
mod renderer;
mod vertex;

// Re-export commonly used types
pub use renderer::{HeadlessRenderer, MeshHandle, MeshUpload, Renderer};
pub use vertex::{Vertex, VertexAttribute, VertexFormat, VertexLayout};

