//! The renderer contract and a headless implementation.
//!
//! The voxel core never talks to a graphics API. It hands finished meshes to a
//! [`Renderer`] as raw bytes plus a [`VertexLayout`], draws them by handle with a
//! world-space origin, and destroys them by handle when their chunk is evicted.

use std::collections::HashMap;

use cgmath::Vector3;
use log::{trace, warn};

use super::vertex::VertexLayout;

/// Opaque identifier of a mesh uploaded to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(u64);

impl MeshHandle {
    pub fn new(id: u64) -> Self {
        MeshHandle(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Everything a renderer needs to create GPU buffers for one mesh.
#[derive(Debug, Clone, Copy)]
pub struct MeshUpload<'a> {
    pub vertex_bytes: &'a [u8],
    pub vertex_count: usize,
    /// `None` for non-indexed meshes
    pub index_bytes: Option<&'a [u8]>,
    pub layout: VertexLayout,
}

/// Backend that owns GPU-side mesh resources.
///
/// Called only from the driver thread.
pub trait Renderer {
    /// Creates GPU resources for a mesh and returns its handle.
    fn upload_mesh(&mut self, upload: MeshUpload<'_>) -> MeshHandle;

    /// Submits a draw of `handle` translated by `origin`. Fire and forget.
    fn draw_mesh(&mut self, handle: MeshHandle, origin: Vector3<f64>);

    /// Releases the GPU resources of `handle`.
    fn destroy_mesh(&mut self, handle: MeshHandle);
}

/// Bookkeeping for one uploaded mesh.
///
/// Tracks the memory a real backend would allocate so memory use can be
/// reported without a GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MeshAnalytics {
    /// Bytes of vertex data uploaded
    pub vertex_bytes: usize,
    /// Bytes of index data uploaded
    pub index_bytes: usize,
    /// Number of vertices in the mesh
    pub vertex_count: usize,
    /// Number of times the mesh has been drawn
    pub times_drawn: u64,
}

/// A renderer without a graphics device.
///
/// Keeps the same bookkeeping a GPU backend would (live meshes, uploaded bytes,
/// draw calls) so the streaming loop can run in tests and in the demo binary.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    meshes: HashMap<MeshHandle, MeshAnalytics>,
    next_handle: u64,
    draw_calls_this_frame: usize,
    vertices_this_frame: usize,
    total_uploads: u64,
    total_destroys: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        HeadlessRenderer::default()
    }

    /// Resets the per-frame counters.
    pub fn begin_frame(&mut self) {
        self.draw_calls_this_frame = 0;
        self.vertices_this_frame = 0;
    }

    /// Number of meshes currently holding GPU resources.
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_live(&self, handle: MeshHandle) -> bool {
        self.meshes.contains_key(&handle)
    }

    /// Bytes of vertex and index data held by live meshes.
    pub fn live_bytes(&self) -> usize {
        self.meshes
            .values()
            .map(|mesh| mesh.vertex_bytes + mesh.index_bytes)
            .sum()
    }

    pub fn draw_calls_this_frame(&self) -> usize {
        self.draw_calls_this_frame
    }

    pub fn vertices_this_frame(&self) -> usize {
        self.vertices_this_frame
    }

    pub fn total_uploads(&self) -> u64 {
        self.total_uploads
    }

    pub fn total_destroys(&self) -> u64 {
        self.total_destroys
    }

    /// How often `handle` has been drawn, if it is live.
    pub fn times_drawn(&self, handle: MeshHandle) -> Option<u64> {
        self.meshes.get(&handle).map(|mesh| mesh.times_drawn)
    }
}

impl Renderer for HeadlessRenderer {
    fn upload_mesh(&mut self, upload: MeshUpload<'_>) -> MeshHandle {
        let handle = MeshHandle::new(self.next_handle);
        self.next_handle += 1;
        self.total_uploads += 1;

        self.meshes.insert(
            handle,
            MeshAnalytics {
                vertex_bytes: upload.vertex_bytes.len(),
                index_bytes: upload.index_bytes.map_or(0, <[u8]>::len),
                vertex_count: upload.vertex_count,
                times_drawn: 0,
            },
        );

        trace!(
            "Uploaded mesh {:?}: {} vertices, {} bytes (stride {})",
            handle,
            upload.vertex_count,
            upload.vertex_bytes.len(),
            upload.layout.array_stride
        );
        handle
    }

    fn draw_mesh(&mut self, handle: MeshHandle, _origin: Vector3<f64>) {
        match self.meshes.get_mut(&handle) {
            Some(mesh) => {
                mesh.times_drawn += 1;
                self.draw_calls_this_frame += 1;
                self.vertices_this_frame += mesh.vertex_count;
            }
            None => warn!("Draw of unknown mesh {:?} ignored", handle),
        }
    }

    fn destroy_mesh(&mut self, handle: MeshHandle) {
        if self.meshes.remove(&handle).is_some() {
            self.total_destroys += 1;
        } else {
            warn!("Destroy of unknown mesh {:?} ignored", handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::Vertex;

    fn upload(renderer: &mut HeadlessRenderer, bytes: &[u8]) -> MeshHandle {
        renderer.upload_mesh(MeshUpload {
            vertex_bytes: bytes,
            vertex_count: bytes.len() / 36,
            index_bytes: None,
            layout: Vertex::layout(),
        })
    }

    #[test]
    fn upload_draw_destroy_lifecycle() {
        let mut renderer = HeadlessRenderer::new();
        let bytes = vec![0u8; 72];
        let handle = upload(&mut renderer, &bytes);

        assert_eq!(renderer.live_meshes(), 1);
        assert_eq!(renderer.live_bytes(), 72);

        renderer.begin_frame();
        renderer.draw_mesh(handle, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(renderer.draw_calls_this_frame(), 1);
        assert_eq!(renderer.vertices_this_frame(), 2);
        assert_eq!(renderer.times_drawn(handle), Some(1));

        renderer.destroy_mesh(handle);
        assert!(!renderer.is_live(handle));
        assert_eq!(renderer.total_destroys(), 1);
        assert_eq!(renderer.live_bytes(), 0);
    }

    #[test]
    fn handles_are_unique() {
        let mut renderer = HeadlessRenderer::new();
        let a = upload(&mut renderer, &[]);
        let b = upload(&mut renderer, &[]);
        assert_ne!(a, b);
        assert_eq!(renderer.total_uploads(), 2);
    }

    #[test]
    fn unknown_handles_are_ignored() {
        let mut renderer = HeadlessRenderer::new();
        renderer.draw_mesh(MeshHandle::new(99), Vector3::new(0.0, 0.0, 0.0));
        renderer.destroy_mesh(MeshHandle::new(99));
        assert_eq!(renderer.draw_calls_this_frame(), 0);
        assert_eq!(renderer.total_destroys(), 0);
    }
}
