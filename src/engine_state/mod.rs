//! # Engine State Module
//!
//! The per-frame driver of the voxel world.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the world, the generator, the worker pool and the chunk store
//! * `camera_state` - The `Observer` seam and a minimal camera
//! * `rendering` - Meshing, the vertex format and the renderer contract
//! * `task_management` - Worker threads for chunk generation
//! * `voxels` - Coordinates, blocks, chunks, terrain generation and the chunk manager
//!
//! ## Frame Loop
//!
//! Each call to [`EngineState::tick`]:
//!
//! 1. Reads the observer position and recomputes the observer's chunk
//! 2. Applies chunks finished by workers since the last frame
//! 3. Examines `chunk_lookups_per_frame` candidate positions from the streaming
//!    cursor and builds (or schedules) every unloaded one
//! 4. Evicts chunks farther than `load_distance * CHUNK_SIZE + unload_buffer`
//!    world units, destroying their meshes and saving their data
//! 5. Draws every chunk with an uploaded mesh
//!
//! With `num_workers = 0` chunks are generated and meshed inline in step 3, so
//! a chunk requested this frame is drawn this frame. Otherwise step 3 only
//! publishes tasks and the chunk appears a few frames later.

use std::sync::Arc;

use camera_state::Observer;
use log::{debug, info, trace, warn};
use rendering::{meshing::Drawable, Renderer};
use task_management::{task::TaskContext, TaskManager};
use voxels::{
    chunk::CHUNK_SIZE,
    coordinates::ChunkPos,
    storage::{ChunkStore, MemoryChunkStore},
    tasks::ChunkGenerationTask,
    world::{ChunkState, InsertOutcome, StreamingCursor, World},
    world_gen::WorldGen,
};

use crate::core::{error::Result, EngineConfig};

pub mod camera_state;
pub mod rendering;
pub mod task_management;
pub mod voxels;

/// What happened during one [`EngineState::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Chunks inserted into the world this frame, inline or from workers
    pub inserted: usize,
    /// Chunk tasks published to workers
    pub scheduled: usize,
    /// Chunk builds that failed and will be retried on a later sweep
    pub failed: usize,
    pub evicted: usize,
    /// Draw calls submitted
    pub drawn: usize,
}

/// The state container for a streaming voxel world.
///
/// # Examples
///
/// ```
/// use voxel_world::core::EngineConfig;
/// use voxel_world::engine_state::{camera_state::Camera, rendering::HeadlessRenderer, EngineState};
///
/// let config = EngineConfig { seed: Some(7), load_distance: 2, ..EngineConfig::default() };
/// let mut engine_state = EngineState::new(config).unwrap();
/// let mut renderer = HeadlessRenderer::new();
/// let camera = Camera::new([1.0, 1.0, 1.0]);
///
/// for _ in 0..8 {
///     engine_state.tick(&camera, &mut renderer);
/// }
/// assert_eq!(engine_state.world().len(), 8);
/// ```
pub struct EngineState {
    config: EngineConfig,
    /// Shared with chunk workers
    generator: Arc<WorldGen>,
    world: World,
    cursor: StreamingCursor,
    /// `None` in inline mode
    task_manager: Option<TaskManager>,
    store: Option<Arc<dyn ChunkStore>>,
    /// Chunk containing the observer at the last tick
    observer_chunk: Option<ChunkPos>,
    /// The loaded chunk the observer is in, if any
    active_chunk: Option<ChunkPos>,
    frame_count: u64,
}

impl EngineState {
    /// Creates the world driver described by `config`.
    ///
    /// A `store_capacity` above zero creates a [`MemoryChunkStore`] of that size.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let store = std::num::NonZeroUsize::new(config.store_capacity)
            .map(|capacity| Arc::new(MemoryChunkStore::new(capacity)) as Arc<dyn ChunkStore>);
        Self::with_store(config, store)
    }

    /// Creates the world driver with a caller-supplied chunk store.
    ///
    /// Fails with `WorldError::InvalidConfig` for out-of-range settings and
    /// `WorldError::Io` if the worker threads cannot be started.
    pub fn with_store(config: EngineConfig, store: Option<Arc<dyn ChunkStore>>) -> Result<Self> {
        config.validate()?;

        let generator_config = config.generator_config();
        info!(
            "Creating world: seed {}, {:?} terrain, load distance {}",
            generator_config.seed, generator_config.terrain, config.load_distance
        );

        let task_manager = match config.num_workers {
            0 => None,
            num_workers => Some(TaskManager::new(num_workers)?),
        };

        Ok(EngineState {
            generator: Arc::new(WorldGen::with_config(generator_config)),
            world: World::new(),
            cursor: StreamingCursor::new(config.load_distance),
            task_manager,
            store,
            observer_chunk: None,
            active_chunk: None,
            frame_count: 0,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn generator(&self) -> &WorldGen {
        &self.generator
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn observer_chunk(&self) -> Option<ChunkPos> {
        self.observer_chunk
    }

    pub fn active_chunk(&self) -> Option<ChunkPos> {
        self.active_chunk
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Distance in world units past which a chunk is evicted.
    pub fn unload_distance(&self) -> f64 {
        f64::from(self.config.load_distance) * CHUNK_SIZE as f64 + self.config.unload_buffer
    }

    /// True when no chunk build is queued or running on a worker.
    pub fn is_idle(&self) -> bool {
        self.task_manager
            .as_ref()
            .map_or(true, TaskManager::is_idle)
    }

    /// Advances the world by one frame around `observer`.
    pub fn tick(&mut self, observer: &dyn Observer, renderer: &mut dyn Renderer) -> FrameStats {
        let mut stats = FrameStats::default();
        let position = observer.position();
        let observer_chunk = ChunkPos::containing(position);

        if self.observer_chunk != Some(observer_chunk) {
            trace!("Observer entered chunk {:?}", observer_chunk);
            self.observer_chunk = Some(observer_chunk);
            self.active_chunk = None;
        }

        if let Some(task_manager) = self.task_manager.as_mut() {
            let loaded_before = self.world.len();
            let mut context = TaskContext {
                world: &mut self.world,
                renderer: &mut *renderer,
            };
            task_manager.process_completed_tasks(&mut context);
            stats.inserted += self.world.len().saturating_sub(loaded_before);
        }

        for _ in 0..self.config.chunk_lookups_per_frame {
            let candidate = observer_chunk + self.cursor.next_offset();
            self.request_chunk(candidate, renderer, &mut stats);
        }

        if let Some(task_manager) = self.task_manager.as_mut() {
            task_manager.process_queued_tasks();
        }

        if self.active_chunk.is_none() && self.world.lookup_index(observer_chunk).is_some() {
            self.active_chunk = Some(observer_chunk);
        }

        stats.evicted = self.evict(position, renderer);

        for chunk in self.world.iter() {
            if let Some(handle) = chunk.mesh_handle() {
                renderer.draw_mesh(handle, chunk.origin());
                stats.drawn += 1;
            }
        }

        self.frame_count += 1;
        trace!("Frame {}: {:?}", self.frame_count, stats);
        stats
    }

    /// Builds or schedules the chunk at `position` if it is unloaded.
    fn request_chunk(&mut self, position: ChunkPos, renderer: &mut dyn Renderer, stats: &mut FrameStats) {
        if self.world.chunk_state(position) != ChunkState::Unloaded {
            return;
        }

        match self.task_manager.as_mut() {
            Some(task_manager) => {
                self.world.mark_pending(position);
                task_manager.publish_task(Box::new(ChunkGenerationTask::new(
                    self.generator.clone(),
                    position,
                    self.store.clone(),
                )));
                stats.scheduled += 1;
            }
            None => match self
                .world
                .insert_chunk_from(position, &self.generator, self.store.as_deref())
            {
                Ok(InsertOutcome::Inserted(index)) => {
                    if let Some(chunk) = self.world.get_chunk_at_index_mut(index) {
                        chunk.upload_mesh(renderer);
                    }
                    stats.inserted += 1;
                }
                Ok(InsertOutcome::AlreadyPresent(_)) => {}
                Err(err) => {
                    warn!(
                        "Chunk {:?} left unloaded (status {}): {}",
                        position,
                        err.status_code(),
                        err
                    );
                    stats.failed += 1;
                }
            },
        }
    }

    /// Evicts distant chunks, releasing their meshes and saving their data.
    fn evict(&mut self, observer: cgmath::Point3<f64>, renderer: &mut dyn Renderer) -> usize {
        let evicted = self.world.evict_distant(observer, self.unload_distance());
        let count = evicted.len();

        for mut chunk in evicted {
            chunk.release_mesh(renderer);
            if self.active_chunk == Some(chunk.position()) {
                self.active_chunk = None;
            }
            if let Some(store) = self.store.as_ref() {
                store.save(chunk.position(), chunk.data());
            }
        }

        if count > 0 {
            debug!("Evicted {} chunks, {} remain", count, self.world.len());
        }
        count
    }
}
