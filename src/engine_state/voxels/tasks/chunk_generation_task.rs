//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask` which builds a chunk off the
//! driver thread. The task is scheduled when the streaming loop finds a missing
//! chunk near the observer.
//!
//! The worker restores the chunk from the chunk store or generates it, then
//! meshes it. The driver thread inserts the finished chunk into the world and
//! uploads its mesh.

use std::sync::Arc;

use log::{debug, warn};

use crate::{
    core::error::{Result, WorldError},
    engine_state::{
        task_management::task::{Task, TaskContext, TaskResult},
        voxels::{
            chunk::Chunk, coordinates::ChunkPos, storage::ChunkStore, world::InsertOutcome,
            world_gen::WorldGen,
        },
    },
};

/// A task that generates and meshes one chunk.
pub struct ChunkGenerationTask {
    /// Shared, read-only generator
    generator: Arc<WorldGen>,
    /// The position of the chunk to build (in chunk coordinates)
    position: ChunkPos,
    /// Store consulted before generating
    store: Option<Arc<dyn ChunkStore>>,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    ///
    /// # Arguments
    /// * `generator` - The world generator, shared with other workers
    /// * `position` - The chunk coordinates to build
    /// * `store` - Optional store holding previously evicted chunks
    pub fn new(
        generator: Arc<WorldGen>,
        position: ChunkPos,
        store: Option<Arc<dyn ChunkStore>>,
    ) -> Self {
        ChunkGenerationTask {
            generator,
            position,
            store,
        }
    }
}

impl Task for ChunkGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let chunk = Chunk::load_or_generate(self.position, &self.generator, self.store.as_deref());

        Box::new(ChunkGenerationTaskResult {
            position: self.position,
            chunk,
        })
    }

    fn fallback_result(&self) -> Option<Box<dyn TaskResult + Send>> {
        Some(Box::new(ChunkGenerationTaskResult {
            position: self.position,
            chunk: Err(WorldError::WorkerStopped),
        }))
    }
}

/// The result of a chunk generation task.
pub struct ChunkGenerationTaskResult {
    position: ChunkPos,
    chunk: Result<Chunk>,
}

impl TaskResult for ChunkGenerationTaskResult {
    /// Inserts the chunk and uploads its mesh.
    ///
    /// A failed build only clears the pending mark, so the streaming loop
    /// requests the position again on a later sweep.
    fn handle_result(self: Box<Self>, context: &mut TaskContext<'_>) -> Vec<Box<dyn Task + Send>> {
        let chunk = match self.chunk {
            Ok(chunk) => chunk,
            Err(err) => {
                warn!("Failed to build chunk {:?}: {}", self.position, err);
                context.world.clear_pending(self.position);
                return Vec::new();
            }
        };

        match context.world.insert_built_chunk(chunk) {
            Ok(InsertOutcome::Inserted(index)) => {
                if let Some(chunk) = context.world.get_chunk_at_index_mut(index) {
                    chunk.upload_mesh(&mut *context.renderer);
                }
            }
            Ok(InsertOutcome::AlreadyPresent(_)) => {
                debug!("Chunk {:?} was already loaded", self.position);
            }
            Err(err) => {
                warn!("Failed to insert chunk {:?}: {}", self.position, err);
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::HeadlessRenderer;
    use crate::engine_state::voxels::world::{ChunkState, World};

    fn run(task: ChunkGenerationTask, world: &mut World, renderer: &mut HeadlessRenderer) {
        let result = task.process();
        let mut context = TaskContext { world, renderer };
        let follow_ups = result.handle_result(&mut context);
        assert!(follow_ups.is_empty());
    }

    #[test]
    fn result_inserts_and_uploads() {
        let generator = Arc::new(WorldGen::new(0));
        let mut world = World::new();
        let mut renderer = HeadlessRenderer::new();
        let position = ChunkPos::new(0, 0, 0);

        world.mark_pending(position);
        run(ChunkGenerationTask::new(generator, position, None), &mut world, &mut renderer);

        assert_eq!(world.chunk_state(position), ChunkState::Loaded);
        let handle = world.get_chunk(position).and_then(|chunk| chunk.mesh_handle());
        assert!(handle.is_some_and(|handle| renderer.is_live(handle)));
    }

    #[test]
    fn duplicate_result_is_dropped() {
        let generator = Arc::new(WorldGen::new(0));
        let mut world = World::new();
        let mut renderer = HeadlessRenderer::new();
        let position = ChunkPos::new(0, 0, 0);

        run(ChunkGenerationTask::new(generator.clone(), position, None), &mut world, &mut renderer);
        run(ChunkGenerationTask::new(generator, position, None), &mut world, &mut renderer);

        assert_eq!(world.len(), 1);
        assert_eq!(renderer.total_uploads(), 1);
    }

    #[test]
    fn failed_build_clears_pending() {
        let mut world = World::new();
        let mut renderer = HeadlessRenderer::new();
        let position = ChunkPos::new(4, 4, 4);
        world.mark_pending(position);

        let result: Box<dyn TaskResult + Send> = Box::new(ChunkGenerationTaskResult {
            position,
            chunk: Err(WorldError::Allocation),
        });
        let mut context = TaskContext {
            world: &mut world,
            renderer: &mut renderer,
        };
        result.handle_result(&mut context);

        assert_eq!(world.chunk_state(position), ChunkState::Unloaded);
        assert!(world.is_empty());
    }

    #[test]
    fn fallback_releases_the_pending_position() {
        let generator = Arc::new(WorldGen::new(0));
        let mut world = World::new();
        let mut renderer = HeadlessRenderer::new();
        let position = ChunkPos::new(-2, 0, 5);
        world.mark_pending(position);

        let task = ChunkGenerationTask::new(generator, position, None);
        let fallback = task.fallback_result().unwrap();
        let mut context = TaskContext {
            world: &mut world,
            renderer: &mut renderer,
        };
        assert!(fallback.handle_result(&mut context).is_empty());

        assert_eq!(world.chunk_state(position), ChunkState::Unloaded);
        assert_eq!(renderer.total_uploads(), 0);
    }
}
