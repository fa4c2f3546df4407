//! # Task System Core Traits
//!
//! This module defines the fundamental building blocks of the task system,
//! which offloads chunk work from the driver thread to worker threads.
//!
//! ## Core Components
//! - `Task`: Represents a unit of work that can be executed on a worker
//! - `TaskResult`: Represents the result of a completed task
//! - `TaskContext`: Driver-thread state a result is allowed to mutate
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` is called on the driver thread
//! 5. The result can update the world, upload meshes and spawn new tasks
//!
//! ## Thread Safety
//! - `Task` must be `Send` to be transferred between threads
//! - `TaskResult` must be `Send` to be transferred back to the driver thread
//! - Tasks only share immutable data (`Arc<WorldGen>`) or internally
//!   synchronised stores; the world itself is never touched off the driver thread

use crate::engine_state::{rendering::Renderer, voxels::world::World};

/// Driver-thread state handed to [`TaskResult::handle_result`].
pub struct TaskContext<'a> {
    /// The loaded chunk collection
    pub world: &'a mut World,
    /// Backend receiving mesh uploads
    pub renderer: &'a mut dyn Renderer,
}

/// A trait representing a unit of work that can be executed asynchronously.
///
/// Tasks should own all the data they need. They run on a worker thread and
/// must not touch driver-thread state.
pub trait Task: Send {
    /// Processes the task and returns a result.
    ///
    /// Errors are carried inside the result rather than panicking; the result
    /// decides how to recover on the driver thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;

    /// Result applied instead of `process()`'s when the task's worker stops
    /// before answering.
    ///
    /// Built on the driver thread when the task is handed to a worker. Tasks
    /// that leave no driver-side state behind can keep the default.
    fn fallback_result(&self) -> Option<Box<dyn TaskResult + Send>> {
        None
    }
}

/// A trait representing the result of processing a `Task`.
///
/// Handled on the driver thread. Keep `handle_result` cheap: it runs inside the
/// frame.
pub trait TaskResult: Send {
    /// Applies the result and returns follow-up tasks (possibly none).
    fn handle_result(self: Box<Self>, context: &mut TaskContext<'_>) -> Vec<Box<dyn Task + Send>>;
}
