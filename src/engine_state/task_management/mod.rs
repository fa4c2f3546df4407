//! # Task Management System
//!
//! This module provides a small worker pool for building chunks off the driver
//! thread.
//!
//! ## Architecture Overview
//!
//! The task management system consists of several key components:
//! - `TaskManager`: Central coordinator for task distribution and worker management
//! - `Task`: A unit of work executed on a worker thread
//! - `TaskResult`: The result of a completed task, applied on the driver thread
//! - `TaskChannel`: Communication channel between the driver thread and one worker
//!
//! Each worker is a `std::thread` with a dedicated task channel and result
//! channel. Tasks are distributed round-robin; a worker accepts at most
//! `MAX_TASKS_IN_FLIGHT` tasks at a time and everything else waits in a FIFO
//! queue on the driver thread.
//!
//! ## Task Lifecycle
//! 1. Tasks are created and published via `TaskManager::publish_task()`
//! 2. The manager distributes tasks to available worker channels using round-robin
//! 3. Workers process tasks and send back results
//! 4. Results are applied on the driver thread in `process_completed_tasks()`
//! 5. Results can spawn new tasks, which are published again
//!
//! If a worker stops (for example because a task panicked), the fallback
//! results of its unanswered tasks are applied instead. Once every worker has
//! stopped, queued tasks are resolved the same way.
//!
//! ## Example Usage
//! ```
//! use voxel_world::engine_state::rendering::HeadlessRenderer;
//! use voxel_world::engine_state::task_management::{task::TaskContext, TaskManager};
//! use voxel_world::engine_state::voxels::{
//!     coordinates::ChunkPos, tasks::ChunkGenerationTask, world::World, world_gen::WorldGen,
//! };
//! use std::sync::Arc;
//!
//! let mut task_manager = TaskManager::new(2).unwrap();
//! let generator = Arc::new(WorldGen::new(0));
//! let mut world = World::new();
//! let mut renderer = HeadlessRenderer::new();
//!
//! let position = ChunkPos::new(0, 0, 0);
//! world.mark_pending(position);
//! task_manager.publish_task(Box::new(ChunkGenerationTask::new(generator, position, None)));
//!
//! while !task_manager.is_idle() {
//!     let mut context = TaskContext { world: &mut world, renderer: &mut renderer };
//!     task_manager.process_completed_tasks(&mut context);
//!     task_manager.process_queued_tasks();
//! }
//! assert_eq!(world.len(), 1);
//! ```

pub mod task;

use log::{debug, info, warn};
use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use task::{Task, TaskContext, TaskResult};

use crate::core::error::Result;

/// A communication channel between the driver thread and a worker thread.
///
/// # Fields
/// - `task_sender`: Sends tasks from the driver thread to the worker
/// - `result_receiver`: Receives task results from the worker
/// - `in_flight`: One entry per task sent and not yet answered, holding its
///   fallback result, oldest first
/// - `worker`: Handle to the worker thread, joined on shutdown
pub struct TaskChannel {
    task_sender: Option<Sender<Box<dyn Task + Send>>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    in_flight: VecDeque<Option<Box<dyn TaskResult + Send>>>,
    disconnected: bool,
    worker: Option<JoinHandle<()>>,
}

impl TaskChannel {
    fn accepts_tasks(&self) -> bool {
        !self.disconnected && self.in_flight.len() < MAX_TASKS_IN_FLIGHT
    }
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// The `TaskManager` is responsible for:
/// - Creating and joining worker threads
/// - Distributing tasks across available workers
/// - Collecting results and applying them on the driver thread
/// - Queuing tasks while all workers are busy
///
/// With zero workers every published task stays queued; the driver builds
/// chunks inline in that mode and does not publish tasks.
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
///
/// Keeping this at 1 leaves the remaining work in the driver-side queue, where
/// it can still be reordered or dropped.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Creates a new `TaskManager` with the specified number of worker threads.
    ///
    /// Fails with `WorldError::Io` if a worker thread cannot be spawned.
    pub fn new(num_workers: usize) -> Result<Self> {
        let mut channels = Vec::with_capacity(num_workers);

        if num_workers > 0 {
            info!(
                "Starting {} chunk workers (available parallelism: {:?})",
                num_workers,
                thread::available_parallelism()
            );
        }

        for worker_index in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

            let task_closure = move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            };

            let worker = thread::Builder::new()
                .name(format!("chunk-worker-{worker_index}"))
                .spawn(task_closure)?;

            channels.push(TaskChannel {
                task_sender: Some(task_tx),
                result_receiver: result_rx,
                in_flight: VecDeque::with_capacity(MAX_TASKS_IN_FLIGHT),
                disconnected: false,
                worker: Some(worker),
            });
        }

        Ok(TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        })
    }

    pub fn num_workers(&self) -> usize {
        self.channels.len()
    }

    /// Tasks currently being processed by workers.
    pub fn tasks_in_flight(&self) -> usize {
        self.channels
            .iter()
            .map(|channel| channel.in_flight.len())
            .sum()
    }

    /// Tasks waiting for a free worker.
    pub fn queued_len(&self) -> usize {
        self.queued_tasks.len()
    }

    /// True when no task is queued or in flight on a live worker.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty()
            && self
                .channels
                .iter()
                .all(|channel| channel.disconnected || channel.in_flight.is_empty())
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// Returns the task on failure so it can be requeued.
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> std::result::Result<(), Box<dyn Task + Send>> {
        let channel = &mut self.channels[channel_idx];
        let Some(sender) = channel.task_sender.as_ref() else {
            return Err(task);
        };

        let fallback = task.fallback_result();
        match sender.send(task) {
            Ok(_) => {
                channel.in_flight.push_back(fallback);
                Ok(())
            }
            Err(error) => {
                warn!("Chunk worker {} disconnected", channel_idx);
                channel.disconnected = true;
                Err(error.0)
            }
        }
    }

    /// Finds an available worker channel, round-robin from the last used one.
    fn find_available_channel(&self) -> Option<usize> {
        if self.channels.is_empty() {
            return None;
        }

        let start_channel = self.current_channel;
        let mut current = start_channel;

        loop {
            if self.channels[current].accepts_tasks() {
                return Some(current);
            }
            current = (current + 1) % self.channels.len();
            if current == start_channel {
                return None;
            }
        }
    }

    /// Publishes a new task for execution.
    ///
    /// Returns `true` if the task was handed to a worker immediately and
    /// `false` if it was queued.
    pub fn publish_task(&mut self, task: Box<dyn Task + Send>) -> bool {
        match self.find_available_channel() {
            Some(channel_idx) => match self.try_send_task(task, channel_idx) {
                Ok(_) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    true
                }
                Err(task) => {
                    self.queued_tasks.push_back(task);
                    false
                }
            },
            None => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Hands queued tasks to workers until the queue is empty or every worker is busy.
    ///
    /// Call once per frame.
    pub fn process_queued_tasks(&mut self) {
        while !self.queued_tasks.is_empty() {
            let Some(channel_idx) = self.find_available_channel() else {
                break;
            };
            let Some(task) = self.queued_tasks.pop_front() else {
                break;
            };

            match self.try_send_task(task, channel_idx) {
                Ok(_) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                }
                Err(task) => {
                    self.queued_tasks.push_front(task);
                }
            }
        }
    }

    /// Applies every result the workers have finished.
    ///
    /// Must be called on the driver thread. Tasks left unanswered by a stopped
    /// worker get their fallback result applied instead, and so do queued
    /// tasks once no worker is left. Follow-up tasks returned by the results
    /// are published afterwards.
    pub fn process_completed_tasks(&mut self, context: &mut TaskContext<'_>) {
        let mut tasks_to_queue = Vec::new();

        for (channel_idx, channel) in self.channels.iter_mut().enumerate() {
            loop {
                match channel.result_receiver.try_recv() {
                    Ok(result) => {
                        channel.in_flight.pop_front();
                        tasks_to_queue.extend(result.handle_result(context));
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if !channel.disconnected {
                            warn!(
                                "Chunk worker {} stopped with {} task(s) in flight",
                                channel_idx,
                                channel.in_flight.len()
                            );
                            channel.disconnected = true;
                        }
                        for fallback in channel.in_flight.drain(..).flatten() {
                            tasks_to_queue.extend(fallback.handle_result(context));
                        }
                        break;
                    }
                }
            }
        }

        if !self.channels.is_empty() && self.channels.iter().all(|channel| channel.disconnected) {
            if !self.queued_tasks.is_empty() {
                warn!(
                    "No chunk worker left, resolving {} queued task(s)",
                    self.queued_tasks.len()
                );
            }
            for task in self.queued_tasks.drain(..) {
                if let Some(fallback) = task.fallback_result() {
                    tasks_to_queue.extend(fallback.handle_result(context));
                }
            }
        }

        for task in tasks_to_queue {
            self.publish_task(task);
        }
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        if !self.queued_tasks.is_empty() {
            debug!("Dropping {} queued chunk tasks", self.queued_tasks.len());
        }

        // Closing the task channel ends each worker's receive loop.
        for channel in &mut self.channels {
            channel.task_sender.take();
        }
        for channel in &mut self.channels {
            if let Some(worker) = channel.worker.take() {
                if worker.join().is_err() {
                    warn!("Chunk worker panicked before shutdown");
                }
            }
        }
    }
}
