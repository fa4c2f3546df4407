#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunked, procedurally generated voxel world that streams chunks in and out
//! around a moving observer.
//!
//! The crate covers the world itself: block coordinates, dense chunk storage, a
//! deterministic terrain generator, face-culled chunk meshing and the chunk
//! manager that keeps the neighbourhood of the observer loaded. Drawing is
//! delegated to a [`Renderer`](engine_state::rendering::Renderer) that receives
//! finished vertex buffers; [`HeadlessRenderer`](engine_state::rendering::HeadlessRenderer)
//! implements it without a GPU.
//!
//! ## Key Modules
//!
//! * `core` - Configuration, the error type and shared resource containers
//! * `engine_state` - The frame driver plus voxels, meshing, rendering contract and workers
//!
//! ## Usage
//!
//! ```rust
//! use voxel_world::core::EngineConfig;
//! use voxel_world::engine_state::{camera_state::Camera, rendering::HeadlessRenderer, EngineState};
//!
//! let mut engine_state = EngineState::new(EngineConfig::default()).unwrap();
//! let mut renderer = HeadlessRenderer::new();
//! let camera = Camera::new([0.0, 0.0, 0.0]);
//!
//! engine_state.tick(&camera, &mut renderer);
//! assert_eq!(engine_state.world().len(), 1);
//! ```
//!
//! ## Performance Considerations
//!
//! * Chunk-based voxel storage with O(1) block access
//! * A bounded number of chunk builds per frame instead of one long stall
//! * Optional worker threads for generation and meshing

use cgmath::Vector3;
use log::info;
use web_time::{Duration, Instant};

use crate::core::{error::Result, EngineConfig};
use crate::engine_state::{camera_state::Camera, rendering::HeadlessRenderer, EngineState};

pub mod core;
pub mod engine_state;

/// Frames simulated by the demo.
pub const DEMO_FRAMES: u64 = 600;
/// Simulated time per demo frame.
pub const DEMO_FRAME_TIME: Duration = Duration::from_millis(16);
/// Demo camera speed in world units per second.
pub const DEMO_CAMERA_SPEED: f64 = 8.0;

/// Runs the headless demo.
///
/// Reads an optional JSON configuration path from the first command line
/// argument, then flies a camera along +X for `DEMO_FRAMES` frames, logging
/// progress through `env_logger` (set `RUST_LOG=info` to see it).
pub fn run() -> Result<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };

    let mut engine_state = EngineState::new(config)?;
    let mut renderer = HeadlessRenderer::new();
    let mut camera =
        Camera::new([0.0, 0.0, 0.0]).with_velocity(Vector3::new(DEMO_CAMERA_SPEED, 0.0, 0.0));

    let start = Instant::now();
    for _ in 0..DEMO_FRAMES {
        renderer.begin_frame();
        camera.update(DEMO_FRAME_TIME);
        engine_state.tick(&camera, &mut renderer);

        if engine_state.frame_count() % 60 == 0 {
            info!(
                "Frame {}: {} chunks loaded, {} meshes live ({} bytes), {} draw calls",
                engine_state.frame_count(),
                engine_state.world().len(),
                renderer.live_meshes(),
                renderer.live_bytes(),
                renderer.draw_calls_this_frame()
            );
        }
    }

    info!(
        "Simulated {} frames in {:?}: {} chunks loaded, {} uploads, {} destroys",
        engine_state.frame_count(),
        start.elapsed(),
        engine_state.world().len(),
        renderer.total_uploads(),
        renderer.total_destroys()
    );

    Ok(())
}
