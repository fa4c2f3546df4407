//! The driver with chunk generation on worker threads.

use std::thread;
use std::time::Duration;

use cgmath::Point3;
use voxel_world::core::EngineConfig;
use voxel_world::engine_state::rendering::HeadlessRenderer;
use voxel_world::engine_state::voxels::{coordinates::ChunkPos, world::ChunkState};
use voxel_world::engine_state::EngineState;

fn worker_config() -> EngineConfig {
    EngineConfig {
        seed: Some(3),
        load_distance: 2,
        chunk_lookups_per_frame: 8,
        num_workers: 2,
        store_capacity: 0,
        ..EngineConfig::default()
    }
}

fn tick_until_idle(engine_state: &mut EngineState, observer: Point3<f64>, renderer: &mut HeadlessRenderer) {
    for _ in 0..5_000 {
        engine_state.tick(&observer, renderer);
        if engine_state.is_idle() && engine_state.world().pending_count() == 0 {
            return;
        }
        thread::sleep(Duration::from_millis(1));
    }
    panic!("chunk workers did not finish");
}

#[test]
fn workers_fill_the_load_cube() {
    let mut engine_state = EngineState::new(worker_config()).unwrap();
    let mut renderer = HeadlessRenderer::new();
    let observer = Point3::new(1.0, 1.0, 1.0);

    let stats = engine_state.tick(&observer, &mut renderer);
    assert_eq!(stats.scheduled, 8);
    assert_eq!(engine_state.world().pending_count(), 8);
    assert_eq!(
        engine_state.world().chunk_state(ChunkPos::new(0, 0, 0)),
        ChunkState::Pending
    );

    tick_until_idle(&mut engine_state, observer, &mut renderer);

    assert_eq!(engine_state.world().len(), 8);
    let with_mesh = engine_state
        .world()
        .iter()
        .filter(|chunk| chunk.mesh_handle().is_some())
        .count();
    assert_eq!(renderer.live_meshes(), with_mesh);
}

#[test]
fn workers_build_the_same_terrain_as_inline_mode() {
    let mut threaded = EngineState::new(worker_config()).unwrap();
    let mut inline = EngineState::new(EngineConfig {
        num_workers: 0,
        ..worker_config()
    })
    .unwrap();
    let mut renderer = HeadlessRenderer::new();
    let observer = Point3::new(1.0, 1.0, 1.0);

    tick_until_idle(&mut threaded, observer, &mut renderer);
    inline.tick(&observer, &mut renderer);

    assert_eq!(threaded.world().len(), inline.world().len());
    for (a, b) in threaded.world().iter().zip(inline.world().iter()) {
        assert_eq!(a.position(), b.position());
        assert_eq!(a.data(), b.data());
    }
}
