//! # Voxel World Demo Entry Point
//!
//! Runs the headless streaming demo from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

fn main() {
    if let Err(err) = voxel_world::run() {
        log::error!("{}", err);
        eprintln!("voxel-world: {}", err);
        std::process::exit(1);
    }
}
