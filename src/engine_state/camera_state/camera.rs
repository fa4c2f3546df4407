//! # Camera Implementation
//!
//! A free-flying camera that moves at a constant velocity. Orientation and
//! projection belong to the renderer; the world only needs the position.

use cgmath::{Point3, Vector3, Zero};
use web_time::Duration;

use super::Observer;

/// A point in world space moving at a constant velocity.
///
/// # Fields
/// - `position`: The camera's position in world space
/// - `velocity`: World units per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f64>,
    /// World units per second
    pub velocity: Vector3<f64>,
}

impl Camera {
    /// Creates a stationary camera at `position`.
    pub fn new<P: Into<Point3<f64>>>(position: P) -> Self {
        Camera {
            position: position.into(),
            velocity: Vector3::zero(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    /// Moves the camera by `velocity * dt`.
    pub fn update(&mut self, dt: Duration) {
        self.position += self.velocity * dt.as_secs_f64();
    }
}

impl Observer for Camera {
    fn position(&self) -> Point3<f64> {
        self.position
    }
}
