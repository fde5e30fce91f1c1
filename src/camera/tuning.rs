//! Motion constants for the camera.

use std::f64::consts::PI;

/// Acceleration, decay and step sizes applied by [`super::CameraState::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Velocity gained per `accelerate`/`decelerate` frame
    pub accel: f64,
    /// Velocity lost per frame with no driving command
    pub decel: f64,
    /// Absolute velocity bound
    pub max_vel: f64,
    pub turn_accel: f64,
    pub turn_decel: f64,
    pub turn_max_vel: f64,
    /// Pan distance in image pixels
    pub pan_step: f64,
    pub zoom_step: f64,
    pub tilt_step: f64,
    pub height_step: f64,
    /// Starting heading in radians
    pub initial_theta: f64,
    pub initial_tilt: f64,
    pub initial_height: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            accel: 0.3,
            decel: 0.2,
            max_vel: 10.0,
            turn_accel: PI / 1024.0,
            turn_decel: PI / 2048.0,
            turn_max_vel: PI / 128.0,
            pan_step: 10.0,
            zoom_step: 0.1,
            tilt_step: 5.0,
            height_step: 1.0,
            initial_theta: PI,
            initial_tilt: 100.0,
            initial_height: 100.0,
        }
    }
}
