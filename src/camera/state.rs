//! Camera position, heading and momentum.

use crate::command::Command;
use crate::mode::Mode;

use super::Tuning;

/// Relative slack for the last decay step.
const DECAY_EPSILON: f64 = 1e-9;

/// The full camera state threaded through the frame loop.
///
/// Position is in image-pixel units. `theta` is the heading in radians,
/// `tilt` offsets the vertical vanishing reference and `height` is the
/// camera elevation above the ground plane. `zoom` only affects the flat
/// view.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub x0: f64,
    pub y0: f64,
    pub theta: f64,
    pub tilt: f64,
    pub height: f64,
    pub zoom: f64,
    pub velocity: f64,
    pub turn_velocity: f64,
    pub tuning: Tuning,
}

impl CameraState {
    /// Camera for the given mode over an image of `width` x `height` pixels.
    ///
    /// The flat view starts at the image origin. The perspective camera
    /// starts horizontally centred at the bottom edge of the image.
    pub fn new(mode: Mode, width: u32, height: u32, tuning: Tuning) -> Self {
        let (x0, y0) = match mode {
            Mode::View => (0.0, 0.0),
            Mode::Affine => (-(width as f64) / 2.0, height as f64),
        };

        Self {
            x0,
            y0,
            theta: tuning.initial_theta,
            tilt: tuning.initial_tilt,
            height: tuning.initial_height,
            zoom: 1.0,
            velocity: 0.0,
            turn_velocity: 0.0,
            tuning,
        }
    }

    /// Advance one frame: apply `command`, then (in affine mode) move the
    /// camera along its heading and rotate it by the turn velocity.
    pub fn update(&mut self, command: Command, mode: Mode) {
        self.apply(command);
        if mode == Mode::Affine {
            self.advance();
        }
    }

    /// Apply the effect of a command without integrating motion.
    ///
    /// Velocity and turn velocity decay every frame their driving command
    /// is absent, whatever the mode.
    pub fn apply(&mut self, command: Command) {
        let t = self.tuning;

        match command {
            Command::PanUp => self.y0 -= t.pan_step,
            Command::PanDown => self.y0 += t.pan_step,
            Command::PanRight => self.x0 += t.pan_step,
            Command::PanLeft => self.x0 -= t.pan_step,
            Command::ZoomIn => self.zoom += t.zoom_step,
            // No floor: a zoom at or below zero degenerates the flat view
            Command::ZoomOut => self.zoom -= t.zoom_step,
            Command::TiltUp => self.tilt += t.tilt_step,
            Command::TiltDown => self.tilt -= t.tilt_step,
            Command::Raise => self.height = step_nonzero(self.height, t.height_step),
            Command::Lower => self.height = step_nonzero(self.height, -t.height_step),
            _ => {}
        }

        self.velocity = match command {
            Command::Accelerate => (self.velocity + t.accel).min(t.max_vel),
            Command::Decelerate => (self.velocity - t.accel).max(-t.max_vel),
            _ => decay(self.velocity, t.decel),
        };

        self.turn_velocity = match command {
            Command::TurnLeft => (self.turn_velocity + t.turn_accel).min(t.turn_max_vel),
            Command::TurnRight => (self.turn_velocity - t.turn_accel).max(-t.turn_max_vel),
            _ => decay(self.turn_velocity, t.turn_decel),
        };
    }

    /// Integrate one frame of motion along the current heading.
    pub fn advance(&mut self) {
        self.x0 += self.velocity * self.theta.sin();
        self.y0 += self.velocity * self.theta.cos();
        self.theta += self.turn_velocity;
    }
}

/// Move `value` toward zero by `amount`, stopping at zero.
///
/// A remainder within rounding error of one step counts as one step, so
/// repeated decay lands on exactly zero after `ceil(|value| / amount)` calls.
fn decay(value: f64, amount: f64) -> f64 {
    if value.abs() <= amount * (1.0 + DECAY_EPSILON) {
        0.0
    } else if value < 0.0 {
        (value + amount).min(0.0)
    } else {
        (value - amount).max(0.0)
    }
}

/// Add `step` to `value`, stepping over exactly zero.
fn step_nonzero(value: f64, step: f64) -> f64 {
    let next = value + step;
    if next == 0.0 {
        next + step
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn affine_camera() -> CameraState {
        CameraState::new(Mode::Affine, 64, 48, Tuning::default())
    }

    #[test]
    fn test_initial_view_state() {
        let cam = CameraState::new(Mode::View, 64, 48, Tuning::default());
        assert_eq!(cam.x0, 0.0);
        assert_eq!(cam.y0, 0.0);
        assert_eq!(cam.zoom, 1.0);
        assert_eq!(cam.theta, PI);
    }

    #[test]
    fn test_initial_affine_state() {
        let cam = affine_camera();
        assert_eq!(cam.x0, -32.0);
        assert_eq!(cam.y0, 48.0);
        assert_eq!(cam.tilt, 100.0);
        assert_eq!(cam.height, 100.0);
        assert_eq!(cam.velocity, 0.0);
        assert_eq!(cam.turn_velocity, 0.0);
    }

    #[test]
    fn test_pan_moves_by_step() {
        let mut cam = CameraState::new(Mode::View, 64, 48, Tuning::default());
        cam.update(Command::PanRight, Mode::View);
        cam.update(Command::PanDown, Mode::View);
        assert_eq!((cam.x0, cam.y0), (10.0, 10.0));
        cam.update(Command::PanLeft, Mode::View);
        cam.update(Command::PanLeft, Mode::View);
        cam.update(Command::PanUp, Mode::View);
        assert_eq!((cam.x0, cam.y0), (-10.0, 0.0));
    }

    #[test]
    fn test_zoom_has_no_floor() {
        let mut cam = CameraState::new(Mode::View, 64, 48, Tuning::default());
        for _ in 0..12 {
            cam.update(Command::ZoomOut, Mode::View);
        }
        assert!(cam.zoom < 0.0);
    }

    #[test]
    fn test_accelerate_clamps() {
        let mut cam = affine_camera();
        for _ in 0..100 {
            cam.apply(Command::Accelerate);
        }
        assert_eq!(cam.velocity, 10.0);
    }

    #[test]
    fn test_decay_does_not_cross_zero() {
        let mut cam = affine_camera();
        cam.velocity = 0.1;
        cam.apply(Command::None);
        assert_eq!(cam.velocity, 0.0);

        cam.velocity = -0.1;
        cam.apply(Command::None);
        assert_eq!(cam.velocity, 0.0);
    }

    #[test]
    fn test_decay_absorbs_rounding_remainder() {
        // 1.2 - 5 * 0.2 leaves 0.2000000000000002 in f64
        assert_eq!(decay(0.2000000000000002, 0.2), 0.0);
        assert_eq!(decay(-0.2000000000000002, 0.2), 0.0);
        assert!((decay(0.5, 0.2) - 0.3).abs() < 1e-12);
        assert!((decay(-0.5, 0.2) + 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_turn_momentum_keeps_rotating() {
        let mut cam = affine_camera();
        cam.update(Command::TurnLeft, Mode::Affine);
        let after_first = cam.theta;
        assert!(after_first > PI);
        cam.update(Command::None, Mode::Affine);
        assert!(cam.theta > after_first, "theta should keep increasing while turn velocity decays");
    }

    #[test]
    fn test_motion_follows_heading() {
        let mut cam = affine_camera();
        cam.theta = 0.0;
        cam.update(Command::Accelerate, Mode::Affine);
        assert!((cam.x0 - -32.0).abs() < 1e-12);
        assert!((cam.y0 - 48.3).abs() < 1e-12);
    }

    #[test]
    fn test_view_mode_does_not_integrate() {
        let mut cam = CameraState::new(Mode::View, 64, 48, Tuning::default());
        cam.update(Command::Accelerate, Mode::View);
        assert_eq!((cam.x0, cam.y0), (0.0, 0.0));
        assert!(cam.velocity > 0.0);
    }

    #[test]
    fn test_tilt_and_height_steps() {
        let mut cam = affine_camera();
        cam.apply(Command::TiltUp);
        assert_eq!(cam.tilt, 105.0);
        cam.apply(Command::TiltDown);
        cam.apply(Command::TiltDown);
        assert_eq!(cam.tilt, 95.0);
        cam.apply(Command::Raise);
        assert_eq!(cam.height, 101.0);
        cam.apply(Command::Lower);
        assert_eq!(cam.height, 100.0);
    }

    #[test]
    fn test_height_skips_zero() {
        let mut cam = affine_camera();
        cam.height = 1.0;
        cam.apply(Command::Lower);
        assert_eq!(cam.height, -1.0);
        cam.apply(Command::Raise);
        assert_eq!(cam.height, 1.0);
    }

    #[test]
    fn test_quit_leaves_state_alone() {
        let mut cam = affine_camera();
        let before = cam.clone();
        cam.apply(Command::Quit);
        assert_eq!(cam, before);
    }
}
