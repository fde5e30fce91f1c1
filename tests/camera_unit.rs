//! Motion-model properties of the camera.

use affine_view::camera::{CameraState, Tuning};
use affine_view::command::Command;
use affine_view::mode::Mode;

fn camera() -> CameraState {
    CameraState::new(Mode::Affine, 320, 240, Tuning::default())
}

/// Small deterministic xorshift so the sequences are reproducible.
fn command_sequence(seed: u64, len: usize) -> Vec<Command> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            match state % 5 {
                0 | 1 => Command::Accelerate,
                2 | 3 => Command::Decelerate,
                _ => Command::None,
            }
        })
        .collect()
}

#[test]
fn test_velocity_never_exceeds_max() {
    let max = Tuning::default().max_vel;
    for seed in 1..20u64 {
        let mut cam = camera();
        for cmd in command_sequence(seed, 500) {
            cam.update(cmd, Mode::Affine);
            assert!(cam.velocity.abs() <= max, "velocity {} out of range", cam.velocity);
        }
    }
}

#[test]
fn test_velocity_saturates_in_both_directions() {
    let mut cam = camera();
    for _ in 0..50 {
        cam.update(Command::Accelerate, Mode::Affine);
    }
    assert_eq!(cam.velocity, 10.0);

    for _ in 0..100 {
        cam.update(Command::Decelerate, Mode::Affine);
    }
    assert_eq!(cam.velocity, -10.0);
}

/// Frames of `Command::None` until the velocity is exactly zero.
fn frames_to_stop(cam: &mut CameraState, limit: usize) -> usize {
    let mut frames = 0;
    while cam.velocity != 0.0 && frames <= limit {
        cam.update(Command::None, Mode::Affine);
        frames += 1;
    }
    frames
}

#[test]
fn test_velocity_decays_to_exactly_zero() {
    let decel = Tuning::default().decel;

    // Every speed reachable by holding accelerate or decelerate
    for presses in 1..=40 {
        for drive in [Command::Accelerate, Command::Decelerate] {
            let mut cam = camera();
            for _ in 0..presses {
                cam.apply(drive);
            }
            let start = cam.velocity;
            let bound = (start.abs() / decel).ceil() as usize;

            let frames = frames_to_stop(&mut cam, bound + 5);
            assert!(
                frames <= bound,
                "start {} took {} frames, bound {}",
                start,
                frames,
                bound
            );

            for _ in 0..10 {
                cam.update(Command::None, Mode::Affine);
                assert_eq!(cam.velocity, 0.0);
            }
        }
    }
}

#[test]
fn test_top_speed_stops_within_fifty_frames() {
    let mut cam = camera();
    for _ in 0..50 {
        cam.apply(Command::Accelerate);
    }
    assert_eq!(cam.velocity, 10.0);
    assert_eq!(frames_to_stop(&mut cam, 60), 50);
}

#[test]
fn test_accelerated_speeds_stop_on_time() {
    for (presses, expected_frames) in [(4, 6), (6, 9), (8, 12), (32, 48)] {
        let mut cam = camera();
        for _ in 0..presses {
            cam.apply(Command::Accelerate);
        }
        assert_eq!(frames_to_stop(&mut cam, 60), expected_frames, "{} presses", presses);
    }
}

#[test]
fn test_turn_velocity_bounded() {
    let max = Tuning::default().turn_max_vel;
    let mut cam = camera();
    for _ in 0..100 {
        cam.update(Command::TurnLeft, Mode::Affine);
        assert!(cam.turn_velocity <= max);
    }
    assert_eq!(cam.turn_velocity, max);
    for _ in 0..200 {
        cam.update(Command::TurnRight, Mode::Affine);
        assert!(cam.turn_velocity >= -max);
    }
    assert_eq!(cam.turn_velocity, -max);
}

#[test]
fn test_theta_drift_after_turn_and_decay_is_bounded() {
    let t = Tuning::default();
    let mut cam = camera();
    let start = cam.theta;

    cam.update(Command::TurnLeft, Mode::Affine);
    while cam.turn_velocity != 0.0 {
        cam.update(Command::None, Mode::Affine);
    }

    // One turn_accel step, then decay by turn_decel until stopped:
    // accel + (accel - decel) + (accel - 2 decel) + ...
    let mut expected = 0.0;
    let mut v = t.turn_accel;
    while v > 0.0 {
        expected += v;
        v = (v - t.turn_decel).max(0.0);
    }

    let drift = cam.theta - start;
    assert!((drift - expected).abs() < 1e-9, "drift {} expected {}", drift, expected);

    // Stays put once the turn velocity is zero
    let settled = cam.theta;
    for _ in 0..10 {
        cam.update(Command::None, Mode::Affine);
    }
    assert_eq!(cam.theta, settled);
}

#[test]
fn test_pan_in_affine_mode() {
    let mut cam = camera();
    let (x0, y0) = (cam.x0, cam.y0);
    cam.update(Command::PanLeft, Mode::Affine);
    cam.update(Command::PanUp, Mode::Affine);
    assert_eq!(cam.x0, x0 - 10.0);
    assert_eq!(cam.y0, y0 - 10.0);
}
