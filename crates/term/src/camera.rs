//! Orbit camera around the board.
//!
//! The terminal view has no perspective projection, but the camera still decides
//! which way is "away" for the player: its forward vector is the view direction
//! handed to the game core every frame.

use glam::{Quat, Vec3};

use crate::input::InputState;
use crate::types::{Command, CAMERA_ROTATION_STEP_DEGREES};

/// Directions closer to vertical than this are rejected
const MAX_VERTICAL_DOT: f32 = 0.999;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
}

impl OrbitCamera {
    pub fn new(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            position,
            target,
            up,
        }
    }

    /// Camera outside the board's corner, level with its middle, looking at its center
    pub fn centered_on(width: u32, depth: u32, height: u32) -> Self {
        let (w, d, h) = (width as f32, depth as f32, height as f32);
        Self::new(
            Vec3::new(2.5 * w, h / 2.0, 2.5 * d),
            Vec3::new(w / 2.0, h / 2.0, d / 2.0),
            Vec3::Y,
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    pub fn left(&self) -> Vec3 {
        self.up.cross(self.forward()).normalize()
    }

    /// Orbit around the target: pitch by `left_rot` about the camera's left axis,
    /// then yaw by `up_rot` about world +Y (radians).
    ///
    /// Returns false, leaving the camera unchanged, when the new direction would
    /// be (nearly) vertical.
    pub fn rotate_around_target(&mut self, left_rot: f32, up_rot: f32) -> bool {
        let rotation =
            Quat::from_axis_angle(Vec3::Y, up_rot) * Quat::from_axis_angle(self.left(), left_rot);
        let direction = rotation * (self.target - self.position);
        let up = rotation * self.up;

        if direction.normalize().dot(Vec3::Y).abs() > MAX_VERTICAL_DOT {
            return false;
        }

        self.position = self.target - direction;
        self.up = up;
        true
    }
}

/// Turns camera commands into orbit steps
#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraController {
    step_radians: f32,
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self {
            step_radians: CAMERA_ROTATION_STEP_DEGREES.to_radians(),
        }
    }
}

impl OrbitCameraController {
    pub fn new(step_degrees: f32) -> Self {
        Self {
            step_radians: step_degrees.to_radians(),
        }
    }

    /// Apply this frame's camera presses. Returns whether the camera moved.
    pub fn update(&self, camera: &mut OrbitCamera, input: &InputState) -> bool {
        let step = self.step_radians;
        let mut moved = false;
        if input.is_key_pressed(Command::CameraLeft) {
            moved |= camera.rotate_around_target(0.0, step);
        }
        if input.is_key_pressed(Command::CameraRight) {
            moved |= camera.rotate_around_target(0.0, -step);
        }
        if input.is_key_pressed(Command::CameraUp) {
            moved |= camera.rotate_around_target(step, 0.0);
        }
        if input.is_key_pressed(Command::CameraDown) {
            moved |= camera.rotate_around_target(-step, 0.0);
        }
        if moved {
            log::debug!("camera forward {:.2}", camera.forward());
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_centered_on_board() {
        let camera = OrbitCamera::centered_on(10, 10, 22);
        assert_eq!(camera.position(), Vec3::new(25.0, 11.0, 25.0));
        assert_eq!(camera.target(), Vec3::new(5.0, 11.0, 5.0));
        let expected = Vec3::new(-1.0, 0.0, -1.0).normalize();
        assert!(approx(camera.forward(), expected));
    }

    #[test]
    fn test_yaw_keeps_distance() {
        let mut camera = OrbitCamera::centered_on(10, 10, 22);
        let distance = (camera.target() - camera.position()).length();
        assert!(camera.rotate_around_target(0.0, FRAC_PI_4));
        let after = (camera.target() - camera.position()).length();
        assert!((distance - after).abs() < 1e-3);
        assert!(camera.forward().y.abs() < 1e-5);
        // An eighth turn from the corner lines up with an axis
        let f = camera.forward();
        assert!(f.x.abs() < 1e-4 || f.z.abs() < 1e-4, "{f}");
    }

    #[test]
    fn test_full_turn_restores_position() {
        let mut camera = OrbitCamera::centered_on(10, 10, 22);
        let start = camera.position();
        for _ in 0..8 {
            camera.rotate_around_target(0.0, FRAC_PI_4);
        }
        assert!(approx(camera.position(), start));
    }

    #[test]
    fn test_rejects_vertical_view() {
        let mut camera = OrbitCamera::centered_on(10, 10, 22);
        let before = camera;
        assert!(!camera.rotate_around_target(FRAC_PI_2, 0.0));
        assert_eq!(camera, before);

        assert!(camera.rotate_around_target(FRAC_PI_4, 0.0));
        assert!(camera.forward().y.abs() > 0.5);
        assert!(!camera.rotate_around_target(FRAC_PI_4, 0.0));
    }

    #[test]
    fn test_controller_steps_on_press() {
        let controller = OrbitCameraController::default();
        let mut camera = OrbitCamera::centered_on(10, 10, 22);
        let mut input = InputState::new();

        input.begin_frame();
        input.press(Command::CameraLeft);
        assert!(controller.update(&mut camera, &input));
        let after_one = camera;

        // Still held next frame: no second step
        input.begin_frame();
        assert!(!controller.update(&mut camera, &input));
        assert_eq!(camera, after_one);
    }
}
