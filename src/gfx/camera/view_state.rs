//! # View State
//!
//! Eye/look/up state shared by every navigation mode, with the rotation and
//! normalization invariants the controller relies on.

use cgmath::{InnerSpace, Matrix4, Rad, Transform, Vector3};
use std::f32::consts::PI;

/// Default eye position in world space.
pub const DEFAULT_EYE: Vector3<f32> = Vector3::new(0.0, 0.0, 6.0);

/// Default view direction (unit).
pub const DEFAULT_LOOK: Vector3<f32> = Vector3::new(0.0, 0.0, -1.0);

/// Default view up vector (unit).
pub const DEFAULT_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// Cumulative pitch bounds.
pub const MIN_PITCH: f32 = -PI / 2.0;
pub const MAX_PITCH: f32 = PI / 2.0;

/// Eye distance bounds under zoom.
pub const MIN_DISTANCE: f32 = 2.0;
pub const MAX_DISTANCE: f32 = 50.0;

/// Camera state in world space.
///
/// `look` and `up` are kept unit length after every mutation; `pitch`
/// accumulates vertical drag so the controller can clamp it to
/// `[-PI/2, PI/2]` without ever over-rotating.
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    pub eye: Vector3<f32>,
    pub look: Vector3<f32>,
    pub up: Vector3<f32>,
    pub pitch: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            eye: DEFAULT_EYE,
            look: DEFAULT_LOOK,
            up: DEFAULT_UP,
            pitch: 0.0,
        }
    }
}

impl ViewState {
    /// Restores the fixed default state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rotates eye, look and up about an arbitrary axis through the origin.
    pub fn rotate(&mut self, angle: f32, axis: Vector3<f32>) {
        let rotation = Matrix4::from_axis_angle(axis.normalize(), Rad(angle));
        self.eye = rotation.transform_vector(self.eye);
        self.look = rotation.transform_vector(self.look).normalize();
        self.up = rotation.transform_vector(self.up).normalize();
    }

    /// Rescales the eye radially so its distance from the origin lands in
    /// `[MIN_DISTANCE, MAX_DISTANCE]` after adding `delta`.
    pub fn zoom(&mut self, delta: f32) {
        let distance = self.eye.magnitude();
        let new_distance = (distance + delta).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.eye = self.eye.normalize() * new_distance;
    }

    /// View-right axis, recomputed from the current look/up.
    pub fn view_right(&self) -> Vector3<f32> {
        self.look.cross(self.up).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_default_state() {
        let state = ViewState::default();
        assert_eq!(state.eye, DEFAULT_EYE);
        assert_eq!(state.look, DEFAULT_LOOK);
        assert_eq!(state.up, DEFAULT_UP);
        assert_eq!(state.pitch, 0.0);
    }

    #[test]
    fn test_rotate_preserves_unit_vectors() {
        let mut state = ViewState::default();
        state.rotate(0.37, Vector3::new(0.0, 1.0, 0.0));
        state.rotate(-1.2, Vector3::new(1.0, 0.0, 3.0));
        assert!((state.look.magnitude() - 1.0).abs() < EPS);
        assert!((state.up.magnitude() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_preserves_eye_distance() {
        let mut state = ViewState::default();
        let before = state.eye.magnitude();
        state.rotate(1.0, Vector3::new(0.0, 1.0, 0.0));
        assert!((state.eye.magnitude() - before).abs() < EPS);
    }

    #[test]
    fn test_zoom_clamps_distance() {
        let mut state = ViewState::default();
        state.zoom(1000.0);
        assert!((state.eye.magnitude() - MAX_DISTANCE).abs() < EPS);
        state.zoom(-1000.0);
        assert!((state.eye.magnitude() - MIN_DISTANCE).abs() < EPS);
    }

    #[test]
    fn test_view_right_is_unit() {
        let state = ViewState::default();
        let right = state.view_right();
        assert!((right.magnitude() - 1.0).abs() < EPS);
        // look (0,0,-1) x up (0,1,0) = (1,0,0)
        assert!((right.x - 1.0).abs() < EPS);
        assert!(right.y.abs() < EPS && right.z.abs() < EPS);
    }
}
