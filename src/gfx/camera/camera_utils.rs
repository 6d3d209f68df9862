//! # Camera Utilities
//!
//! View/projection matrix construction and the GPU-compatible camera
//! uniform, plus the [`CameraManager`] pairing a [`ViewState`] with its
//! controller.

use cgmath::{perspective, EuclideanSpace, Matrix4, Point3, Rad, SquareMatrix};
use std::f32::consts::PI;

use super::{controller::CameraController, view_state::ViewState};
use crate::input::InputEvent;

/// Projection constants from the viewer: quarter-turn half-angle fov,
/// square aspect, and the standard near/far planes.
pub const PROJ_FOVY: f32 = 0.5 * PI;
pub const PROJ_ASPECT: f32 = 1.0;
pub const PROJ_NEAR: f32 = 0.1;
pub const PROJ_FAR: f32 = 100.0;

/// Handedness flip premultiplied into the projection, mirroring x.
#[rustfmt::skip]
pub const HANDEDNESS_MATRIX: Matrix4<f32> = Matrix4::new(
    -1.0, 0.0, 0.0, 0.0,
     0.0, 1.0, 0.0, 0.0,
     0.0, 0.0, 1.0, 0.0,
     0.0, 0.0, 0.0, 1.0,
);

/// Owns the view state and its controller; the session object routes input
/// through here and reads matrices back out.
pub struct CameraManager {
    pub view: ViewState,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(view: ViewState, controller: CameraController) -> Self {
        Self { view, controller }
    }

    pub fn process_event(&mut self, event: &InputEvent) {
        self.controller.process_event(event, &mut self.view);
    }

    /// Advances continuous rotation by one frame (no-op in other modes).
    pub fn tick(&mut self) {
        self.controller.tick(&mut self.view);
    }

    /// View matrix looking from the eye along the look direction.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.view.eye);
        let center = Point3::from_vec(self.view.eye + self.view.look);
        Matrix4::look_at_rh(eye, center, self.view.up)
    }

    /// Handedness-flipped perspective projection.
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        HANDEDNESS_MATRIX * perspective(Rad(PROJ_FOVY), PROJ_ASPECT, PROJ_NEAR, PROJ_FAR)
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// Eye position in homogeneous coordinates (16-byte alignment).
    pub view_position: [f32; 4],
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

impl CameraUniform {
    pub fn from_manager(manager: &CameraManager) -> Self {
        let eye = manager.view.eye;
        Self {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: convert_matrix4_to_array(manager.view_projection_matrix()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::controller::NavigationMode;
    use cgmath::{InnerSpace, Transform, Vector3, Vector4};

    #[test]
    fn test_view_matrix_centers_look_target() {
        let manager = CameraManager::new(
            ViewState::default(),
            CameraController::new(NavigationMode::FreeRotate),
        );
        let view = manager.view_matrix();
        // The point one unit along the look direction maps onto -z.
        let target = Point3::from_vec(manager.view.eye + manager.view.look);
        let transformed = view.transform_point(target);
        assert!(transformed.x.abs() < 1e-5);
        assert!(transformed.y.abs() < 1e-5);
        assert!(transformed.z < 0.0);
    }

    #[test]
    fn test_projection_flips_handedness() {
        let manager = CameraManager::new(
            ViewState::default(),
            CameraController::new(NavigationMode::FreeRotate),
        );
        let proj = manager.projection_matrix();
        let right = proj * Vector4::new(1.0, 0.0, -1.0, 1.0);
        let left = proj * Vector4::new(-1.0, 0.0, -1.0, 1.0);
        assert!(right.x / right.w < 0.0);
        assert!(left.x / left.w > 0.0);
    }

    #[test]
    fn test_camera_uniform_packs_eye() {
        let mut manager = CameraManager::new(
            ViewState::default(),
            CameraController::new(NavigationMode::FreeRotate),
        );
        manager.view.eye = Vector3::new(1.0, 2.0, 3.0).normalize() * 6.0;
        let uniform = CameraUniform::from_manager(&manager);
        assert_eq!(uniform.view_position[3], 1.0);
        assert!((uniform.view_position[0] - manager.view.eye.x).abs() < 1e-6);
    }
}
