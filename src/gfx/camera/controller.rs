//! # Camera Controller
//!
//! Navigation-mode state machine turning raw input events into view-state
//! mutations. Each mode accepts exactly one input channel; events arriving
//! in the wrong mode are silently dropped (normal filtering, not an error).

use cgmath::{InnerSpace, Vector3};

use super::view_state::{ViewState, MAX_PITCH, MIN_PITCH};
use crate::input::{InputEvent, KeyCode};

/// Radians of rotation per pixel of drag.
pub const DRAG_ANGLE_PER_PIXEL: f32 = 1.0 / 100.0;

/// World units of zoom per unit of scroll delta.
pub const SCROLL_DISTANCE_PER_UNIT: f32 = 1.0 / 100.0;

/// Translation step per key press in move mode.
pub const MOVE_STEP: f32 = 0.5;

/// Look-direction rotation step per shifted key press in move mode.
pub const KEY_ROTATE_STEP: f32 = 0.06;

/// World-up rotation per frame in continuous-rotate mode.
pub const CONTINUOUS_TICK_ANGLE: f32 = 0.005;

const WORLD_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// Which input channel currently drives the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
    /// Drag to orbit, scroll to zoom.
    FreeRotate,
    /// Steady world-up rotation every frame, scroll to zoom.
    ContinuousRotate,
    /// WASD/arrow translation, shifted left/right to turn.
    #[default]
    Move,
}

/// Routes input events to view-state mutations according to the active
/// [`NavigationMode`].
#[derive(Debug, Default)]
pub struct CameraController {
    mode: NavigationMode,
}

impl CameraController {
    pub fn new(mode: NavigationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// Switches navigation mode and resets the view to its default.
    pub fn set_mode(&mut self, mode: NavigationMode, view: &mut ViewState) {
        self.mode = mode;
        view.reset();
    }

    /// Dispatches a host input event.
    pub fn process_event(&mut self, event: &InputEvent, view: &mut ViewState) {
        match *event {
            InputEvent::Drag { dx, dy } => self.on_drag(dx, dy, view),
            InputEvent::Scroll { dy } => self.on_scroll(dy, view),
            InputEvent::Key { code, shift } => self.on_key(code, shift, view),
        }
    }

    /// Drag rotation; free-rotate mode only.
    ///
    /// Horizontal drag orbits about world up. Vertical drag orbits about
    /// `up x look` with the cumulative pitch clamped; only the increment
    /// needed to reach the clamped target is applied.
    pub fn on_drag(&mut self, dx: f32, dy: f32, view: &mut ViewState) {
        if self.mode != NavigationMode::FreeRotate {
            return;
        }
        if dx != 0.0 {
            view.rotate(dx * DRAG_ANGLE_PER_PIXEL, WORLD_UP);
        }
        if dy != 0.0 {
            let target = (view.pitch + dy * DRAG_ANGLE_PER_PIXEL).clamp(MIN_PITCH, MAX_PITCH);
            let increment = target - view.pitch;
            if increment != 0.0 {
                let axis = view.up.cross(view.look);
                view.rotate(increment, axis);
            }
            view.pitch = target;
        }
    }

    /// Radial zoom; free-rotate and continuous-rotate modes only.
    pub fn on_scroll(&mut self, dy: f32, view: &mut ViewState) {
        if self.mode == NavigationMode::Move {
            return;
        }
        view.zoom(dy * SCROLL_DISTANCE_PER_UNIT);
    }

    /// Keyed translation/turning; move mode only.
    pub fn on_key(&mut self, code: KeyCode, shift: bool, view: &mut ViewState) {
        if self.mode != NavigationMode::Move {
            return;
        }
        let view_right = view.view_right();
        match code {
            KeyCode::ArrowRight | KeyCode::KeyD => {
                if shift {
                    view.look = (view.look + view_right * -KEY_ROTATE_STEP).normalize();
                } else {
                    view.eye += view_right * -MOVE_STEP;
                }
            }
            KeyCode::ArrowLeft | KeyCode::KeyA => {
                if shift {
                    view.look = (view.look + view_right * KEY_ROTATE_STEP).normalize();
                } else {
                    view.eye += view_right * MOVE_STEP;
                }
            }
            KeyCode::ArrowUp | KeyCode::KeyW => {
                view.eye += view.look * MOVE_STEP;
            }
            KeyCode::ArrowDown | KeyCode::KeyS => {
                view.eye += view.look * -MOVE_STEP;
            }
        }
    }

    /// Per-frame rotation; continuous-rotate mode only.
    pub fn tick(&mut self, view: &mut ViewState) {
        if self.mode != NavigationMode::ContinuousRotate {
            return;
        }
        view.rotate(CONTINUOUS_TICK_ANGLE, WORLD_UP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::view_state::{DEFAULT_EYE, DEFAULT_LOOK, MAX_DISTANCE, MIN_DISTANCE};
    use cgmath::InnerSpace;
    use std::f32::consts::PI;

    const EPS: f32 = 1e-4;

    fn free_rotate() -> (CameraController, ViewState) {
        (
            CameraController::new(NavigationMode::FreeRotate),
            ViewState::default(),
        )
    }

    #[test]
    fn test_pitch_stays_clamped() {
        let (mut controller, mut view) = free_rotate();
        for _ in 0..500 {
            controller.on_drag(0.0, 37.0, &mut view);
        }
        assert!(view.pitch <= PI / 2.0 + EPS);

        for _ in 0..1000 {
            controller.on_drag(0.0, -37.0, &mut view);
        }
        assert!(view.pitch >= -PI / 2.0 - EPS);
    }

    #[test]
    fn test_drag_past_pitch_limit_is_noop() {
        let (mut controller, mut view) = free_rotate();
        // Saturate the downward pitch limit.
        for _ in 0..1000 {
            controller.on_drag(0.0, -50.0, &mut view);
        }
        let look = view.look;
        let up = view.up;
        controller.on_drag(0.0, -50.0, &mut view);
        assert!((view.look - look).magnitude() < EPS);
        assert!((view.up - up).magnitude() < EPS);
    }

    #[test]
    fn test_scroll_distance_stays_clamped() {
        let (mut controller, mut view) = free_rotate();
        for _ in 0..100 {
            controller.on_scroll(1000.0, &mut view);
        }
        assert!(view.eye.magnitude() <= MAX_DISTANCE + EPS);
        for _ in 0..100 {
            controller.on_scroll(-1000.0, &mut view);
        }
        assert!(view.eye.magnitude() >= MIN_DISTANCE - EPS);
    }

    #[test]
    fn test_unit_vectors_after_mutations() {
        let (mut controller, mut view) = free_rotate();
        for i in 0..50 {
            controller.on_drag(13.0, -7.0, &mut view);
            controller.on_scroll(if i % 2 == 0 { 40.0 } else { -25.0 }, &mut view);
            assert!((view.look.magnitude() - 1.0).abs() < EPS);
            assert!((view.up.magnitude() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_mode_switch_resets_view() {
        let (mut controller, mut view) = free_rotate();
        controller.on_drag(120.0, 45.0, &mut view);
        controller.on_scroll(300.0, &mut view);
        controller.set_mode(NavigationMode::Move, &mut view);
        assert_eq!(view.eye, DEFAULT_EYE);
        assert_eq!(view.look, DEFAULT_LOOK);
        assert_eq!(view.pitch, 0.0);
    }

    #[test]
    fn test_key_w_translates_along_look() {
        let mut controller = CameraController::new(NavigationMode::Move);
        let mut view = ViewState::default();
        let expected = view.eye + view.look * MOVE_STEP;
        controller.on_key(KeyCode::KeyW, false, &mut view);
        assert!((view.eye - expected).magnitude() < EPS);
    }

    #[test]
    fn test_shifted_key_turns_without_translating() {
        let mut controller = CameraController::new(NavigationMode::Move);
        let mut view = ViewState::default();
        let eye = view.eye;
        controller.on_key(KeyCode::KeyD, true, &mut view);
        assert_eq!(view.eye, eye);
        assert!((view.look.magnitude() - 1.0).abs() < EPS);
        assert!((view.look - DEFAULT_LOOK).magnitude() > EPS);
    }

    #[test]
    fn test_out_of_mode_input_is_ignored() {
        let mut controller = CameraController::new(NavigationMode::Move);
        let mut view = ViewState::default();
        controller.on_drag(100.0, 100.0, &mut view);
        assert_eq!(view.eye, DEFAULT_EYE);
        assert_eq!(view.look, DEFAULT_LOOK);

        // Scroll is rejected in move mode as well.
        controller.on_scroll(500.0, &mut view);
        assert_eq!(view.eye, DEFAULT_EYE);

        // Keys are rejected outside move mode.
        let (mut controller, mut view) = free_rotate();
        controller.on_key(KeyCode::KeyW, false, &mut view);
        assert_eq!(view.eye, DEFAULT_EYE);
    }

    #[test]
    fn test_tick_only_in_continuous_mode() {
        let mut controller = CameraController::new(NavigationMode::ContinuousRotate);
        let mut view = ViewState::default();
        controller.tick(&mut view);
        assert!((view.eye - DEFAULT_EYE).magnitude() > 0.0);

        let (mut controller, mut view) = free_rotate();
        controller.tick(&mut view);
        assert_eq!(view.eye, DEFAULT_EYE);
    }
}
