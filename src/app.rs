//! # Viewer Session
//!
//! The explicit session object owned by the host loop: camera, scene, style
//! selection and pipeline in one place, no module-level globals. The host
//! calls [`Viewer::frame`] once per display refresh and routes UI selection
//! and input events to the corresponding methods.

use std::time::Instant;

use crate::gfx::backend::RasterBackend;
use crate::gfx::camera::camera_utils::convert_matrix4_to_array;
use crate::gfx::camera::{CameraController, CameraManager, NavigationMode, ViewState};
use crate::gfx::pipeline::{FrameOutcome, RenderPipeline, ShadingStyle};
use crate::gfx::scene::Scene;
use crate::input::InputEvent;
use crate::noise::NoiseSynthesizer;

/// One interactive viewing session.
pub struct Viewer {
    pub scene: Scene,
    pub camera: CameraManager,
    pipeline: RenderPipeline,
}

impl Viewer {
    /// Creates a session: generates the noise fields, uploads the shared
    /// pipeline resources and builds the initial style's programs.
    pub fn new(backend: &mut dyn RasterBackend, style: ShadingStyle, now: Instant) -> Self {
        let synth = NoiseSynthesizer::new();
        Self::with_synthesizer(backend, &synth, style, now)
    }

    /// Like [`Viewer::new`] with a caller-supplied synthesizer (seeded in
    /// tests and demos).
    pub fn with_synthesizer(
        backend: &mut dyn RasterBackend,
        synth: &NoiseSynthesizer,
        style: ShadingStyle,
        now: Instant,
    ) -> Self {
        Self {
            scene: Scene::new(),
            camera: CameraManager::new(ViewState::default(), CameraController::default()),
            pipeline: RenderPipeline::new(backend, synth, style, now),
        }
    }

    /// Routes a discrete input event to the camera controller. Events the
    /// current navigation mode does not accept are dropped there.
    pub fn process_event(&mut self, event: &InputEvent) {
        self.camera.process_event(event);
    }

    /// UI selection: navigation mode. Resets the view state.
    pub fn select_mode(&mut self, mode: NavigationMode) {
        self.camera.controller.set_mode(mode, &mut self.camera.view);
    }

    /// UI selection: shading style. Rebuilds that style's programs; the
    /// view state is left alone.
    pub fn select_style(&mut self, style: ShadingStyle, backend: &mut dyn RasterBackend) {
        self.pipeline.set_style(style, backend);
    }

    /// UI selection: active mesh. Resets the view state; unknown names
    /// change nothing.
    pub fn select_mesh(&mut self, name: &str) {
        if self.scene.select(name) {
            self.camera.view.reset();
        }
    }

    pub fn active_style(&self) -> ShadingStyle {
        self.pipeline.active_style()
    }

    /// Runs one frame: continuous-rotation tick, pending mesh uploads, then
    /// the active style's passes. Never aborts; a bad frame leaves the next
    /// one untouched.
    pub fn frame(&mut self, backend: &mut dyn RasterBackend, now: Instant) -> FrameOutcome {
        self.camera.tick();
        self.scene.upload_pending(backend);

        let view_proj = convert_matrix4_to_array(self.camera.view_projection_matrix());
        let eye = self.camera.view.eye;
        self.pipeline.frame(
            backend,
            view_proj,
            [eye.x, eye.y, eye.z],
            self.scene.active_mesh(),
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::backend::RecordingBackend;
    use crate::gfx::camera::view_state::{DEFAULT_EYE, DEFAULT_LOOK};
    use crate::gfx::scene::primitives::cube;
    use crate::input::KeyCode;
    use cgmath::InnerSpace;

    fn viewer(backend: &mut RecordingBackend, style: ShadingStyle) -> Viewer {
        let synth = NoiseSynthesizer::with_seed(4);
        Viewer::with_synthesizer(backend, &synth, style, Instant::now())
    }

    #[test]
    fn test_mode_change_resets_view_but_style_change_does_not() {
        let mut backend = RecordingBackend::new();
        let mut viewer = viewer(&mut backend, ShadingStyle::BlinnPhong);

        viewer.select_mode(NavigationMode::FreeRotate);
        viewer.process_event(&InputEvent::Drag { dx: 80.0, dy: 30.0 });
        let moved = viewer.camera.view.eye;
        assert!((moved - DEFAULT_EYE).magnitude() > 1e-3);

        // Style change keeps the view.
        viewer.select_style(ShadingStyle::PencilSketch, &mut backend);
        assert_eq!(viewer.camera.view.eye, moved);

        // Mode change resets to the exact defaults.
        viewer.select_mode(NavigationMode::Move);
        assert_eq!(viewer.camera.view.eye, DEFAULT_EYE);
        assert_eq!(viewer.camera.view.look, DEFAULT_LOOK);
    }

    #[test]
    fn test_mesh_selection_resets_view() {
        let mut backend = RecordingBackend::new();
        let mut viewer = viewer(&mut backend, ShadingStyle::BlinnPhong);
        viewer.scene.add_mesh("cube", cube());
        viewer.scene.add_mesh("box", cube());

        viewer.select_mode(NavigationMode::Move);
        viewer.process_event(&InputEvent::Key {
            code: KeyCode::KeyW,
            shift: false,
        });
        assert!((viewer.camera.view.eye - DEFAULT_EYE).magnitude() > 1e-3);

        viewer.select_mesh("box");
        assert_eq!(viewer.camera.view.eye, DEFAULT_EYE);

        // Unknown names leave both selection and view alone.
        viewer.process_event(&InputEvent::Key {
            code: KeyCode::KeyW,
            shift: false,
        });
        let eye = viewer.camera.view.eye;
        viewer.select_mesh("teapot");
        assert_eq!(viewer.scene.active_name(), Some("box"));
        assert_eq!(viewer.camera.view.eye, eye);
    }

    #[test]
    fn test_frame_without_mesh_is_idle() {
        let mut backend = RecordingBackend::new();
        let mut viewer = viewer(&mut backend, ShadingStyle::BlinnPhong);
        backend.take_commands();
        let outcome = viewer.frame(&mut backend, Instant::now());
        assert_eq!(outcome, FrameOutcome::Idle);
        assert!(backend.draw_commands().is_empty());
    }

    #[test]
    fn test_frame_uploads_then_renders() {
        let mut backend = RecordingBackend::new();
        let mut viewer = viewer(&mut backend, ShadingStyle::BlinnPhong);
        viewer.scene.add_mesh("cube", cube());
        let outcome = viewer.frame(&mut backend, Instant::now());
        assert_eq!(outcome, FrameOutcome::Rendered);
        assert_eq!(backend.draw_commands().len(), 1);
    }
}
