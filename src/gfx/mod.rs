//! # Graphics Module
//!
//! Everything the frame-composition core is made of:
//!
//! - **Camera System** ([`camera`]) - View state and the navigation-mode
//!   state machine
//! - **Frame Pipeline** ([`pipeline`]) - Per-style pass orchestration,
//!   shading math and jitter re-randomization
//! - **Scene Management** ([`scene`]) - Named meshes, materials, OBJ loading
//! - **Backend Abstraction** ([`backend`]) - The explicit command set driven
//!   by the pipeline, with software and recording implementations

pub mod backend;
pub mod camera;
pub mod pipeline;
pub mod scene;

// Re-export commonly used types
pub use backend::{RasterBackend, RecordingBackend, SoftwareBackend};
pub use camera::{CameraController, CameraManager, NavigationMode, ViewState};
pub use pipeline::{FrameOutcome, RenderPipeline, ShadingStyle};
pub use scene::Scene;
