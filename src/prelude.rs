//! # Scrawl Prelude
//!
//! One-stop import for the types a typical host loop touches:
//!
//! ```rust
//! use scrawl::prelude::*;
//! ```

pub use crate::app::Viewer;
pub use crate::gfx::backend::{MeshHandle, RasterBackend, RecordingBackend, SoftwareBackend};
pub use crate::gfx::camera::{CameraController, CameraManager, NavigationMode, ViewState};
pub use crate::gfx::pipeline::{FrameOutcome, RenderPipeline, ShadingStyle, StyleSelector};
pub use crate::gfx::scene::primitives::cube;
pub use crate::gfx::scene::{Material, MeshBuffers, Scene};
pub use crate::input::{InputEvent, KeyCode};
pub use crate::noise::NoiseSynthesizer;
