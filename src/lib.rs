// src/lib.rs
//! Scrawl
//!
//! An interactive 3D mesh viewer core: blinn-phong, cel and pencil-sketch
//! shading styles composed over a backend-agnostic command set, with
//! procedural paper-grain noise and a navigation-mode state machine.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Instant;
//! use scrawl::prelude::*;
//!
//! let mut backend = SoftwareBackend::new(512, 512);
//! let mut viewer = Viewer::new(&mut backend, ShadingStyle::PencilSketch, Instant::now());
//! viewer.scene.add_mesh("cube", cube());
//! viewer.frame(&mut backend, Instant::now());
//! ```

pub mod app;
pub mod gfx;
pub mod input;
pub mod noise;
pub mod prelude;

// Re-export the main entry points for convenience
pub use app::Viewer;
pub use gfx::pipeline::ShadingStyle;
