pub mod camera_utils;
pub mod controller;
pub mod view_state;

// Re-export main types
pub use camera_utils::{CameraManager, CameraUniform};
pub use controller::{CameraController, NavigationMode};
pub use view_state::ViewState;
