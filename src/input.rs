//! # Input Events
//!
//! Discrete input events delivered by the host (window/event-loop layer).
//! The camera controller consumes each event synchronously in arrival order;
//! there is no buffering.

/// Physical keys the move mode responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    ArrowRight,
    KeyD,
    ArrowLeft,
    KeyA,
    ArrowUp,
    KeyW,
    ArrowDown,
    KeyS,
}

/// A single input event from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse drag with per-event pixel deltas.
    Drag { dx: f32, dy: f32 },
    /// Wheel scroll with a vertical delta.
    Scroll { dy: f32 },
    /// Key press with modifier state.
    Key { code: KeyCode, shift: bool },
}
