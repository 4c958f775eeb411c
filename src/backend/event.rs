//! Raw input event records
//!
//! Events are captured in arrival order during a poll and kept verbatim in
//! the snapshot until the next poll drains a fresh batch.

use glam::{IVec2, Vec2};

use crate::snapshot::MouseButton;

/// A raw input event drained from the backend.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum InputEvent {
    /// A key changed state, identified by its code point.
    KeyInput {
        /// Code point of the key
        code: u32,
        /// New pressed state
        pressed: bool,
    },

    /// A mouse button changed state.
    MouseInput {
        /// The button that changed
        button: MouseButton,
        /// New pressed state
        pressed: bool,
    },

    /// The cursor moved inside the window.
    CursorMoved {
        /// New position in window coordinates
        position: IVec2,
    },

    /// The scroll wheel moved.
    Scroll {
        /// Scroll delta in lines or pixels, backend dependent
        delta: Vec2,
    },

    /// The window gained or lost input focus.
    FocusChanged {
        /// New focus state
        focused: bool,
    },

    /// The user asked to close the window.
    CloseRequested,
}
