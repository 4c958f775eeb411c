//! Double-buffered input snapshots over a pollable backend
//!
//! This crate provides:
//! - Current/previous input snapshots, refreshed once per loop iteration
//! - A minimal backend capability trait with a winit-fed implementation
//! - A compact shorthand grammar for reaching into snapshot fields

pub mod backend;
pub mod snapshot;
pub mod stats;

// Re-exports for convenience
pub use glam;
pub use winit;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::backend::{BackendError, InputBackend, InputEvent, WinitBackend};
    pub use crate::snapshot::{
        Controls, MouseButton, MouseState, ShortValue, Shorthand, ShorthandError, Snapshot,
        WatchKey, WatchSet,
    };
    pub use crate::stats::PollStats;
    pub use glam::{IVec2, Vec2};
}
