//! Input snapshot module
//!
//! Double-buffered mouse/keyboard snapshots over a watch set, plus the
//! shorthand grammar for navigating them.

mod shorthand;
mod state;
mod watch;

pub use shorthand::{MouseField, ShortValue, Shorthand, ShorthandError, Slot, Target};
pub use state::{Controls, MouseButton, MouseState, Snapshot};
pub use watch::{InvalidWatchKey, WatchKey, WatchSet};
