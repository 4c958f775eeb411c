//! Input backend abstraction
//!
//! The snapshot layer never talks to a window directly; it polls the
//! capability surface defined here. The backend connection is owned by the
//! caller, which initializes it before the first poll.

mod event;
mod winit;

pub use self::event::InputEvent;
pub use self::winit::WinitBackend;

use std::fmt;

use glam::IVec2;

/// Capability surface polled once per update.
///
/// Implementations only answer queries against state they already hold;
/// they never open, close or reconfigure the underlying window.
pub trait InputBackend {
    /// Opaque event record captured during a poll.
    type Event: Clone + fmt::Debug;

    /// Whether the window currently has input focus.
    fn is_focused(&self) -> Result<bool, BackendError>;

    /// Pressed state of the left, middle and right mouse buttons.
    fn mouse_pressed(&self) -> Result<[bool; 3], BackendError>;

    /// Cursor position in window coordinates.
    fn cursor_position(&self) -> Result<IVec2, BackendError>;

    /// Full keyboard state, one entry per representable key code.
    fn keyboard_state(&self) -> Result<Vec<bool>, BackendError>;

    /// Drain every event pending since the last call, in arrival order.
    fn drain_events(&mut self) -> Result<Vec<Self::Event>, BackendError>;
}

/// Errors reported by backend queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend was queried before the caller initialized it
    NotInitialized,
    /// A query against the input system failed
    PollFailed(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "input backend not initialized"),
            Self::PollFailed(e) => write!(f, "input poll failed: {e}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
pub(crate) mod testing {
    use super::{BackendError, InputBackend, InputEvent};
    use glam::IVec2;

    /// Scriptable backend for driving snapshots without a window.
    #[derive(Debug, Default)]
    pub(crate) struct FakeBackend {
        pub focused: bool,
        pub buttons: [bool; 3],
        pub cursor: IVec2,
        pub keys: Vec<bool>,
        pub pending: Vec<InputEvent>,
        pub broken: bool,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self {
                keys: vec![false; 512],
                ..Self::default()
            }
        }

        pub fn set_key(&mut self, code: u32, pressed: bool) {
            if let Some(slot) = self.keys.get_mut(code as usize) {
                *slot = pressed;
            }
        }

        fn check(&self) -> Result<(), BackendError> {
            if self.broken {
                Err(BackendError::NotInitialized)
            } else {
                Ok(())
            }
        }
    }

    impl InputBackend for FakeBackend {
        type Event = InputEvent;

        fn is_focused(&self) -> Result<bool, BackendError> {
            self.check()?;
            Ok(self.focused)
        }

        fn mouse_pressed(&self) -> Result<[bool; 3], BackendError> {
            self.check()?;
            Ok(self.buttons)
        }

        fn cursor_position(&self) -> Result<IVec2, BackendError> {
            self.check()?;
            Ok(self.cursor)
        }

        fn keyboard_state(&self) -> Result<Vec<bool>, BackendError> {
            self.check()?;
            Ok(self.keys.clone())
        }

        fn drain_events(&mut self) -> Result<Vec<InputEvent>, BackendError> {
            self.check()?;
            Ok(std::mem::take(&mut self.pending))
        }
    }
}
