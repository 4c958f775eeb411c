//! Double-buffered input snapshots

use glam::IVec2;
use rustc_hash::FxHashMap;

use crate::backend::{BackendError, InputBackend};
use crate::snapshot::{WatchKey, WatchSet};

/// A mouse button, indexing the pressed triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button, index 0
    Left = 0,
    /// Middle button, index 1
    Middle = 1,
    /// Right button, index 2
    Right = 2,
}

/// Mouse portion of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MouseState {
    /// Pressed state of the left, middle and right buttons
    pub pressed: [bool; 3],
    /// Cursor position, absent while the window is unfocused
    pub position: Option<IVec2>,
}

impl MouseState {
    /// Whether a button is pressed.
    #[must_use]
    pub fn button(&self, button: MouseButton) -> bool {
        self.pressed[button as usize]
    }

    fn clear(&mut self) {
        self.pressed = [false; 3];
        self.position = None;
    }
}

/// One complete captured input state.
///
/// `events` holds the raw records drained from the backend by the poll that
/// produced this snapshot; they are replaced wholesale on the next poll.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<E> {
    /// Mouse buttons and cursor position
    pub mouse: MouseState,
    /// Pressed state per watched key code
    pub keyboard: FxHashMap<u32, bool>,
    /// Raw backend events captured during the poll
    pub events: Vec<E>,
}

impl<E> Snapshot<E> {
    fn empty(watch: &WatchSet) -> Self {
        Self {
            mouse: MouseState::default(),
            keyboard: watch.iter().map(|code| (code, false)).collect(),
            events: Vec::new(),
        }
    }

    /// Pressed state of a watched key. Unwatched keys read as released.
    #[must_use]
    pub fn key(&self, key: impl Into<WatchKey>) -> bool {
        self.keyboard
            .get(&key.into().code())
            .copied()
            .unwrap_or(false)
    }
}

/// Double-buffered input state over a pollable backend.
///
/// Owns exactly two snapshots. Every [`update`](Controls::update) archives
/// `current` into `previous` as a value copy, then overwrites `current` with
/// freshly polled state, so between updates the caller can compare the two
/// freely.
#[derive(Debug)]
pub struct Controls<B: InputBackend> {
    backend: B,
    watch: WatchSet,
    current: Snapshot<B::Event>,
    previous: Snapshot<B::Event>,
}

impl<B: InputBackend> Controls<B> {
    /// Create a controls tracker over `backend`, watching `watch` keys.
    ///
    /// Both snapshots start empty: buttons released, no cursor position,
    /// every watched key unpressed, no events.
    pub fn new(backend: B, watch: impl Into<WatchSet>) -> Self {
        let watch = watch.into();
        log::debug!("tracking {} watched key codes", watch.len());
        Self {
            current: Snapshot::empty(&watch),
            previous: Snapshot::empty(&watch),
            watch,
            backend,
        }
    }

    /// Archive the current snapshot and poll the backend for a fresh one.
    ///
    /// Poll failures propagate as-is; there is no retry. The backend must be
    /// initialized by the caller before the first update.
    ///
    /// # Errors
    ///
    /// Returns any error the backend reports while answering a query.
    pub fn update(&mut self) -> Result<(), BackendError> {
        self.previous = self.current.clone();

        self.current.events = self.backend.drain_events()?;

        if self.backend.is_focused()? {
            self.current.mouse.pressed = self.backend.mouse_pressed()?;
            self.current.mouse.position = Some(self.backend.cursor_position()?);
        } else {
            // No reliable mouse state without focus.
            self.current.mouse.clear();
        }

        let raw = self.backend.keyboard_state()?;
        for code in self.watch.scan_range() {
            if self.watch.contains(code) {
                let pressed = raw.get(code as usize).copied().unwrap_or(false);
                self.current.keyboard.insert(code, pressed);
            }
        }

        Ok(())
    }

    /// The snapshot produced by the latest update.
    #[must_use]
    pub fn current(&self) -> &Snapshot<B::Event> {
        &self.current
    }

    /// The snapshot the latest update archived.
    #[must_use]
    pub fn previous(&self) -> &Snapshot<B::Event> {
        &self.previous
    }

    /// The watched key codes.
    #[must_use]
    pub fn watch_set(&self) -> &WatchSet {
        &self.watch
    }

    /// The underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The underlying backend, mutably. Event-fed backends are driven
    /// through this between updates.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Whether a watched key is down in the current snapshot.
    #[must_use]
    pub fn key_down(&self, key: impl Into<WatchKey>) -> bool {
        self.current.key(key)
    }

    /// Whether a watched key went down between the last two updates.
    #[must_use]
    pub fn key_just_pressed(&self, key: impl Into<WatchKey>) -> bool {
        let key = key.into();
        self.current.key(key) && !self.previous.key(key)
    }

    /// Whether a watched key came up between the last two updates.
    #[must_use]
    pub fn key_just_released(&self, key: impl Into<WatchKey>) -> bool {
        let key = key.into();
        !self.current.key(key) && self.previous.key(key)
    }

    /// Whether a mouse button is down in the current snapshot.
    #[must_use]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.current.mouse.button(button)
    }

    /// Whether a mouse button went down between the last two updates.
    #[must_use]
    pub fn button_just_pressed(&self, button: MouseButton) -> bool {
        self.current.mouse.button(button) && !self.previous.mouse.button(button)
    }

    /// Whether a mouse button came up between the last two updates.
    #[must_use]
    pub fn button_just_released(&self, button: MouseButton) -> bool {
        !self.current.mouse.button(button) && self.previous.mouse.button(button)
    }
}
