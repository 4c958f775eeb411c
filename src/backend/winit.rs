//! Winit-fed backend
//!
//! The caller's event loop forwards `WindowEvent`s here between polls; the
//! snapshot layer then reads the accumulated state once per iteration.

use glam::{IVec2, Vec2};
use winit::event::{MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};

use super::{BackendError, InputBackend, InputEvent};
use crate::snapshot::MouseButton;

/// Number of key codes tracked. Codes at or past the table read as released.
const KEY_TABLE_LEN: usize = 512;

/// Input backend driven by winit window events.
///
/// Tracks focus, the three-button mouse state, the last cursor position and
/// a key table indexed by logical-character code point, and queues every
/// translated event until the next drain.
#[derive(Debug)]
pub struct WinitBackend {
    focused: bool,
    buttons: [bool; 3],
    cursor: IVec2,
    keys: Vec<bool>,
    pending: Vec<InputEvent>,
}

impl WinitBackend {
    /// Create a backend with no focus, no pressed keys and the cursor at
    /// the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            focused: false,
            buttons: [false; 3],
            cursor: IVec2::ZERO,
            keys: vec![false; KEY_TABLE_LEN],
            pending: Vec::new(),
        }
    }

    /// Route a window event into the tracked state.
    ///
    /// Unhandled event kinds are ignored; key repeats do not re-enter the
    /// queue.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Focused(focused) => self.process_focus(*focused),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let Some(text) = event.logical_key.to_text() {
                    for c in text.chars() {
                        self.process_key(c as u32, event.state.is_pressed());
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    WinitMouseButton::Left => MouseButton::Left,
                    WinitMouseButton::Middle => MouseButton::Middle,
                    WinitMouseButton::Right => MouseButton::Right,
                    _ => return,
                };
                self.process_mouse_button(button, state.is_pressed());
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.process_cursor(IVec2::new(position.x as i32, position.y as i32));
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => Vec2::new(pos.x as f32, pos.y as f32),
                };
                self.pending.push(InputEvent::Scroll { delta });
            }

            WindowEvent::CloseRequested => {
                self.pending.push(InputEvent::CloseRequested);
            }

            _ => {}
        }
    }

    /// Record a key transition by code point.
    pub fn process_key(&mut self, code: u32, pressed: bool) {
        if let Some(slot) = self.keys.get_mut(code as usize) {
            *slot = pressed;
        }
        self.pending.push(InputEvent::KeyInput { code, pressed });
    }

    /// Record a mouse button transition.
    pub fn process_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        self.buttons[button as usize] = pressed;
        self.pending.push(InputEvent::MouseInput { button, pressed });
    }

    /// Record cursor motion in window coordinates.
    pub fn process_cursor(&mut self, position: IVec2) {
        self.cursor = position;
        self.pending.push(InputEvent::CursorMoved { position });
    }

    /// Record a focus change.
    ///
    /// Held keys and buttons are released on focus loss; the window stops
    /// receiving release events once it is unfocused.
    pub fn process_focus(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.keys.fill(false);
            self.buttons = [false; 3];
        }
        self.pending.push(InputEvent::FocusChanged { focused });
        log::debug!("window focus changed: {focused}");
    }
}

impl InputBackend for WinitBackend {
    type Event = InputEvent;

    fn is_focused(&self) -> Result<bool, BackendError> {
        Ok(self.focused)
    }

    fn mouse_pressed(&self) -> Result<[bool; 3], BackendError> {
        Ok(self.buttons)
    }

    fn cursor_position(&self) -> Result<IVec2, BackendError> {
        Ok(self.cursor)
    }

    fn keyboard_state(&self) -> Result<Vec<bool>, BackendError> {
        Ok(self.keys.clone())
    }

    fn drain_events(&mut self) -> Result<Vec<InputEvent>, BackendError> {
        Ok(std::mem::take(&mut self.pending))
    }
}

impl Default for WinitBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_transitions_update_the_table() {
        let mut backend = WinitBackend::new();

        backend.process_key('a' as u32, true);
        assert!(backend.keyboard_state().unwrap()[97]);

        backend.process_key('a' as u32, false);
        assert!(!backend.keyboard_state().unwrap()[97]);
    }

    #[test]
    fn test_codes_past_the_table_are_ignored() {
        let mut backend = WinitBackend::new();

        backend.process_key(10_000, true);
        assert_eq!(backend.keyboard_state().unwrap().len(), KEY_TABLE_LEN);
        // The transition is still recorded as an event.
        assert_eq!(
            backend.drain_events().unwrap(),
            vec![InputEvent::KeyInput {
                code: 10_000,
                pressed: true
            }]
        );
    }

    #[test]
    fn test_mouse_buttons_index_the_triple() {
        let mut backend = WinitBackend::new();

        backend.process_mouse_button(MouseButton::Right, true);
        assert_eq!(backend.mouse_pressed().unwrap(), [false, false, true]);

        backend.process_mouse_button(MouseButton::Right, false);
        assert_eq!(backend.mouse_pressed().unwrap(), [false; 3]);
    }

    #[test]
    fn test_focus_loss_releases_held_state() {
        let mut backend = WinitBackend::new();
        backend.process_focus(true);
        backend.process_key(97, true);
        backend.process_mouse_button(MouseButton::Left, true);

        backend.process_focus(false);

        assert!(!backend.is_focused().unwrap());
        assert!(!backend.keyboard_state().unwrap()[97]);
        assert_eq!(backend.mouse_pressed().unwrap(), [false; 3]);
    }

    #[test]
    fn test_drain_empties_the_queue_in_order() {
        let mut backend = WinitBackend::new();
        backend.process_key(97, true);
        backend.process_cursor(IVec2::new(3, 4));

        let events = backend.drain_events().unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyInput {
                    code: 97,
                    pressed: true
                },
                InputEvent::CursorMoved {
                    position: IVec2::new(3, 4)
                },
            ]
        );
        assert!(backend.drain_events().unwrap().is_empty());
    }
}
