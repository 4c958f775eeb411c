//! Shorthand grammar for navigating snapshots
//!
//! The compact codes (`"ck"`, `"cmpos"`, `"pmpre"`, ...) resolve a snapshot
//! field without spelling out the whole access path. A code parses into a
//! [`Shorthand`] and resolves against a [`Controls`] pair.

use std::fmt;
use std::str::FromStr;

use glam::IVec2;
use rustc_hash::FxHashMap;

use crate::backend::InputBackend;
use crate::snapshot::Controls;

// ============================================================================
// Grammar
// ============================================================================

/// Which snapshot a shorthand reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The latest polled snapshot (`'c'`)
    Current,
    /// The snapshot archived by the latest update (`'p'`)
    Previous,
}

/// Which mouse field a shorthand reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseField {
    /// The three-button pressed triple (`"pre"`)
    Pressed,
    /// The optional cursor position (`"pos"`)
    Position,
}

/// Which snapshot domain a shorthand reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The watched-key mapping (`'k'`)
    Keyboard,
    /// A mouse field (`'m'` plus field)
    Mouse(MouseField),
}

/// A parsed shorthand code.
///
/// Grammar: a slot character (`'c'`/`'p'`), a domain character
/// (`'k'`/`'m'`), and for the mouse domain a three-character field
/// (`"pre"`/`"pos"`). Characters past what the grammar consumes are
/// ignored, so `"ck98"` still selects the keyboard mapping; key codes are
/// indexed on the resolved mapping, never inside the shorthand string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shorthand {
    /// Snapshot selector
    pub slot: Slot,
    /// Field selector
    pub target: Target,
}

/// Error for shorthand codes outside the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShorthandError {
    /// The code was empty
    Empty,
    /// The first character was not `'c'` or `'p'`
    UnknownSlot(char),
    /// The code ended before the domain character
    MissingTarget,
    /// The second character was not `'k'` or `'m'`
    UnknownTarget(char),
    /// The mouse field was not exactly `"pre"` or `"pos"`
    UnknownMouseField(String),
}

impl fmt::Display for ShorthandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty shorthand code"),
            Self::UnknownSlot(c) => {
                write!(f, "unknown snapshot selector {c:?}, expected 'c' or 'p'")
            }
            Self::MissingTarget => write!(f, "shorthand code ends before the domain selector"),
            Self::UnknownTarget(c) => {
                write!(f, "unknown domain selector {c:?}, expected 'k' or 'm'")
            }
            Self::UnknownMouseField(s) => {
                write!(f, "unknown mouse field {s:?}, expected \"pre\" or \"pos\"")
            }
        }
    }
}

impl std::error::Error for ShorthandError {}

impl FromStr for Shorthand {
    type Err = ShorthandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();

        let slot = match chars.next() {
            Some('c') => Slot::Current,
            Some('p') => Slot::Previous,
            Some(other) => return Err(ShorthandError::UnknownSlot(other)),
            None => return Err(ShorthandError::Empty),
        };

        let target = match chars.next() {
            Some('k') => Target::Keyboard,
            Some('m') => {
                let field: String = chars.by_ref().take(3).collect();
                match field.as_str() {
                    "pre" => Target::Mouse(MouseField::Pressed),
                    "pos" => Target::Mouse(MouseField::Position),
                    _ => return Err(ShorthandError::UnknownMouseField(field)),
                }
            }
            Some(other) => return Err(ShorthandError::UnknownTarget(other)),
            None => return Err(ShorthandError::MissingTarget),
        };

        Ok(Self { slot, target })
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// A resolved shorthand value, borrowed from a [`Controls`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShortValue<'a> {
    /// The watched-key mapping of the selected snapshot
    Keyboard(&'a FxHashMap<u32, bool>),
    /// The pressed triple of the selected snapshot
    MousePressed([bool; 3]),
    /// The cursor position of the selected snapshot
    MousePosition(Option<IVec2>),
}

impl<'a> ShortValue<'a> {
    /// The keyboard mapping, if this value selected one.
    #[must_use]
    pub fn keyboard(self) -> Option<&'a FxHashMap<u32, bool>> {
        match self {
            Self::Keyboard(map) => Some(map),
            _ => None,
        }
    }

    /// The pressed triple, if this value selected one.
    #[must_use]
    pub fn pressed(self) -> Option<[bool; 3]> {
        match self {
            Self::MousePressed(pressed) => Some(pressed),
            _ => None,
        }
    }

    /// The cursor position, if this value selected one. The outer option is
    /// the selection, the inner one is focus.
    #[must_use]
    pub fn position(self) -> Option<Option<IVec2>> {
        match self {
            Self::MousePosition(position) => Some(position),
            _ => None,
        }
    }
}

impl<B: InputBackend> Controls<B> {
    /// Resolve a parsed shorthand against the two snapshots.
    #[must_use]
    pub fn resolve(&self, shorthand: Shorthand) -> ShortValue<'_> {
        let snapshot = match shorthand.slot {
            Slot::Current => self.current(),
            Slot::Previous => self.previous(),
        };
        match shorthand.target {
            Target::Keyboard => ShortValue::Keyboard(&snapshot.keyboard),
            Target::Mouse(MouseField::Pressed) => ShortValue::MousePressed(snapshot.mouse.pressed),
            Target::Mouse(MouseField::Position) => {
                ShortValue::MousePosition(snapshot.mouse.position)
            }
        }
    }

    /// Parse and resolve a shorthand code.
    ///
    /// # Errors
    ///
    /// Returns [`ShorthandError`] when the code is outside the grammar.
    pub fn get_short(&self, code: &str) -> Result<ShortValue<'_>, ShorthandError> {
        Ok(self.resolve(code.parse()?))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::FakeBackend;

    fn sample_controls() -> Controls<FakeBackend> {
        let mut backend = FakeBackend::new();
        backend.focused = true;
        backend.buttons = [true, false, false];
        backend.cursor = IVec2::new(10, 20);
        backend.set_key(98, true);
        let mut controls = Controls::new(backend, "ab");
        controls.update().unwrap();
        controls
    }

    #[test]
    fn test_parse_all_grammar_forms() {
        let cases = [
            ("ck", Slot::Current, Target::Keyboard),
            ("cmpre", Slot::Current, Target::Mouse(MouseField::Pressed)),
            ("cmpos", Slot::Current, Target::Mouse(MouseField::Position)),
            ("pk", Slot::Previous, Target::Keyboard),
            ("pmpre", Slot::Previous, Target::Mouse(MouseField::Pressed)),
            ("pmpos", Slot::Previous, Target::Mouse(MouseField::Position)),
        ];
        for (code, slot, target) in cases {
            assert_eq!(code.parse(), Ok(Shorthand { slot, target }), "{code}");
        }
    }

    #[test]
    fn test_mouse_field_is_strict_in_both_slots() {
        assert_eq!(
            "cmxyz".parse::<Shorthand>(),
            Err(ShorthandError::UnknownMouseField("xyz".to_string()))
        );
        assert_eq!(
            "pmxyz".parse::<Shorthand>(),
            Err(ShorthandError::UnknownMouseField("xyz".to_string()))
        );
    }

    #[test]
    fn test_trailing_characters_are_ignored() {
        assert_eq!(
            "ck98".parse(),
            Ok(Shorthand {
                slot: Slot::Current,
                target: Target::Keyboard
            })
        );
        assert_eq!(
            "cmpressed".parse(),
            Ok(Shorthand {
                slot: Slot::Current,
                target: Target::Mouse(MouseField::Pressed)
            })
        );
    }

    #[test]
    fn test_malformed_codes_report_the_offending_selector() {
        assert_eq!("".parse::<Shorthand>(), Err(ShorthandError::Empty));
        assert_eq!("xk".parse::<Shorthand>(), Err(ShorthandError::UnknownSlot('x')));
        assert_eq!("c".parse::<Shorthand>(), Err(ShorthandError::MissingTarget));
        assert_eq!("cz".parse::<Shorthand>(), Err(ShorthandError::UnknownTarget('z')));
        assert_eq!(
            "cm".parse::<Shorthand>(),
            Err(ShorthandError::UnknownMouseField(String::new()))
        );
    }

    #[test]
    fn test_get_short_matches_direct_access() {
        let controls = sample_controls();

        assert_eq!(
            controls.get_short("ck").unwrap(),
            ShortValue::Keyboard(&controls.current().keyboard)
        );
        assert_eq!(
            controls.get_short("cmpos").unwrap(),
            ShortValue::MousePosition(controls.current().mouse.position)
        );
        assert_eq!(
            controls.get_short("pmpre").unwrap(),
            ShortValue::MousePressed(controls.previous().mouse.pressed)
        );
    }

    #[test]
    fn test_keyboard_is_indexed_on_the_resolved_mapping() {
        let controls = sample_controls();

        let keyboard = controls.get_short("ck").unwrap().keyboard().unwrap();
        assert!(keyboard[&98]);
        assert!(!keyboard[&97]);
    }

    #[test]
    fn test_malformed_codes_error_out_of_get_short() {
        let controls = sample_controls();
        assert_eq!(
            controls.get_short("zz"),
            Err(ShorthandError::UnknownSlot('z'))
        );
    }
}
