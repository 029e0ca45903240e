// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Key events as the console sees them. Any source of key events (a terminal, a GUI
//! toolkit, a test script) converts into [`ConsoleKeyEvent`]; the crossterm conversion
//! is provided here.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind as CrosstermKeyEventKind,
                       KeyModifiers, ModifierKeyCode};
use serde::{Deserialize, Serialize};

/// Build a [`ConsoleKeyEvent`] with less ceremony.
///
/// ```
/// use r3bl_console::{ConsoleKey, KeyEventKind, console_key};
///
/// assert_eq!(console_key!(@char 'a').key, ConsoleKey::Char('a'));
/// assert!(console_key!(@ctrl 'u').mask.is_ctrl_pressed());
/// assert_eq!(console_key!(@special Enter).key, ConsoleKey::Enter);
/// assert!(console_key!(@shift Home).mask.is_shift_pressed());
/// assert_eq!(console_key!(@release Up).kind, KeyEventKind::Release);
/// ```
#[macro_export]
macro_rules! console_key {
    // @char
    (@char $arg_char : expr) => {
        $crate::ConsoleKeyEvent::pressed($crate::ConsoleKey::Char($arg_char))
    };

    // @ctrl
    (@ctrl $arg_char : expr) => {
        $crate::ConsoleKeyEvent::pressed($crate::ConsoleKey::Char($arg_char))
            .with_mask($crate::ModifierKeysMask::new().with_ctrl())
    };

    // @special
    (@special $arg_special : ident) => {
        $crate::ConsoleKeyEvent::pressed($crate::ConsoleKey::$arg_special)
    };

    // @shift
    (@shift $arg_special : ident) => {
        $crate::ConsoleKeyEvent::pressed($crate::ConsoleKey::$arg_special)
            .with_mask($crate::ModifierKeysMask::new().with_shift())
    };

    // @release
    (@release $arg_special : ident) => {
        $crate::ConsoleKeyEvent::pressed($crate::ConsoleKey::$arg_special).released()
    };

    // @mask
    (@mask $arg_modifiers : expr, $arg_key : expr) => {
        $crate::ConsoleKeyEvent::pressed($arg_key).with_mask($arg_modifiers)
    };
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleKey {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Function(u8),
    /// A modifier pressed on its own.
    Modifier(ModifierKey),
    System(SystemKey),
    /// Anything the source could not name (media keys, keypad begin, ...).
    Unidentified,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    Shift,
    Control,
    Alt,
    Meta,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemKey {
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    Menu,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyState {
    Pressed,
    #[default]
    NotPressed,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Release,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
    pub meta_key_state: KeyState,
}

impl ModifierKeysMask {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn is_shift_pressed(&self) -> bool { self.shift_key_state == KeyState::Pressed }

    #[must_use]
    pub fn is_ctrl_pressed(&self) -> bool { self.ctrl_key_state == KeyState::Pressed }

    #[must_use]
    pub fn is_alt_pressed(&self) -> bool { self.alt_key_state == KeyState::Pressed }

    #[must_use]
    pub fn is_meta_pressed(&self) -> bool { self.meta_key_state == KeyState::Pressed }

    /// No Ctrl, Alt or Meta. Shift is allowed since it is part of typing.
    #[must_use]
    pub fn is_plain_typing(&self) -> bool {
        !self.is_ctrl_pressed() && !self.is_alt_pressed() && !self.is_meta_pressed()
    }
}

impl From<KeyModifiers> for ModifierKeysMask {
    /// `intersects` is used rather than `contains`: the bit only has to show up.
    fn from(other: KeyModifiers) -> ModifierKeysMask {
        let state_of = |flags: KeyModifiers| {
            if other.intersects(flags) {
                KeyState::Pressed
            } else {
                KeyState::NotPressed
            }
        };
        ModifierKeysMask {
            shift_key_state: state_of(KeyModifiers::SHIFT),
            ctrl_key_state: state_of(KeyModifiers::CONTROL),
            alt_key_state: state_of(KeyModifiers::ALT),
            meta_key_state: state_of(KeyModifiers::META | KeyModifiers::SUPER),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsoleKeyEvent {
    pub key: ConsoleKey,
    #[serde(default)]
    pub mask: ModifierKeysMask,
    #[serde(default)]
    pub kind: KeyEventKind,
}

impl ConsoleKeyEvent {
    #[must_use]
    pub fn pressed(key: ConsoleKey) -> Self {
        Self {
            key,
            mask: ModifierKeysMask::new(),
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub fn with_mask(mut self, mask: ModifierKeysMask) -> Self {
        self.mask = mask;
        self
    }

    #[must_use]
    pub fn released(mut self) -> Self {
        self.kind = KeyEventKind::Release;
        self
    }

    #[must_use]
    pub fn is_press(&self) -> bool { self.kind == KeyEventKind::Press }

    /// Is this `key` (letters compared case insensitively) with Ctrl held?
    #[must_use]
    pub fn is_ctrl_char(&self, expected: char) -> bool {
        match self.key {
            ConsoleKey::Char(ch) => {
                self.mask.is_ctrl_pressed() && ch.eq_ignore_ascii_case(&expected)
            }
            _ => false,
        }
    }
}

impl From<ModifierKeyCode> for ModifierKey {
    fn from(other: ModifierKeyCode) -> Self {
        match other {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => ModifierKey::Shift,
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => {
                ModifierKey::Control
            }
            ModifierKeyCode::LeftAlt
            | ModifierKeyCode::RightAlt
            | ModifierKeyCode::IsoLevel3Shift
            | ModifierKeyCode::IsoLevel5Shift => ModifierKey::Alt,
            ModifierKeyCode::LeftSuper
            | ModifierKeyCode::RightSuper
            | ModifierKeyCode::LeftHyper
            | ModifierKeyCode::RightHyper
            | ModifierKeyCode::LeftMeta
            | ModifierKeyCode::RightMeta => ModifierKey::Meta,
        }
    }
}

impl From<KeyCode> for ConsoleKey {
    fn from(other: KeyCode) -> Self {
        match other {
            KeyCode::Char(ch) => ConsoleKey::Char(ch),
            KeyCode::Enter => ConsoleKey::Enter,
            KeyCode::Tab => ConsoleKey::Tab,
            KeyCode::BackTab => ConsoleKey::BackTab,
            KeyCode::Backspace => ConsoleKey::Backspace,
            KeyCode::Delete => ConsoleKey::Delete,
            KeyCode::Insert => ConsoleKey::Insert,
            KeyCode::Esc => ConsoleKey::Esc,
            KeyCode::Left => ConsoleKey::Left,
            KeyCode::Right => ConsoleKey::Right,
            KeyCode::Up => ConsoleKey::Up,
            KeyCode::Down => ConsoleKey::Down,
            KeyCode::Home => ConsoleKey::Home,
            KeyCode::End => ConsoleKey::End,
            KeyCode::PageUp => ConsoleKey::PageUp,
            KeyCode::PageDown => ConsoleKey::PageDown,
            KeyCode::F(number) => ConsoleKey::Function(number),
            KeyCode::Modifier(modifier) => ConsoleKey::Modifier(modifier.into()),
            KeyCode::CapsLock => ConsoleKey::System(SystemKey::CapsLock),
            KeyCode::ScrollLock => ConsoleKey::System(SystemKey::ScrollLock),
            KeyCode::NumLock => ConsoleKey::System(SystemKey::NumLock),
            KeyCode::PrintScreen => ConsoleKey::System(SystemKey::PrintScreen),
            KeyCode::Pause => ConsoleKey::System(SystemKey::Pause),
            KeyCode::Menu => ConsoleKey::System(SystemKey::Menu),
            KeyCode::Null | KeyCode::KeypadBegin | KeyCode::Media(_) => {
                ConsoleKey::Unidentified
            }
        }
    }
}

impl From<KeyEvent> for ConsoleKeyEvent {
    /// Repeats are treated as presses.
    fn from(other: KeyEvent) -> Self {
        ConsoleKeyEvent {
            key: other.code.into(),
            mask: other.modifiers.into(),
            kind: match other.kind {
                CrosstermKeyEventKind::Press | CrosstermKeyEventKind::Repeat => {
                    KeyEventKind::Press
                }
                CrosstermKeyEventKind::Release => KeyEventKind::Release,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(KeyCode::Char('x'), ConsoleKey::Char('x'))]
    #[test_case(KeyCode::Enter, ConsoleKey::Enter)]
    #[test_case(KeyCode::F(5), ConsoleKey::Function(5))]
    #[test_case(KeyCode::CapsLock, ConsoleKey::System(SystemKey::CapsLock))]
    #[test_case(
        KeyCode::Modifier(ModifierKeyCode::RightShift),
        ConsoleKey::Modifier(ModifierKey::Shift)
    )]
    #[test_case(KeyCode::Null, ConsoleKey::Unidentified)]
    fn test_convert_key_code(code: KeyCode, expected: ConsoleKey) {
        assert_eq!(ConsoleKey::from(code), expected);
    }

    #[test]
    fn test_convert_crossterm_key_event() {
        let mut crossterm_event =
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        crossterm_event.kind = CrosstermKeyEventKind::Repeat;

        let event = ConsoleKeyEvent::from(crossterm_event);

        assert!(event.is_press());
        assert!(event.is_ctrl_char('C'));
        assert!(event.mask.is_shift_pressed());
        assert!(!event.mask.is_plain_typing());
    }

    #[test]
    fn test_ctrl_char_requires_ctrl() {
        assert!(!console_key!(@char 'c').is_ctrl_char('c'));
        assert!(console_key!(@ctrl 'c').is_ctrl_char('c'));
        assert!(!console_key!(@ctrl 'd').is_ctrl_char('c'));
    }

    #[test]
    fn test_serde_defaults_for_mask_and_kind() {
        let event: ConsoleKeyEvent =
            serde_json::from_str(r#"{ "key": { "Char": "q" } }"#).unwrap();
        assert_eq!(event, console_key!(@char 'q'));
    }
}
