// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Maps a key event to a handler in [`event_handlers`]. The handlers guard the commit
//! boundary; anything they do not consume is left to
//! [`TextSurface::apply_native_key`].
//!
//! | Key                        | Consumed                                   |
//! |----------------------------|--------------------------------------------|
//! | Enter, Up, Down, Home      | always                                     |
//! | Ctrl-U, Ctrl-D             | always                                     |
//! | Ctrl-C                     | when nothing is selected                   |
//! | Left, Right                | when the caret is at or before the boundary|
//! | Backspace, Delete          | when the edit would reach committed text   |
//! | typing (Char, Tab)         | never (the caret may be moved to the end)  |
//! | everything else            | never                                      |
//!
//! Key releases never act. Releases of always-consumed keys are still consumed so
//! that the surface does not act on them either.
//!
//! [`event_handlers`]: crate::line_editor::event_handlers
//! [`TextSurface::apply_native_key`]: crate::TextSurface::apply_native_key

use crate::{ConsoleError, ConsoleKey, ConsoleKeyEvent, ConsoleState, TextSurface,
            line_editor::event_handlers::{handle_backspace, handle_ctrl_c, handle_ctrl_d,
                                          handle_ctrl_u, handle_delete, handle_down,
                                          handle_enter, handle_home, handle_left,
                                          handle_release, handle_right, handle_typing,
                                          handle_up}};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The console handled the event. The surface must not see it.
    Consumed,
    /// The surface's native editing should handle the event.
    PassThrough,
}

/// Something the owner of the console has to be told about, outside the critical
/// section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleSignal {
    Interrupt(String),
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    pub disposition: KeyDisposition,
    pub signal: Option<ConsoleSignal>,
}

impl KeyOutcome {
    #[must_use]
    pub fn consumed() -> Self {
        Self {
            disposition: KeyDisposition::Consumed,
            signal: None,
        }
    }

    #[must_use]
    pub fn pass_through() -> Self {
        Self {
            disposition: KeyDisposition::PassThrough,
            signal: None,
        }
    }

    #[must_use]
    pub fn with_signal(mut self, signal: ConsoleSignal) -> Self {
        self.signal = Some(signal);
        self
    }
}

/// # Errors
///
/// [`ConsoleError::InboundChannelBroken`] from a submission.
pub fn dispatch_key_event<S: TextSurface>(
    state: &mut ConsoleState<S>,
    event: &ConsoleKeyEvent,
) -> Result<KeyOutcome, ConsoleError> {
    if !event.is_press() {
        return Ok(handle_release(state, event));
    }

    let outcome = match event.key {
        ConsoleKey::Enter => handle_enter(state)?,
        ConsoleKey::Up => handle_up(state),
        ConsoleKey::Down => handle_down(state),
        ConsoleKey::Left => handle_left(state),
        ConsoleKey::Right => handle_right(state),
        ConsoleKey::Home => handle_home(state, event.mask.is_shift_pressed()),
        ConsoleKey::Backspace => handle_backspace(state),
        ConsoleKey::Delete => handle_delete(state),
        ConsoleKey::Char(_) if event.is_ctrl_char('u') => handle_ctrl_u(state),
        ConsoleKey::Char(_) if event.is_ctrl_char('d') => handle_ctrl_d(),
        ConsoleKey::Char(_) if event.is_ctrl_char('c') => handle_ctrl_c(state),
        ConsoleKey::Char(_) | ConsoleKey::Tab if event.mask.is_plain_typing() => {
            handle_typing(state)
        }
        _ => KeyOutcome::pass_through(),
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConsoleConfig, INTERRUPT_REASON, MemorySurface, PrintItem, console_key};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    /// Committed "prompt> " (8 chars), tail "abc", caret at the end (11).
    fn state_with_tail() -> ConsoleState<MemorySurface> {
        let mut state =
            ConsoleState::new(MemorySurface::new(), None, ConsoleConfig::default());
        state.append_output(&PrintItem::from("prompt> "));
        state.paste_text("abc");
        state
    }

    #[test_case(console_key!(@special Up), KeyDisposition::Consumed)]
    #[test_case(console_key!(@special Down), KeyDisposition::Consumed)]
    #[test_case(console_key!(@special Home), KeyDisposition::Consumed)]
    #[test_case(console_key!(@ctrl 'u'), KeyDisposition::Consumed)]
    #[test_case(console_key!(@ctrl 'd'), KeyDisposition::Consumed)]
    #[test_case(console_key!(@ctrl 'c'), KeyDisposition::Consumed)]
    #[test_case(console_key!(@char 'x'), KeyDisposition::PassThrough)]
    #[test_case(console_key!(@special Tab), KeyDisposition::PassThrough)]
    #[test_case(console_key!(@special Esc), KeyDisposition::PassThrough)]
    #[test_case(ConsoleKeyEvent::pressed(ConsoleKey::Function(3)), KeyDisposition::PassThrough)]
    #[test_case(console_key!(@special Insert), KeyDisposition::PassThrough)]
    #[test_case(console_key!(@special Left), KeyDisposition::PassThrough)]
    #[test_case(console_key!(@special Right), KeyDisposition::PassThrough)]
    #[test_case(console_key!(@special Backspace), KeyDisposition::PassThrough)]
    fn test_disposition_with_caret_at_end(event: ConsoleKeyEvent, expected: KeyDisposition) {
        let mut state = state_with_tail();
        let outcome = dispatch_key_event(&mut state, &event).unwrap();
        assert_eq!(outcome.disposition, expected);
    }

    #[test_case(console_key!(@release Enter), KeyDisposition::Consumed)]
    #[test_case(console_key!(@release Up), KeyDisposition::Consumed)]
    #[test_case(console_key!(@release Home), KeyDisposition::Consumed)]
    #[test_case(console_key!(@release Backspace), KeyDisposition::PassThrough)]
    #[test_case(console_key!(@release Left), KeyDisposition::PassThrough)]
    #[test_case(console_key!(@ctrl 'u').released(), KeyDisposition::Consumed)]
    fn test_release_never_acts(event: ConsoleKeyEvent, expected: KeyDisposition) {
        let mut state = state_with_tail();
        let before = state.document_text();

        let outcome = dispatch_key_event(&mut state, &event).unwrap();

        assert_eq!(outcome.disposition, expected);
        assert_eq!(outcome.signal, None);
        assert_eq!(state.document_text(), before);
        assert_eq!(state.surface.caret(), 11);
    }

    #[test]
    fn test_left_at_boundary_is_suppressed() {
        let mut state = state_with_tail();
        state.surface.set_caret(8);
        let outcome = dispatch_key_event(&mut state, &console_key!(@special Left)).unwrap();
        assert_eq!(outcome.disposition, KeyDisposition::Consumed);
        assert_eq!(state.surface.caret(), 8);
    }

    #[test]
    fn test_left_before_boundary_is_redirected() {
        let mut state = state_with_tail();
        state.surface.set_caret(3);
        let outcome = dispatch_key_event(&mut state, &console_key!(@special Left)).unwrap();
        assert_eq!(outcome.disposition, KeyDisposition::Consumed);
        assert_eq!(state.surface.caret(), 8);
    }

    #[test]
    fn test_right_before_boundary_lands_on_boundary() {
        let mut state = state_with_tail();
        state.surface.set_caret(2);
        let outcome =
            dispatch_key_event(&mut state, &console_key!(@special Right)).unwrap();
        assert_eq!(outcome.disposition, KeyDisposition::Consumed);
        assert_eq!(state.surface.caret(), 8);
    }

    #[test]
    fn test_home_and_shift_home() {
        let mut state = state_with_tail();
        dispatch_key_event(&mut state, &console_key!(@shift Home)).unwrap();
        assert_eq!(state.surface.selection(), Some(8..11));

        state.force_caret_to_end();
        dispatch_key_event(&mut state, &console_key!(@special Home)).unwrap();
        assert_eq!(state.surface.caret(), 8);
        assert_eq!(state.surface.selection(), None);
    }

    #[test_case(8, None, KeyDisposition::Consumed ; "caret on boundary")]
    #[test_case(9, None, KeyDisposition::PassThrough ; "caret inside tail")]
    #[test_case(11, Some(7), KeyDisposition::Consumed ; "selection reaches committed")]
    #[test_case(11, Some(8), KeyDisposition::PassThrough ; "selection inside tail")]
    fn test_backspace_guard(
        caret: usize,
        anchor: Option<usize>,
        expected: KeyDisposition,
    ) {
        let mut state = state_with_tail();
        match anchor {
            Some(anchor) => {
                state.surface.set_caret(anchor);
                state.surface.move_caret(caret);
            }
            None => state.surface.set_caret(caret),
        }
        let outcome =
            dispatch_key_event(&mut state, &console_key!(@special Backspace)).unwrap();
        assert_eq!(outcome.disposition, expected);
    }

    #[test_case(7, None, KeyDisposition::Consumed ; "caret before boundary")]
    #[test_case(8, None, KeyDisposition::PassThrough ; "caret on boundary")]
    #[test_case(9, Some(5), KeyDisposition::Consumed ; "selection reaches committed")]
    fn test_delete_guard(caret: usize, anchor: Option<usize>, expected: KeyDisposition) {
        let mut state = state_with_tail();
        match anchor {
            Some(anchor) => {
                state.surface.set_caret(anchor);
                state.surface.move_caret(caret);
            }
            None => state.surface.set_caret(caret),
        }
        let outcome =
            dispatch_key_event(&mut state, &console_key!(@special Delete)).unwrap();
        assert_eq!(outcome.disposition, expected);
    }

    #[test]
    fn test_typing_before_boundary_moves_caret_to_end() {
        let mut state = state_with_tail();
        state.surface.set_caret(2);
        let outcome = dispatch_key_event(&mut state, &console_key!(@char 'z')).unwrap();
        assert_eq!(outcome.disposition, KeyDisposition::PassThrough);
        assert_eq!(state.surface.caret(), 11);
    }

    #[test]
    fn test_ctrl_u_clears_tail() {
        let mut state = state_with_tail();
        dispatch_key_event(&mut state, &console_key!(@ctrl 'u')).unwrap();
        assert_eq!(state.document_text(), "prompt> ");
        assert_eq!(state.surface.caret(), 8);
    }

    #[test]
    fn test_ctrl_c_and_ctrl_d_signals() {
        let mut state = state_with_tail();

        let outcome = dispatch_key_event(&mut state, &console_key!(@ctrl 'c')).unwrap();
        assert_eq!(
            outcome.signal,
            Some(ConsoleSignal::Interrupt(INTERRUPT_REASON.to_string()))
        );

        let outcome = dispatch_key_event(&mut state, &console_key!(@ctrl 'd')).unwrap();
        assert_eq!(outcome.signal, Some(ConsoleSignal::EndOfInput));
        assert_eq!(state.document_text(), "prompt> abc");
    }

    #[test]
    fn test_ctrl_c_with_selection_is_left_alone() {
        let mut state = state_with_tail();
        state.surface.set_caret(9);
        state.surface.move_caret(11);
        let outcome = dispatch_key_event(&mut state, &console_key!(@ctrl 'c')).unwrap();
        assert_eq!(outcome, KeyOutcome::pass_through());
    }
}
