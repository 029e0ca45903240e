// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One handler per row of the dispatch table in [`dispatcher`]. Each one returns what
//! should happen to the event afterwards.
//!
//! [`dispatcher`]: crate::line_editor::dispatcher

use crate::{ConsoleError, ConsoleKey, ConsoleKeyEvent, ConsoleSignal, ConsoleState,
            INTERRUPT_REASON, KeyOutcome, TextSurface};

fn suppressed<S: TextSurface>(state: &ConsoleState<S>, key: ConsoleKey) -> KeyOutcome {
    tracing::debug!(
        message = "Console edit suppressed at commit boundary",
        key = ?key,
        caret = state.surface.caret(),
        boundary = state.commit_boundary.offset(),
    );
    KeyOutcome::consumed()
}

/// # Errors
///
/// [`ConsoleError::InboundChannelBroken`] when the consumer is gone.
pub fn handle_enter<S: TextSurface>(
    state: &mut ConsoleState<S>,
) -> Result<KeyOutcome, ConsoleError> {
    state.submit_line()?;
    Ok(KeyOutcome::consumed())
}

pub fn handle_up<S: TextSurface>(state: &mut ConsoleState<S>) -> KeyOutcome {
    state.navigate_history_older();
    KeyOutcome::consumed()
}

pub fn handle_down<S: TextSurface>(state: &mut ConsoleState<S>) -> KeyOutcome {
    state.navigate_history_newer();
    KeyOutcome::consumed()
}

pub fn handle_left<S: TextSurface>(state: &mut ConsoleState<S>) -> KeyOutcome {
    let boundary = state.commit_boundary.offset();
    let caret = state.surface.caret();
    if caret > boundary {
        return KeyOutcome::pass_through();
    }
    if caret < boundary {
        state.surface.set_caret(boundary);
    }
    suppressed(state, ConsoleKey::Left)
}

pub fn handle_right<S: TextSurface>(state: &mut ConsoleState<S>) -> KeyOutcome {
    let boundary = state.commit_boundary.offset();
    if state.surface.caret() >= boundary {
        return KeyOutcome::pass_through();
    }
    state.surface.set_caret(boundary);
    suppressed(state, ConsoleKey::Right)
}

/// With `is_extending` the selection grows from its anchor to the boundary.
pub fn handle_home<S: TextSurface>(
    state: &mut ConsoleState<S>,
    is_extending: bool,
) -> KeyOutcome {
    let boundary = state.commit_boundary.offset();
    if is_extending {
        state.surface.move_caret(boundary);
    } else {
        state.surface.set_caret(boundary);
    }
    KeyOutcome::consumed()
}

pub fn handle_backspace<S: TextSurface>(state: &mut ConsoleState<S>) -> KeyOutcome {
    let boundary = state.commit_boundary;
    let is_guarded = match state.surface.selection() {
        Some(selection) => boundary.starts_before(&selection),
        None => state.surface.caret() <= boundary.offset(),
    };
    if is_guarded {
        suppressed(state, ConsoleKey::Backspace)
    } else {
        KeyOutcome::pass_through()
    }
}

pub fn handle_delete<S: TextSurface>(state: &mut ConsoleState<S>) -> KeyOutcome {
    if state.is_edit_guarded() {
        suppressed(state, ConsoleKey::Delete)
    } else {
        KeyOutcome::pass_through()
    }
}

/// Clear the tail and stop browsing history.
pub fn handle_ctrl_u<S: TextSurface>(state: &mut ConsoleState<S>) -> KeyOutcome {
    state.replace_tail("");
    state.history.reset_cursor();
    KeyOutcome::consumed()
}

#[must_use]
pub fn handle_ctrl_d() -> KeyOutcome {
    KeyOutcome::consumed().with_signal(ConsoleSignal::EndOfInput)
}

/// With a selection, Ctrl-C belongs to the surface (copy).
pub fn handle_ctrl_c<S: TextSurface>(state: &ConsoleState<S>) -> KeyOutcome {
    if state.surface.selection().is_some() {
        return KeyOutcome::pass_through();
    }
    KeyOutcome::consumed().with_signal(ConsoleSignal::Interrupt(INTERRUPT_REASON.to_string()))
}

/// The surface inserts the character; the caret is moved out of the committed region
/// first.
pub fn handle_typing<S: TextSurface>(state: &mut ConsoleState<S>) -> KeyOutcome {
    if state.is_edit_guarded() {
        state.force_caret_to_end();
    }
    KeyOutcome::pass_through()
}

/// Releases never act, but keys the table always consumes stay consumed.
pub fn handle_release<S: TextSurface>(
    state: &ConsoleState<S>,
    event: &ConsoleKeyEvent,
) -> KeyOutcome {
    let is_always_consumed = matches!(
        event.key,
        ConsoleKey::Enter | ConsoleKey::Up | ConsoleKey::Down | ConsoleKey::Home
    ) || event.is_ctrl_char('u')
        || event.is_ctrl_char('d')
        || (event.is_ctrl_char('c') && state.surface.selection().is_none());

    if is_always_consumed {
        KeyOutcome::consumed()
    } else {
        KeyOutcome::pass_through()
    }
}
