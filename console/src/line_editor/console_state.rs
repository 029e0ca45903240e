// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          io::Write,
          ops::Range};

use crate::{CommitBoundary, ConsoleConfig, ConsoleError, ConsoleKeyEvent, EMPTY_LINE_SENTINEL,
            History, InboundSink, KeyDisposition, KeyOutcome, MISSING_INBOUND_NOTICE,
            StyleApplication, TextSurface, dispatch_key_event, report_location_error};

/// Everything the foreground owner mutates. Only ever touched inside a
/// [`DispatchSafe`] critical section.
///
/// [`DispatchSafe`]: crate::DispatchSafe
pub struct ConsoleState<S: TextSurface> {
    pub surface: S,
    pub commit_boundary: CommitBoundary,
    pub history: History,
    pub config: ConsoleConfig,
    /// `None` once the channel broke (or if it was never there).
    inbound: Option<InboundSink>,
}

impl<S: TextSurface> Debug for ConsoleState<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleState")
            .field("document_len", &self.surface.len())
            .field("caret", &self.surface.caret())
            .field("commit_boundary", &self.commit_boundary)
            .field("history", &self.history)
            .field("has_inbound", &self.inbound.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: TextSurface> ConsoleState<S> {
    /// Applies the configured default style and commits whatever the surface already
    /// contains.
    pub fn new(mut surface: S, inbound: Option<InboundSink>, config: ConsoleConfig) -> Self {
        surface.set_character_style(&config.default_style, StyleApplication::Replace);
        let mut it = Self {
            surface,
            commit_boundary: CommitBoundary::default(),
            history: History::new(config.history_limit),
            config,
            inbound,
        };
        it.commit_to_end();
        it
    }

    /// Run one key event through the dispatcher, then let the surface handle it if the
    /// dispatcher did not consume it.
    ///
    /// A plain caret move that the surface made into committed text is redirected to
    /// the boundary. Shift-extended selections may still reach back, for copying.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::InboundChannelBroken`] when a submission could not be written.
    pub fn apply_key_event(
        &mut self,
        event: &ConsoleKeyEvent,
    ) -> Result<KeyOutcome, ConsoleError> {
        let outcome = dispatch_key_event(self, event)?;
        if outcome.disposition == KeyDisposition::PassThrough {
            self.surface.apply_native_key(event);
            self.commit_boundary.clamp_to(self.surface.len());
            if !event.mask.is_shift_pressed() {
                self.redirect_caret_to_boundary();
            }
        }
        Ok(outcome)
    }

    fn redirect_caret_to_boundary(&mut self) {
        let boundary = self.commit_boundary.offset();
        if self.surface.caret() < boundary {
            self.surface.set_caret(boundary);
        }
    }

    /// The editable text: `document[boundary..len]`.
    #[must_use]
    pub fn tail_text(&self) -> String {
        self.text_or_empty(self.commit_boundary.offset()..self.surface.len())
    }

    #[must_use]
    pub fn document_text(&self) -> String { self.text_or_empty(0..self.surface.len()) }

    #[must_use]
    pub fn has_inbound(&self) -> bool { self.inbound.is_some() }

    /// Drop the inbound sink. The consumer sees end of stream once every other writer
    /// is gone.
    pub fn close_inbound(&mut self) { self.inbound = None; }

    /// Move the boundary and the caret to the end of the document.
    pub fn commit_to_end(&mut self) {
        let len = self.surface.len();
        self.commit_boundary.reset_to(len);
        self.surface.set_caret(len);
    }

    pub fn force_caret_to_end(&mut self) {
        let len = self.surface.len();
        self.surface.set_caret(len);
    }

    /// Replace the editable tail, leaving the caret at the end.
    pub fn replace_tail(&mut self, text: &str) {
        let range = self.commit_boundary.offset()..self.surface.len();
        match self.surface.replace_range(range, text) {
            Ok(()) => self.force_caret_to_end(),
            Err(error) => report_location_error(&error),
        }
    }

    /// Hand the tail to the consumer. See [`handle_enter`] for where this sits in the
    /// key flow.
    ///
    /// The document always gets a `"\n"`. Even when the write fails, the boundary moves
    /// past the submitted line so the tail is never left half committed.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::InboundChannelBroken`] when the consumer side is gone.
    ///
    /// [`handle_enter`]: crate::line_editor::event_handlers::handle_enter
    pub fn submit_line(&mut self) -> Result<(), ConsoleError> {
        let tail = self.tail_text();
        let payload = if tail.is_empty() {
            EMPTY_LINE_SENTINEL.to_string()
        } else {
            let it = format!("{tail}\n");
            self.history.push(tail);
            it
        };

        tracing::debug!(message = "Console line submitted", payload = ?payload);

        let end = self.surface.len();
        if let Err(error) = self.surface.replace_range(end..end, "\n") {
            report_location_error(&error);
        }
        self.history.reset_cursor();

        let result = self.send_inbound(&payload);
        self.commit_to_end();
        result
    }

    pub fn navigate_history_older(&mut self) {
        let tail = self.tail_text();
        let Some(line) = self.history.navigate_older(&tail).map(str::to_owned) else {
            return;
        };
        tracing::debug!(
            message = "Console history navigated",
            cursor = self.history.cursor(),
            line = ?line
        );
        self.replace_tail(&line);
    }

    pub fn navigate_history_newer(&mut self) {
        let Some(line) = self.history.navigate_newer().map(str::to_owned) else {
            return;
        };
        tracing::debug!(
            message = "Console history navigated",
            cursor = self.history.cursor(),
            line = ?line
        );
        self.replace_tail(&line);
    }

    /// Is the caret, or the start of the selection, in the committed region?
    #[must_use]
    pub fn is_edit_guarded(&self) -> bool {
        let boundary = self.commit_boundary;
        !boundary.is_editable(self.surface.caret())
            || self
                .surface
                .selection()
                .is_some_and(|selection| boundary.starts_before(&selection))
    }

    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        let selection = self.surface.selection()?;
        Some(self.text_or_empty(selection))
    }

    /// Returns the selected text, and removes it from the document unless that would
    /// touch committed content (then it is only copied).
    pub fn cut_selection(&mut self) -> Option<String> {
        let selection = self.surface.selection()?;
        let text = self.text_or_empty(selection.clone());
        if !self.commit_boundary.starts_before(&selection) {
            let start = selection.start;
            match self.surface.replace_range(selection, "") {
                Ok(()) => self.surface.set_caret(start),
                Err(error) => report_location_error(&error),
            }
        }
        Some(text)
    }

    /// Insert `text` as if typed: a guarded caret or selection is abandoned for the end
    /// of the document first.
    pub fn paste_text(&mut self, text: &str) {
        if self.is_edit_guarded() {
            self.force_caret_to_end();
        }
        let caret = self.surface.caret();
        let range = self.surface.selection().unwrap_or(caret..caret);
        let start = range.start;
        match self.surface.replace_range(range, text) {
            Ok(()) => self.surface.set_caret(start + text.chars().count()),
            Err(error) => report_location_error(&error),
        }
    }

    fn send_inbound(&mut self, payload: &str) -> Result<(), ConsoleError> {
        let Some(sink) = self.inbound.as_mut() else {
            self.append_error_output(MISSING_INBOUND_NOTICE);
            return Ok(());
        };

        let result = sink
            .write_all(payload.as_bytes())
            .and_then(|()| sink.flush());

        match result {
            Ok(()) => Ok(()),
            Err(source) => {
                tracing::error!(
                    message = "Console inbound channel broken",
                    error = %source
                );
                self.inbound = None;
                Err(ConsoleError::InboundChannelBroken { source })
            }
        }
    }

    fn text_or_empty(&self, range: Range<usize>) -> String {
        self.surface.text(range).unwrap_or_else(|error| {
            report_location_error(&error);
            String::new()
        })
    }
}
