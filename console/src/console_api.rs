// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Public entry point. A [`Console`] is created together with the consumer's ends of
//! the duplex channel ([`ConsumerIo`]); the consumer usually lives on another thread
//! and reads lines with [`std::io::BufRead`], while the owner of the [`Console`] feeds
//! it key events.

use std::{fmt::{Debug, Display, Formatter},
          sync::Arc};

use crate::{ChannelWatcher, ConsoleColor, ConsoleConfig, ConsoleError, ConsoleKeyEvent,
            ConsoleSignal, ConsoleState, DispatchSafe, EmbeddedImage, EofFn,
            InboundSink, InterruptFn, KeyDisposition, LivenessState, MemorySurface,
            OutboundSource, PipeReader, PipeWriter, PrintItem, StdMutex, TextStyle,
            TextSurface, WatcherExit, lock_recovering, pipe, spawn_channel_watcher};

/// The consumer's side of the channel. A field is `None` when the caller supplied the
/// corresponding stream through [`ConsoleChannels`].
#[derive(Debug, Default)]
pub struct ConsumerIo {
    /// Submitted lines, each ending in `"\n"`.
    pub lines: Option<PipeReader>,
    /// Everything written here is appended to the document by the watcher.
    pub output: Option<PipeWriter>,
}

/// Externally supplied streams. Any side left `None` gets an internal pipe.
#[derive(Default)]
pub struct ConsoleChannels {
    pub inbound: Option<InboundSink>,
    pub outbound: Option<OutboundSource>,
}

impl Debug for ConsoleChannels {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleChannels")
            .field("inbound", &self.inbound.is_some())
            .field("outbound", &self.outbound.is_some())
            .finish()
    }
}

#[derive(Default)]
struct ConsoleCallbacks {
    interrupt_fn: Option<InterruptFn>,
    eof_fn: Option<EofFn>,
}

/// Interactive console over a [`TextSurface`].
pub struct Console<S: TextSurface + 'static = MemorySurface> {
    dispatch_safe: DispatchSafe<S>,
    callbacks: Arc<StdMutex<ConsoleCallbacks>>,
    watcher: Option<ChannelWatcher>,
    error_color: ConsoleColor,
}

impl<S: TextSurface + 'static> Debug for Console<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("dispatch_safe", &self.dispatch_safe)
            .field("watcher", &self.watcher)
            .finish_non_exhaustive()
    }
}

impl<S: TextSurface + 'static> Console<S> {
    /// Console with both channels backed by internal pipes.
    pub fn new(surface: S, config: ConsoleConfig) -> (Self, ConsumerIo) {
        Self::with_channels(surface, config, ConsoleChannels::default())
    }

    /// Console with any side of the channel replaced by a caller supplied stream.
    ///
    /// This never fails. If the watcher thread cannot be started, the reason is
    /// printed into the document in the error color and output from the consumer is
    /// never shown.
    pub fn with_channels(
        surface: S,
        config: ConsoleConfig,
        channels: ConsoleChannels,
    ) -> (Self, ConsumerIo) {
        let mut consumer_io = ConsumerIo::default();

        let inbound: InboundSink = match channels.inbound {
            Some(sink) => sink,
            None => {
                let (writer, reader) = pipe();
                consumer_io.lines = Some(reader);
                Box::new(writer)
            }
        };

        let outbound: OutboundSource = match channels.outbound {
            Some(source) => source,
            None => {
                let (writer, reader) = pipe();
                consumer_io.output = Some(writer);
                Box::new(reader)
            }
        };

        let error_color = config.error_color;
        let dispatch_safe =
            DispatchSafe::new(ConsoleState::new(surface, Some(inbound), config.clone()));

        let watcher =
            match spawn_channel_watcher(outbound, dispatch_safe.clone(), &config) {
                Ok(watcher) => Some(watcher),
                Err(error) => {
                    tracing::error!(
                        message = "Console running without a channel watcher",
                        error = ?error
                    );
                    let message = format!("Console internal error (1)... {error}\n");
                    dispatch_safe
                        .invoke_and_wait(move |state| state.append_error_output(&message));
                    None
                }
            };

        let console = Self {
            dispatch_safe,
            callbacks: Arc::new(StdMutex::new(ConsoleCallbacks::default())),
            watcher,
            error_color,
        };

        (console, consumer_io)
    }

    /// Feed one key event. Callbacks fire after the document has been updated and the
    /// console has been released, so they may print.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::InboundChannelBroken`] when a submitted line could not be
    ///   written. The channel is dropped; later submissions print an internal error.
    /// - [`ConsoleError::ReentrantDispatch`] when called from inside an operation that
    ///   already holds this console.
    pub fn dispatch_key(
        &self,
        event: &ConsoleKeyEvent,
    ) -> Result<KeyDisposition, ConsoleError> {
        let outcome = self
            .dispatch_safe
            .try_invoke_and_wait(|state| state.apply_key_event(event))??;

        match outcome.signal {
            Some(ConsoleSignal::Interrupt(reason)) => {
                let maybe_fn = lock_recovering(&self.callbacks).interrupt_fn.clone();
                if let Some(interrupt_fn) = maybe_fn {
                    interrupt_fn(&reason);
                }
            }
            Some(ConsoleSignal::EndOfInput) => {
                let maybe_fn = lock_recovering(&self.callbacks).eof_fn.clone();
                if let Some(eof_fn) = maybe_fn {
                    eof_fn();
                }
            }
            None => {}
        }

        Ok(outcome.disposition)
    }

    /// Replaces any previous interrupt callback.
    pub fn set_interrupt_fn(&self, interrupt_fn: InterruptFn) {
        lock_recovering(&self.callbacks).interrupt_fn = Some(interrupt_fn);
    }

    /// Replaces any previous end-of-input callback.
    pub fn set_eof_fn(&self, eof_fn: EofFn) {
        lock_recovering(&self.callbacks).eof_fn = Some(eof_fn);
    }

    /// A handle that prints into this console from any thread.
    #[must_use]
    pub fn printer(&self) -> ConsolePrinter<S> {
        ConsolePrinter {
            dispatch_safe: self.dispatch_safe.clone(),
            error_color: self.error_color,
        }
    }

    pub fn print(&self, value: impl Display) { self.printer().print(value); }

    pub fn println(&self, value: impl Display) { self.printer().println(value); }

    pub fn println_empty(&self) { self.printer().println_empty(); }

    pub fn error(&self, value: impl Display) { self.printer().error(value); }

    pub fn print_colored(&self, value: impl Display, color: impl Into<ConsoleColor>) {
        self.printer().print_colored(value, color);
    }

    pub fn print_styled(&self, value: impl Display, style: &TextStyle) {
        self.printer().print_styled(value, style);
    }

    pub fn print_image(&self, image: &EmbeddedImage) { self.printer().print_image(image); }

    pub fn println_image(&self, image: &EmbeddedImage) {
        self.printer().println_image(image);
    }

    /// The selected text, if any.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::ReentrantDispatch`] from inside the owner context.
    pub fn copy(&self) -> Result<Option<String>, ConsoleError> {
        self.dispatch_safe
            .try_invoke_and_wait(|state| state.selected_text())
    }

    /// The selected text, removed from the document only if it lies entirely in the
    /// editable tail.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::ReentrantDispatch`] from inside the owner context.
    pub fn cut(&self) -> Result<Option<String>, ConsoleError> {
        self.dispatch_safe
            .try_invoke_and_wait(ConsoleState::cut_selection)
    }

    /// Insert `text` at the caret (or over the selection), moving into the editable
    /// tail first if needed.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::ReentrantDispatch`] from inside the owner context.
    pub fn paste(&self, text: &str) -> Result<(), ConsoleError> {
        self.dispatch_safe
            .try_invoke_and_wait(|state| state.paste_text(text))
    }

    pub fn set_wait_feedback(&self, is_waiting: bool) {
        self.dispatch_safe
            .invoke_and_wait(move |state| state.surface.set_wait_feedback(is_waiting));
    }

    /// Stop delivering submitted lines. The consumer reading [`ConsumerIo::lines`]
    /// sees end of stream.
    pub fn close_inbound(&self) {
        self.dispatch_safe
            .invoke_and_wait(ConsoleState::close_inbound);
    }

    /// Run a read-only query against the console state.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::ReentrantDispatch`] from inside the owner context.
    pub fn with_state<R>(
        &self,
        query: impl FnOnce(&ConsoleState<S>) -> R,
    ) -> Result<R, ConsoleError> {
        self.dispatch_safe.try_invoke_and_wait(|state| query(state))
    }

    /// # Errors
    ///
    /// [`ConsoleError::ReentrantDispatch`] from inside the owner context.
    pub fn tail_text(&self) -> Result<String, ConsoleError> {
        self.with_state(ConsoleState::tail_text)
    }

    /// # Errors
    ///
    /// [`ConsoleError::ReentrantDispatch`] from inside the owner context.
    pub fn document_text(&self) -> Result<String, ConsoleError> {
        self.with_state(ConsoleState::document_text)
    }

    /// `None` when the watcher could not be started.
    #[must_use]
    pub fn watcher_liveness(&self) -> Option<LivenessState> {
        self.watcher.as_ref().map(ChannelWatcher::is_running)
    }

    /// Block until the watcher has drained the outbound channel (the consumer must
    /// have dropped [`ConsumerIo::output`]).
    pub fn join_watcher(&mut self) -> Option<WatcherExit> {
        self.watcher.as_mut().and_then(ChannelWatcher::join)
    }
}

/// The watcher keeps the state (and so the inbound sink) alive, so the consumer only
/// sees end of stream if the sink is closed here. Once the consumer lets go of its
/// output, the watcher ends too.
impl<S: TextSurface + 'static> Drop for Console<S> {
    fn drop(&mut self) { self.close_inbound(); }
}

/// Prints into a console. Clone it into as many threads as needed; every call is a
/// single dispatch-safe operation, so a styled print is never interleaved with other
/// output. Calls made from inside the console's own critical section are applied
/// right after the current operation.
pub struct ConsolePrinter<S: TextSurface + 'static = MemorySurface> {
    dispatch_safe: DispatchSafe<S>,
    error_color: ConsoleColor,
}

impl<S: TextSurface + 'static> Clone for ConsolePrinter<S> {
    fn clone(&self) -> Self {
        Self {
            dispatch_safe: self.dispatch_safe.clone(),
            error_color: self.error_color,
        }
    }
}

impl<S: TextSurface + 'static> Debug for ConsolePrinter<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsolePrinter")
            .field("dispatch_safe", &self.dispatch_safe)
            .finish_non_exhaustive()
    }
}

impl<S: TextSurface + 'static> ConsolePrinter<S> {
    pub fn print(&self, value: impl Display) { self.append(PrintItem::Text(value.to_string())); }

    pub fn println(&self, value: impl Display) {
        self.append(PrintItem::Text(format!("{value}\n")));
    }

    pub fn println_empty(&self) { self.append(PrintItem::Text("\n".to_string())); }

    pub fn error(&self, value: impl Display) { self.print_colored(value, self.error_color); }

    pub fn print_colored(&self, value: impl Display, color: impl Into<ConsoleColor>) {
        self.print_styled(value, &TextStyle::new().color(color));
    }

    pub fn print_styled(&self, value: impl Display, style: &TextStyle) {
        let item = PrintItem::Text(value.to_string());
        let style = style.clone();
        self.dispatch_safe
            .invoke_and_wait(move |state| state.append_styled_output(&item, &style));
    }

    pub fn print_image(&self, image: &EmbeddedImage) {
        self.append(PrintItem::Image(image.clone()));
    }

    pub fn println_image(&self, image: &EmbeddedImage) {
        let item = PrintItem::Image(image.clone());
        self.dispatch_safe.invoke_and_wait(move |state| {
            state.append_output(&item);
            state.append_output(&PrintItem::Text("\n".to_string()));
        });
    }

    fn append(&self, item: PrintItem) {
        self.dispatch_safe
            .invoke_and_wait(move |state| state.append_output(&item));
    }
}
