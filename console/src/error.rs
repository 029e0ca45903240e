// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

/// Errors that the foreground of the console reports to its caller.
///
/// Document location failures are never surfaced through this type. They are logged
/// with [`tracing::error!`] and the operation degrades (see [`SurfaceError`]).
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConsoleError {
    #[error("Console pipe broken")]
    #[diagnostic(
        code(r3bl_console::inbound_channel_broken),
        help(
            "The consumer stopped reading submitted lines. The inbound channel has been \
             dropped; further submissions print an internal error into the document."
        )
    )]
    InboundChannelBroken {
        #[source]
        source: io::Error,
    },

    #[error("Dispatch-safe call made from inside the console owner context")]
    #[diagnostic(
        code(r3bl_console::reentrant_dispatch),
        help(
            "A callback that already holds the console (for example an output closure) \
             tried to run a blocking query against it. Use the printer instead, which \
             defers nested work until the current operation completes."
        )
    )]
    ReentrantDispatch,
}

/// A requested range or offset does not exist in the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum SurfaceError {
    #[error("Bad location {start}..{end} in a document of length {len}")]
    #[diagnostic(code(r3bl_console::bad_location))]
    BadLocation { start: usize, end: usize, len: usize },
}

/// The channel watcher thread could not be started. The console keeps running without
/// asynchronous output.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("Failed to spawn the console channel watcher thread")]
#[diagnostic(
    code(r3bl_console::watcher_spawn),
    help("Output written by the consumer will not appear in the document.")
)]
pub struct WatcherSpawnError {
    #[source]
    pub source: io::Error,
}

/// Log a location failure and carry on. These can only happen when a [`TextSurface`]
/// implementation disagrees with its own `len()`, so there is nothing the caller can do.
///
/// [`TextSurface`]: crate::TextSurface
pub fn report_location_error(error: &SurfaceError) {
    tracing::error!(
        message = "Console document location error",
        error = %error,
    );
}
