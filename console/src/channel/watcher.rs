// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The background half of the console: a dedicated thread that blocks on the outbound
//! source and appends whatever arrives.
//!
//! # Thread lifecycle
//!
//! 1. [`spawn_channel_watcher`] starts a named thread. The returned [`ChannelWatcher`]
//!    shares a [`WatcherLiveness`] with it.
//! 2. The thread reads chunks of [`ConsoleConfig::watcher_chunk_size`] bytes. Each
//!    decoded chunk is appended through [`DispatchSafe::invoke_and_wait`], so the next
//!    read only starts once the document has been updated.
//! 3. At end of stream the closing notice is appended once. A read error is printed
//!    in the error color. Either way the loop ends and is never restarted.
//! 4. A [`WatcherTerminationGuard`] marks the liveness as terminated when the thread
//!    exits, including by panic.
//!
//! [`ConsoleConfig::watcher_chunk_size`]: crate::ConsoleConfig::watcher_chunk_size

use std::{io::{self, Read},
          sync::{Arc,
                 atomic::{AtomicBool, Ordering}},
          thread::JoinHandle};

use crate::{ConsoleConfig, DispatchSafe, OutboundSource, PrintItem, TextStyle, TextSurface,
            Utf8ChunkDecoder, WatcherSpawnError};

/// Self-documenting running state of the watcher thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivenessState {
    Running,
    Terminated,
}

/// Why the watcher loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherExit {
    EndOfStream,
    ReadFailed(io::ErrorKind),
}

/// Uses an [`AtomicBool`] so that it can be queried from any thread without taking the
/// console lock.
#[derive(Debug)]
pub struct WatcherLiveness {
    is_running: AtomicBool,
}

impl WatcherLiveness {
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_running: AtomicBool::new(true),
        }
    }

    pub fn mark_terminated(&self) { self.is_running.store(false, Ordering::SeqCst); }

    #[must_use]
    pub fn is_running(&self) -> LivenessState {
        if self.is_running.load(Ordering::SeqCst) {
            LivenessState::Running
        } else {
            LivenessState::Terminated
        }
    }
}

impl Default for WatcherLiveness {
    fn default() -> Self { Self::new() }
}

/// [RAII] guard owned by the watcher thread.
///
/// [RAII]: https://en.wikipedia.org/wiki/Resource_acquisition_is_initialization
#[derive(Debug)]
struct WatcherTerminationGuard {
    liveness: Arc<WatcherLiveness>,
}

impl Drop for WatcherTerminationGuard {
    fn drop(&mut self) { self.liveness.mark_terminated(); }
}

/// Handle to the watcher thread.
#[derive(Debug)]
pub struct ChannelWatcher {
    liveness: Arc<WatcherLiveness>,
    join_handle: Option<JoinHandle<WatcherExit>>,
}

impl ChannelWatcher {
    #[must_use]
    pub fn is_running(&self) -> LivenessState { self.liveness.is_running() }

    /// Block until the thread ends. Returns `None` if it was already joined or if it
    /// panicked.
    pub fn join(&mut self) -> Option<WatcherExit> {
        let handle = self.join_handle.take()?;
        match handle.join() {
            Ok(exit) => Some(exit),
            Err(_) => {
                tracing::error!(message = "Console channel watcher thread panicked");
                None
            }
        }
    }
}

/// Start the watcher thread.
///
/// # Errors
///
/// [`WatcherSpawnError`] if the OS refuses to create the thread.
pub fn spawn_channel_watcher<S: TextSurface + 'static>(
    source: OutboundSource,
    dispatch_safe: DispatchSafe<S>,
    config: &ConsoleConfig,
) -> Result<ChannelWatcher, WatcherSpawnError> {
    let liveness = Arc::new(WatcherLiveness::new());
    let guard = WatcherTerminationGuard {
        liveness: Arc::clone(&liveness),
    };
    let settings = WatcherSettings::from(config);

    let join_handle = std::thread::Builder::new()
        .name(config.watcher_thread_name.clone())
        .spawn(move || {
            let _guard = guard;
            run_watcher_loop(source, &dispatch_safe, &settings)
        })
        .map_err(|source| WatcherSpawnError { source })?;

    Ok(ChannelWatcher {
        liveness,
        join_handle: Some(join_handle),
    })
}

/// The parts of [`ConsoleConfig`] the thread needs.
#[derive(Debug, Clone)]
struct WatcherSettings {
    chunk_size: usize,
    closing_line: String,
    error_style: TextStyle,
}

impl From<&ConsoleConfig> for WatcherSettings {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            chunk_size: config.effective_chunk_size(),
            closing_line: format!("{}\n", config.closing_notice),
            error_style: TextStyle::new().color(config.error_color),
        }
    }
}

fn run_watcher_loop<S: TextSurface + 'static>(
    mut source: OutboundSource,
    dispatch_safe: &DispatchSafe<S>,
    settings: &WatcherSettings,
) -> WatcherExit {
    let mut buffer = vec![0_u8; settings.chunk_size];
    let mut decoder = Utf8ChunkDecoder::default();

    tracing::debug!(
        message = "Console channel watcher started",
        chunk_size = settings.chunk_size
    );

    loop {
        match source.read(&mut buffer) {
            Ok(0) => {
                let mut text = decoder.finish().unwrap_or_default();
                text.push_str(&settings.closing_line);
                dispatch_safe
                    .invoke_and_wait(move |state| state.append_output(&PrintItem::Text(text)));
                tracing::debug!(message = "Console channel watcher reached end of stream");
                return WatcherExit::EndOfStream;
            }
            Ok(count) => {
                let text = decoder.decode(&buffer[..count]);
                if !text.is_empty() {
                    dispatch_safe.invoke_and_wait(move |state| {
                        state.append_output(&PrintItem::Text(text));
                    });
                }
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => {
                tracing::error!(
                    message = "Console channel watcher read failed",
                    error = %error
                );
                let pending = decoder.finish();
                let item = PrintItem::Text(format!("Console: I/O Error: {error}\n"));
                let style = settings.error_style.clone();
                dispatch_safe.invoke_and_wait(move |state| {
                    if let Some(text) = pending {
                        state.append_output(&PrintItem::Text(text));
                    }
                    state.append_styled_output(&item, &style);
                });
                return WatcherExit::ReadFailed(error.kind());
            }
        }
    }
}
