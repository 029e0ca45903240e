// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{Read, Write},
          sync::{Arc, MutexGuard, PoisonError}};

/// Disambiguate the type of `StdMutex` from stdlib and tokio to avoid conflicts.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Sink that receives submitted lines (the inbound side of the duplex channel).
pub type InboundSink = Box<dyn Write + Send>;

/// Source that the channel watcher drains (the outbound side of the duplex channel).
pub type OutboundSource = Box<dyn Read + Send>;

/// Callback invoked on Ctrl-C, with a human readable reason.
pub type InterruptFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Callback invoked on Ctrl-D.
pub type EofFn = Arc<dyn Fn() + Send + Sync>;

/// Lock a [`StdMutex`], recovering the guard if a previous holder panicked. None of the
/// state guarded in this crate is left half-updated by a panic in a way that is worse than
/// refusing all further access.
pub fn lock_recovering<T: ?Sized>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
