// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The thread bridge between the console and its consumer.
//!
//! - [`pipe`] creates the two byte streams (inbound: submitted lines, outbound: output).
//! - [`ChannelWatcher`] drains the outbound stream on its own thread.
//! - [`DispatchSafe`] is how that thread (and anybody else) gets to mutate the
//!   document.

// Attach sources.
pub mod dispatch_safe;
pub mod pipe;
pub mod utf8_chunk_decoder;
pub mod watcher;

// Re-export.
pub use dispatch_safe::*;
pub use pipe::*;
pub use utf8_chunk_decoder::*;
pub use watcher::*;
