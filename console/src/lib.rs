// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_console
//!
//! An interactive line-oriented text console. It behaves like a terminal: characters
//! typed by the user accumulate in an editable tail, completed lines are handed to a
//! consumer through a blocking channel, and whatever the consumer prints streams back
//! into the document asynchronously, with styling.
//!
//! # Mental model
//!
//! ```text
//!   key events ──▶ Console::dispatch_key ──▶ ConsoleState (owner context)
//!                                              │   ├── CommitBoundary
//!                                              │   ├── History
//!                                              │   └── TextSurface (document)
//!                                              │
//!                    ConsumerIo::lines ◀───────┘ inbound pipe ("1+1\n", ";\n")
//!
//!   consumer thread ──▶ ConsumerIo::output ──▶ ChannelWatcher thread
//!                                                 └── DispatchSafe::invoke_and_wait
//!                                                       └── ConsoleState::append_output
//! ```
//!
//! 1. Everything left of the [`CommitBoundary`] is committed and cannot be edited. The
//!    [`dispatcher`] guards every key event against it.
//! 2. Pressing Enter submits the tail. Non-empty lines are recorded in [`History`].
//! 3. Output is always appended at the end of the document, and it moves the commit
//!    boundary (and the caret) to the new end so that the next keystroke lands after it.
//! 4. All mutation of the document goes through [`DispatchSafe`], which serializes the
//!    foreground (key events, direct prints) and the background [`ChannelWatcher`].
//!
//! # Example
//!
//! ```
//! use std::io::BufRead as _;
//! use r3bl_console::{Console, ConsoleConfig, MemorySurface, console_key};
//!
//! let (console, consumer_io) = Console::new(MemorySurface::new(), ConsoleConfig::default());
//! let mut lines = consumer_io.lines.expect("internal inbound pipe");
//!
//! for ch in "1+1".chars() {
//!     console.dispatch_key(&console_key!(@char ch)).unwrap();
//! }
//! console.dispatch_key(&console_key!(@special Enter)).unwrap();
//!
//! let mut line = String::new();
//! lines.read_line(&mut line).unwrap();
//! assert_eq!(line, "1+1\n");
//! ```
//!
//! [`CommitBoundary`]: crate::CommitBoundary
//! [`dispatcher`]: crate::line_editor::dispatcher
//! [`History`]: crate::History
//! [`DispatchSafe`]: crate::DispatchSafe
//! [`ChannelWatcher`]: crate::ChannelWatcher

// Enforce strict error handling in production library code only. Tests and examples are
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod channel;
pub mod common;
pub mod config;
pub mod console_api;
pub mod error;
pub mod line_editor;
pub mod log;
pub mod surface;
pub mod test_fixtures;

// Re-export.
pub use channel::*;
pub use common::*;
pub use config::*;
pub use console_api::*;
pub use error::*;
pub use line_editor::*;
pub use surface::*;
