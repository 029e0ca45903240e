// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line-editing state machine. [`ConsoleState`] owns the surface, the commit
//! boundary and the history; the [`dispatcher`] decides what every key event does to
//! them.

// Attach sources.
pub mod commit_boundary;
pub mod console_state;
pub mod dispatcher;
pub mod event_handlers;
pub mod history;
pub mod key_event;
pub mod output;

// Re-export.
pub use commit_boundary::*;
pub use console_state::*;
pub use dispatcher::*;
pub use history::*;
pub use key_event::*;
pub use output::*;
