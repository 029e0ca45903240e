// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Test doubles for the console's collaborators: channel ends that record, fail, or
//! dribble bytes, and a recorder for the interrupt / end-of-input callbacks. Public so
//! that integration tests and downstream crates can drive a console without a
//! terminal.

// Attach sources.
pub mod callback_recorder;
pub mod io_fixtures;

// Re-export.
pub use callback_recorder::*;
pub use io_fixtures::*;
