// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Optional [`tracing`] setup for programs that embed a console. The library itself
//! only emits events; nothing is printed unless a subscriber is installed, for example
//! with [`try_initialize_logging_global`].
//!
//! Logs are never written into the console's own document. A console event logged
//! while the console is being mutated would have to mutate it again.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
