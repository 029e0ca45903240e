// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

/// Where log output goes and how verbose it is.
///
/// You can use [`try_initialize_logging_global`] to initialize the tracing system with
/// this configuration.
///
/// [`try_initialize_logging_global`]: crate::log::try_initialize_logging_global
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// The `String` is the path of the log file, eg: `/tmp/echo_console.log`.
#[derive(Debug, Clone, PartialEq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

/// A console running in raw mode on the same terminal should use [`Self::Stderr`] only
/// if stderr is redirected; otherwise log to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    pub const DEFAULT_LOG_FILE: &str = "r3bl_console_debug.log";

    #[must_use]
    pub fn new_file(arg_path: Option<String>, level_filter: LevelFilter) -> Self {
        Self {
            writer_config: WriterConfig::File(
                arg_path.unwrap_or_else(|| Self::DEFAULT_LOG_FILE.to_string()),
            ),
            level_filter,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}
