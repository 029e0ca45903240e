// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BasicColor, ConsoleColor, TextStyle};

/// Bytes read from the outbound channel per watcher iteration.
pub const DEFAULT_WATCHER_CHUNK_SIZE: usize = 256;

/// What the inbound channel receives when the user submits an empty tail.
pub const EMPTY_LINE_SENTINEL: &str = ";\n";

/// Reason passed to the interrupt callback on Ctrl-C.
pub const INTERRUPT_REASON: &str = "User pressed Ctrl-C";

/// Printed (as a line) once the outbound channel reaches end of stream.
pub const DEFAULT_CLOSING_NOTICE: &str = "Console: Input closed...";

/// Printed in the error color when a line is submitted and no inbound channel exists.
pub const MISSING_INBOUND_NOTICE: &str = "Console internal error: cannot output ...\n";

pub const DEFAULT_FONT_FAMILY: &str = "Monospaced";

pub const DEFAULT_FONT_SIZE: u16 = 14;

pub const DEFAULT_WATCHER_THREAD_NAME: &str = "console-channel-watcher";

/// Tunables for a [`Console`]. Every field has a default that reproduces the classic
/// behavior, so most callers use [`ConsoleConfig::default()`] and override one or two
/// fields with the `with_*` builders.
///
/// [`Console`]: crate::Console
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Size of the read buffer used by the channel watcher. Values of `0` are treated
    /// as `1`.
    pub watcher_chunk_size: usize,
    /// Text printed once (followed by a newline) when the outbound channel closes.
    pub closing_notice: String,
    /// Maximum number of history entries retained. `None` means unbounded.
    pub history_limit: Option<usize>,
    /// Character style applied to the surface when the console is created.
    pub default_style: TextStyle,
    /// Color used by [`ConsolePrinter::error`] and for internal error messages.
    ///
    /// [`ConsolePrinter::error`]: crate::ConsolePrinter::error
    pub error_color: ConsoleColor,
    pub watcher_thread_name: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            watcher_chunk_size: DEFAULT_WATCHER_CHUNK_SIZE,
            closing_notice: DEFAULT_CLOSING_NOTICE.to_string(),
            history_limit: None,
            default_style: TextStyle::new()
                .font_family(DEFAULT_FONT_FAMILY)
                .font_size(DEFAULT_FONT_SIZE),
            error_color: ConsoleColor::Basic(BasicColor::Red),
            watcher_thread_name: DEFAULT_WATCHER_THREAD_NAME.to_string(),
        }
    }
}

impl ConsoleConfig {
    #[must_use]
    pub fn with_watcher_chunk_size(mut self, arg_chunk_size: usize) -> Self {
        self.watcher_chunk_size = arg_chunk_size;
        self
    }

    #[must_use]
    pub fn with_closing_notice(mut self, arg_notice: impl Into<String>) -> Self {
        self.closing_notice = arg_notice.into();
        self
    }

    #[must_use]
    pub fn with_history_limit(mut self, arg_limit: usize) -> Self {
        self.history_limit = Some(arg_limit);
        self
    }

    #[must_use]
    pub fn with_default_style(mut self, arg_style: TextStyle) -> Self {
        self.default_style = arg_style;
        self
    }

    #[must_use]
    pub fn with_error_color(mut self, arg_color: impl Into<ConsoleColor>) -> Self {
        self.error_color = arg_color.into();
        self
    }

    #[must_use]
    pub fn with_watcher_thread_name(mut self, arg_name: impl Into<String>) -> Self {
        self.watcher_thread_name = arg_name.into();
        self
    }

    /// The read buffer size the watcher actually uses.
    #[must_use]
    pub fn effective_chunk_size(&self) -> usize { self.watcher_chunk_size.max(1) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.watcher_chunk_size, 256);
        assert_eq!(config.closing_notice, "Console: Input closed...");
        assert_eq!(config.history_limit, None);
        assert_eq!(
            config.default_style.font_family.as_deref(),
            Some(DEFAULT_FONT_FAMILY)
        );
        assert_eq!(config.default_style.font_size, Some(14));
        assert_eq!(config.error_color, ConsoleColor::Basic(BasicColor::Red));
    }

    #[test]
    fn test_builders_and_effective_chunk_size() {
        let config = ConsoleConfig::default()
            .with_watcher_chunk_size(0)
            .with_history_limit(3)
            .with_closing_notice("bye");
        assert_eq!(config.effective_chunk_size(), 1);
        assert_eq!(config.history_limit, Some(3));
        assert_eq!(config.closing_notice, "bye");
    }
}
