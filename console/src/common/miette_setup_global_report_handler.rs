// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Report handler for binaries that run a console and return `miette::Result` from
//! `main()`, such as `examples/echo_console.rs`.

use miette::MietteHandlerOpts;

/// Used when stdout is not a terminal (eg: output piped into a file).
pub const FALLBACK_REPORT_WIDTH: usize = 80;

/// Wide terminals make reports hard to read; cap them.
pub const MAX_REPORT_WIDTH: usize = 120;

/// Install the graphical handler. The width is measured when a report is rendered,
/// since the console may have been resized since startup. Calling this twice keeps
/// the first handler.
pub fn setup_default_miette_global_report_handler(issues_url: &'static str) {
    miette::set_hook(Box::new(move |_report| {
        let width = report_width(crossterm::terminal::size().ok().map(|(cols, _)| cols));
        tracing::debug!(message = "Console error report rendered", width);
        Box::new(
            MietteHandlerOpts::new()
                .width(width)
                .wrap_lines(true)
                .force_graphical(true)
                .unicode(true)
                .with_cause_chain()
                .footer(format!("Report console bugs at {issues_url}"))
                .build(),
        )
    }))
    .ok();
}

#[must_use]
pub fn report_width(terminal_columns: Option<u16>) -> usize {
    terminal_columns.map_or(FALLBACK_REPORT_WIDTH, |cols| {
        usize::from(cols).clamp(1, MAX_REPORT_WIDTH)
    })
}
