// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Run a [`Console`] on a real terminal. Every submitted line is echoed back by a
//! consumer thread, through the outbound channel, the same way an interpreter would
//! print its results.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ > cargo run --example echo_console -- --log-file /tmp/c.log  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Up / Down walk the history, Ctrl-U clears the line, Ctrl-C prints `^C`, and Ctrl-D
//! quits.

use std::{io::{BufRead, Stdout, Write, stdout},
          sync::{Arc,
                 atomic::{AtomicBool, Ordering}},
          thread,
          time::Duration};

use clap::Parser;
use crossterm::{cursor::MoveTo,
                event::{self, Event},
                queue,
                style::{Attribute, Color, Print, ResetColor, SetAttribute,
                        SetForegroundColor},
                terminal::{self, Clear, ClearType}};
use miette::IntoDiagnostic;
use r3bl_console::{BasicColor, Console, ConsoleColor, ConsoleConfig, ConsoleError,
                   DEFAULT_WATCHER_CHUNK_SIZE, MemorySurface, RunContent, StyledRun,
                   TextStyle, TextSurface,
                   log::{TracingConfig, try_initialize_logging_global},
                   setup_default_miette_global_report_handler};
use tracing_core::LevelFilter;

const ISSUES_URL: &str = "https://github.com/r3bl-org/r3bl-open-core/issues/new";
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Echo every submitted line back into an interactive console.
#[derive(Debug, Parser)]
#[command(name = "echo_console")]
struct CliArgs {
    /// Write tracing output to this file. Nothing is logged when omitted.
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,

    /// Bytes the channel watcher reads at a time.
    #[arg(long, default_value_t = DEFAULT_WATCHER_CHUNK_SIZE)]
    chunk_size: usize,

    /// Keep at most this many history entries.
    #[arg(long)]
    history_limit: Option<usize>,
}

/// Leaves raw mode on every exit path.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> miette::Result<Self> {
        terminal::enable_raw_mode().into_diagnostic()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) { terminal::disable_raw_mode().ok(); }
}

fn main() -> miette::Result<()> {
    setup_default_miette_global_report_handler(ISSUES_URL);
    let cli_args = CliArgs::parse();

    if let Some(log_file) = cli_args.log_file.clone() {
        try_initialize_logging_global(TracingConfig::new_file(
            Some(log_file),
            LevelFilter::DEBUG,
        ))?;
    }

    let mut config = ConsoleConfig::default().with_watcher_chunk_size(cli_args.chunk_size);
    if let Some(limit) = cli_args.history_limit {
        config = config.with_history_limit(limit);
    }

    let (mut console, consumer_io) = Console::new(MemorySurface::new(), config);
    let lines = consumer_io
        .lines
        .ok_or_else(|| miette::miette!("Console has no inbound pipe"))?;
    let output = consumer_io
        .output
        .ok_or_else(|| miette::miette!("Console has no outbound pipe"))?;

    let is_done = Arc::new(AtomicBool::new(false));
    console.set_eof_fn({
        let is_done = is_done.clone();
        Arc::new(move || is_done.store(true, Ordering::SeqCst))
    });
    console.set_interrupt_fn({
        let printer = console.printer();
        Arc::new(move |_reason: &str| printer.print_colored("^C\n", BasicColor::Yellow))
    });

    console.print_styled(
        "Type a line and press Enter. Ctrl-D quits.\n",
        &TextStyle::new().bold(true).color(BasicColor::Cyan),
    );

    let consumer = thread::Builder::new()
        .name("echo-consumer".into())
        .spawn(move || run_echo_consumer(lines, output))
        .into_diagnostic()?;

    {
        let _raw_mode = RawModeGuard::enable()?;
        run_event_loop(&console, &is_done)?;
    }

    console.close_inbound();
    consumer
        .join()
        .map_err(|_| miette::miette!("Echo consumer thread panicked"))?;
    console.join_watcher();

    println!("{}", console.document_text().into_diagnostic()?);
    Ok(())
}

/// Stands in for an interpreter: reads lines until the console closes its side.
fn run_echo_consumer(mut lines: impl BufRead, mut output: impl Write) {
    let mut line = String::new();
    loop {
        line.clear();
        match lines.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == ";\n" => {}
            Ok(_) => {
                if output.write_all(format!("echo: {line}").as_bytes()).is_err() {
                    break;
                }
            }
        }
    }
}

fn run_event_loop(console: &Console, is_done: &AtomicBool) -> miette::Result<()> {
    let mut stdout = stdout();
    while !is_done.load(Ordering::SeqCst) {
        if event::poll(POLL_INTERVAL).into_diagnostic()? {
            if let Event::Key(key_event) = event::read().into_diagnostic()? {
                match console.dispatch_key(&key_event.into()) {
                    Ok(_) => {}
                    Err(error @ ConsoleError::InboundChannelBroken { .. }) => {
                        return Err(error).into_diagnostic();
                    }
                    Err(error) => {
                        tracing::error!(message = "Key dispatch failed", ?error);
                    }
                }
            }
        }
        render(console, &mut stdout)?;
    }
    Ok(())
}

/// Paint the bottom of the document that fits on screen, then place the cursor on the
/// caret.
fn render(console: &Console, stdout: &mut Stdout) -> miette::Result<()> {
    let (runs, caret_text) = console
        .with_state(|state| {
            let caret = state.surface.caret();
            let document = state.document_text();
            (
                state.surface.styled_runs(),
                document.chars().take(caret).collect::<String>(),
            )
        })
        .into_diagnostic()?;

    let (_, rows) = terminal::size().into_diagnostic()?;
    let total_lines = runs.iter().map(newline_count).sum::<usize>() + 1;
    let first_visible = total_lines.saturating_sub(usize::from(rows));

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0)).into_diagnostic()?;

    let mut line_index = 0;
    for run in &runs {
        apply_style(stdout, &run.style)?;
        let content = match &run.content {
            RunContent::Text(text) => text.clone(),
            RunContent::Image(_) => "▣".to_string(),
        };
        for (index, segment) in content.split('\n').enumerate() {
            if index > 0 {
                if line_index >= first_visible {
                    queue!(stdout, Print("\r\n")).into_diagnostic()?;
                }
                line_index += 1;
            }
            if line_index >= first_visible {
                queue!(stdout, Print(segment)).into_diagnostic()?;
            }
        }
        queue!(stdout, ResetColor, SetAttribute(Attribute::Reset)).into_diagnostic()?;
    }

    let caret_row = caret_text.matches('\n').count().saturating_sub(first_visible);
    let caret_col = caret_text
        .rsplit('\n')
        .next()
        .map_or(0, |last_line| last_line.chars().count());
    queue!(
        stdout,
        MoveTo(
            u16::try_from(caret_col).unwrap_or(u16::MAX),
            u16::try_from(caret_row).unwrap_or(u16::MAX)
        )
    )
    .into_diagnostic()?;

    stdout.flush().into_diagnostic()
}

fn newline_count(run: &StyledRun) -> usize {
    match &run.content {
        RunContent::Text(text) => text.matches('\n').count(),
        RunContent::Image(_) => 0,
    }
}

fn apply_style(stdout: &mut Stdout, style: &TextStyle) -> miette::Result<()> {
    if let Some(color) = style.color {
        queue!(stdout, SetForegroundColor(to_crossterm_color(color))).into_diagnostic()?;
    }
    if style.bold == Some(true) {
        queue!(stdout, SetAttribute(Attribute::Bold)).into_diagnostic()?;
    }
    if style.italic == Some(true) {
        queue!(stdout, SetAttribute(Attribute::Italic)).into_diagnostic()?;
    }
    if style.underline == Some(true) {
        queue!(stdout, SetAttribute(Attribute::Underlined)).into_diagnostic()?;
    }
    Ok(())
}

fn to_crossterm_color(color: ConsoleColor) -> Color {
    match color {
        ConsoleColor::Rgb(rgb) => Color::Rgb {
            r: rgb.red,
            g: rgb.green,
            b: rgb.blue,
        },
        ConsoleColor::Basic(basic) => match basic {
            BasicColor::Black => Color::Black,
            BasicColor::White => Color::White,
            BasicColor::Gray => Color::Grey,
            BasicColor::DarkGray => Color::DarkGrey,
            BasicColor::Red => Color::Red,
            BasicColor::DarkRed => Color::DarkRed,
            BasicColor::Green => Color::Green,
            BasicColor::DarkGreen => Color::DarkGreen,
            BasicColor::Yellow => Color::Yellow,
            BasicColor::DarkYellow => Color::DarkYellow,
            BasicColor::Blue => Color::Blue,
            BasicColor::DarkBlue => Color::DarkBlue,
            BasicColor::Magenta => Color::Magenta,
            BasicColor::DarkMagenta => Color::DarkMagenta,
            BasicColor::Cyan => Color::Cyan,
            BasicColor::DarkCyan => Color::DarkCyan,
        },
    }
}
