// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End-to-end behavior of a [`Console`] driven only through its public API, with the
//! consumer on the other side of the internal pipes.

use std::{io::{BufRead, Write},
          thread};

use pretty_assertions::assert_eq;
use r3bl_console::{Console, ConsoleChannels, ConsoleConfig, ConsoleKeyEvent,
                   KeyDisposition, LivenessState, MemorySurface, PipeReader, TextSurface, WatcherExit,
                   console_key,
                   test_fixtures::{ChunkedReader, SharedBuffer}};

fn new_console() -> (Console, PipeReader) {
    let (console, consumer_io) =
        Console::new(MemorySurface::new(), ConsoleConfig::default());
    (console, consumer_io.lines.unwrap())
}

fn type_text(console: &Console, text: &str) {
    for ch in text.chars() {
        console.dispatch_key(&console_key!(@char ch)).unwrap();
    }
}

fn press(console: &Console, event: ConsoleKeyEvent) -> KeyDisposition {
    console.dispatch_key(&event).unwrap()
}

fn read_line(lines: &mut PipeReader) -> String {
    let mut line = String::new();
    lines.read_line(&mut line).unwrap();
    line
}

fn history_cursor(console: &Console) -> usize {
    console.with_state(|state| state.history.cursor()).unwrap()
}

#[test]
fn test_empty_submission_sends_sentinel_and_skips_history() {
    let (console, mut lines) = new_console();

    press(&console, console_key!(@special Enter));

    assert_eq!(read_line(&mut lines), ";\n");
    assert_eq!(console.with_state(|state| state.history.len()).unwrap(), 0);
    assert_eq!(console.document_text().unwrap(), "\n");
}

#[test]
fn test_submission_records_history_and_commits() {
    let (console, mut lines) = new_console();

    type_text(&console, "1+1");
    press(&console, console_key!(@special Enter));

    assert_eq!(read_line(&mut lines), "1+1\n");
    let (entries, boundary, len) = console
        .with_state(|state| {
            (
                state.history.entries().iter().cloned().collect::<Vec<_>>(),
                state.commit_boundary.offset(),
                state.surface.len(),
            )
        })
        .unwrap();
    assert_eq!(entries, vec!["1+1".to_string()]);
    assert_eq!(boundary, len);
    assert_eq!(console.tail_text().unwrap(), "");
}

#[test]
fn test_history_backward_stops_at_oldest_entry() {
    let (console, _lines) = new_console();
    type_text(&console, "a");
    press(&console, console_key!(@special Enter));
    type_text(&console, "b");
    press(&console, console_key!(@special Enter));

    press(&console, console_key!(@special Up));
    press(&console, console_key!(@special Up));
    assert_eq!(console.tail_text().unwrap(), "a");

    press(&console, console_key!(@special Up));
    assert_eq!(console.tail_text().unwrap(), "a");
    assert_eq!(history_cursor(&console), 2);
}

#[test]
fn test_ctrl_u_clears_tail_and_history_cursor() {
    let (console, _lines) = new_console();
    type_text(&console, "a");
    press(&console, console_key!(@special Enter));
    press(&console, console_key!(@special Up));
    assert_eq!(history_cursor(&console), 1);

    type_text(&console, "xyz");
    assert_eq!(console.tail_text().unwrap(), "axyz");

    assert_eq!(press(&console, console_key!(@ctrl 'u')), KeyDisposition::Consumed);
    assert_eq!(console.tail_text().unwrap(), "");
    assert_eq!(history_cursor(&console), 0);
    assert_eq!(console.document_text().unwrap(), "a\n");
}

#[test]
fn test_closed_outbound_prints_notice_exactly_once() {
    let (mut console, consumer_io) =
        Console::new(MemorySurface::new(), ConsoleConfig::default());
    let mut output = consumer_io.output.unwrap();

    output.write_all(b"bye\n").unwrap();
    drop(output);

    assert_eq!(console.join_watcher(), Some(WatcherExit::EndOfStream));
    assert_eq!(console.watcher_liveness(), Some(LivenessState::Terminated));
    // Joining again does not restart anything.
    assert_eq!(console.join_watcher(), None);

    console.println("later");
    let document = console.document_text().unwrap();
    assert_eq!(document, "bye\nConsole: Input closed...\nlater\n");
    assert_eq!(document.matches("Console: Input closed...").count(), 1);
}

#[test]
fn test_typing_before_boundary_lands_at_document_end() {
    let (console, _lines) = new_console();
    console.print("out\n");
    type_text(&console, "ab");

    // Shift+PageUp leaves the caret inside committed text, with a selection.
    assert_eq!(
        press(&console, console_key!(@shift PageUp)),
        KeyDisposition::PassThrough
    );
    assert_eq!(console.with_state(|state| state.surface.caret()).unwrap(), 0);

    type_text(&console, "x");

    assert_eq!(console.document_text().unwrap(), "out\nabx");
    assert_eq!(console.tail_text().unwrap(), "abx");
}

#[test]
fn test_page_up_is_redirected_to_boundary() {
    let (console, _lines) = new_console();
    console.print("committed\n");
    type_text(&console, "ab");

    press(&console, console_key!(@special PageUp));

    let (caret, boundary) = console
        .with_state(|state| (state.surface.caret(), state.commit_boundary.offset()))
        .unwrap();
    assert_eq!(boundary, 10);
    assert_eq!(caret, boundary);
}

#[test]
fn test_consumer_thread_echoes_submitted_lines() {
    let (mut console, consumer_io) =
        Console::new(MemorySurface::new(), ConsoleConfig::default());
    let mut lines = consumer_io.lines.unwrap();
    let mut output = consumer_io.output.unwrap();

    let consumer = thread::spawn(move || {
        let mut line = String::new();
        while lines.read_line(&mut line).unwrap() > 0 {
            output.write_all(format!("=> {line}").as_bytes()).unwrap();
            line.clear();
        }
    });

    type_text(&console, "ping");
    press(&console, console_key!(@special Enter));
    console.close_inbound();

    consumer.join().unwrap();
    assert_eq!(console.join_watcher(), Some(WatcherExit::EndOfStream));

    assert_eq!(
        console.document_text().unwrap(),
        "ping\n=> ping\nConsole: Input closed...\n"
    );
}

#[test]
fn test_external_channels_replace_internal_pipes() {
    let inbound = SharedBuffer::default();
    // "é" is split across two reads.
    let outbound = ChunkedReader::new("héllo\n", 1);
    let channels = ConsoleChannels {
        inbound: Some(Box::new(inbound.clone())),
        outbound: Some(Box::new(outbound)),
    };

    let (mut console, consumer_io) =
        Console::with_channels(MemorySurface::new(), ConsoleConfig::default(), channels);
    assert!(consumer_io.lines.is_none());
    assert!(consumer_io.output.is_none());

    assert_eq!(console.join_watcher(), Some(WatcherExit::EndOfStream));
    type_text(&console, "ok");
    press(&console, console_key!(@special Enter));

    assert_eq!(inbound.contents(), "ok\n");
    assert_eq!(
        console.document_text().unwrap(),
        "héllo\nConsole: Input closed...\nok\n"
    );
}

#[test]
fn test_copy_cut_paste_respect_commit_boundary() {
    let (console, _lines) = new_console();
    console.print("out\n");
    console.paste("tail").unwrap();

    // Select "il" inside the tail.
    press(&console, console_key!(@shift Left));
    press(&console, console_key!(@shift Left));
    assert_eq!(console.copy().unwrap(), Some("il".to_string()));
    assert_eq!(console.cut().unwrap(), Some("il".to_string()));
    assert_eq!(console.tail_text().unwrap(), "ta");

    // Extend the selection into committed text; cut only copies.
    press(&console, console_key!(@shift Home));
    press(&console, console_key!(@shift PageUp));
    assert_eq!(console.cut().unwrap(), Some("out\nta".to_string()));
    assert_eq!(console.document_text().unwrap(), "out\nta");

    // Paste is moved into the tail.
    console.paste("!").unwrap();
    assert_eq!(console.document_text().unwrap(), "out\nta!");
}
