// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! An in-process byte pipe. Writes never block (the buffer is unbounded); reads block
//! until bytes arrive or every writer is gone.
//!
//! Both halves are meant for plain threads. [`PipeReader`] uses
//! [`UnboundedReceiver::blocking_recv`], which panics when called from inside a tokio
//! runtime, so do not read a pipe from async code.

use std::io::{self, BufRead, Read, Write};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Create a connected writer / reader pair.
#[must_use]
pub fn pipe() -> (PipeWriter, PipeReader) {
    let (sender, receiver) = unbounded_channel::<Vec<u8>>();
    (
        PipeWriter { sender },
        PipeReader {
            receiver,
            pending: Vec::new(),
            position: 0,
        },
    )
}

/// Writing half. Clones write into the same pipe; the reader sees end of stream once
/// all of them are dropped.
#[derive(Debug, Clone)]
pub struct PipeWriter {
    sender: UnboundedSender<Vec<u8>>,
}

impl PipeWriter {
    /// Has the reader been dropped?
    #[must_use]
    pub fn is_closed(&self) -> bool { self.sender.is_closed() }
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.sender.send(buf.to_vec()).map_err(|_| {
            io::Error::new(io::ErrorKind::BrokenPipe, "Pipe reader was dropped")
        })?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.sender.is_closed() {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "Pipe reader was dropped",
            ));
        }
        Ok(())
    }
}

/// Reading half.
#[derive(Debug)]
pub struct PipeReader {
    receiver: UnboundedReceiver<Vec<u8>>,
    /// Last chunk received, consumed from `position` onwards.
    pending: Vec<u8>,
    position: usize,
}

impl BufRead for PipeReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        while self.position >= self.pending.len() {
            match self.receiver.blocking_recv() {
                Some(chunk) => {
                    self.pending = chunk;
                    self.position = 0;
                }
                // Every writer is gone.
                None => return Ok(&[]),
            }
        }
        Ok(&self.pending[self.position..])
    }

    fn consume(&mut self, amount: usize) {
        self.position = (self.position + amount).min(self.pending.len());
    }
}

impl Read for PipeReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let available = self.fill_buf()?;
        let count = available.len().min(buf.len());
        buf[..count].copy_from_slice(&available[..count]);
        self.consume(count);
        Ok(count)
    }
}
