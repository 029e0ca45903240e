// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{self, Read, Write},
          sync::Arc};

use crate::{StdMutex, lock_recovering};

/// Inbound sink that keeps everything written to it. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<StdMutex<Vec<u8>>>,
}

impl SharedBuffer {
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&lock_recovering(&self.bytes)).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock_recovering(&self.bytes).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

/// Inbound sink whose consumer is already gone.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "Consumer went away"))
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

/// Outbound source that hands out its bytes at most `chunk_size` at a time, then
/// reports end of stream.
#[derive(Debug, Clone)]
pub struct ChunkedReader {
    bytes: Vec<u8>,
    position: usize,
    chunk_size: usize,
}

impl ChunkedReader {
    #[must_use]
    pub fn new(arg_bytes: impl Into<Vec<u8>>, chunk_size: usize) -> Self {
        Self {
            bytes: arg_bytes.into(),
            position: 0,
            chunk_size: chunk_size.max(1),
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.bytes[self.position..];
        let count = remaining.len().min(buf.len()).min(self.chunk_size);
        buf[..count].copy_from_slice(&remaining[..count]);
        self.position += count;
        Ok(count)
    }
}

/// Outbound source that returns `prefix` in one read, is interrupted once, and then
/// fails with `kind` forever.
#[derive(Debug)]
pub struct FailingReader {
    prefix: Option<Vec<u8>>,
    was_interrupted: bool,
    kind: io::ErrorKind,
}

impl FailingReader {
    #[must_use]
    pub fn new(prefix: Vec<u8>, kind: io::ErrorKind) -> Self {
        Self {
            prefix: Some(prefix),
            was_interrupted: false,
            kind,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(prefix) = self.prefix.take() {
            let count = prefix.len().min(buf.len());
            buf[..count].copy_from_slice(&prefix[..count]);
            return Ok(count);
        }
        if !self.was_interrupted {
            self.was_interrupted = true;
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        Err(io::Error::new(self.kind, "Simulated read failure"))
    }
}
