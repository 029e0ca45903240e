// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Turns a stream of byte chunks into text. A multi-byte sequence split across two
/// chunks is held back until it is complete, so decoding chunk by chunk gives the
/// same text as decoding everything at once. Invalid bytes become `U+FFFD`.
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    pending: Vec<u8>,
}

impl Utf8ChunkDecoder {
    /// Decode as much of `chunk` (plus any held-back bytes) as possible.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut acc = String::with_capacity(self.pending.len());
        let mut start = 0;

        loop {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    acc.push_str(valid);
                    start = self.pending.len();
                    break;
                }
                Err(error) => {
                    let valid_up_to = start + error.valid_up_to();
                    acc.push_str(&String::from_utf8_lossy(
                        &self.pending[start..valid_up_to],
                    ));
                    match error.error_len() {
                        // Incomplete sequence at the end: wait for more bytes.
                        None => {
                            start = valid_up_to;
                            break;
                        }
                        Some(invalid_len) => {
                            acc.push(char::REPLACEMENT_CHARACTER);
                            start = valid_up_to + invalid_len;
                        }
                    }
                }
            }
        }

        self.pending.drain(..start);
        acc
    }

    /// Flush whatever is held back at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let it = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Some(it)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_sequence_is_reassembled() {
        let bytes = "a☕b".as_bytes();
        let mut decoder = Utf8ChunkDecoder::default();

        let mut acc = String::new();
        for byte in bytes {
            acc.push_str(&decoder.decode(std::slice::from_ref(byte)));
        }

        assert_eq!(acc, "a☕b");
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let mut decoder = Utf8ChunkDecoder::default();
        assert_eq!(decoder.decode(b"ok\xFFgo"), "ok\u{FFFD}go");
    }

    #[test]
    fn test_truncated_sequence_at_end_of_stream() {
        let mut decoder = Utf8ChunkDecoder::default();
        assert_eq!(decoder.decode(&"é".as_bytes()[..1]), "");
        assert_eq!(decoder.finish(), Some("\u{FFFD}".to_string()));
    }
}
