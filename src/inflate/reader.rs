//! InflateReader - streaming decompression reader
//!
//! Pull-based `Read`/`BufRead` front end over the block decoder. Blocks are
//! decoded lazily: nothing is inflated until the caller asks for bytes, and
//! each refill decodes only as many blocks as needed to produce output.

use crate::bits::BitReader;
use crate::common::ZlibxError;
use crate::inflate::decoder::inflate_block;
use crate::inflate::window::Window;
use std::io::{BufRead, Read};

/// Streaming decompression reader implementing the Read trait.
///
/// The declared decompressed length bounds the stream: once that many bytes
/// have been served, reads return EOF even if the source has more blocks.
/// Framing errors in the compressed data truncate the stream rather than
/// surfacing as read errors; I/O errors from the source propagate.
#[derive(Debug)]
pub struct InflateReader<R: Read> {
    bits: BitReader<R>,
    window: Window,
    out_pos: usize,
    remaining: u64,
    finished: bool,
}

impl<R: Read> InflateReader<R> {
    /// Create a reader over a compressed byte range that decompresses to
    /// `decompressed_len` bytes.
    pub fn new(reader: R, decompressed_len: u64) -> Self {
        Self {
            bits: BitReader::new(reader),
            window: Window::new(),
            out_pos: 0,
            remaining: decompressed_len,
            finished: false,
        }
    }

    /// Decompressed bytes ready to read without touching the source; decodes
    /// more blocks if the buffer is empty and bytes are still owed.
    pub fn available(&mut self) -> std::io::Result<usize> {
        Ok(self.fill_buf()?.len())
    }

    fn buffered(&self) -> &[u8] {
        let avail = self.window.produced() - self.out_pos;
        let serve = (self.remaining).min(avail as u64) as usize;
        &self.window.current()[self.out_pos..self.out_pos + serve]
    }

    /// Decode blocks until some output is buffered, the stream ends, or the
    /// data turns out to be bad.
    fn refill(&mut self) -> std::io::Result<()> {
        while self.remaining > 0 && !self.finished && self.out_pos >= self.window.produced() {
            match inflate_block(&mut self.bits, &mut self.window) {
                Ok(is_final) => {
                    if is_final {
                        self.finished = true;
                    }
                }
                Err(ZlibxError::Io(err)) => return Err(err),
                Err(err) => {
                    log::warn!("inflate failed, truncating stream: {err}");
                    self.finished = true;
                    self.remaining = 0;
                }
            }
        }
        Ok(())
    }
}

impl<R: Read> Read for InflateReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let available = self.fill_buf()?;
        let to_copy = buf.len().min(available.len());
        buf[..to_copy].copy_from_slice(&available[..to_copy]);
        self.consume(to_copy);
        Ok(to_copy)
    }
}

impl<R: Read> BufRead for InflateReader<R> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        self.refill()?;
        Ok(self.buffered())
    }

    fn consume(&mut self, amt: usize) {
        self.out_pos += amt;
        self.remaining -= amt as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_are_bounded_by_declared_length() {
        // Stored block carrying 5 bytes, but only 3 declared.
        let data = vec![0x01, 0x05, 0x00, 0xFA, 0xFF, b'h', b'e', b'l', b'l', b'o'];
        let mut reader = InflateReader::new(Cursor::new(data), 3);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"hel");
        // Further reads keep returning EOF, not an error.
        let mut buf = [0u8; 4];
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_available_triggers_decode() {
        let data = vec![0x01, 0x02, 0x00, 0xFD, 0xFF, b'o', b'k'];
        let mut reader = InflateReader::new(Cursor::new(data), 2);
        assert_eq!(reader.available().unwrap(), 2);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"ok");
    }

    #[test]
    fn test_corrupt_data_truncates_instead_of_erroring() {
        // Reserved block type right at the start.
        let data = vec![0x07];
        let mut reader = InflateReader::new(Cursor::new(data), 10);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"");
    }
}
