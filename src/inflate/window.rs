//! Sliding output window
//!
//! Back-references resolve against the bytes produced so far in the current
//! chunk, and past its start against the previous chunk's output. Rather than
//! shifting history around inside one oversized buffer, the window keeps two
//! buffers and swaps them by reference at chunk boundaries; the invariant is
//! that the previous chunk's tail stays addressable through distances larger
//! than the bytes produced so far.

use crate::common::{Result, ZlibxError};

/// Sliding output window with one chunk of carried-over history.
#[derive(Debug, Default)]
pub struct Window {
    /// Previous chunk's decompressed output, oldest history first
    prev: Vec<u8>,
    /// Current output, grows as the engine decodes
    cur: Vec<u8>,
}

impl Window {
    /// Create an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty window with room for `capacity` current-output bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            prev: Vec::new(),
            cur: Vec::with_capacity(capacity),
        }
    }

    /// Bytes produced into the current output so far.
    pub fn produced(&self) -> usize {
        self.cur.len()
    }

    /// The current output.
    pub fn current(&self) -> &[u8] {
        &self.cur
    }

    /// History bytes addressable behind the current write position.
    pub fn history(&self) -> usize {
        self.prev.len() + self.cur.len()
    }

    /// Append a literal byte.
    pub fn push(&mut self, byte: u8) {
        self.cur.push(byte);
    }

    /// Append a run of raw bytes (stored blocks).
    pub fn push_slice(&mut self, bytes: &[u8]) {
        self.cur.extend_from_slice(bytes);
    }

    /// Copy `length` bytes starting `distance` bytes behind the write
    /// position. The copy is byte-at-a-time: when `distance < length` the
    /// source range overlaps bytes written by this very call, which is how
    /// run-length expansion works.
    pub fn copy_match(&mut self, distance: usize, length: usize) -> Result<()> {
        if distance == 0 || distance > self.history() {
            return Err(ZlibxError::DistanceTooFar {
                distance,
                available: self.history(),
            });
        }
        for _ in 0..length {
            let byte = if distance <= self.cur.len() {
                self.cur[self.cur.len() - distance]
            } else {
                self.prev[self.prev.len() - (distance - self.cur.len())]
            };
            self.cur.push(byte);
        }
        Ok(())
    }

    /// Retire the current output into history and start a fresh one. Called
    /// at every chunk boundary so exactly one chunk's worth of history stays
    /// addressable.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.prev, &mut self.cur);
        self.cur.clear();
    }
}
