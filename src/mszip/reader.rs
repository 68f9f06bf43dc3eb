//! MszipReader - chunked streaming decompression reader
//!
//! Presents a sequence of independently framed compressed chunks as one flat
//! decompressed byte stream. Each chunk gets fresh Huffman trees but inherits
//! the previous chunk's decompressed output as dictionary history, so
//! back-references may reach across chunk boundaries. Seeking to a logical
//! offset inside the stream is decompress-and-discard: the format has no
//! index into the compressed data, so positioning is strictly forward-only.

use crate::bits::BitReader;
use crate::common::{ZlibxError, CHUNK_DECOMP_SIZE};
use crate::inflate::{inflate_block, Window};
use crate::mszip::{ChunkHeader, CHUNK_MAGIC};
use std::io::{BufRead, Read, Seek, SeekFrom};

/// Streaming reader over a chunked (MSZIP) compressed region.
///
/// Framing errors (a bad magic, a corrupt block, a chunk ending early)
/// truncate the stream: the remaining decompressed length is forced to zero
/// and reads return EOF. I/O errors from the source propagate. Requests past
/// the declared decompressed length return EOF, never an error.
#[derive(Debug)]
pub struct MszipReader<R: Read> {
    reader: R,
    window: Window,
    out_pos: usize,
    remaining: u64,
    reserve_len: usize,
    failed: bool,
}

impl<R: Read> MszipReader<R> {
    /// Create a reader over a chunk region the source is already positioned
    /// at. `decompressed_len` is the number of bytes the caller is owed;
    /// `reserve_len` is the archive format's per-chunk reserve byte count.
    pub fn new(reader: R, decompressed_len: u64, reserve_len: usize) -> Self {
        Self {
            reader,
            window: Window::with_capacity(CHUNK_DECOMP_SIZE),
            out_pos: 0,
            remaining: decompressed_len,
            reserve_len,
            failed: false,
        }
    }

    /// Create a reader pre-positioned at a logical offset inside a shared
    /// chunk region: seeks the source to `region_start`, then decompresses
    /// and discards `discard` bytes so the first read returns the byte at
    /// that logical offset.
    pub fn positioned(
        mut reader: R,
        decompressed_len: u64,
        reserve_len: usize,
        region_start: u64,
        discard: u64,
    ) -> std::io::Result<Self>
    where
        R: Seek,
    {
        reader.seek(SeekFrom::Start(region_start))?;
        let mut this = Self::new(reader, decompressed_len, reserve_len);
        this.skip_decompressed(discard)?;
        Ok(this)
    }

    /// Decompressed bytes ready to read; decodes the next chunk if the
    /// buffer is exhausted and bytes are still owed.
    pub fn available(&mut self) -> std::io::Result<usize> {
        Ok(self.fill_buf()?.len())
    }

    /// Decompress and throw away `count` logical bytes. Whole chunks are
    /// discarded while more than one chunk's output remains to skip; window
    /// history is propagated throughout so later back-references still
    /// resolve. Discarded bytes do not count against the declared
    /// decompressed length.
    pub fn skip_decompressed(&mut self, mut count: u64) -> std::io::Result<()> {
        while count > 0 && !self.failed {
            if self.out_pos >= self.window.produced() {
                self.step_chunk()?;
                continue;
            }
            let avail = (self.window.produced() - self.out_pos) as u64;
            let take = avail.min(count);
            self.out_pos += take as usize;
            count -= take;
        }
        Ok(())
    }

    fn buffered(&self) -> &[u8] {
        let avail = self.window.produced() - self.out_pos;
        let serve = self.remaining.min(avail as u64) as usize;
        &self.window.current()[self.out_pos..self.out_pos + serve]
    }

    /// Run `next_chunk`, sorting its failures into "source broke" (propagate)
    /// and "data is bad" (truncate the stream).
    fn step_chunk(&mut self) -> std::io::Result<()> {
        match self.next_chunk() {
            Ok(()) => Ok(()),
            Err(ZlibxError::Io(err)) if err.kind() != std::io::ErrorKind::UnexpectedEof => {
                Err(err)
            }
            Err(err) => {
                log::warn!("chunk decode failed, truncating stream: {err}");
                self.failed = true;
                self.remaining = 0;
                Ok(())
            }
        }
    }

    /// Read one chunk header and inflate its payload into the window.
    fn next_chunk(&mut self) -> crate::common::Result<()> {
        let header = ChunkHeader::read_from(&mut self.reader, self.reserve_len)?;
        let mut magic = [0u8; 2];
        self.reader.read_exact(&mut magic)?;
        if magic != CHUNK_MAGIC {
            return Err(ZlibxError::BadChunkMagic(magic[0], magic[1]));
        }
        let mut payload = vec![0u8; header.payload_len()?];
        self.reader.read_exact(&mut payload)?;
        log::debug!(
            "chunk: {} compressed -> {} decompressed",
            header.compressed_len,
            header.decompressed_len
        );

        // The previous chunk's output becomes this chunk's dictionary
        // history; the read cursor rewinds to the start of the fresh bytes.
        self.window.rotate();
        self.out_pos = 0;

        // Each chunk is an independent block stream: trees are rebuilt per
        // block inside, and the final-block flag is consumed but ignored;
        // the declared decompressed length decides where the chunk ends.
        let mut bits = BitReader::new(std::io::Cursor::new(payload));
        let target = header.decompressed_len as usize;
        while self.window.produced() < target {
            inflate_block(&mut bits, &mut self.window)?;
        }
        Ok(())
    }
}

impl<R: Read> Read for MszipReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let available = self.fill_buf()?;
        let to_copy = buf.len().min(available.len());
        buf[..to_copy].copy_from_slice(&available[..to_copy]);
        self.consume(to_copy);
        Ok(to_copy)
    }
}

impl<R: Read> BufRead for MszipReader<R> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        while !self.failed && self.remaining > 0 && self.out_pos >= self.window.produced() {
            self.step_chunk()?;
        }
        Ok(self.buffered())
    }

    fn consume(&mut self, amt: usize) {
        self.out_pos += amt;
        self.remaining -= amt as u64;
    }
}
