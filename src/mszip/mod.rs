//! Chunked (MSZIP) stream decompression
//!
//! CAB-style container streams frame their compressed data as a forward
//! linked sequence of chunks, each with its own header and an independent
//! block stream, but with the previous chunk's decompressed tail carried over
//! as dictionary history. This module supplies the chunk header parser and
//! the [`MszipReader`] adapter that presents the chunk sequence as one flat
//! decompressed byte stream.

mod reader;

pub use reader::MszipReader;

use crate::common::{Result, ZlibxError};
use std::io::Read;

/// Convenience function to decompress a chunked region in memory.
///
/// Reads chunks until `decompressed_len` bytes are produced. Framing errors
/// truncate the result rather than failing, matching [`MszipReader`].
pub fn mszip_bytes(data: &[u8], decompressed_len: u64, reserve_len: usize) -> Result<Vec<u8>> {
    let mut reader = MszipReader::new(std::io::Cursor::new(data), decompressed_len, reserve_len);
    let mut output = Vec::new();
    reader.read_to_end(&mut output)?;
    Ok(output)
}

/// Magic bytes `CK` that open every chunk payload.
pub const CHUNK_MAGIC: [u8; 2] = [b'C', b'K'];

/// Parsed per-chunk header.
///
/// Wire layout: 4-byte checksum (skipped, not validated), 2-byte little
/// endian compressed length, 2-byte little endian decompressed length, then
/// a format-specific run of reserve bytes. The compressed length counts the
/// 2-byte magic, so the Huffman payload is `compressed_len - 2` bytes.
#[derive(Debug, Clone, Copy)]
pub struct ChunkHeader {
    /// Stored checksum, carried through but never verified
    pub checksum: u32,
    /// Compressed byte count, inclusive of the magic
    pub compressed_len: u16,
    /// Decompressed byte count this chunk expands to
    pub decompressed_len: u16,
}

impl ChunkHeader {
    /// Read a chunk header, skipping `reserve_len` format-specific bytes
    /// after the fixed fields.
    pub fn read_from<R: Read>(reader: &mut R, reserve_len: usize) -> Result<Self> {
        let mut fixed = [0u8; 8];
        reader.read_exact(&mut fixed)?;
        let checksum = u32::from_le_bytes([fixed[0], fixed[1], fixed[2], fixed[3]]);
        let compressed_len = u16::from_le_bytes([fixed[4], fixed[5]]);
        let decompressed_len = u16::from_le_bytes([fixed[6], fixed[7]]);
        if reserve_len > 0 {
            let mut reserve = vec![0u8; reserve_len];
            reader.read_exact(&mut reserve)?;
        }
        Ok(Self {
            checksum,
            compressed_len,
            decompressed_len,
        })
    }

    /// Length of the Huffman payload following the magic.
    pub fn payload_len(&self) -> Result<usize> {
        (self.compressed_len as usize)
            .checked_sub(CHUNK_MAGIC.len())
            .ok_or_else(|| {
                ZlibxError::InvalidData(format!(
                    "chunk compressed length {} shorter than the magic",
                    self.compressed_len
                ))
            })
    }
}
