//! DEFLATE-family decompression (the "ZLibX" engine)
//!
//! Bit-exact decoding of stored, fixed-Huffman and dynamic-Huffman blocks
//! with sliding-window back-reference copying. The chunked MSZIP adapter in
//! [`crate::mszip`] drives the same block decoder with per-chunk framing.

mod decoder;
mod reader;
mod window;

pub(crate) use decoder::inflate_block;
pub use reader::InflateReader;
pub use window::Window;

use crate::bits::BitReader;
use crate::common::Result;

/// Convenience function to decompress a complete block stream in memory.
///
/// Decodes blocks until one carries the final-block flag. Unlike the
/// streaming readers this is strict: any framing error is returned to the
/// caller.
pub fn inflate_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut bits = BitReader::new(std::io::Cursor::new(data));
    let mut window = Window::new();
    while !inflate_block(&mut bits, &mut window)? {}
    Ok(window.current().to_vec())
}
