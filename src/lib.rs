//! ZLibX - streaming decompression for game archive formats
//!
//! This crate provides the decompression core used when extracting
//! proprietary game archives: a DEFLATE-family bit-level decoder, a chunked
//! (MSZIP/CAB-style) variant that carries dictionary history across chunk
//! boundaries, and a companion LZSS ring-buffer codec. Archive container
//! parsing is the caller's job: it knows offsets and lengths and hands this
//! crate a byte range plus "start reading decompressed bytes from here".
//!
//! # Features
//!
//! - Bit-exact Huffman decoding with fixed and dynamically transmitted trees
//! - Stored, fixed-Huffman and dynamic-Huffman block decoding
//! - Chunked MSZIP streams with 32KB cross-chunk dictionary carry-over
//! - Seek-by-discard positioning inside shared chunk regions
//! - LZSS encoder and decoder (4KB ring, 18-byte lookahead)
//! - Streaming API via Read/BufRead traits
//!
//! # Example - Decompression
//!
//! ```no_run
//! use zlibx::{inflate_bytes, MszipReader};
//! use std::io::Read;
//!
//! // Decompress a raw block stream
//! let compressed = std::fs::read("entry.zlibx")?;
//! let decompressed = inflate_bytes(&compressed)?;
//!
//! // Or stream a chunked region, starting 512 bytes into it
//! let source = std::fs::File::open("archive.dat")?;
//! let mut reader = MszipReader::positioned(source, 4096, 0, 0x2000, 512)?;
//! let mut output = Vec::new();
//! reader.read_to_end(&mut output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - LZSS
//!
//! ```
//! use zlibx::lzss;
//!
//! let data = b"Hello, World! Hello, World!";
//! let packed = lzss::compress_bytes(data);
//! assert_eq!(lzss::decompress_bytes(&packed), data);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod bits;
pub mod common;
pub mod error;
pub mod huffman;
pub mod inflate;
pub mod lzss;
pub mod mszip;
pub mod tables;

// Re-export commonly used types
pub use bits::BitReader;
pub use common::{Result, ZlibxError, CHUNK_DECOMP_SIZE, MAX_DISTANCE};
pub use huffman::HuffmanTree;
pub use inflate::{inflate_bytes, InflateReader, Window};
pub use mszip::{mszip_bytes, ChunkHeader, MszipReader};
