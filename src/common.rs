//! Common types and constants shared by the decompression engines
//!
//! This module defines the error type, the crate-wide `Result` alias, and the
//! buffer-size constants used by both the DEFLATE-family decoder and the
//! chunked MSZIP adapter.

use thiserror::Error;

/// Error type for decompression operations
#[derive(Debug, Error)]
pub enum ZlibxError {
    /// Reserved block type code (only 0, 1 and 2 are defined)
    #[error("invalid block type: {0}")]
    InvalidBlockType(u8),

    /// Stored block length and its one's complement disagree
    #[error("stored block length mismatch: length {length:#06x}, complement {complement:#06x}")]
    StoredLengthMismatch {
        /// Declared length field
        length: u16,
        /// One's complement field as read from the stream
        complement: u16,
    },

    /// A code length set assigns more codes than the bit lengths can hold
    #[error("over-subscribed Huffman code lengths")]
    OversubscribedTree,

    /// The input bits match no assigned Huffman code
    #[error("no Huffman code matches the input bits")]
    InvalidCode,

    /// Literal/length symbol outside the defined alphabet
    #[error("invalid literal/length symbol: {0}")]
    InvalidSymbol(u16),

    /// Distance symbol outside the defined alphabet
    #[error("invalid distance symbol: {0}")]
    InvalidDistanceSymbol(u16),

    /// Back-reference points before the start of the available window history
    #[error("back-reference distance {distance} exceeds {available} bytes of history")]
    DistanceTooFar {
        /// Requested backward distance
        distance: usize,
        /// History bytes actually addressable
        available: usize,
    },

    /// Chunk payload does not start with the expected `CK` magic
    #[error("bad chunk magic: expected 43 4b, got {0:02x} {1:02x}")]
    BadChunkMagic(u8, u8),

    /// Invalid data format or corruption
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Compressed input ended before the decoder was done with it
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ZlibxError {
    /// Whether this error came from the underlying source rather than the
    /// data itself. I/O errors propagate to the caller; everything else is a
    /// framing error and truncates the stream.
    pub fn is_io(&self) -> bool {
        matches!(self, ZlibxError::Io(_))
    }
}

/// Result type alias for decompression operations
pub type Result<T> = std::result::Result<T, ZlibxError>;

/// Maximum back-reference distance for the DEFLATE family
pub const MAX_DISTANCE: usize = 0x8000; // 32768

/// Nominal decompressed size of one MSZIP chunk
pub const CHUNK_DECOMP_SIZE: usize = 0x8000;

/// Size of the buffered-input window used by the bit reader
pub const IN_BUFF_SIZE: usize = 0x800;
