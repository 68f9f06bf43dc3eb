//! Canonical Huffman decode tables
//!
//! A tree is represented compactly as the count of codes per bit length plus
//! the symbols sorted by (length, symbol index), the canonical form. Decoding
//! walks the input one bit at a time, narrowing the candidate range per
//! length, so no explicit code table is ever materialised.

use crate::bits::BitReader;
use crate::common::{Result, ZlibxError};
use crate::tables;
use std::io::Read;
use std::sync::OnceLock;

/// Longest Huffman code the DEFLATE family permits
pub const MAX_BITS: usize = 15;

/// Canonical-Huffman decode table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    /// Number of codes of each bit length; `counts[0]` is always zero
    counts: [u16; MAX_BITS + 1],
    /// Symbols grouped by ascending code length, ties in symbol order
    symbols: Vec<u16>,
}

impl HuffmanTree {
    /// Build a tree from per-symbol code lengths. A length of zero means the
    /// symbol is not coded. Over-subscribed length sets are rejected;
    /// incomplete sets build fine and surface as [`ZlibxError::InvalidCode`]
    /// if an unassigned pattern is ever decoded.
    pub fn from_lengths(lengths: &[u8]) -> Result<Self> {
        let mut counts = [0u16; MAX_BITS + 1];
        for &length in lengths {
            if length as usize > MAX_BITS {
                return Err(ZlibxError::InvalidData(format!(
                    "code length {length} exceeds {MAX_BITS} bits"
                )));
            }
            counts[length as usize] += 1;
        }
        // Uncoded symbols are not part of the table.
        counts[0] = 0;

        let mut left = 1i32;
        for &count in &counts[1..] {
            left <<= 1;
            left -= count as i32;
            if left < 0 {
                return Err(ZlibxError::OversubscribedTree);
            }
        }

        // First symbol index for each length, via cumulative sum.
        let mut offsets = [0u16; MAX_BITS + 1];
        for length in 1..MAX_BITS {
            offsets[length + 1] = offsets[length] + counts[length];
        }

        let coded = counts[1..].iter().map(|&c| c as usize).sum();
        let mut symbols = vec![0u16; coded];
        for (symbol, &length) in lengths.iter().enumerate() {
            if length != 0 {
                symbols[offsets[length as usize] as usize] = symbol as u16;
                offsets[length as usize] += 1;
            }
        }

        Ok(Self { counts, symbols })
    }

    /// Decode one symbol, reading bits until the running code value falls
    /// inside the range assigned to the current length.
    pub fn decode<R: Read>(&self, bits: &mut BitReader<R>) -> Result<u16> {
        let mut code: u32 = 0;
        let mut first: u32 = 0;
        let mut index: u32 = 0;
        for length in 1..=MAX_BITS {
            code |= bits.bit()?;
            let count = self.counts[length] as u32;
            if code < first + count {
                return Ok(self.symbols[(index + (code - first)) as usize]);
            }
            index += count;
            first = (first + count) << 1;
            code <<= 1;
        }
        Err(ZlibxError::InvalidCode)
    }

    /// Number of coded symbols in the table.
    pub fn coded_symbols(&self) -> usize {
        self.symbols.len()
    }
}

static FIXED_LITERAL: OnceLock<HuffmanTree> = OnceLock::new();
static FIXED_DISTANCE: OnceLock<HuffmanTree> = OnceLock::new();

/// The fixed literal/length tree, built once per process and shared
/// read-only across sessions.
pub fn fixed_literal() -> &'static HuffmanTree {
    FIXED_LITERAL.get_or_init(|| {
        HuffmanTree::from_lengths(&tables::fixed_literal_lengths())
            .expect("fixed literal lengths form a valid code")
    })
}

/// The fixed distance tree (32 five-bit codes).
pub fn fixed_distance() -> &'static HuffmanTree {
    FIXED_DISTANCE.get_or_init(|| {
        HuffmanTree::from_lengths(&tables::fixed_distance_lengths())
            .expect("fixed distance lengths form a valid code")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode_one(tree: &HuffmanTree, bytes: &[u8]) -> Result<u16> {
        let mut bits = BitReader::new(Cursor::new(bytes.to_vec()));
        tree.decode(&mut bits)
    }

    #[test]
    fn test_canonical_assignment_breaks_ties_by_symbol_index() {
        // lengths: sym0 -> 2 bits, sym1 -> 1 bit, sym2/sym3 -> 3 bits.
        // Canonical codes: sym1=0, sym0=10, sym2=110, sym3=111.
        let tree = HuffmanTree::from_lengths(&[2, 1, 3, 3]).unwrap();
        assert_eq!(tree.coded_symbols(), 4);
        // Stream bits are the code MSB-first: "0" -> sym1
        assert_eq!(decode_one(&tree, &[0b0000_0000]).unwrap(), 1);
        // "10" -> sym0 (first stream bit 1, then 0)
        assert_eq!(decode_one(&tree, &[0b0000_0001]).unwrap(), 0);
        // "110" -> sym2
        assert_eq!(decode_one(&tree, &[0b0000_0011]).unwrap(), 2);
        // "111" -> sym3
        assert_eq!(decode_one(&tree, &[0b0000_0111]).unwrap(), 3);
    }

    #[test]
    fn test_oversubscribed_lengths_rejected() {
        assert!(matches!(
            HuffmanTree::from_lengths(&[1, 1, 1]),
            Err(ZlibxError::OversubscribedTree)
        ));
    }

    #[test]
    fn test_incomplete_code_builds_but_unassigned_pattern_fails() {
        let tree = HuffmanTree::from_lengths(&[1]).unwrap();
        assert_eq!(decode_one(&tree, &[0x00]).unwrap(), 0);
        // All-ones never lands in an assigned range.
        assert!(matches!(
            decode_one(&tree, &[0xFF, 0xFF]),
            Err(ZlibxError::InvalidCode)
        ));
    }

    #[test]
    fn test_fixed_trees_are_deterministic() {
        let again = HuffmanTree::from_lengths(&tables::fixed_literal_lengths()).unwrap();
        assert_eq!(fixed_literal(), &again);
        let again = HuffmanTree::from_lengths(&tables::fixed_distance_lengths()).unwrap();
        assert_eq!(fixed_distance(), &again);
    }

    #[test]
    fn test_fixed_literal_known_codes() {
        // 'A' (65) has the fixed 8-bit code 0x30 + 65 = 0b0111_0001, which
        // arrives LSB-first as the byte 0x8E.
        assert_eq!(decode_one(fixed_literal(), &[0x8E]).unwrap(), 65);
        // End-of-block (256) is the all-zero 7-bit code.
        assert_eq!(decode_one(fixed_literal(), &[0x00]).unwrap(), 256);
        // Symbol 280 opens the 8-bit 0b1100_0000 range.
        assert_eq!(decode_one(fixed_literal(), &[0b0000_0011]).unwrap(), 280);
    }

    #[test]
    fn test_fixed_distance_known_codes() {
        // Five-bit codes equal the symbol value, sent MSB-first.
        assert_eq!(decode_one(fixed_distance(), &[0b0000_0000]).unwrap(), 0);
        assert_eq!(decode_one(fixed_distance(), &[0b0001_0011]).unwrap(), 25);
    }

    #[test]
    fn test_code_length_zero_marker_reset() {
        // Symbols with length 0 never appear in the decode table.
        let tree = HuffmanTree::from_lengths(&[0, 0, 1, 0]).unwrap();
        assert_eq!(tree.coded_symbols(), 1);
        assert_eq!(decode_one(&tree, &[0x00]).unwrap(), 2);
    }
}
