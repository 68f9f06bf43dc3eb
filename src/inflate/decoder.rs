//! DEFLATE-family block decoder
//!
//! The block-level state machine: each call to [`inflate_block`] consumes one
//! stored, fixed-Huffman or dynamic-Huffman block from the bit stream and
//! appends its output to the window. The final-block flag is consumed and
//! returned, but what it means is up to the caller: the plain stream reader
//! stops on it, while the chunked adapter frames by declared lengths and
//! ignores it.

use crate::bits::BitReader;
use crate::common::{Result, ZlibxError};
use crate::huffman::{self, HuffmanTree};
use crate::inflate::window::Window;
use crate::tables::{CODE_LENGTH_ORDER, DIST_BASE, DIST_EXTRA, LEN_BASE, LEN_EXTRA};
use std::io::Read;

/// Decode one block. Returns the value of the block's final-block flag.
pub(crate) fn inflate_block<R: Read>(bits: &mut BitReader<R>, window: &mut Window) -> Result<bool> {
    let is_final = bits.bit()? == 1;
    match bits.bits(2, 0)? {
        0 => stored_block(bits, window)?,
        1 => huffman_block(
            bits,
            window,
            huffman::fixed_literal(),
            huffman::fixed_distance(),
        )?,
        2 => {
            // Trees are built fresh for every dynamic block, never reused.
            let (literal, distance) = read_dynamic_trees(bits)?;
            huffman_block(bits, window, &literal, &distance)?;
        }
        other => return Err(ZlibxError::InvalidBlockType(other as u8)),
    }
    Ok(is_final)
}

/// Stored block: byte-aligned length, one's-complement check, raw copy.
fn stored_block<R: Read>(bits: &mut BitReader<R>, window: &mut Window) -> Result<()> {
    bits.align();
    let length = bits.read_u16_le()?;
    let complement = bits.read_u16_le()?;
    if length != !complement {
        return Err(ZlibxError::StoredLengthMismatch { length, complement });
    }
    let mut body = vec![0u8; length as usize];
    for byte in body.iter_mut() {
        *byte = bits.read_byte()?;
    }
    window.push_slice(&body);
    bits.align();
    Ok(())
}

/// Symbol loop shared by fixed and dynamic blocks.
fn huffman_block<R: Read>(
    bits: &mut BitReader<R>,
    window: &mut Window,
    literal: &HuffmanTree,
    distance: &HuffmanTree,
) -> Result<()> {
    loop {
        let symbol = literal.decode(bits)?;
        if symbol == 256 {
            return Ok(());
        }
        if symbol < 256 {
            window.push(symbol as u8);
            continue;
        }
        let index = (symbol - 257) as usize;
        if index >= LEN_BASE.len() {
            return Err(ZlibxError::InvalidSymbol(symbol));
        }
        let length = bits.bits(LEN_EXTRA[index], LEN_BASE[index])? as usize;

        let dist_symbol = distance.decode(bits)?;
        let dist_index = dist_symbol as usize;
        if dist_index >= DIST_BASE.len() {
            return Err(ZlibxError::InvalidDistanceSymbol(dist_symbol));
        }
        let dist = bits.bits(DIST_EXTRA[dist_index], DIST_BASE[dist_index])? as usize;

        window.copy_match(dist, length)?;
    }
}

/// Decode a dynamic block header into its literal/length and distance trees.
///
/// Protocol: HLIT (5 bits, +257), HDIST (5 bits, +1), HCLEN (4 bits, +4);
/// HCLEN 3-bit lengths for the 19-symbol code-length alphabet in the fixed
/// permutation order; then HLIT+HDIST code lengths where 16 repeats the
/// previous length 3..=6 times, 17 writes 3..=10 zeros and 18 writes
/// 11..=138 zeros. The length array splits at HLIT.
pub(crate) fn read_dynamic_trees<R: Read>(
    bits: &mut BitReader<R>,
) -> Result<(HuffmanTree, HuffmanTree)> {
    let hlit = bits.bits(5, 257)? as usize;
    let hdist = bits.bits(5, 1)? as usize;
    let hclen = bits.bits(4, 4)? as usize;
    if hlit > 286 || hdist > 30 {
        return Err(ZlibxError::InvalidData(format!(
            "too many code lengths: {hlit} literal/length, {hdist} distance"
        )));
    }

    let mut cl_lengths = [0u8; 19];
    for &position in CODE_LENGTH_ORDER.iter().take(hclen) {
        cl_lengths[position] = bits.bits(3, 0)? as u8;
    }
    let cl_tree = HuffmanTree::from_lengths(&cl_lengths)?;

    let mut lengths = vec![0u8; hlit + hdist];
    let mut filled = 0;
    while filled < lengths.len() {
        let symbol = cl_tree.decode(bits)?;
        let (value, repeat) = match symbol {
            0..=15 => {
                lengths[filled] = symbol as u8;
                filled += 1;
                continue;
            }
            16 => {
                if filled == 0 {
                    return Err(ZlibxError::InvalidData(
                        "length repeat with no previous length".into(),
                    ));
                }
                (lengths[filled - 1], bits.bits(2, 3)? as usize)
            }
            17 => (0, bits.bits(3, 3)? as usize),
            18 => (0, bits.bits(7, 11)? as usize),
            other => return Err(ZlibxError::InvalidSymbol(other)),
        };
        if filled + repeat > lengths.len() {
            return Err(ZlibxError::InvalidData(
                "length run past the end of the table".into(),
            ));
        }
        lengths[filled..filled + repeat].fill(value);
        filled += repeat;
    }

    let literal = HuffmanTree::from_lengths(&lengths[..hlit])?;
    let distance = HuffmanTree::from_lengths(&lengths[hlit..])?;
    Ok((literal, distance))
}
