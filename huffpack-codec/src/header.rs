//! Self-terminating container header: the tree shape itself.
//!
//! The header is a pre-order bit grammar with no length prefix:
//!
//! - internal node → bit `0`, then the left subtree, then the right;
//! - leaf → bit `1`, then the symbol in a fixed 9-bit field (0..=256).
//!
//! The grammar is self-delimiting: every `0` consumes exactly two
//! well-formed subtrees and every `1` consumes exactly 9 trailing bits, so
//! the reader stops the moment one complete tree has been read.

use crate::freq::SYMBOL_COUNT;
use crate::tree::HuffNode;
use huffpack_core::{BitReader, BitWriter, HuffPackError, Result};
use std::io::{Read, Write};

/// Width of the symbol field in a leaf token. 9 bits covers 0..=256.
pub const SYMBOL_BITS: u8 = 9;

/// Deepest tree a 257-symbol alphabet can produce. Anything deeper is a
/// hostile or corrupt header, rejected before it can exhaust the stack.
const MAX_TREE_DEPTH: u32 = 256;

/// Serialize the tree in pre-order.
pub fn serialize<W: Write>(node: &HuffNode, writer: &mut BitWriter<W>) -> Result<()> {
    match node {
        HuffNode::Internal { left, right } => {
            writer.write_bit(false)?;
            serialize(left, writer)?;
            serialize(right, writer)
        }
        HuffNode::Leaf { symbol } => {
            writer.write_bit(true)?;
            writer.write_bits(*symbol as u32, SYMBOL_BITS)
        }
    }
}

/// Reconstruct a tree from header bits.
///
/// Fails with `TruncatedStream` if the source ends before one complete tree
/// has been read, and with `CorruptedData` if the described tree is deeper
/// than any 257-symbol alphabet allows.
pub fn deserialize<R: Read>(reader: &mut BitReader<R>) -> Result<HuffNode> {
    read_node(reader, 0)
}

fn read_node<R: Read>(reader: &mut BitReader<R>, depth: u32) -> Result<HuffNode> {
    if depth > MAX_TREE_DEPTH {
        return Err(HuffPackError::corrupted(
            reader.bits_read(),
            "tree header exceeds maximum depth",
        ));
    }

    if reader.read_bit()? {
        let symbol = reader.read_bits(SYMBOL_BITS)? as u16;
        // The 9-bit field can hold up to 511; only 0..=256 are symbols.
        if symbol as usize >= SYMBOL_COUNT {
            return Err(HuffPackError::corrupted(
                reader.bits_read(),
                format!("leaf symbol {symbol} out of range"),
            ));
        }
        Ok(HuffNode::Leaf { symbol })
    } else {
        let left = read_node(reader, depth + 1)?;
        let right = read_node(reader, depth + 1)?;
        Ok(HuffNode::Internal {
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::CodeTable;
    use crate::freq::FrequencyTable;
    use crate::tree::build_tree;
    use std::io::Cursor;

    fn header_bytes(root: &HuffNode) -> Vec<u8> {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            serialize(root, &mut writer).unwrap();
            writer.flush().unwrap();
        }
        output
    }

    #[test]
    fn test_roundtrip_preserves_code_table() {
        let freqs = FrequencyTable::from_bytes(b"AAAAABBBCCD");
        let root = build_tree(&freqs).unwrap();
        let bytes = header_bytes(&root);

        let mut reader = BitReader::new(Cursor::new(&bytes));
        let rebuilt = deserialize(&mut reader).unwrap();

        let original: Vec<_> = CodeTable::from_tree(&root).iter().map(|(s, c)| (s, *c)).collect();
        let decoded: Vec<_> = CodeTable::from_tree(&rebuilt)
            .iter()
            .map(|(s, c)| (s, *c))
            .collect();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_self_terminating() {
        let freqs = FrequencyTable::from_bytes(b"hello");
        let root = build_tree(&freqs).unwrap();
        let mut bytes = header_bytes(&root);
        // Trailing garbage after a complete tree must not be consumed as
        // part of the header.
        bytes.extend_from_slice(&[0xFF; 8]);

        let mut reader = BitReader::new(Cursor::new(&bytes));
        let rebuilt = deserialize(&mut reader).unwrap();
        assert_eq!(rebuilt, root);
    }

    #[test]
    fn test_truncated_header() {
        let freqs = FrequencyTable::from_bytes(b"hello world");
        let root = build_tree(&freqs).unwrap();
        let bytes = header_bytes(&root);

        let mut reader = BitReader::new(Cursor::new(&bytes[..1]));
        let err = deserialize(&mut reader).unwrap_err();
        assert!(matches!(err, HuffPackError::TruncatedStream { .. }));
    }

    #[test]
    fn test_hostile_depth_rejected() {
        // An unbounded run of `0` bits claims an internal node at every
        // level without ever closing a subtree.
        let bytes = vec![0u8; 64];
        let mut reader = BitReader::new(Cursor::new(&bytes));
        let err = deserialize(&mut reader).unwrap_err();
        assert!(matches!(err, HuffPackError::CorruptedData { .. }));
    }

    #[test]
    fn test_out_of_range_symbol_rejected() {
        let mut bytes = Vec::new();
        {
            let mut writer = BitWriter::new(&mut bytes);
            writer.write_bit(false).unwrap();
            // Left leaf carries 511, which no symbol maps to.
            writer.write_bit(true).unwrap();
            writer.write_bits(511, SYMBOL_BITS).unwrap();
            writer.write_bit(true).unwrap();
            writer.write_bits(0, SYMBOL_BITS).unwrap();
            writer.flush().unwrap();
        }
        let mut reader = BitReader::new(Cursor::new(&bytes));
        let err = deserialize(&mut reader).unwrap_err();
        assert!(matches!(err, HuffPackError::CorruptedData { .. }));
    }

    #[test]
    fn test_leaf_token_is_ten_bits() {
        let root = HuffNode::Internal {
            left: Box::new(HuffNode::Leaf { symbol: 0 }),
            right: Box::new(HuffNode::Leaf { symbol: 256 }),
        };
        let mut output = Vec::new();
        let mut writer = BitWriter::new(&mut output);
        serialize(&root, &mut writer).unwrap();
        // 1 bit for the internal node, then two 1+9-bit leaf tokens.
        assert_eq!(writer.bits_written(), 21);
    }
}
