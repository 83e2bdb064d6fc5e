//! Per-symbol prefix codes derived from the tree.

use crate::freq::SYMBOL_COUNT;
use crate::tree::HuffNode;
use huffpack_core::{BitWriter, Result};
use std::io::Write;

/// A single prefix code: the root-to-leaf path of a symbol.
///
/// Stored as the low `len` bits of `bits`, first path bit in the most
/// significant position. 128 bits of storage is enough: with `u64` weights
/// the deepest reachable leaf is Fibonacci-bounded near depth 90.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    /// The empty path at the root.
    pub const ROOT: Code = Code { bits: 0, len: 0 };

    /// Extend the path by one step: `false` for left, `true` for right.
    pub fn descend(self, bit: bool) -> Code {
        debug_assert!(self.len < 128, "code length exceeds storage");
        Code {
            bits: (self.bits << 1) | bit as u128,
            len: self.len + 1,
        }
    }

    /// Length of the code in bits.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Whether the code is empty (only true for the root path).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at position `index`, counted from the start of the path.
    pub fn bit(&self, index: u8) -> bool {
        debug_assert!(index < self.len);
        (self.bits >> (self.len - 1 - index)) & 1 == 1
    }

    /// True if `self` is a prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        (other.bits >> (other.len - self.len)) == self.bits
    }

    /// Emit the code, first path bit first, in 32-bit chunks.
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        let mut remaining = self.len;
        while remaining > 0 {
            let take = remaining.min(32);
            remaining -= take;
            let mask = if take == 32 {
                u32::MAX
            } else {
                (1u32 << take) - 1
            };
            let chunk = ((self.bits >> remaining) as u32) & mask;
            writer.write_bits(chunk, take)?;
        }
        Ok(())
    }
}

/// Symbol → code mapping for one tree, prefix-free by construction.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Derive the code table by walking the tree depth-first, appending `0`
    /// when descending left and `1` when descending right.
    pub fn from_tree(root: &HuffNode) -> Self {
        let mut codes = vec![None; SYMBOL_COUNT];
        assign(root, Code::ROOT, &mut codes);
        Self { codes }
    }

    /// Code for a symbol, if the symbol occurs in the tree.
    pub fn get(&self, symbol: u16) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Iterate over `(symbol, code)` pairs present in the table.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Code)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u16, c)))
    }
}

fn assign(node: &HuffNode, path: Code, codes: &mut [Option<Code>]) {
    match node {
        HuffNode::Leaf { symbol } => {
            codes[*symbol as usize] = Some(path);
        }
        HuffNode::Internal { left, right } => {
            assign(left, path.descend(false), codes);
            assign(right, path.descend(true), codes);
        }
    }
}
