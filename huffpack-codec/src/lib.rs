//! # huffpack Codec
//!
//! Lossless byte-stream compression built on a greedily constructed prefix
//! tree (Huffman coding), over a self-describing binary container:
//!
//! - a fixed 32-bit magic constant (`FA CE 82 01` on the wire);
//! - the tree itself as a pre-order, self-terminating bit grammar
//!   (`0` = internal node, `1` + 9-bit symbol = leaf);
//! - the payload as the concatenation of each input byte's code;
//! - a sentinel symbol (value 256) terminating the payload, so decoding
//!   never depends on byte alignment or trailing padding.
//!
//! The alphabet is the 256 literal byte values plus the sentinel; round-trip
//! is lossless for arbitrary input, embedded zero bytes and the empty
//! stream included.
//!
//! ## Example
//!
//! ```rust
//! use huffpack_codec::{compress_bytes, decompress_bytes};
//!
//! let original = b"streams of bits, not bytes";
//! let compressed = compress_bytes(original).unwrap();
//! let restored = decompress_bytes(&compressed).unwrap();
//! assert_eq!(restored, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
pub mod codec;
pub mod freq;
pub mod header;
pub mod tree;

// Re-exports
pub use code::{Code, CodeTable};
pub use codec::{
    CompressStats, DecompressStats, MAGIC, compress, compress_bytes, decompress, decompress_bytes,
};
pub use freq::{ALPHABET_SIZE, EOF_SYMBOL, FrequencyTable, SYMBOL_COUNT};
pub use tree::{HuffNode, build_tree};
