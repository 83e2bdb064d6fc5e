//! # huffpack Core
//!
//! Core components for the huffpack codec.
//!
//! This crate provides the building blocks shared by the codec and the CLI:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for variable-length prefix codes
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! huffpack is a small layered stack:
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ L3: CLI                                        │
//! │     compress / decompress / info               │
//! ├────────────────────────────────────────────────┤
//! │ L2: Codec (huffpack-codec)                     │
//! │     frequency table, prefix tree, code table,  │
//! │     container header and payload               │
//! ├────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                     │
//! │     BitReader/BitWriter, error types           │
//! └────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{HuffPackError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{HuffPackError, Result};
}
