//! Error types for huffpack operations.
//!
//! One error type covers the whole pipeline: I/O failures from the
//! underlying reader/writer, container validation errors, and defensive
//! internal errors that should never fire on well-formed input.

use std::io;
use thiserror::Error;

/// The main error type for huffpack operations.
#[derive(Debug, Error)]
pub enum HuffPackError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The container's leading 32 bits do not identify a huffpack stream.
    #[error("Invalid magic number: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic {
        /// Expected magic constant.
        expected: u32,
        /// Value actually read from the stream.
        found: u32,
    },

    /// End of stream reached while the header or payload was still open.
    ///
    /// Distinct from normal termination: a well-formed payload always ends
    /// with the sentinel code before any byte padding is consumed.
    #[error("Truncated stream at bit position {bit_position}")]
    TruncatedStream {
        /// Bit offset at which the stream ran out.
        bit_position: u64,
    },

    /// Structurally invalid input that is not a mere truncation.
    #[error("Corrupted data at bit position {bit_position}: {message}")]
    CorruptedData {
        /// Bit offset at which the corruption was detected.
        bit_position: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Internal invariant broken (e.g. the merge queue drained early).
    ///
    /// Unreachable given the sentinel guarantee, but surfaced loudly
    /// rather than silently producing a malformed tree.
    #[error("Invariant violation: {message}")]
    InvariantViolation {
        /// Description of the broken invariant.
        message: String,
    },
}

/// Result type alias for huffpack operations.
pub type Result<T> = std::result::Result<T, HuffPackError>;

impl HuffPackError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: u32, found: u32) -> Self {
        Self::InvalidMagic { expected, found }
    }

    /// Create a truncated stream error.
    pub fn truncated(bit_position: u64) -> Self {
        Self::TruncatedStream { bit_position }
    }

    /// Create a corrupted data error.
    pub fn corrupted(bit_position: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            bit_position,
            message: message.into(),
        }
    }

    /// Create an invariant violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }
}
