//! Bit-level I/O for variable-length prefix codes.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level, which is what the huffpack container needs for its
//! tree header and payload codes.
//!
//! # Bit Ordering
//!
//! The huffpack container packs bits MSB-first (Most Significant Bit first)
//! within each byte: the first bit written lands in bit 7 of the first output
//! byte. A 32-bit field written in one call therefore appears big-endian on
//! the wire.
//!
//! Both ends track a monotonic total-bit position; there is no backward
//! seeking within the bit layer. Reading past the end of the underlying
//! stream yields [`HuffPackError::TruncatedStream`] with that position.
//!
//! # Example
//!
//! ```
//! use huffpack_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(0b101, 3).unwrap();
//!     writer.write_bits(0b1100, 4).unwrap();
//!     writer.flush().unwrap();
//! }
//!
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{HuffPackError, Result};
use std::io::{Read, Write};

/// A bit-level reader that wraps any `Read` implementation.
///
/// Maintains an internal sub-byte offset so codes may cross byte boundaries
/// freely. End-of-stream is reported as a typed `TruncatedStream` error
/// carrying the bit position reached.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer; only the low `bits_in_buffer` bits are valid.
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits consumed (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get the total number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Ensure at least `count` bits are buffered.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "cannot buffer more than 32 bits at once");

        while self.bits_in_buffer < count {
            let mut byte = [0u8; 1];
            let n = self.reader.read(&mut byte)?;
            if n == 0 {
                return Err(HuffPackError::truncated(self.total_bits_read));
            }
            self.buffer = (self.buffer << 8) | byte[0] as u64;
            self.bits_in_buffer += 8;
        }

        Ok(())
    }

    /// Read up to 32 bits from the stream, MSB-first.
    ///
    /// The first bit read ends up in the most significant position of the
    /// returned value.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        self.fill_buffer(count)?;

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count).wrapping_sub(1);
        let value = ((self.buffer >> shift) & mask) as u32;

        self.bits_in_buffer -= count;
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
        self.total_bits_read += count as u64;

        Ok(value)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// Accumulates bits in an internal buffer and emits complete bytes as they
/// form. Call `flush()` when done to pad the final partial byte with zeros;
/// dropping the writer performs a best-effort flush.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer; only the low `bits_in_buffer` bits are pending.
    buffer: u64,
    /// Number of pending bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written, excluding final padding.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get the total number of bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Emit complete bytes from the buffer, MSB-first.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.writer.write_all(&[byte])?;
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
        Ok(())
    }

    /// Write up to 32 bits to the stream, MSB-first.
    ///
    /// The most significant of the `count` low bits of `value` is written
    /// first.
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = if count == 32 {
            u32::MAX
        } else {
            (1u32 << count).wrapping_sub(1)
        };
        let value = value & mask;

        self.buffer = (self.buffer << count) | value as u64;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Pad the final partial byte with zeros and flush the underlying writer.
    ///
    /// The padding is never observed by a conforming reader: the payload is
    /// logically terminated by the sentinel code before padding begins.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            let byte = (self.buffer << padding) as u8;
            self.writer.write_all(&[byte])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bitreader_basic() {
        // 0b10110101 = 0xB5
        let data = vec![0xB5];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(1).unwrap(), 1); // MSB first
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
    }

    #[test]
    fn test_bitreader_multi_byte() {
        let data = vec![0xFF, 0x00];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.read_bits(8).unwrap(), 0xF0); // Crosses byte boundary
        assert_eq!(reader.read_bits(4).unwrap(), 0x0);
    }

    #[test]
    fn test_bitreader_eof_is_truncation() {
        let data = vec![0xAB];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(8).unwrap(), 0xAB);
        let err = reader.read_bit().unwrap_err();
        assert!(matches!(
            err,
            HuffPackError::TruncatedStream { bit_position: 8 }
        ));
    }

    #[test]
    fn test_bitwriter_basic() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            // Write 0b10110101 bit by bit
            writer.write_bit(true).unwrap();
            writer.write_bit(false).unwrap();
            writer.write_bit(true).unwrap();
            writer.write_bit(true).unwrap();
            writer.write_bit(false).unwrap();
            writer.write_bit(true).unwrap();
            writer.write_bit(false).unwrap();
            writer.write_bit(true).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0xB5]);
    }

    #[test]
    fn test_bitwriter_padding() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0b101, 3).unwrap();
            assert_eq!(writer.bits_written(), 3);
            writer.flush().unwrap();
            // Padding does not count as written payload bits.
            assert_eq!(writer.bits_written(), 3);
        }
        // 101 followed by five zero padding bits
        assert_eq!(output, vec![0b1010_0000]);
    }

    #[test]
    fn test_32_bit_field_is_big_endian_on_wire() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0xFACE_8201, 32).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0xFA, 0xCE, 0x82, 0x01]);
    }

    #[test]
    fn test_roundtrip() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0b101, 3).unwrap();
            writer.write_bits(0b1111, 4).unwrap();
            writer.write_bits(0b10, 2).unwrap();
            writer.write_bits(0b110011, 6).unwrap();
            writer.flush().unwrap();
        }

        let mut reader = BitReader::new(Cursor::new(&output));
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.read_bits(6).unwrap(), 0b110011);
        assert_eq!(reader.bits_read(), 15);
    }

    #[test]
    fn test_flush_on_drop() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0b11, 2).unwrap();
            // No explicit flush
        }
        assert_eq!(output, vec![0b1100_0000]);
    }
}
