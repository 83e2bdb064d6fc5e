//! The container codec: magic, header, payload, sentinel.

use crate::code::CodeTable;
use crate::freq::{EOF_SYMBOL, FrequencyTable};
use crate::header;
use crate::tree::{HuffNode, build_tree};
use huffpack_core::{BitReader, BitWriter, HuffPackError, Result};
use log::debug;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// Magic constant identifying a huffpack container, written as one 32-bit
/// MSB-first field: the stream starts with bytes `FA CE 82 01`.
pub const MAGIC: u32 = 0xFACE_8201;

const CHUNK_SIZE: usize = 64 * 1024;

/// Diagnostics for one compression run, derived from the bit layer's
/// counters.
#[derive(Debug, Clone, Copy)]
pub struct CompressStats {
    /// Bytes consumed from the source.
    pub input_bytes: u64,
    /// Size of the serialized tree header in bits.
    pub header_bits: u64,
    /// Size of the payload in bits, sentinel code included.
    pub payload_bits: u64,
    /// Bytes produced, final padding included.
    pub output_bytes: u64,
}

/// Diagnostics for one decompression run.
#[derive(Debug, Clone, Copy)]
pub struct DecompressStats {
    /// Bytes written to the output.
    pub output_bytes: u64,
    /// Bits consumed from the input, trailing padding excluded.
    pub bits_read: u64,
}

/// Compress `reader` into `writer`.
///
/// Two passes over the source: one to count frequencies, one to encode. The
/// source is rewound to the stream position it had on entry, so sources
/// embedded mid-file work. Both passes stream in chunks; memory use scales
/// with the alphabet, not the input.
pub fn compress<R: Read + Seek, W: Write>(reader: &mut R, writer: W) -> Result<CompressStats> {
    let start = reader.stream_position()?;

    let freqs = FrequencyTable::count(reader)?;
    let input_bytes = freqs.total_bytes();
    debug!(
        "counted {} bytes, {} distinct symbols",
        input_bytes,
        freqs.nonzero().count()
    );

    let root = build_tree(&freqs)?;
    let codes = CodeTable::from_tree(&root);

    reader.seek(SeekFrom::Start(start))?;

    let mut bits = BitWriter::new(writer);
    bits.write_bits(MAGIC, 32)?;
    header::serialize(&root, &mut bits)?;
    let header_bits = bits.bits_written() - 32;
    debug!("tree header: {} bits", header_bits);

    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        for &byte in &buf[..n] {
            code_for(&codes, byte as u16)?.write_to(&mut bits)?;
        }
    }
    code_for(&codes, EOF_SYMBOL)?.write_to(&mut bits)?;

    let payload_bits = bits.bits_written() - 32 - header_bits;
    bits.flush()?;
    debug!("payload: {} bits", payload_bits);

    Ok(CompressStats {
        input_bytes,
        header_bits,
        payload_bits,
        output_bytes: (32 + header_bits + payload_bits).div_ceil(8),
    })
}

fn code_for(codes: &CodeTable, symbol: u16) -> Result<&crate::code::Code> {
    codes.get(symbol).ok_or_else(|| {
        HuffPackError::invariant(format!("no code for counted symbol {symbol}"))
    })
}

/// Compress an in-memory buffer.
pub fn compress_bytes(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress(&mut Cursor::new(input), &mut output)?;
    Ok(output)
}

/// Decompress `reader` into `writer`.
///
/// Rejects a wrong magic before producing any output. End of input before
/// the sentinel leaf is a `TruncatedStream` error; any partial output must
/// be treated as invalid by the caller.
pub fn decompress<R: Read, W: Write>(reader: R, writer: &mut W) -> Result<DecompressStats> {
    let mut bits = BitReader::new(reader);

    let found = bits.read_bits(32)?;
    if found != MAGIC {
        return Err(HuffPackError::invalid_magic(MAGIC, found));
    }

    let root = header::deserialize(&mut bits)?;
    if root.is_leaf() {
        return Err(HuffPackError::corrupted(
            bits.bits_read(),
            "header describes a single-leaf tree",
        ));
    }
    debug!(
        "tree header: {} bits, {} leaves",
        bits.bits_read() - 32,
        root.leaf_count()
    );

    let mut out = Vec::with_capacity(CHUNK_SIZE);
    let mut output_bytes = 0u64;
    let mut node = &root;
    loop {
        let bit = bits.read_bit()?;
        let HuffNode::Internal { left, right } = node else {
            return Err(HuffPackError::invariant("payload walk escaped the tree"));
        };
        node = if bit { right.as_ref() } else { left.as_ref() };

        if let HuffNode::Leaf { symbol } = node {
            if *symbol == EOF_SYMBOL {
                break;
            }
            out.push(*symbol as u8);
            if out.len() >= CHUNK_SIZE {
                writer.write_all(&out)?;
                output_bytes += out.len() as u64;
                out.clear();
            }
            node = &root;
        }
    }

    writer.write_all(&out)?;
    output_bytes += out.len() as u64;
    writer.flush()?;
    debug!("decoded {} bytes", output_bytes);

    Ok(DecompressStats {
        output_bytes,
        bits_read: bits.bits_read(),
    })
}

/// Decompress an in-memory buffer.
pub fn decompress_bytes(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress(Cursor::new(input), &mut output)?;
    Ok(output)
}
