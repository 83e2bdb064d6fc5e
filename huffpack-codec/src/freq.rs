//! Symbol frequency counting, the first compression pass.

use huffpack_core::Result;
use std::io::Read;

/// Number of literal byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Synthetic end-of-payload sentinel symbol.
///
/// One past the largest literal byte value, so it can never collide with
/// real data. Its count is fixed at 1 regardless of the input.
pub const EOF_SYMBOL: u16 = ALPHABET_SIZE as u16;

/// Total number of symbols: 256 literals plus the sentinel.
pub const SYMBOL_COUNT: usize = ALPHABET_SIZE + 1;

const CHUNK_SIZE: usize = 64 * 1024;

/// Occurrence counts for every symbol, including the sentinel.
///
/// Counts are `u64`: the total input length may exceed 32-bit range.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    fn empty() -> Self {
        let mut counts = [0u64; SYMBOL_COUNT];
        counts[EOF_SYMBOL as usize] = 1;
        Self { counts }
    }

    /// Count symbol occurrences by consuming the entire source.
    ///
    /// The source is read incrementally in chunks; memory use does not scale
    /// with input length. The caller is responsible for rewinding the source
    /// before the encoding pass.
    pub fn count<R: Read>(reader: &mut R) -> Result<Self> {
        let mut table = Self::empty();
        let mut buf = vec![0u8; CHUNK_SIZE];

        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            for &byte in &buf[..n] {
                table.counts[byte as usize] += 1;
            }
        }

        Ok(table)
    }

    /// Count symbol occurrences over an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::empty();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Occurrence count for a symbol.
    pub fn get(&self, symbol: u16) -> u64 {
        self.counts[symbol as usize]
    }

    /// Iterate over `(symbol, count)` pairs with nonzero count, in ascending
    /// symbol order. Always yields at least the sentinel.
    pub fn nonzero(&self) -> impl Iterator<Item = (u16, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u16, count))
    }

    /// Total number of input bytes counted (sentinel excluded).
    pub fn total_bytes(&self) -> u64 {
        self.counts[..ALPHABET_SIZE].iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_sentinel_always_counted_once() {
        let table = FrequencyTable::from_bytes(b"");
        assert_eq!(table.get(EOF_SYMBOL), 1);

        let table = FrequencyTable::from_bytes(&[0u8; 1000]);
        assert_eq!(table.get(EOF_SYMBOL), 1);
    }

    #[test]
    fn test_counts() {
        let table = FrequencyTable::from_bytes(b"AAAAABBBCCD");
        assert_eq!(table.get(b'A' as u16), 5);
        assert_eq!(table.get(b'B' as u16), 3);
        assert_eq!(table.get(b'C' as u16), 2);
        assert_eq!(table.get(b'D' as u16), 1);
        assert_eq!(table.get(b'E' as u16), 0);
        assert_eq!(table.total_bytes(), 11);
    }

    #[test]
    fn test_count_matches_from_bytes() {
        let data: Vec<u8> = (0u16..=255).map(|b| b as u8).cycle().take(3000).collect();
        let counted = FrequencyTable::count(&mut Cursor::new(&data)).unwrap();
        let buffered = FrequencyTable::from_bytes(&data);
        for symbol in 0..SYMBOL_COUNT as u16 {
            assert_eq!(counted.get(symbol), buffered.get(symbol));
        }
    }

    #[test]
    fn test_nonzero_ascending_and_includes_sentinel() {
        let table = FrequencyTable::from_bytes(b"zza");
        let entries: Vec<(u16, u64)> = table.nonzero().collect();
        assert_eq!(
            entries,
            vec![(b'a' as u16, 1), (b'z' as u16, 2), (EOF_SYMBOL, 1)]
        );
    }

    #[test]
    fn test_zero_bytes_are_counted() {
        let table = FrequencyTable::from_bytes(&[0, 0, 1]);
        assert_eq!(table.get(0), 2);
        assert_eq!(table.get(1), 1);
    }
}
