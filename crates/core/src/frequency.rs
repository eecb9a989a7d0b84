//! Symbol frequency analysis.
//!
//! A [`FrequencyTable`] maps each byte value to the number of times it occurs.
//! It is the only model the engine persists: the code tree is always rebuilt
//! from it.

use std::collections::BTreeMap;

/// Occurrence counts per byte value, iterated in ascending byte order.
///
/// Zero counts may be stored (an artifact can carry them) but never produce
/// a tree leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count for `symbol`, returning the previous count if any.
    pub fn insert(&mut self, symbol: u8, count: u64) -> Option<u64> {
        self.counts.insert(symbol, count)
    }

    /// Count for `symbol`, or 0 if absent.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols stored.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }

    /// Iterate only the entries that can become tree leaves.
    pub fn positive(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.iter().filter(|&(_, c)| c > 0)
    }

    /// Shannon entropy in bits per symbol.
    ///
    /// Returns 0.0 for an empty or single-symbol table.
    pub fn entropy_bits(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        self.positive()
            .map(|(_, c)| {
                let p = c as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Count every byte of `text`.
///
/// An empty input yields an empty table; callers that need a code must reject
/// it downstream.
pub fn analyze(text: &[u8]) -> FrequencyTable {
    let mut counts = [0u64; 256];
    for &byte in text {
        counts[byte as usize] += 1;
    }

    counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c > 0)
        .map(|(s, &c)| (s as u8, c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_abracadabra() {
        let table = analyze(b"abracadabra");

        assert_eq!(table.len(), 5);
        assert_eq!(table.get(b'a'), 5);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.get(b'r'), 2);
        assert_eq!(table.get(b'c'), 1);
        assert_eq!(table.get(b'd'), 1);
        assert_eq!(table.total(), 11);
    }

    #[test]
    fn test_analyze_empty() {
        let table = analyze(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_nul_byte_is_a_symbol() {
        let table = analyze(&[0, 0, 255]);
        assert_eq!(table.get(0), 2);
        assert_eq!(table.get(255), 1);
    }

    #[test]
    fn test_iteration_order() {
        let table = analyze(b"zyxa");
        let symbols: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, b"axyz".to_vec());
    }

    #[test]
    fn test_positive_skips_zero_counts() {
        let table: FrequencyTable = [(1, 0), (2, 3)].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.positive().collect::<Vec<_>>(), vec![(2, 3)]);
    }

    #[test]
    fn test_entropy() {
        assert_eq!(analyze(b"aaaa").entropy_bits(), 0.0);

        let uniform = analyze(b"abcd");
        assert!((uniform.entropy_bits() - 2.0).abs() < 1e-12);
    }
}
