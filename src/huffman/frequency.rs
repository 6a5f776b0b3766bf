use std::collections::hash_map;
use std::collections::HashMap;

use super::Symbol;

/// Occurrence counts for the symbols of a source alphabet.
///
/// Stored counts are always positive. Setting a count to zero removes the
/// symbol from the table.
#[derive(Debug, Clone)]
pub struct FrequencyTable<S: Symbol> {
    counts: HashMap<S, u64>,
}

impl<S: Symbol> FrequencyTable<S> {
    pub fn new() -> FrequencyTable<S> {
        FrequencyTable {
            counts: HashMap::new(),
        }
    }

    /// Count every symbol produced by the iterator.
    pub fn from_symbols<I>(symbols: I) -> FrequencyTable<S>
    where
        I: IntoIterator<Item = S>,
    {
        let mut table = FrequencyTable::new();
        for symbol in symbols {
            table.increment(symbol);
        }
        table
    }

    pub fn increment(&mut self, symbol: S) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    pub fn set_count(&mut self, symbol: S, count: u64) {
        if count == 0 {
            self.counts.remove(&symbol);
        } else {
            self.counts.insert(symbol, count);
        }
    }

    pub fn count(&self, symbol: &S) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Sum of all counts, which is also the weight of the tree root.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, S, u64> {
        self.counts.iter()
    }
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::FrequencyTable;

    #[test]
    fn test_count_symbols_from_iterator() {
        let table = FrequencyTable::from_symbols(b"abracadabra".iter().copied());
        assert_eq!(table.count(&b'a'), 5, "count of 'a' does not match");
        assert_eq!(table.count(&b'b'), 2, "count of 'b' does not match");
        assert_eq!(table.count(&b'r'), 2, "count of 'r' does not match");
        assert_eq!(table.count(&b'c'), 1, "count of 'c' does not match");
        assert_eq!(table.count(&b'd'), 1, "count of 'd' does not match");
        assert_eq!(table.len(), 5);
        assert_eq!(table.total(), 11);
    }

    #[test]
    fn test_absent_symbol_has_count_zero() {
        let table = FrequencyTable::from_symbols(b"aa".iter().copied());
        assert_eq!(table.count(&b'z'), 0);
    }

    #[test]
    fn test_increment_accumulates() {
        let mut table = FrequencyTable::new();
        table.increment(b'x');
        table.increment(b'x');
        table.increment(b'x');
        assert_eq!(table.count(&b'x'), 3);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_zero_count_removes_symbol() {
        let mut table = FrequencyTable::new();
        table.set_count(b'x', 4);
        table.set_count(b'y', 2);
        table.set_count(b'x', 0);
        assert_eq!(table.len(), 1, "symbol with zero count must be removed");
        assert_eq!(table.count(&b'x'), 0);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let table: FrequencyTable<u8> = FrequencyTable::new();
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }
}
