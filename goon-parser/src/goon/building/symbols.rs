//! Symbol interning
//!
//! Every call to [SymbolTable::intern] allocates a fresh entry, even for text that is
//! already present. Two occurrences of `x` in one source therefore get two indices that
//! both resolve to `"x"`: indices identify occurrences, not names.

use crate::goon::error::ContractViolation;
use tracing::trace;

/// Per-parse store of identifier text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<Box<str>>,
    capacity: Option<usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: Some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Copies `text` into a new entry and returns its index.
    pub fn intern(&mut self, text: &str) -> Result<usize, ContractViolation> {
        if let Some(capacity) = self.capacity {
            if self.entries.len() >= capacity {
                return Err(ContractViolation::SymbolCapacityExceeded { capacity });
            }
        }
        let index = self.entries.len();
        trace!(index, text, "intern symbol");
        self.entries.push(text.into());
        Ok(index)
    }

    pub fn lookup(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|text| &**text)
    }

    /// Number of entries, which is also the next index `intern` will hand out.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries.iter().map(|text| &**text).enumerate()
    }

    /// Takes the entries out, leaving an empty table with the same cap.
    pub fn take(&mut self) -> SymbolTable {
        SymbolTable {
            entries: std::mem::take(&mut self.entries),
            capacity: self.capacity,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_does_not_deduplicate() {
        let mut table = SymbolTable::new();
        let first = table.intern("x").unwrap();
        let second = table.intern("x").unwrap();

        assert_ne!(first, second);
        assert_eq!(table.lookup(first), Some("x"));
        assert_eq!(table.lookup(second), Some("x"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_indices_are_sequential_from_zero() {
        let mut table = SymbolTable::new();
        assert_eq!(table.intern("a").unwrap(), 0);
        assert_eq!(table.intern("b").unwrap(), 1);
        assert_eq!(table.intern("c").unwrap(), 2);
        let collected: Vec<(usize, &str)> = table.iter().collect();
        assert_eq!(collected, vec![(0, "a"), (1, "b"), (2, "c")]);
    }

    #[test]
    fn test_lookup_unknown_index() {
        let table = SymbolTable::new();
        assert_eq!(table.lookup(0), None);
    }

    #[test]
    fn test_capacity_limit() {
        let mut table = SymbolTable::with_capacity_limit(1);
        table.intern("only").unwrap();
        assert_eq!(
            table.intern("more"),
            Err(ContractViolation::SymbolCapacityExceeded { capacity: 1 })
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_take_keeps_cap_and_restarts_indices() {
        let mut table = SymbolTable::with_capacity_limit(4);
        table.intern("x").unwrap();
        let taken = table.take();

        assert_eq!(taken.lookup(0), Some("x"));
        assert!(table.is_empty());
        assert_eq!(table.capacity(), Some(4));
        assert_eq!(table.intern("y").unwrap(), 0);
    }
}
