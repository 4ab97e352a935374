//! Memo Entry Module
//!
//! Defines the structure for individual memoized results.

// == Memo Entry ==
/// A memoized result together with its lookup metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoEntry<T> {
    /// The stored result
    pub value: T,
    /// Number of lookups served from this entry after it was computed
    pub hits: u64,
}

impl<T> MemoEntry<T> {
    // == Constructor ==
    /// Creates a freshly computed entry with no hits.
    pub fn new(value: T) -> Self {
        Self { value, hits: 0 }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = MemoEntry::new(false);
        assert!(!entry.value);
        assert_eq!(entry.hits, 0);
    }

    #[test]
    fn test_entry_record_hit() {
        let mut entry = MemoEntry::new(0u32);
        entry.record_hit();
        entry.record_hit();
        assert_eq!(entry.hits, 2);
        assert_eq!(entry.value, 0);
    }
}
