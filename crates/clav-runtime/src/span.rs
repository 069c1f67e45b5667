//! Source location tracking
//!
//! Spans are half-open character ranges into the source text. They are only
//! used to place carets under diagnostics; the line number carried by tokens
//! and errors is the primary location.

use serde::{Deserialize, Serialize};

/// Character range `[start, end)` within the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive, in characters)
    pub start: usize,
    /// End offset (exclusive, in characters)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Placeholder span for synthesized nodes and I/O failures
    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_orders_bounds() {
        let a = Span::new(4, 6);
        let b = Span::new(0, 2);
        assert_eq!(a.merge(b), Span::new(0, 6));
        assert_eq!(b.merge(a), Span::new(0, 6));
    }

    #[test]
    fn test_len() {
        assert_eq!(Span::new(3, 7).len(), 4);
        assert!(Span::dummy().is_empty());
        // Inverted ranges never underflow
        assert_eq!(Span::new(5, 2).len(), 0);
    }
}
