//! Structured end-of-stream report.

use crate::types::{BookRow, Symbol, Trade};

/// Snapshot of one non-empty book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSnapshot {
    pub symbol: Symbol,

    /// Rank-aligned rows, best levels first
    pub rows: Vec<BookRow>,
}

/// Trade log plus the book snapshots, symbols in lexicographic order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    /// Every trade in the order it happened
    pub trades: Vec<Trade>,

    /// One entry per symbol with resting volume
    pub books: Vec<BookSnapshot>,
}

impl Report {
    /// Snapshot for `symbol`, if that book has resting orders
    pub fn book(&self, symbol: &str) -> Option<&BookSnapshot> {
        self.books.iter().find(|book| book.symbol == symbol)
    }

    /// True if there were no trades and every book is empty
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty() && self.books.is_empty()
    }
}
