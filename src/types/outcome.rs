//! Side effects of applying one operation to a book.
//!
//! Books never call back into the engine. Every mutating book method returns
//! a [`MatchResult`] describing what happened, and the engine folds it into
//! its trade log and order registry.

use crate::types::order::OrderId;
use crate::types::trade::Trade;

/// Trades emitted and orders closed by one book mutation.
///
/// Both lists are in the order the events happened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchResult {
    /// Trades, in match order
    pub trades: Vec<Trade>,

    /// Orders that reached zero volume (filled, pulled or amended to zero)
    pub closed: Vec<OrderId>,
}

impl MatchResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// True if nothing happened
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty() && self.closed.is_empty()
    }

    /// Total traded volume across all trades
    pub fn traded_volume(&self) -> u64 {
        self.trades.iter().map(|t| t.volume).sum()
    }

    /// Whether `order_id` was closed by this mutation
    pub fn is_closed(&self, order_id: OrderId) -> bool {
        self.closed.contains(&order_id)
    }

    /// Append everything from `other`, keeping event order
    pub fn merge(&mut self, other: MatchResult) {
        self.trades.extend(other.trades);
        self.closed.extend(other.closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result_merge() {
        let mut first = MatchResult::new();
        assert!(first.is_empty());

        first.trades.push(Trade::new("A".to_string(), 10, 5, 2, 1));
        first.closed.push(1);

        let mut second = MatchResult::new();
        second.trades.push(Trade::new("A".to_string(), 11, 7, 2, 3));
        second.closed.push(2);

        first.merge(second);

        assert_eq!(first.trades.len(), 2);
        assert_eq!(first.trades[1].passive_order_id, 3);
        assert_eq!(first.closed, vec![1, 2]);
        assert_eq!(first.traded_volume(), 12);
        assert!(first.is_closed(2));
        assert!(!first.is_closed(3));
    }
}
