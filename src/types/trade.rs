//! Trade type representing one match between an incoming and a resting order.

use crate::types::order::{OrderId, Symbol, Volume};
use crate::types::price::Price;

/// A trade represents a single match between an aggressor and a passive order.
///
/// ## Terminology
///
/// - **Aggressor**: The incoming order that triggered the match
/// - **Passive**: The resting order that was already in the book
///
/// ## Price Discovery
///
/// The trade always executes at the passive order's price, so the aggressor
/// receives any price improvement.
///
/// ## Example
///
/// ```
/// use matchbook::types::Trade;
///
/// let trade = Trade::new("AAPL".to_string(), 100_000, 50, 2, 1);
/// assert_eq!(trade.aggressor_order_id, 2);
/// assert_eq!(trade.passive_order_id, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trade {
    /// Symbol of the book the trade happened in
    pub symbol: Symbol,

    /// Execution price, always the passive order's price
    pub price: Price,

    /// Executed volume
    pub volume: Volume,

    /// Incoming order id
    pub aggressor_order_id: OrderId,

    /// Resting order id
    pub passive_order_id: OrderId,
}

impl Trade {
    /// Create a new trade
    pub fn new(
        symbol: Symbol,
        price: Price,
        volume: Volume,
        aggressor_order_id: OrderId,
        passive_order_id: OrderId,
    ) -> Self {
        Self {
            symbol,
            price,
            volume,
            aggressor_order_id,
            passive_order_id,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_new() {
        let trade = Trade::new("A".to_string(), 120_000, 50, 2, 1);

        assert_eq!(trade.symbol, "A");
        assert_eq!(trade.price, 120_000);
        assert_eq!(trade.volume, 50);
        assert_eq!(trade.aggressor_order_id, 2);
        assert_eq!(trade.passive_order_id, 1);
    }
}
