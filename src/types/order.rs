//! Order-side value types and the operations that drive the engine.
//!
//! ## Operations
//!
//! The engine consumes a strictly ordered stream of three operation kinds:
//!
//! - **Insert**: a new limit order (may cross immediately)
//! - **Amend**: new price and/or volume for an active order
//! - **Pull**: cancel an active order
//!
//! Amend and Pull only carry the order id; side, symbol and resting price
//! are looked up in the engine's registry.

use crate::types::price::Price;

/// Order identifier, unique across the whole operation stream
pub type OrderId = u64;

/// Order volume (whole units)
pub type Volume = u64;

/// Summed volume of many orders (a level or a whole side)
///
/// Wider than [`Volume`] so that any number of resting orders can be totalled.
pub type TotalVolume = u128;

/// Instrument symbol (opaque short identifier)
pub type Symbol = String;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Wire name of the side
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

// ============================================================================
// Operation enum
// ============================================================================

/// One order-lifecycle operation.
///
/// ## Example
///
/// ```
/// use matchbook::types::{Operation, Side};
///
/// let op = Operation::Insert {
///     order_id: 1,
///     symbol: "AAPL".to_string(),
///     side: Side::Buy,
///     price: 142_350, // 14.235
///     volume: 6,
/// };
/// assert_eq!(op.order_id(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert a new limit order
    Insert {
        order_id: OrderId,
        symbol: Symbol,
        side: Side,
        price: Price,
        volume: Volume,
    },

    /// Amend price and volume of an active order
    Amend {
        order_id: OrderId,
        price: Price,
        volume: Volume,
    },

    /// Cancel an active order
    Pull { order_id: OrderId },
}

impl Operation {
    /// The order id the operation refers to
    pub fn order_id(&self) -> OrderId {
        match self {
            Operation::Insert { order_id, .. }
            | Operation::Amend { order_id, .. }
            | Operation::Pull { order_id } => *order_id,
        }
    }

    /// Command name as it appears on the wire
    pub fn command(&self) -> &'static str {
        match self {
            Operation::Insert { .. } => "INSERT",
            Operation::Amend { .. } => "AMEND",
            Operation::Pull { .. } => "PULL",
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
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_side_as_str() {
        assert_eq!(Side::Buy.as_str(), "BUY");
        assert_eq!(Side::Sell.as_str(), "SELL");
    }

    #[test]
    fn test_operation_order_id() {
        let insert = Operation::Insert {
            order_id: 7,
            symbol: "A".to_string(),
            side: Side::Sell,
            price: 10,
            volume: 5,
        };
        let amend = Operation::Amend { order_id: 8, price: 10, volume: 5 };
        let pull = Operation::Pull { order_id: 9 };

        assert_eq!(insert.order_id(), 7);
        assert_eq!(amend.order_id(), 8);
        assert_eq!(pull.order_id(), 9);
    }

    #[test]
    fn test_operation_command() {
        assert_eq!(Operation::Pull { order_id: 1 }.command(), "PULL");
        assert_eq!(Operation::Amend { order_id: 1, price: 1, volume: 1 }.command(), "AMEND");
    }
}
