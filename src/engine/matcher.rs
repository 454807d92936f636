//! Top-level matching engine.
//!
//! ## Responsibilities
//!
//! - Owns one [`OrderBook`] per symbol, created on first reference
//! - Keeps the registry of active orders: id -> (symbol, side, price)
//! - Routes each [`Operation`] to the right book
//! - Appends every trade to the log in the order it happened
//!
//! ## Ignored Operations
//!
//! An INSERT whose id is already active, and an AMEND or PULL whose id is not
//! active, change nothing. They are logged at debug level and return an
//! empty [`MatchResult`].

use std::collections::{BTreeMap, HashMap};

use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::engine::{BookSnapshot, Report};
use crate::orderbook::OrderBook;
use crate::types::{MatchResult, Operation, OrderId, Price, Side, Symbol, Trade, Volume};

/// Registry entry for an active order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderInfo {
    pub symbol: Symbol,
    pub side: Side,

    /// Price the order currently rests at
    pub price: Price,
}

/// Deterministic, single-threaded matching engine
///
/// ## Example
///
/// ```
/// use matchbook::engine::MatchingEngine;
/// use matchbook::types::{Operation, Side};
///
/// let mut engine = MatchingEngine::new();
///
/// engine.process(&Operation::Insert {
///     order_id: 1,
///     symbol: "A".to_string(),
///     side: Side::Sell,
///     price: 100_000,
///     volume: 100,
/// });
/// let result = engine.process(&Operation::Insert {
///     order_id: 2,
///     symbol: "A".to_string(),
///     side: Side::Buy,
///     price: 120_000,
///     volume: 200,
/// });
///
/// assert_eq!(result.trades.len(), 1);
/// assert!(!engine.is_active(1));
/// assert!(engine.is_active(2));
/// ```
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    /// Books by symbol (sorted, so reports are deterministic)
    books: BTreeMap<Symbol, OrderBook>,

    /// Active orders
    orders: HashMap<OrderId, OrderInfo>,

    /// Trade log, append-only
    trades: Vec<Trade>,

    /// Number of operations seen, including ignored ones
    operations: u64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with pre-sized registry and trade log
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            books: BTreeMap::new(),
            orders: HashMap::with_capacity(config.order_capacity),
            trades: Vec::with_capacity(config.trade_capacity),
            operations: 0,
        }
    }

    // ========================================================================
    // Processing
    // ========================================================================

    /// Apply one operation and return what it caused
    ///
    /// The returned trades are also appended to the engine's trade log.
    pub fn process(&mut self, operation: &Operation) -> MatchResult {
        self.operations += 1;
        trace!(command = operation.command(), order_id = operation.order_id(), "operation");

        match operation {
            Operation::Insert {
                order_id,
                symbol,
                side,
                price,
                volume,
            } => self.process_insert(*order_id, symbol, *side, *price, *volume),
            Operation::Amend {
                order_id,
                price,
                volume,
            } => self.process_amend(*order_id, *price, *volume),
            Operation::Pull { order_id } => self.process_pull(*order_id),
        }
    }

    fn process_insert(
        &mut self,
        order_id: OrderId,
        symbol: &str,
        side: Side,
        price: Price,
        volume: Volume,
    ) -> MatchResult {
        if self.orders.contains_key(&order_id) {
            debug!(order_id, symbol, "insert of active order id ignored");
            return MatchResult::new();
        }

        self.orders.insert(
            order_id,
            OrderInfo {
                symbol: symbol.to_owned(),
                side,
                price,
            },
        );

        let result = self
            .books
            .entry(symbol.to_owned())
            .or_insert_with(|| OrderBook::new(symbol))
            .insert(order_id, side, price, volume);
        self.apply(result)
    }

    fn process_amend(&mut self, order_id: OrderId, price: Price, volume: Volume) -> MatchResult {
        let Some(info) = self.orders.get(&order_id) else {
            debug!(order_id, "amend of unknown order ignored");
            return MatchResult::new();
        };
        let Some(book) = self.books.get_mut(&info.symbol) else {
            return MatchResult::new();
        };

        let (side, old_price) = (info.side, info.price);
        let result = book.amend(order_id, side, old_price, price, volume);
        let repriced = price != old_price
            && book
                .batch(side, price)
                .map_or(false, |batch| batch.contains(order_id));

        if repriced {
            if let Some(info) = self.orders.get_mut(&order_id) {
                info.price = price;
            }
        }
        self.apply(result)
    }

    fn process_pull(&mut self, order_id: OrderId) -> MatchResult {
        let Some(info) = self.orders.get(&order_id) else {
            debug!(order_id, "pull of unknown order ignored");
            return MatchResult::new();
        };
        let Some(book) = self.books.get_mut(&info.symbol) else {
            return MatchResult::new();
        };

        let mut result = MatchResult::new();
        if book.pull(order_id, info.side, info.price) {
            result.closed.push(order_id);
        }
        self.apply(result)
    }

    /// Fold a book result into the registry and trade log
    fn apply(&mut self, result: MatchResult) -> MatchResult {
        for order_id in &result.closed {
            self.orders.remove(order_id);
        }
        self.trades.extend(result.trades.iter().cloned());
        result
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    /// Trade log and snapshots of every book with resting orders
    pub fn report(&self) -> Report {
        Report {
            trades: self.trades.clone(),
            books: self
                .books
                .values()
                .filter(|book| !book.is_empty())
                .map(|book| BookSnapshot {
                    symbol: book.symbol().to_owned(),
                    rows: book.snapshot(),
                })
                .collect(),
        }
    }

    /// All trades so far, in occurrence order
    #[inline]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Registry entry of an active order
    #[inline]
    pub fn order(&self, order_id: OrderId) -> Option<&OrderInfo> {
        self.orders.get(&order_id)
    }

    /// Check if an order is active (resting in a book)
    #[inline]
    pub fn is_active(&self, order_id: OrderId) -> bool {
        self.orders.contains_key(&order_id)
    }

    /// Number of active orders
    #[inline]
    pub fn active_orders(&self) -> usize {
        self.orders.len()
    }

    /// Book for `symbol`, if it was ever referenced
    pub fn book(&self, symbol: &str) -> Option<&OrderBook> {
        self.books.get(symbol)
    }

    /// All books in symbol order
    pub fn books(&self) -> impl Iterator<Item = &OrderBook> {
        self.books.values()
    }

    /// Number of operations processed, ignored ones included
    #[inline]
    pub fn operations_processed(&self) -> u64 {
        self.operations
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 digest of the trade log and every non-empty book
    ///
    /// The same operation stream always yields the same root.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        hasher.update((self.trades.len() as u64).to_le_bytes());
        for trade in &self.trades {
            hasher.update(trade.symbol.as_bytes());
            hasher.update([0u8]);
            hasher.update(trade.price.to_le_bytes());
            hasher.update(trade.volume.to_le_bytes());
            hasher.update(trade.aggressor_order_id.to_le_bytes());
            hasher.update(trade.passive_order_id.to_le_bytes());
        }

        for book in self.books.values().filter(|book| !book.is_empty()) {
            book.hash_into(&mut hasher);
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    /// State root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
