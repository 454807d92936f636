//! Per-symbol limit order book with price-time priority crossing.
//!
//! ## Architecture
//!
//! - **BTreeMap** of [`PriceBatch`]es per side for best-price access
//! - **Bids**: keyed by `Reverse(price)`, iterated high-to-low
//! - **Asks**: keyed by `price`, iterated low-to-high
//!
//! Crossing is resolved synchronously inside [`OrderBook::insert`], so between
//! calls the best bid is always strictly below the best ask.
//!
//! ## Example
//!
//! ```
//! use matchbook::orderbook::OrderBook;
//! use matchbook::types::Side;
//!
//! let mut book = OrderBook::new("A");
//!
//! book.insert(1, Side::Sell, 100_000, 100);
//! let result = book.insert(2, Side::Buy, 120_000, 50);
//!
//! // Executes at the resting order's price
//! assert_eq!(result.trades[0].price, 100_000);
//! assert_eq!(result.closed, vec![2]);
//! assert_eq!(book.best_ask(), Some(100_000));
//! ```

use std::cmp::Reverse;
use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::orderbook::PriceBatch;
use crate::types::{BookRow, MatchResult, OrderId, Price, Side, Symbol, TotalVolume, Trade, Volume};

/// Limit order book for one symbol
#[derive(Debug, Clone)]
pub struct OrderBook {
    /// Symbol every order and trade in this book belongs to
    symbol: Symbol,

    /// Bid batches (sorted high to low)
    bids: BTreeMap<Reverse<Price>, PriceBatch>,

    /// Ask batches (sorted low to high)
    asks: BTreeMap<Price, PriceBatch>,
}

impl OrderBook {
    /// Create a new empty book
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
        }
    }

    /// Symbol of this book
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    // ========================================================================
    // Order Lifecycle
    // ========================================================================

    /// Insert a new order, crossing it against the opposite side first.
    ///
    /// A buy sweeps asks priced at or below `price` from the lowest up; a
    /// sell sweeps bids priced at or above `price` from the highest down.
    /// Within a batch the oldest order is consumed first. Any remainder rests
    /// at the back of its own batch; an order that is fully matched is
    /// reported closed and never rests.
    pub fn insert(
        &mut self,
        order_id: OrderId,
        side: Side,
        price: Price,
        volume: Volume,
    ) -> MatchResult {
        let mut result = MatchResult::new();

        let remaining = match side {
            Side::Buy => cross(
                &self.symbol,
                &mut self.asks,
                order_id,
                volume,
                |level| level <= price,
                &mut result,
            ),
            Side::Sell => cross(
                &self.symbol,
                &mut self.bids,
                order_id,
                volume,
                |level| level >= price,
                &mut result,
            ),
        };

        if remaining > 0 {
            self.rest(order_id, side, price, remaining);
        } else {
            result.closed.push(order_id);
        }

        result
    }

    /// Amend a resting order.
    ///
    /// - Price changed: the order leaves its old batch without being reported
    ///   closed, then is inserted afresh at `new_price` (and may cross).
    /// - Same price, volume not increased: updated in place, keeping priority.
    /// - Same price, volume increased: re-queued at the back of the batch.
    ///
    /// An order amended to zero volume is reported closed exactly once. An
    /// order that is not resting at `old_price` is left alone.
    pub fn amend(
        &mut self,
        order_id: OrderId,
        side: Side,
        old_price: Price,
        new_price: Price,
        new_volume: Volume,
    ) -> MatchResult {
        if new_price != old_price {
            if !self.remove(order_id, side, old_price) {
                debug!(symbol = %self.symbol, order_id, old_price, "reprice of missing order ignored");
                return MatchResult::new();
            }
            return self.insert(order_id, side, new_price, new_volume);
        }

        let updated = match side {
            Side::Buy => update_in(&mut self.bids, Reverse(old_price), order_id, new_volume),
            Side::Sell => update_in(&mut self.asks, old_price, order_id, new_volume),
        };

        let mut result = MatchResult::new();
        if !updated {
            debug!(symbol = %self.symbol, order_id, old_price, "amend of missing order ignored");
        } else if new_volume == 0 {
            result.closed.push(order_id);
        }
        result
    }

    /// Pull (cancel) a resting order.
    ///
    /// # Returns
    ///
    /// `true` if the order was resting at `price` on `side` and is now gone
    pub fn pull(&mut self, order_id: OrderId, side: Side, price: Price) -> bool {
        let pulled = self.remove(order_id, side, price);
        if !pulled {
            debug!(symbol = %self.symbol, order_id, price, "pull of missing order ignored");
        }
        pulled
    }

    fn remove(&mut self, order_id: OrderId, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => erase_in(&mut self.bids, Reverse(price), order_id),
            Side::Sell => erase_in(&mut self.asks, price, order_id),
        }
    }

    fn rest(&mut self, order_id: OrderId, side: Side, price: Price, volume: Volume) {
        let batch = match side {
            Side::Buy => self
                .bids
                .entry(Reverse(price))
                .or_insert_with(|| PriceBatch::new(price)),
            Side::Sell => self
                .asks
                .entry(price)
                .or_insert_with(|| PriceBatch::new(price)),
        };

        if batch.add(order_id, volume) {
            trace!(symbol = %self.symbol, order_id, ?side, price, volume, "order rested");
        } else {
            debug!(symbol = %self.symbol, order_id, price, "order already resting at level");
        }
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    /// Rank-aligned snapshot of the book.
    ///
    /// Row `i` holds the `i`-th best bid level and the `i`-th best ask level,
    /// each with its total volume. Rows past the shorter side leave that
    /// side's fields empty.
    pub fn snapshot(&self) -> Vec<BookRow> {
        let mut rows = vec![BookRow::default(); self.bids.len().max(self.asks.len())];

        for (row, batch) in rows.iter_mut().zip(self.bids.values()) {
            row.set_buy(batch.price(), batch.total_volume());
        }
        for (row, batch) in rows.iter_mut().zip(self.asks.values()) {
            row.set_sell(batch.price(), batch.total_volume());
        }

        rows
    }

    // ========================================================================
    // Best Bid/Ask
    // ========================================================================

    /// Best bid price (highest buy price)
    #[inline]
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next().map(|r| r.0)
    }

    /// Best ask price (lowest sell price)
    #[inline]
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Spread (best_ask - best_bid), None if either side is empty
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// True if the best bid meets or exceeds the best ask.
    ///
    /// Never true between operations.
    pub fn is_crossed(&self) -> bool {
        matches!((self.best_bid(), self.best_ask()), (Some(bid), Some(ask)) if bid >= ask)
    }

    // ========================================================================
    // Size and Lookup
    // ========================================================================

    /// Check if the book has no resting orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Number of bid price levels
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of ask price levels
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Total number of resting orders
    pub fn order_count(&self) -> usize {
        self.bids.values().map(PriceBatch::len).sum::<usize>()
            + self.asks.values().map(PriceBatch::len).sum::<usize>()
    }

    /// The batch resting at `price` on `side`
    pub fn batch(&self, side: Side, price: Price) -> Option<&PriceBatch> {
        match side {
            Side::Buy => self.bids.get(&Reverse(price)),
            Side::Sell => self.asks.get(&price),
        }
    }

    /// Total resting volume at `price` on `side` (0 if no level)
    pub fn volume_at(&self, side: Side, price: Price) -> TotalVolume {
        self.batch(side, price).map_or(0, PriceBatch::total_volume)
    }

    /// Total resting volume on one side
    pub fn side_volume(&self, side: Side) -> TotalVolume {
        match side {
            Side::Buy => self.bids.values().map(PriceBatch::total_volume).sum(),
            Side::Sell => self.asks.values().map(PriceBatch::total_volume).sum(),
        }
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// Feed the book's contents, in priority order, into `hasher`
    pub(crate) fn hash_into(&self, hasher: &mut Sha256) {
        hasher.update(self.symbol.as_bytes());
        hasher.update([0u8]);

        hasher.update(b"B");
        for batch in self.bids.values() {
            hash_batch(hasher, batch);
        }
        hasher.update(b"S");
        for batch in self.asks.values() {
            hash_batch(hasher, batch);
        }
    }

    /// SHA-256 digest of the book contents
    ///
    /// Two books with the same symbol, levels and per-level queues (same ids,
    /// volumes and order) have the same root.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        self.hash_into(&mut hasher);

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }
}

// ============================================================================
// Side-generic helpers
// ============================================================================

/// Sweep opposite-side batches from the best price while `crosses` holds.
///
/// Returns the aggressor's unmatched volume.
fn cross<K: Ord>(
    symbol: &str,
    levels: &mut BTreeMap<K, PriceBatch>,
    aggressor: OrderId,
    mut volume: Volume,
    crosses: impl Fn(Price) -> bool,
    result: &mut MatchResult,
) -> Volume {
    while volume > 0 {
        let Some(mut entry) = levels.first_entry() else {
            break;
        };

        let batch = entry.get_mut();
        if !crosses(batch.price()) {
            break;
        }

        volume = consume(symbol, batch, aggressor, volume, result);

        if batch.is_empty() {
            entry.remove();
        } else {
            // Level still has volume, so the aggressor is exhausted
            break;
        }
    }
    volume
}

/// Match the aggressor against one batch, oldest order first
fn consume(
    symbol: &str,
    batch: &mut PriceBatch,
    aggressor: OrderId,
    mut volume: Volume,
    result: &mut MatchResult,
) -> Volume {
    let price = batch.price();

    while volume > 0 {
        let Some(top) = batch.top_order() else {
            break;
        };
        let passive = top.id;
        let traded = top.volume.min(volume);
        let left = top.volume - traded;

        trace!(symbol, price, volume = traded, aggressor, passive, "trade");
        result
            .trades
            .push(Trade::new(symbol.to_string(), price, traded, aggressor, passive));

        if left == 0 {
            result.closed.push(passive);
        }

        volume -= traded;
        batch.reduce_top(left);
    }
    volume
}

fn update_in<K: Ord>(
    levels: &mut BTreeMap<K, PriceBatch>,
    key: K,
    order_id: OrderId,
    new_volume: Volume,
) -> bool {
    let Some(batch) = levels.get_mut(&key) else {
        return false;
    };

    let updated = batch.update_volume(order_id, new_volume);
    if batch.is_empty() {
        levels.remove(&key);
    }
    updated
}

fn erase_in<K: Ord>(levels: &mut BTreeMap<K, PriceBatch>, key: K, order_id: OrderId) -> bool {
    let Some(batch) = levels.get_mut(&key) else {
        return false;
    };

    let erased = batch.erase(order_id);
    if batch.is_empty() {
        levels.remove(&key);
    }
    erased
}

fn hash_batch(hasher: &mut Sha256, batch: &PriceBatch) {
    hasher.update(batch.price().to_le_bytes());
    hasher.update((batch.len() as u64).to_le_bytes());
    for node in batch.iter() {
        hasher.update(node.id.to_le_bytes());
        hasher.update(node.volume.to_le_bytes());
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
