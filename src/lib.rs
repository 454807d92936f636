//! # Matchbook
//!
//! Deterministic limit order matching across many symbols.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Operation, Trade, MatchResult, BookRow)
//! - **OrderBook**: Per-symbol book of FIFO price batches with slab storage
//! - **Engine**: Order registry, per-symbol routing and the trade log
//! - **Codec**: Comma-delimited operation lines in, report lines out
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Identical operation streams produce identical output
//! 2. **No Floating Point**: Prices are fixed-point (10^4 scaling)
//! 3. **Price-Time Priority**: Best price first, FIFO within a price
//! 4. **Synchronous Execution**: Each operation completes before the next
//!
//! ## Example
//!
//! ```
//! use matchbook::{MatchingEngine, Operation, Side};
//!
//! let mut engine = MatchingEngine::new();
//! engine.process(&"INSERT,1,AAPL,SELL,12.2,5".parse::<Operation>().unwrap());
//! let result = engine.process(&Operation::Insert {
//!     order_id: 2,
//!     symbol: "AAPL".to_string(),
//!     side: Side::Buy,
//!     price: 123_000,
//!     volume: 8,
//! });
//!
//! assert_eq!(result.traded_volume(), 5);
//! assert_eq!(engine.book("AAPL").and_then(|book| book.best_bid()), Some(123_000));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Operation, Trade, MatchResult, BookRow, prices
pub mod types;

/// Order book: price batches and per-symbol books
pub mod orderbook;

/// Matching engine: registry, routing and reporting
pub mod engine;

/// Line codec for operations and reports
pub mod codec;

/// Engine configuration
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::EngineConfig;
pub use engine::{BookSnapshot, MatchingEngine, Report};
pub use error::{Error, ParseError, Result};
pub use orderbook::{OrderBook, OrderNode, PriceBatch};
pub use types::{BookRow, MatchResult, Operation, Side, Trade};
