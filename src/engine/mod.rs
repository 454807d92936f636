//! Matching engine module for matchbook.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same operation stream always produces same output
//! 2. **Fixed-Point Math**: No floating-point operations
//! 3. **Synchronous Execution**: Each operation runs to completion, cascading
//!    matches included, before the next is accepted
//! 4. **Price-Time Priority**: Best price first, then FIFO
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against asks (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - **Trades** execute at the resting order's price
//! - **Unfilled volume** rests on the book
//!
//! ## Example
//!
//! ```
//! use matchbook::engine::MatchingEngine;
//! use matchbook::types::{Operation, Side};
//!
//! let mut engine = MatchingEngine::new();
//!
//! engine.process(&Operation::Insert {
//!     order_id: 1,
//!     symbol: "A".to_string(),
//!     side: Side::Buy,
//!     price: 100_000,
//!     volume: 100,
//! });
//! engine.process(&Operation::Pull { order_id: 1 });
//!
//! assert!(engine.report().is_empty());
//! ```

pub mod matcher;
pub mod report;

pub use matcher::{MatchingEngine, OrderInfo};
pub use report::{BookSnapshot, Report};
