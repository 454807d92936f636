//! Order book module for the matchbook engine.
//!
//! ## Architecture
//!
//! Each symbol has its own [`OrderBook`] with:
//!
//! - **Price batches**: Orders grouped by price using BTreeMap
//! - **Slab-based queues**: O(1) append, front access and removal by id
//! - **Price-time priority**: FIFO ordering inside each batch
//!
//! ## Components
//!
//! - [`OrderNode`]: One resting order with linked-list pointers
//! - [`PriceBatch`]: FIFO queue of orders at a single price
//! - [`OrderBook`]: Bid/ask sides, crossing, amend, pull and snapshots
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Rest order | O(log L) |
//! | Pull / amend by id | O(log L) |
//! | Match one order | O(1) |
//! | Best bid/ask | O(log L) |
//!
//! L = number of price levels on the side.

pub mod batch;
pub mod book;
pub mod node;

pub use batch::PriceBatch;
pub use book::OrderBook;
pub use node::OrderNode;
