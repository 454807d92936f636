//! Core data types for matchbook
//!
//! ## Types
//!
//! - [`Operation`]: Insert / Amend / Pull, the engine's only input
//! - [`Side`]: Buy or Sell
//! - [`Trade`]: An executed match between two orders
//! - [`MatchResult`]: Trades and closed orders produced by one mutation
//! - [`BookRow`]: One rank-aligned row of a book snapshot
//!
//! ## Fixed-Point Arithmetic
//!
//! Prices are stored as `u64` scaled by 10^4, see [`price`].
//! Example: 14.235 is stored as 142_350u64

mod book_row;
mod order;
mod outcome;
mod trade;
pub mod price;

pub use book_row::BookRow;
pub use order::{Operation, OrderId, Side, Symbol, TotalVolume, Volume};
pub use outcome::MatchResult;
pub use price::Price;
pub use trade::Trade;
