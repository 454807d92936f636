//! Engine configuration.
//!
//! Capacities are pre-allocation hints only; the engine grows past them.
//!
//! ## Environment
//!
//! | Variable | Field |
//! |----------|-------|
//! | `MATCHBOOK_ORDER_CAPACITY` | [`EngineConfig::order_capacity`] |
//! | `MATCHBOOK_TRADE_CAPACITY` | [`EngineConfig::trade_capacity`] |

use crate::error::{Error, Result};

/// Environment variable for [`EngineConfig::order_capacity`]
pub const ORDER_CAPACITY_ENV: &str = "MATCHBOOK_ORDER_CAPACITY";

/// Environment variable for [`EngineConfig::trade_capacity`]
pub const TRADE_CAPACITY_ENV: &str = "MATCHBOOK_TRADE_CAPACITY";

/// Matching engine configuration
///
/// ## Example
///
/// ```
/// use matchbook::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_order_capacity(100_000)
///     .with_trade_capacity(50_000);
/// assert_eq!(config.order_capacity, 100_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Expected number of concurrently active orders (registry size)
    pub order_capacity: usize,

    /// Expected number of trades (trade log size)
    pub trade_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order_capacity: 1_024,
            trade_capacity: 1_024,
        }
    }
}

impl EngineConfig {
    /// Set the order capacity hint
    pub fn with_order_capacity(mut self, capacity: usize) -> Self {
        self.order_capacity = capacity;
        self
    }

    /// Set the trade capacity hint
    pub fn with_trade_capacity(mut self, capacity: usize) -> Self {
        self.trade_capacity = capacity;
        self
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup(key)` for each known key
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(ORDER_CAPACITY_ENV) {
            config.order_capacity = parse_capacity(ORDER_CAPACITY_ENV, value)?;
        }
        if let Some(value) = lookup(TRADE_CAPACITY_ENV) {
            config.trade_capacity = parse_capacity(TRADE_CAPACITY_ENV, value)?;
        }

        Ok(config)
    }
}

fn parse_capacity(key: &'static str, value: String) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config { key, value })
}
