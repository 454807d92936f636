//! One row of a book snapshot.

use crate::types::order::TotalVolume;
use crate::types::price::Price;

/// A rank-aligned snapshot row.
///
/// Row `i` pairs the `i`-th best bid level with the `i`-th best ask level.
/// The two halves are independent: they are aligned by rank, not by price.
/// When one side has fewer levels its fields are `None` in the extra rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookRow {
    pub buy_price: Option<Price>,
    pub buy_volume: Option<TotalVolume>,
    pub sell_price: Option<Price>,
    pub sell_volume: Option<TotalVolume>,
}

impl BookRow {
    /// Set all buy-side data
    pub fn set_buy(&mut self, price: Price, volume: TotalVolume) {
        self.buy_price = Some(price);
        self.buy_volume = Some(volume);
    }

    /// Set all sell-side data
    pub fn set_sell(&mut self, price: Price, volume: TotalVolume) {
        self.sell_price = Some(price);
        self.sell_volume = Some(volume);
    }

    /// True if the row carries bid data
    pub fn has_buy(&self) -> bool {
        self.buy_price.is_some()
    }

    /// True if the row carries ask data
    pub fn has_sell(&self) -> bool {
        self.sell_price.is_some()
    }
}
