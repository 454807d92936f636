//! Report line rendering.
//!
//! Operations can also be encoded back into input lines, which
//! [`parse_operation`](crate::codec::parse_operation) reads unchanged.
//!
//! ```text
//! <symbol>,<price>,<volume>,<aggressor_id>,<passive_id>     one per trade
//! ===<symbol>===                                            book header
//! <buy_price>,<buy_volume>,<sell_price>,<sell_volume>       one per row
//! ```
//!
//! Absent row fields render as empty strings.

use std::fmt::Display;

use crate::codec::DELIMITER;
use crate::engine::Report;
use crate::types::price::from_fixed_trimmed;
use crate::types::{BookRow, Operation, Trade};

/// Encode an operation as an input line
pub fn render_operation(operation: &Operation) -> String {
    let command = operation.command();
    match operation {
        Operation::Insert {
            order_id,
            symbol,
            side,
            price,
            volume,
        } => format!(
            "{command}{d}{order_id}{d}{symbol}{d}{side}{d}{price}{d}{volume}",
            side = side.as_str(),
            price = from_fixed_trimmed(*price),
            d = DELIMITER,
        ),
        Operation::Amend {
            order_id,
            price,
            volume,
        } => format!(
            "{command}{d}{order_id}{d}{price}{d}{volume}",
            price = from_fixed_trimmed(*price),
            d = DELIMITER,
        ),
        Operation::Pull { order_id } => format!("{command}{d}{order_id}", d = DELIMITER),
    }
}

/// Render one trade line
pub fn render_trade(trade: &Trade) -> String {
    format!(
        "{symbol}{d}{price}{d}{volume}{d}{aggressor}{d}{passive}",
        symbol = trade.symbol,
        price = from_fixed_trimmed(trade.price),
        volume = trade.volume,
        aggressor = trade.aggressor_order_id,
        passive = trade.passive_order_id,
        d = DELIMITER,
    )
}

/// Render a book header line
pub fn render_header(symbol: &str) -> String {
    format!("==={symbol}===")
}

/// Render one book row
pub fn render_row(row: &BookRow) -> String {
    format!(
        "{}{d}{}{d}{}{d}{}",
        row.buy_price.map(from_fixed_trimmed).unwrap_or_default(),
        optional(row.buy_volume),
        row.sell_price.map(from_fixed_trimmed).unwrap_or_default(),
        optional(row.sell_volume),
        d = DELIMITER,
    )
}

/// Render a full report: trades, then each book under its header
pub fn render_report(report: &Report) -> Vec<String> {
    let rows: usize = report.books.iter().map(|book| book.rows.len() + 1).sum();
    let mut lines = Vec::with_capacity(report.trades.len() + rows);

    lines.extend(report.trades.iter().map(render_trade));
    for book in &report.books {
        lines.push(render_header(&book.symbol));
        lines.extend(book.rows.iter().map(render_row));
    }

    lines
}

fn optional<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
