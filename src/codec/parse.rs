//! Operation line decoding.
//!
//! ```text
//! INSERT,<order_id>,<symbol>,<BUY|SELL>,<price>,<volume>
//! AMEND,<order_id>,<price>,<volume>
//! PULL,<order_id>
//! ```

use std::str::FromStr;

use crate::codec::DELIMITER;
use crate::error::ParseError;
use crate::types::price::{to_fixed, Price};
use crate::types::{Operation, Side};

/// Decode one operation line
///
/// Surrounding whitespace (including a trailing `\r`) is ignored; fields
/// themselves must not be padded.
///
/// # Example
///
/// ```
/// use matchbook::codec::parse_operation;
/// use matchbook::types::Operation;
///
/// let op = parse_operation("AMEND,23,46,3").unwrap();
/// assert_eq!(op, Operation::Amend { order_id: 23, price: 460_000, volume: 3 });
/// ```
pub fn parse_operation(line: &str) -> Result<Operation, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let fields: Vec<&str> = line.split(DELIMITER).collect();

    match fields[0] {
        "INSERT" => {
            expect_fields("INSERT", &fields, 6)?;
            let symbol = fields[2];
            if symbol.is_empty() {
                return Err(ParseError::EmptySymbol);
            }
            Ok(Operation::Insert {
                order_id: parse_integer("order id", fields[1])?,
                symbol: symbol.to_owned(),
                side: parse_side(fields[3])?,
                price: parse_price(fields[4])?,
                volume: parse_integer("volume", fields[5])?,
            })
        }
        "AMEND" => {
            expect_fields("AMEND", &fields, 4)?;
            Ok(Operation::Amend {
                order_id: parse_integer("order id", fields[1])?,
                price: parse_price(fields[2])?,
                volume: parse_integer("volume", fields[3])?,
            })
        }
        "PULL" => {
            expect_fields("PULL", &fields, 2)?;
            Ok(Operation::Pull {
                order_id: parse_integer("order id", fields[1])?,
            })
        }
        other => Err(ParseError::UnknownCommand(other.to_owned())),
    }
}

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_operation(s)
    }
}

/// Decode a side name
pub fn parse_side(value: &str) -> Result<Side, ParseError> {
    match value {
        "BUY" => Ok(Side::Buy),
        "SELL" => Ok(Side::Sell),
        other => Err(ParseError::UnknownSide(other.to_owned())),
    }
}

/// Decode a decimal price with at most four fractional digits
pub fn parse_price(value: &str) -> Result<Price, ParseError> {
    to_fixed(value).ok_or_else(|| ParseError::InvalidPrice(value.to_owned()))
}

fn parse_integer(field: &'static str, value: &str) -> Result<u64, ParseError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidNumber {
            field,
            value: value.to_owned(),
        });
    }
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}

fn expect_fields(command: &'static str, fields: &[&str], expected: usize) -> Result<(), ParseError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(ParseError::FieldCount {
            command,
            expected,
            found: fields.len(),
        })
    }
}
