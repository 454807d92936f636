//! Error types for matchbook
//!
//! Only the text edges can fail. Operations the engine ignores (unknown id,
//! duplicate insert) are not errors, and broken internal invariants panic.

use thiserror::Error;

/// Errors decoding one operation line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty line")]
    Empty,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("unknown side: {0}")]
    UnknownSide(String),

    #[error("{command} expects {expected} fields, got {found}")]
    FieldCount {
        command: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("empty symbol")]
    EmptySymbol,
}

/// Top-level error
#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {key}={value}")]
    Config { key: &'static str, value: String },
}

/// Result alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
