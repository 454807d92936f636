//! Text codec around the engine.
//!
//! The engine works on structured [`Operation`]s and produces a structured
//! [`Report`]. This module decodes comma-delimited operation lines and
//! renders the report back into lines, so a whole stream can be run end to
//! end with [`run`].
//!
//! ## Example
//!
//! ```
//! let output = matchbook::codec::run([
//!     "INSERT,1,AAPL,BUY,12.2,5",
//!     "INSERT,2,AAPL,SELL,12.1,8",
//!     "INSERT,3,AAPL,BUY,12.5,1",
//! ])
//! .unwrap();
//!
//! assert_eq!(output, vec!["AAPL,12.2,5,2,1", "AAPL,12.1,1,3,2", "===AAPL===", ",,12.1,2"]);
//! ```
//!
//! [`Operation`]: crate::types::Operation
//! [`Report`]: crate::engine::Report

mod parse;
mod render;

pub use parse::{parse_operation, parse_price, parse_side};
pub use render::{render_header, render_operation, render_report, render_row, render_trade};

use crate::engine::MatchingEngine;
use crate::error::{Error, Result};

/// Field delimiter of both input and output lines
pub const DELIMITER: char = ',';

/// Process every line with a fresh engine and render the final report
///
/// Blank lines are skipped. The first malformed line aborts the run with
/// its 1-based line number.
pub fn run<I, S>(lines: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut engine = MatchingEngine::new();
    feed(&mut engine, lines)?;
    Ok(render_report(&engine.report()))
}

/// Decode and process every line on an existing engine
///
/// # Returns
///
/// The number of operations processed
pub fn feed<I, S>(engine: &mut MatchingEngine, lines: I) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut processed = 0;

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        let operation = parse_operation(line).map_err(|source| Error::Parse {
            line: index + 1,
            source,
        })?;
        engine.process(&operation);
        processed += 1;
    }

    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    #[test]
    fn test_run_skips_blank_lines() {
        let output = run(["", "INSERT,1,A,BUY,1,1", "   "]).unwrap();
        assert_eq!(output, vec!["===A===", "1,1,,"]);
    }

    #[test]
    fn test_run_reports_line_number() {
        let err = run(["INSERT,1,A,BUY,1,1", "", "PULL,x"]).unwrap_err();

        match err {
            Error::Parse { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(source, ParseError::InvalidNumber { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_feed_counts_operations() {
        let mut engine = MatchingEngine::new();
        let processed = feed(&mut engine, ["INSERT,1,A,BUY,1,1", "PULL,1", "PULL,1"]).unwrap();

        assert_eq!(processed, 3);
        assert_eq!(engine.operations_processed(), 3);
        assert_eq!(engine.active_orders(), 0);
    }
}
