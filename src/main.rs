//! Matchbook - Binary Entry Point
//!
//! Reads operation lines from the file given as the only argument, or from
//! stdin, and prints the report to stdout.
//!
//! ```text
//! matchbook [FILE]
//! ```
//!
//! Logs go to stderr; `RUST_LOG` sets the filter (default `warn`).

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use matchbook::codec;
use matchbook::{EngineConfig, MatchingEngine, Result};

fn main() -> ExitCode {
    init_tracing();

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("matchbook: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(path: Option<String>) -> Result<()> {
    let config = EngineConfig::from_env()?;
    let mut engine = MatchingEngine::with_config(config);

    let reader: Box<dyn BufRead> = match &path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;

    let processed = codec::feed(&mut engine, &lines)?;
    info!(
        processed,
        trades = engine.trades().len(),
        active = engine.active_orders(),
        state_root = %engine.state_root_hex(),
        "stream processed"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in codec::render_report(&engine.report()) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    Ok(())
}
