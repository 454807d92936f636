//! Stress tests for the matchbook engine.
//!
//! These tests verify:
//! 1. No book is ever left crossed
//! 2. Volume is conserved by every operation
//! 3. The order registry agrees with the books
//! 4. Determinism is preserved across runs
//!
//! ## Running Stress Tests
//!
//! ```bash
//! # Run all stress tests (release mode recommended)
//! cargo test --release --test stress_test -- --nocapture
//!
//! # Run specific test
//! cargo test --release --test stress_test stress_mixed_operations -- --nocapture
//! ```

use std::time::Instant;

use matchbook::types::{OrderId, Price, TotalVolume, Volume};
use matchbook::{MatchingEngine, Operation, Side};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Symbols the generated stream trades
const SYMBOLS: [&str; 3] = ["AAPL", "MSFT", "WEBB"];

/// Base price: 100.0000 (in fixed-point, 10^4 scale)
const BASE_PRICE: Price = 1_000_000;

/// One tick: 0.01
const TICK: Price = 100;

/// Amend / pull targets are drawn from this many most recent ids
const RECENT_WINDOW: u64 = 256;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Generate a deterministic stream of inserts, amends and pulls.
///
/// Uses a seeded RNG for reproducibility. Same seed = same operations.
fn generate_operations(count: usize, seed: u64) -> Vec<Operation> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut operations = Vec::with_capacity(count);
    let mut next_id: OrderId = 1;

    for _ in 0..count {
        let roll: f64 = rng.gen();

        let operation = if next_id == 1 || roll < 0.6 {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let operation = Operation::Insert {
                order_id: next_id,
                symbol: SYMBOLS[rng.gen_range(0..SYMBOLS.len())].to_string(),
                side,
                price: random_price(&mut rng),
                volume: rng.gen_range(1..=500),
            };
            next_id += 1;
            operation
        } else {
            let order_id = rng.gen_range(next_id.saturating_sub(RECENT_WINDOW).max(1)..next_id);
            if roll < 0.85 {
                Operation::Amend {
                    order_id,
                    price: random_price(&mut rng),
                    volume: rng.gen_range(0..=500),
                }
            } else {
                Operation::Pull { order_id }
            }
        };

        operations.push(operation);
    }

    operations
}

/// Price within ±0.50 of the base
fn random_price(rng: &mut ChaCha8Rng) -> Price {
    let ticks: i64 = rng.gen_range(-50..=50);
    (BASE_PRICE as i64 + ticks * TICK as i64) as Price
}

/// Remaining volume of an active order, 0 if it is not active
fn resting_volume(engine: &MatchingEngine, order_id: OrderId) -> Volume {
    engine
        .order(order_id)
        .and_then(|info| {
            engine
                .book(&info.symbol)?
                .batch(info.side, info.price)?
                .volume_of(order_id)
        })
        .unwrap_or(0)
}

/// Total volume resting across every book
fn total_resting(engine: &MatchingEngine) -> TotalVolume {
    engine
        .books()
        .map(|book| book.side_volume(Side::Buy) + book.side_volume(Side::Sell))
        .sum()
}

/// Volume the operation adds to the books before any matching
fn volume_added(engine: &MatchingEngine, operation: &Operation) -> i128 {
    match operation {
        Operation::Insert {
            order_id, volume, ..
        } => {
            if engine.is_active(*order_id) {
                0
            } else {
                *volume as i128
            }
        }
        Operation::Amend {
            order_id, volume, ..
        } => {
            if engine.is_active(*order_id) {
                *volume as i128 - resting_volume(engine, *order_id) as i128
            } else {
                0
            }
        }
        Operation::Pull { order_id } => -(resting_volume(engine, *order_id) as i128),
    }
}

/// Every active order rests where the registry says, and nothing else rests
fn assert_registry_consistent(engine: &MatchingEngine, max_id: OrderId) {
    let resting: usize = engine.books().map(|book| book.order_count()).sum();
    assert_eq!(resting, engine.active_orders(), "registry size != resting orders");

    for order_id in 1..=max_id {
        if let Some(info) = engine.order(order_id) {
            let found = engine
                .book(&info.symbol)
                .and_then(|book| book.batch(info.side, info.price))
                .map_or(false, |batch| batch.contains(order_id));
            assert!(found, "order {order_id} not resting at {info:?}");
        }
    }
}

/// Run a deterministic operation stream and return the final state root.
fn run_deterministic_sequence(seed: u64, count: usize) -> [u8; 32] {
    let mut engine = MatchingEngine::new();

    for operation in generate_operations(count, seed) {
        engine.process(&operation);
    }

    engine.state_root()
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Check every invariant after every operation of a mixed stream.
#[test]
fn stress_mixed_operations() {
    println!("\n=== STRESS TEST: Mixed Operations ===\n");

    const OP_COUNT: usize = 20_000;

    let operations = generate_operations(OP_COUNT, 42);
    let max_id = operations
        .iter()
        .filter(|op| matches!(op, Operation::Insert { .. }))
        .count() as OrderId;

    let mut engine = MatchingEngine::new();
    let mut trade_count = 0;
    let mut closed_count = 0;

    for (index, operation) in operations.iter().enumerate() {
        let before = total_resting(&engine) as i128;
        let added = volume_added(&engine, operation);

        let result = engine.process(operation);

        for trade in &result.trades {
            assert!(trade.volume > 0, "zero-volume trade at op {index}");
            assert_ne!(trade.aggressor_order_id, trade.passive_order_id);
            assert_eq!(trade.aggressor_order_id, operation.order_id());
        }
        for order_id in &result.closed {
            assert!(!engine.is_active(*order_id), "closed order {order_id} still active");
        }

        let after = total_resting(&engine) as i128;
        let traded = result.traded_volume() as i128;
        assert_eq!(
            after,
            before + added - 2 * traded,
            "volume not conserved at op {index}: {operation:?}"
        );

        for book in engine.books() {
            assert!(!book.is_crossed(), "{} crossed after op {index}", book.symbol());
        }

        trade_count += result.trades.len();
        closed_count += result.closed.len();

        if index % 1_000 == 0 {
            assert_registry_consistent(&engine, max_id);
        }
    }

    assert_registry_consistent(&engine, max_id);
    assert_eq!(engine.trades().len(), trade_count);
    assert_eq!(engine.operations_processed(), OP_COUNT as u64);

    println!("  Operations:        {:>12}", OP_COUNT);
    println!("  Trades generated:  {:>12}", trade_count);
    println!("  Orders closed:     {:>12}", closed_count);
    println!("  Active orders:     {:>12}", engine.active_orders());
    println!("  State root:        {}", engine.state_root_hex());

    assert!(trade_count > 0, "Expected some trades to occur");
    assert!(closed_count > 0, "Expected some orders to close");

    println!("\n=== STRESS TEST PASSED ===\n");
}

/// Verify determinism: Same sequence produces identical state root.
#[test]
fn verify_determinism() {
    println!("\n=== DETERMINISM TEST ===\n");

    const TEST_COUNT: usize = 10_000;
    const SEED: u64 = 12345;

    let root1 = run_deterministic_sequence(SEED, TEST_COUNT);
    let root2 = run_deterministic_sequence(SEED, TEST_COUNT);

    println!("  Run 1 state root: {}", hex::encode(root1));
    println!("  Run 2 state root: {}", hex::encode(root2));

    assert_eq!(root1, root2, "State roots must match for determinism");

    let root3 = run_deterministic_sequence(SEED + 1, TEST_COUNT);
    println!("  Different seed:   {}", hex::encode(root3));
    assert_ne!(root1, root3, "Different seeds should produce different roots");

    println!("\n=== DETERMINISM VERIFIED ===\n");
}

/// Pulling every order leaves nothing behind.
#[test]
fn stress_drain_all_orders() {
    println!("\n=== DRAIN TEST ===\n");

    const OP_COUNT: usize = 50_000;

    let operations = generate_operations(OP_COUNT, 7);
    let mut engine = MatchingEngine::new();

    let start = Instant::now();
    for operation in &operations {
        engine.process(operation);
    }
    let elapsed = start.elapsed();

    let max_id = operations
        .iter()
        .filter(|op| matches!(op, Operation::Insert { .. }))
        .count() as OrderId;
    let trades = engine.trades().len();

    for order_id in 1..=max_id {
        let was_active = engine.is_active(order_id);
        let result = engine.process(&Operation::Pull { order_id });
        assert_eq!(result.is_closed(order_id), was_active);
        assert!(result.trades.is_empty());
    }

    println!("  Operations:        {:>12}", OP_COUNT);
    println!("  Elapsed time:      {:>12.2?}", elapsed);
    println!(
        "  Throughput:        {:>12.0} ops/sec",
        OP_COUNT as f64 / elapsed.as_secs_f64()
    );

    assert_eq!(engine.active_orders(), 0);
    assert_eq!(engine.trades().len(), trades);
    assert!(engine.books().all(|book| book.is_empty()));
    assert!(engine.report().books.is_empty());

    println!("\n=== DRAIN TEST PASSED ===\n");
}
