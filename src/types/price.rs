//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! Prices are stored as `u64` scaled by 10^4, giving four decimal places,
//! which is the precision of the operation stream. The engine itself only
//! compares and copies prices; the decimal conversion happens at the edges.
//!
//! ## Examples
//!
//! ```
//! use matchbook::types::price::{to_fixed, from_fixed_trimmed};
//!
//! let price = to_fixed("14.235").unwrap();
//! assert_eq!(price, 142_350);
//! assert_eq!(from_fixed_trimmed(price), "14.235");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Raw fixed-point price (scaled by [`SCALE`])
pub type Price = u64;

/// Number of decimal places carried by a [`Price`]
pub const PRECISION: u32 = 4;

/// Scaling factor for fixed-point prices: 10^4
pub const SCALE: u64 = 10_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to a fixed-point price
///
/// # Returns
///
/// * `Some(Price)` - The fixed-point representation
/// * `None` - If parsing fails, the value is negative, carries more than
///   [`PRECISION`] fractional digits, or is out of range
///
/// # Example
///
/// ```
/// use matchbook::types::price::to_fixed;
///
/// assert_eq!(to_fixed("5"), Some(50_000));
/// assert_eq!(to_fixed("5.0001"), Some(50_001));
/// assert_eq!(to_fixed("5.00001"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<Price> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to a fixed-point price
///
/// Values with more than [`PRECISION`] significant fractional digits are
/// rejected rather than rounded, so no price is silently moved.
pub fn decimal_to_fixed(d: Decimal) -> Option<Price> {
    if d.is_sign_negative() && !d.is_zero() {
        return None;
    }

    let d = d.normalize();
    if d.scale() > PRECISION {
        return None;
    }

    d.checked_mul(Decimal::from(SCALE))?.to_u64()
}

/// Convert a fixed-point price to a Decimal
pub fn fixed_to_decimal(value: Price) -> Decimal {
    Decimal::from_i128_with_scale(value as i128, PRECISION)
}

/// Convert a fixed-point price to a string without trailing zeros
///
/// # Example
///
/// ```
/// use matchbook::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(0), "0");
/// assert_eq!(from_fixed_trimmed(50_000), "5");
/// assert_eq!(from_fixed_trimmed(51_230), "5.123");
/// ```
pub fn from_fixed_trimmed(value: Price) -> String {
    fixed_to_decimal(value).normalize().to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================
