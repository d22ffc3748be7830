//! Amounts
//!
//! Presentation helpers: every amount leaving the crate is shown with exactly
//! two decimal places.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serializer;

/// Round an amount to two decimal places, halves away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Format an amount with exactly two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    round_to_cents(amount).to_string()
}

/// Serialize an amount as a two-decimal string, e.g. `"1.80"`.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize_amount<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_amount(*amount))
}
