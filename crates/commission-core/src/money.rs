//! # Money Module
//!
//! Rounding and formatting helpers for monetary `Decimal` values.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 2.5% fee on 80.10 would drift by fractions of a cent depending on   │
//! │  evaluation order.                                                      │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    Exact base-10 arithmetic, rounded ONLY at documented points:        │
//! │    order total, per-rule base fee, per-rule final fee                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use commission_core::money::{format_money, percent_of, round_money};
//! use rust_decimal::Decimal;
//!
//! let total = round_money(Decimal::new(80125, 3)); // 80.125
//! assert_eq!(format_money(total), "80.13");
//!
//! let fee = percent_of(Decimal::TEN, total).unwrap();
//! assert_eq!(round_money(fee), Decimal::new(801, 2));
//! ```

use rust_decimal::prelude::*;

use crate::error::{CommissionError, CoreResult};
use crate::MONEY_DECIMAL_PLACES;

/// Rounds a monetary value to 2 decimal places, half away from zero.
///
/// ## Rounding Explained
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  HALF AWAY FROM ZERO                                                │
/// │                                                                     │
/// │   2.345 →  2.35        -2.345 → -2.35                               │
/// │   2.344 →  2.34        -2.344 → -2.34                               │
/// │                                                                     │
/// │  This is the "school" rounding that order totals and invoice       │
/// │  amounts are printed with. NOT bankers rounding.                   │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
///
/// The result always carries exactly two fractional digits, so `5` becomes
/// `5.00` and compares/prints like a currency amount.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// Returns `percent`% of `amount`, unrounded.
///
/// ## Example
/// ```rust
/// use commission_core::money::percent_of;
/// use rust_decimal::Decimal;
///
/// // 10% of 60.00
/// assert_eq!(percent_of(Decimal::TEN, Decimal::new(6000, 2)).unwrap(), Decimal::new(6, 0));
/// ```
///
/// ## Errors
/// [`CommissionError::Overflow`] if the product does not fit in a `Decimal`.
pub fn percent_of(percent: Decimal, amount: Decimal) -> CoreResult<Decimal> {
    percent
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|rate| rate.checked_mul(amount))
        .ok_or_else(|| CommissionError::overflow("percentage fee"))
}

/// Sums monetary values without panicking on overflow.
///
/// `context` names the quantity being summed in the error.
pub fn checked_sum<I>(values: I, context: &str) -> CoreResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, value| sum.checked_add(value))
        .ok_or_else(|| CommissionError::overflow(context))
}

/// Formats a monetary value as a plain two-decimal string (`"80.00"`).
///
/// ## Note
/// For logs and CLI output. No currency symbol or locale grouping.
pub fn format_money(value: Decimal) -> String {
    round_money(value).to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
