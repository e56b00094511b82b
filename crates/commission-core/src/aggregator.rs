//! # Order Total Aggregation
//!
//! Builds the taxable base from an order's total lines.
//!
//! ```text
//! totals:      subtotal 100.00 │ shipping 10.00 │ tax 8.25 │ tip 5.00
//! conditions:  split(shipping), include(tip)
//!
//! base codes = {"subtotal"} ∪ {codes with action "split"}
//!            = {"subtotal", "shipping"}
//!
//! order_total = round(100.00 + 10.00) = 110.00
//! ```
//!
//! `include` codes do not touch the base; the processor adds them on top of
//! each rule's fee via [`sum_by_code`].

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::error::CoreResult;
use crate::money::{checked_sum, round_money};
use crate::types::{SplitAction, SplitCondition, TotalLine};
use crate::BASE_TOTAL_CODE;

/// Sums every total line whose code is `subtotal` or marked `split`, rounded
/// to 2 decimals half away from zero.
///
/// Fails with [`CommissionError::Overflow`](crate::CommissionError::Overflow)
/// if the lines sum past `Decimal::MAX`.
pub fn aggregate_base(
    totals: &[TotalLine],
    split_conditions: &[SplitCondition],
) -> CoreResult<Decimal> {
    let mut codes: HashSet<&str> = split_conditions
        .iter()
        .filter(|condition| condition.action == SplitAction::Split)
        .map(|condition| condition.code.as_str())
        .collect();
    codes.insert(BASE_TOTAL_CODE);

    let sum = checked_sum(
        totals
            .iter()
            .filter(|line| codes.contains(line.code.as_str()))
            .map(|line| line.value),
        "order total",
    )?;

    Ok(round_money(sum))
}

/// Unrounded sum of every total line with exactly this code. Zero if none.
pub fn sum_by_code(totals: &[TotalLine], code: &str) -> CoreResult<Decimal> {
    checked_sum(
        totals
            .iter()
            .filter(|line| line.code == code)
            .map(|line| line.value),
        code,
    )
}
