//! # Rule Filtering
//!
//! Decides whether one processed rule applies to the order.
//!
//! ## Decision Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. before_filter hook returns true?      → REJECT (veto)              │
//! │  2. non-empty condition list?             → evaluate(conditions)       │
//! │  3. match_type == Below?                  → order_total <  total       │
//! │  4. match_type == Above?                  → order_total >= total       │
//! │  5. otherwise                             → MATCH                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Threshold checks use the rule's own fields; the calculated fee plays no
//! part in matching (the hook may look at it).

use rust_decimal::Decimal;
use tracing::debug;

use crate::conditions::evaluate;
use crate::error::{CommissionError, CoreResult, HookError};
use crate::order::Order;
use crate::types::{CalculatedRule, MatchType};

/// Exclusion veto: returning `Ok(true)` rejects the rule.
pub type BeforeFilterFn<'a> = dyn Fn(&CalculatedRule, Decimal) -> Result<bool, HookError> + 'a;

/// Boxed [`BeforeFilterFn`], as stored by the calculator.
pub type BeforeFilter<'a> = Box<BeforeFilterFn<'a>>;

/// Returns whether `rule` applies at `order_total`.
///
/// `order` is only consulted for rules with conditions; if it is needed and
/// missing the call fails with [`CommissionError::OrderNotConfigured`].
pub fn matches(
    rule: &CalculatedRule,
    order_total: Decimal,
    order: Option<&dyn Order>,
    before_filter: Option<&BeforeFilterFn<'_>>,
) -> CoreResult<bool> {
    if let Some(hook) = before_filter {
        if hook(rule, order_total)? {
            debug!(rule = %rule.label(), "Rule vetoed by before_filter hook");
            return Ok(false);
        }
    }

    if let Some(conditions) = rule.active_conditions() {
        let order = order.ok_or(CommissionError::OrderNotConfigured)?;
        return Ok(evaluate(conditions, order)?);
    }

    let matched = match rule.match_type {
        Some(MatchType::Below) => order_total < rule.total,
        Some(MatchType::Above) => order_total >= rule.total,
        None => true,
    };
    Ok(matched)
}
