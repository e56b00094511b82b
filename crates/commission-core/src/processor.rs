//! # Rule Processing
//!
//! Computes the fee a single rule would contribute, before it is known
//! whether the rule matches.
//!
//! ```text
//! base fee   = fee / 100 × order_total      (Percent)
//!            = fee                          (Flat)
//! seed       = round(base fee)
//! running    = seed + Σ sum_by_code(include codes, in order)   (unrounded)
//! calculated = round(running)
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::aggregator::sum_by_code;
use crate::error::{CommissionError, CoreResult};
use crate::money::{percent_of, round_money};
use crate::types::{CalculatedRule, FeeType, Rule, SplitAction, SplitCondition, TotalLine};

/// Returns the rule's fee without include adjustments, rounded to 2 decimals.
pub fn base_fee(rule: &Rule, order_total: Decimal) -> CoreResult<Decimal> {
    let fee = match rule.fee_type {
        FeeType::Percent => percent_of(rule.fee, order_total)?,
        FeeType::Flat => rule.fee,
    };
    Ok(round_money(fee))
}

/// Attaches the calculated fee to a copy of `rule`.
///
/// Only conditions with action `include` contribute adjustments; all other
/// actions are skipped here.
pub fn process(
    rule: &Rule,
    order_total: Decimal,
    totals: &[TotalLine],
    include_conditions: &[SplitCondition],
) -> CoreResult<CalculatedRule> {
    let seed = base_fee(rule, order_total)?;

    let adjusted = include_conditions
        .iter()
        .filter(|condition| condition.action == SplitAction::Include)
        .try_fold(seed, |running, condition| {
            let adjustment = sum_by_code(totals, &condition.code)?;
            running
                .checked_add(adjustment)
                .ok_or_else(|| CommissionError::overflow("rule fee adjustments"))
        })?;

    let calculated_fee = round_money(adjusted);
    debug!(
        rule = %rule.label(),
        base_fee = %seed,
        calculated_fee = %calculated_fee,
        "Processed rule"
    );

    Ok(CalculatedRule {
        rule: rule.clone(),
        calculated_fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_flat_fee_ignores_order_total() {
        let rule = Rule::flat(dec("5"));
        assert_eq!(process(&rule, dec("80.00"), &[], &[]).unwrap().calculated_fee, dec("5.00"));
        assert_eq!(process(&rule, dec("0"), &[], &[]).unwrap().calculated_fee, dec("5.00"));
    }

    #[test]
    fn test_percent_fee() {
        let rule = Rule::percent(dec("10"));
        assert_eq!(process(&rule, dec("60.00"), &[], &[]).unwrap().calculated_fee, dec("6.00"));
    }

    #[test]
    fn test_percent_fee_rounds_half_away_from_zero() {
        // 2.5% of 80.10 = 2.0025
        assert_eq!(base_fee(&Rule::percent(dec("2.5")), dec("80.10")).unwrap(), dec("2.00"));
        // 15% of 0.10 = 0.015
        assert_eq!(base_fee(&Rule::percent(dec("15")), dec("0.10")).unwrap(), dec("0.02"));
    }

    #[test]
    fn test_include_codes_add_on_top() {
        let totals = vec![
            TotalLine::new("subtotal", dec("100.00")),
            TotalLine::new("tip", dec("3.00")),
            TotalLine::new("tip", dec("1.50")),
            TotalLine::new("delivery", dec("2.00")),
        ];
        let conditions = vec![
            SplitCondition::include("tip"),
            SplitCondition::split("delivery"),
            SplitCondition::include("service"),
        ];

        let calculated = process(&Rule::flat(dec("5")), dec("100.00"), &totals, &conditions).unwrap();
        assert_eq!(calculated.calculated_fee, dec("9.50"));
    }

    #[test]
    fn test_rule_is_copied_unchanged() {
        let rule = Rule::percent(dec("10")).with_name("standard");
        let calculated = process(&rule, dec("50.00"), &[], &[]).unwrap();
        assert_eq!(calculated.rule, rule);
        assert_eq!(calculated.label(), "standard");
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge_percent = Rule::percent(dec("10000000000000000000000"));
        assert!(matches!(
            process(&huge_percent, dec("10000000000000"), &[], &[]),
            Err(CommissionError::Overflow { .. })
        ));

        let totals = vec![TotalLine::new("tip", Decimal::MAX)];
        let conditions = vec![SplitCondition::include("tip")];
        assert!(matches!(
            process(&Rule::flat(dec("1")), dec("10.00"), &totals, &conditions),
            Err(CommissionError::Overflow { .. })
        ));
    }
}
