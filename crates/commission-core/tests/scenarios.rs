//! End-to-end commission scenarios.
//!
//! Records are fed in as JSON, the way a host application hands them over,
//! then validated and run through the calculator.

use commission_core::{
    validate_rules, AttributeMap, CalculatedRule, CommissionCalculator, CommissionError,
    RuleRecord, SplitCondition, TotalLine,
};
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn totals(json: &str) -> Vec<TotalLine> {
    serde_json::from_str(json).unwrap()
}

fn conditions(json: &str) -> Vec<SplitCondition> {
    serde_json::from_str(json).unwrap()
}

fn rules(json: &str) -> Vec<commission_core::Rule> {
    let records: Vec<RuleRecord> = serde_json::from_str(json).unwrap();
    validate_rules(records).unwrap()
}

#[test]
fn test_flat_fee_on_subtotal_only() {
    let mut calculator = CommissionCalculator::new()
        .with_totals(totals(
            r#"[{"code": "subtotal", "value": 80.00}, {"code": "shipping", "value": 20.00}]"#,
        ))
        .with_conditions(vec![])
        .with_rules(rules(r#"[{"fee_type": "flat", "fee": 5.00}]"#));

    let result = calculator.calculate().unwrap();
    assert_eq!(result.order_total, dec("80.00"));
    assert_eq!(result.calculated_fee, dec("5.00"));
}

#[test]
fn test_split_shipping_joins_base() {
    let mut calculator = CommissionCalculator::new()
        .with_totals(totals(
            r#"[{"code": "subtotal", "value": 100.00}, {"code": "shipping", "value": 10.00}]"#,
        ))
        .with_conditions(conditions(r#"[{"action": "split", "code": "shipping"}]"#));

    let result = calculator.calculate().unwrap();
    assert_eq!(result.order_total, dec("110.00"));
    assert_eq!(result.calculated_fee, Decimal::ZERO);
}

#[test]
fn test_percent_above_threshold() {
    let percent_above_50 =
        r#"[{"fee_type": "percent", "fee": 10, "match_type": "above", "total": 50}]"#;

    let mut matched = CommissionCalculator::new()
        .with_totals(totals(r#"[{"code": "subtotal", "value": 60}]"#))
        .with_rules(rules(percent_above_50));
    assert_eq!(matched.calculate().unwrap().calculated_fee, dec("6.00"));

    let mut excluded = CommissionCalculator::new()
        .with_totals(totals(r#"[{"code": "subtotal", "value": 40}]"#))
        .with_rules(rules(percent_above_50));
    let result = excluded.calculate().unwrap();
    assert_eq!(result.calculated_fee, dec("0.00"));
    assert_eq!(result.calculated_fee.to_string(), "0.00");
}

#[test]
fn test_capitalized_match_type_is_unconditional() {
    let mut calculator = CommissionCalculator::new()
        .with_totals(totals(r#"[{"code": "subtotal", "value": 10}]"#))
        .with_rules(rules(
            r#"[{"fee_type": "flat", "fee": 5, "type": "Above", "total": 100}]"#,
        ));

    assert_eq!(calculator.calculate().unwrap().calculated_fee, dec("5.00"));
}

#[test]
fn test_overflowing_totals_are_reported() {
    let max = Decimal::MAX.to_string();
    let json = format!(
        r#"[{{"code": "subtotal", "value": "{max}"}}, {{"code": "subtotal", "value": "{max}"}}]"#
    );
    let mut calculator = CommissionCalculator::new()
        .with_totals(totals(&json))
        .with_rules(rules(r#"[{"fee_type": "flat", "fee": 1}]"#));

    assert!(matches!(
        calculator.calculate(),
        Err(CommissionError::Overflow { .. })
    ));
}

#[test]
fn test_condition_rules_against_order() {
    let order = AttributeMap::new()
        .with("order_type", "Delivery")
        .with("location", "Downtown Branch");

    let mut calculator = CommissionCalculator::new()
        .use_order(&order)
        .with_totals(totals(r#"[{"code": "subtotal", "value": "25.00"}]"#))
        .with_rules(rules(
            r#"[
                {
                    "name": "delivery downtown",
                    "fee_type": "flat",
                    "fee": 2,
                    "conditions": [
                        {"attribute": "location", "operator": "contains", "value": "downtown", "priority": 2},
                        {"attribute": "order_type", "operator": "is", "value": " delivery ", "priority": 1}
                    ]
                },
                {
                    "name": "collection",
                    "fee_type": "flat",
                    "fee": 7,
                    "conditions": [
                        {"attribute": "order_type", "operator": "is", "value": "collection"}
                    ]
                },
                {
                    "name": "unknown operator",
                    "fee_type": "flat",
                    "fee": 11,
                    "conditions": [
                        {"attribute": "order_type", "operator": "between", "value": "a"}
                    ]
                }
            ]"#,
        ));

    assert_eq!(calculator.calculate().unwrap().calculated_fee, dec("2.00"));
}

#[test]
fn test_include_adjustment_added_to_each_rule() {
    let mut calculator = CommissionCalculator::new()
        .with_totals(totals(
            r#"[
                {"code": "subtotal", "value": 100.00},
                {"code": "shipping", "value": 10.00},
                {"code": "tip", "value": 2.50}
            ]"#,
        ))
        .with_conditions(conditions(
            r#"[{"action": "split", "code": "shipping"}, {"action": "include", "code": "tip"}]"#,
        ))
        .with_rules(rules(
            r#"[{"fee_type": "percent", "fee": 5}, {"fee_type": "flat", "fee": 1}]"#,
        ));

    let result = calculator.calculate().unwrap();
    assert_eq!(result.order_total, dec("110.00"));
    // (5.50 + 2.50) + (1.00 + 2.50)
    assert_eq!(result.calculated_fee, dec("11.50"));
}

#[test]
fn test_when_matched_called_once_per_match_in_order() {
    let mut seen: Vec<(Option<String>, Decimal)> = Vec::new();
    {
        let mut calculator = CommissionCalculator::new()
            .with_totals(totals(r#"[{"code": "subtotal", "value": 100}]"#))
            .with_rules(rules(
                r#"[
                    {"name": "a", "fee_type": "flat", "fee": 1},
                    {"name": "b", "fee_type": "flat", "fee": 2, "match_type": "below", "total": 100},
                    {"name": "c", "fee_type": "flat", "fee": 3, "match_type": "above", "total": 100}
                ]"#,
            ))
            .when_matched(|rule: &CalculatedRule, _| {
                seen.push((rule.name.clone(), rule.calculated_fee));
                Ok(())
            });
        assert_eq!(calculator.calculate().unwrap().calculated_fee, dec("4.00"));
    }

    assert_eq!(
        seen,
        vec![
            (Some("a".to_string()), dec("1.00")),
            (Some("c".to_string()), dec("3.00")),
        ]
    );
}

#[test]
fn test_before_filter_veto() {
    let mut calculator = CommissionCalculator::new()
        .with_totals(totals(r#"[{"code": "subtotal", "value": 100}]"#))
        .with_rules(rules(
            r#"[{"name": "keep", "fee_type": "flat", "fee": 1}, {"name": "drop", "fee_type": "flat", "fee": 2}]"#,
        ))
        .before_filter(|rule, _| Ok(rule.name.as_deref() == Some("drop")));

    assert_eq!(calculator.calculate().unwrap().calculated_fee, dec("1.00"));
}

#[test]
fn test_missing_attribute_fails_the_calculation() {
    let order = AttributeMap::new();
    let mut calculator = CommissionCalculator::new()
        .use_order(&order)
        .with_totals(totals(r#"[{"code": "subtotal", "value": 100}]"#))
        .with_rules(rules(
            r#"[{"fee_type": "flat", "fee": 1, "conditions": [{"attribute": "order_type", "operator": "is", "value": "x"}]}]"#,
        ));

    assert!(matches!(
        calculator.calculate(),
        Err(CommissionError::Attribute(_))
    ));
}

#[test]
fn test_malformed_rule_is_rejected_at_the_boundary() {
    let records: Vec<RuleRecord> =
        serde_json::from_str(r#"[{"fee_type": "flat", "fee": 1}, {"fee": 3}]"#).unwrap();
    let err = validate_rules(records).unwrap_err();
    assert_eq!(err.to_string(), "Invalid rule at index 1: fee_type is required");
}
