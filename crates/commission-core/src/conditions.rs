//! # Condition Evaluation
//!
//! Evaluates a rule's condition list against an order with AND semantics.
//!
//! ## Evaluation Flow
//! ```text
//! conditions ──► stable sort by priority (ascending)
//!                     │
//!                     ▼
//!            ┌──────────────────┐
//!            │ next condition   │◄──────────────┐
//!            └────────┬─────────┘               │
//!                     │                         │
//!     model = lower(trim(order.attribute(..)))  │
//!     value = lower(trim(condition.value))      │
//!                     │                         │
//!            operator.apply(model, value)       │
//!               │                  │            │
//!             false              true ──────────┘
//!               │
//!               ▼
//!        stop: rule does NOT match  (later conditions are never looked up)
//! ```
//!
//! An empty list is vacuously true.

use tracing::trace;

use crate::error::AttributeError;
use crate::order::Order;
use crate::types::{Operator, RuleCondition};

impl Operator {
    /// Applies the operator to two already-normalized strings.
    ///
    /// Ordering operators use plain string ordering, so `"9" > "10"`.
    pub fn apply(&self, model_value: &str, condition_value: &str) -> bool {
        match self {
            Operator::Is => model_value == condition_value,
            Operator::IsNot => model_value != condition_value,
            Operator::Greater => model_value > condition_value,
            Operator::Less => model_value < condition_value,
            Operator::Contains => model_value.contains(condition_value),
            Operator::DoesNotContain => !model_value.contains(condition_value),
            Operator::EqualsOrGreater => model_value >= condition_value,
            Operator::EqualsOrLess => model_value <= condition_value,
            Operator::Unrecognized(_) => false,
        }
    }
}

/// Whitespace stripped from both ends before comparing. ASCII only, so a
/// non-breaking space is part of the value.
const TRIMMED: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

fn normalize(value: &str) -> String {
    value.trim_matches(TRIMMED).to_lowercase()
}

/// Returns true only if every condition holds for the order.
///
/// Stops at the first failing condition; attributes of later conditions are
/// not looked up. A failing lookup is returned as an error.
pub fn evaluate<O>(conditions: &[RuleCondition], order: &O) -> Result<bool, AttributeError>
where
    O: Order + ?Sized,
{
    let mut ordered: Vec<&RuleCondition> = conditions.iter().collect();
    ordered.sort_by_key(|condition| condition.priority);

    for condition in ordered {
        let model_value = normalize(&order.attribute(&condition.attribute)?);
        let condition_value = normalize(&condition.value);
        let passed = condition.operator.apply(&model_value, &condition_value);

        trace!(
            attribute = %condition.attribute,
            operator = %condition.operator,
            model_value = %model_value,
            condition_value = %condition_value,
            passed,
            "Evaluated rule condition"
        );

        if !passed {
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::AttributeMap;
    use std::cell::RefCell;

    fn condition(attribute: &str, operator: &str, value: &str, priority: i64) -> RuleCondition {
        RuleCondition {
            attribute: attribute.to_string(),
            operator: Operator::from(operator),
            value: value.to_string(),
            priority,
        }
    }

    /// Records every attribute lookup and fails on `boom`.
    struct RecordingOrder {
        inner: AttributeMap,
        lookups: RefCell<Vec<String>>,
    }

    impl Order for RecordingOrder {
        fn attribute(&self, name: &str) -> Result<String, AttributeError> {
            self.lookups.borrow_mut().push(name.to_string());
            if name == "boom" {
                return Err(AttributeError::Lookup {
                    attribute: name.to_string(),
                    reason: "backing store offline".to_string(),
                });
            }
            self.inner.attribute(name)
        }
    }

    #[test]
    fn test_operators() {
        assert!(Operator::Is.apply("delivery", "delivery"));
        assert!(Operator::IsNot.apply("delivery", "collection"));
        assert!(Operator::Contains.apply("downtown branch", "town"));
        assert!(Operator::DoesNotContain.apply("downtown branch", "uptown"));
        assert!(Operator::Greater.apply("b", "a"));
        assert!(Operator::Less.apply("a", "b"));
        assert!(Operator::EqualsOrGreater.apply("b", "b"));
        assert!(Operator::EqualsOrLess.apply("a", "b"));
        assert!(!Operator::Unrecognized("between".to_string()).apply("a", "a"));
    }

    #[test]
    fn test_ordering_operators_compare_strings_not_numbers() {
        assert!(Operator::Greater.apply("9", "10"));
        assert!(Operator::Less.apply("100", "20"));
        assert!(!Operator::Is.apply("10", "10.0"));
    }

    #[test]
    fn test_values_are_trimmed_and_lowercased() {
        let order = AttributeMap::new().with("order_type", "  Delivery ");
        let conditions = vec![condition("order_type", "is", " DELIVERY", 0)];
        assert!(evaluate(&conditions, &order).unwrap());
    }

    #[test]
    fn test_only_ascii_whitespace_is_trimmed() {
        let order = AttributeMap::new()
            .with("order_type", "\tdelivery\x0B\0")
            .with("location", "\u{a0}downtown");
        assert!(evaluate(&[condition("order_type", "is", "delivery", 0)], &order).unwrap());
        assert!(!evaluate(&[condition("location", "is", "downtown", 0)], &order).unwrap());
    }

    #[test]
    fn test_empty_list_is_true() {
        assert!(evaluate(&[], &AttributeMap::new()).unwrap());
    }

    #[test]
    fn test_all_conditions_must_pass() {
        let order = AttributeMap::new()
            .with("order_type", "delivery")
            .with("location", "downtown");
        let conditions = vec![
            condition("order_type", "is", "delivery", 0),
            condition("location", "is", "uptown", 1),
        ];
        assert!(!evaluate(&conditions, &order).unwrap());
    }

    #[test]
    fn test_short_circuits_in_priority_order() {
        let order = RecordingOrder {
            inner: AttributeMap::new().with("order_type", "collection"),
            lookups: RefCell::new(Vec::new()),
        };
        // Listed first, but evaluated second.
        let conditions = vec![
            condition("boom", "is", "anything", 2),
            condition("order_type", "is", "delivery", 1),
        ];

        assert!(!evaluate(&conditions, &order).unwrap());
        assert_eq!(*order.lookups.borrow(), vec!["order_type".to_string()]);
    }

    #[test]
    fn test_equal_priorities_keep_input_order() {
        let order = RecordingOrder {
            inner: AttributeMap::new().with("a", "1").with("b", "2"),
            lookups: RefCell::new(Vec::new()),
        };
        let conditions = vec![condition("b", "is", "2", 0), condition("a", "is", "1", 0)];

        assert!(evaluate(&conditions, &order).unwrap());
        assert_eq!(
            *order.lookups.borrow(),
            vec!["b".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn test_lookup_failure_propagates() {
        let order = RecordingOrder {
            inner: AttributeMap::new(),
            lookups: RefCell::new(Vec::new()),
        };
        let conditions = vec![condition("boom", "is", "x", 0)];
        assert!(matches!(
            evaluate(&conditions, &order),
            Err(AttributeError::Lookup { .. })
        ));
    }
}
