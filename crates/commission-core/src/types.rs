//! # Domain Types
//!
//! Core domain types used throughout the commission pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   TotalLine     │   │ SplitCondition  │   │      Rule       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code           │   │  action         │   │  fee_type       │       │
//! │  │  value          │   │  code           │   │  fee            │       │
//! │  └─────────────────┘   └─────────────────┘   │  match_type     │       │
//! │                                               │  total          │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │  conditions ────┼──┐    │
//! │  │ CalculatedRule  │   │ RuleCondition   │◄──┼─────────────────┘  │    │
//! │  │  ─────────────  │   │  ─────────────  │   └─────────────────┘       │
//! │  │  rule           │   │  attribute      │                             │
//! │  │  calculated_fee │   │  operator       │   ┌─────────────────┐       │
//! │  └─────────────────┘   │  value          │   │CommissionResult │       │
//! │                        │  priority       │   │  order_total    │       │
//! │                        └─────────────────┘   │  calculated_fee │       │
//! │                                               └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `TotalLine` and `SplitCondition` are strict enough to deserialize directly.
//! Rules and rule conditions arrive loosely shaped and go through
//! [`crate::records`] + [`crate::validation`] first.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Total Line
// =============================================================================

/// One component of the order's monetary breakdown (subtotal, tax, shipping).
///
/// Codes are not unique: an order may carry several `tax` lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TotalLine {
    pub code: String,
    #[ts(type = "string | number")]
    pub value: Decimal,
}

impl TotalLine {
    pub fn new(code: impl Into<String>, value: Decimal) -> Self {
        TotalLine {
            code: code.into(),
            value,
        }
    }
}

// =============================================================================
// Split Condition
// =============================================================================

/// How a total-line code participates in the fee base.
///
/// Unknown actions are kept as-is and ignored by aggregation and include
/// adjustments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SplitAction {
    /// Add lines with this code to the taxable base.
    Split,
    /// Add lines with this code on top of every rule's base fee.
    Include,
    /// Anything else.
    Other(String),
}

impl SplitAction {
    pub fn as_str(&self) -> &str {
        match self {
            SplitAction::Split => "split",
            SplitAction::Include => "include",
            SplitAction::Other(other) => other,
        }
    }
}

impl From<String> for SplitAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "split" => SplitAction::Split,
            "include" => SplitAction::Include,
            _ => SplitAction::Other(s),
        }
    }
}

impl From<&str> for SplitAction {
    fn from(s: &str) -> Self {
        SplitAction::from(s.to_string())
    }
}

impl From<SplitAction> for String {
    fn from(action: SplitAction) -> Self {
        action.as_str().to_string()
    }
}

impl fmt::Display for SplitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares how one total-line code feeds the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SplitCondition {
    #[ts(type = "string")]
    pub action: SplitAction,
    pub code: String,
}

impl SplitCondition {
    pub fn new(action: impl Into<SplitAction>, code: impl Into<String>) -> Self {
        SplitCondition {
            action: action.into(),
            code: code.into(),
        }
    }

    /// Shorthand for a `split` condition.
    pub fn split(code: impl Into<String>) -> Self {
        SplitCondition::new(SplitAction::Split, code)
    }

    /// Shorthand for an `include` condition.
    pub fn include(code: impl Into<String>) -> Self {
        SplitCondition::new(SplitAction::Include, code)
    }
}

// =============================================================================
// Operator
// =============================================================================

/// Comparison applied by a [`RuleCondition`].
///
/// Ordering operators compare lowercase-trimmed strings lexicographically,
/// they never parse numbers: `"9" > "10"` holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Is,
    IsNot,
    Greater,
    Less,
    Contains,
    DoesNotContain,
    EqualsOrGreater,
    EqualsOrLess,
    /// Unknown operator name. Always evaluates to false.
    Unrecognized(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Is => "is",
            Operator::IsNot => "is_not",
            Operator::Greater => "greater",
            Operator::Less => "less",
            Operator::Contains => "contains",
            Operator::DoesNotContain => "does_not_contain",
            Operator::EqualsOrGreater => "equals_or_greater",
            Operator::EqualsOrLess => "equals_or_less",
            Operator::Unrecognized(other) => other,
        }
    }
}

impl From<&str> for Operator {
    fn from(s: &str) -> Self {
        match s {
            "is" => Operator::Is,
            "is_not" => Operator::IsNot,
            "greater" => Operator::Greater,
            "less" => Operator::Less,
            "contains" => Operator::Contains,
            "does_not_contain" => Operator::DoesNotContain,
            "equals_or_greater" => Operator::EqualsOrGreater,
            "equals_or_less" => Operator::EqualsOrLess,
            other => Operator::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Rule Condition
// =============================================================================

/// One test against an order attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCondition {
    pub attribute: String,
    pub operator: Operator,
    pub value: String,
    /// Lower runs first.
    pub priority: i64,
}

// =============================================================================
// Fee Type / Match Type
// =============================================================================

/// How a rule's `fee` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeType {
    /// `fee` is a percentage of the order total.
    Percent,
    /// `fee` is an absolute amount.
    Flat,
}

impl FeeType {
    pub const ALLOWED: [&'static str; 2] = ["percent", "flat"];
}

/// Threshold direction for rules without conditions.
///
/// ## Boundary Behavior
/// ```text
///   total = 100
///   ─────────────────●─────────────────►  order_total
///        Below       │      Above
///    (order < 100)   │  (order >= 100)
///                    │
///   100 itself is "above", never "below"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    Below,
    Above,
}

impl MatchType {
    /// Parses a match type, returning None for anything unrecognized.
    ///
    /// Only the exact lowercase words count: `"Above"` is unrecognized and the
    /// rule it belongs to matches unconditionally.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "below" => Some(MatchType::Below),
            "above" => Some(MatchType::Above),
            _ => None,
        }
    }
}

// =============================================================================
// Rule
// =============================================================================

/// A validated commission rule.
///
/// If `conditions` is present and non-empty it decides the match; otherwise
/// `match_type` + `total` do; otherwise the rule always matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Display name, for logs and hooks only.
    pub name: Option<String>,
    pub fee_type: FeeType,
    pub fee: Decimal,
    pub match_type: Option<MatchType>,
    /// Threshold compared against the order total. Zero when unused.
    pub total: Decimal,
    pub conditions: Option<Vec<RuleCondition>>,
}

impl Rule {
    /// A flat-fee rule that always matches.
    pub fn flat(fee: Decimal) -> Self {
        Rule {
            name: None,
            fee_type: FeeType::Flat,
            fee,
            match_type: None,
            total: Decimal::ZERO,
            conditions: None,
        }
    }

    /// A percentage rule that always matches.
    pub fn percent(fee: Decimal) -> Self {
        Rule {
            fee_type: FeeType::Percent,
            ..Rule::flat(fee)
        }
    }

    /// Gates the rule on a threshold.
    pub fn with_threshold(mut self, match_type: MatchType, total: Decimal) -> Self {
        self.match_type = Some(match_type);
        self.total = total;
        self
    }

    /// Gates the rule on a condition list.
    pub fn with_conditions(mut self, conditions: Vec<RuleCondition>) -> Self {
        self.conditions = Some(conditions);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the condition list if it is present and non-empty.
    pub fn active_conditions(&self) -> Option<&[RuleCondition]> {
        self.conditions
            .as_deref()
            .filter(|conditions| !conditions.is_empty())
    }

    /// Name for log output.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

// =============================================================================
// Calculated Rule
// =============================================================================

/// A rule together with the fee it would contribute if it matches.
///
/// Produced once by the processor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedRule {
    pub rule: Rule,
    pub calculated_fee: Decimal,
}

impl std::ops::Deref for CalculatedRule {
    type Target = Rule;

    fn deref(&self) -> &Rule {
        &self.rule
    }
}

// =============================================================================
// Commission Result
// =============================================================================

/// Final output of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionResult {
    /// Taxable base, rounded to 2 decimals.
    #[ts(type = "string")]
    pub order_total: Decimal,
    /// Sum of the fees of all matched rules.
    #[ts(type = "string")]
    pub calculated_fee: Decimal,
}

// =============================================================================
// Unit Tests
// =============================================================================
