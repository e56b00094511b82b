//! # Commission Calculator
//!
//! Orchestrates the fee pipeline for one order.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     calculate()                                         │
//! │                                                                         │
//! │  totals + conditions ──► aggregate_base ──► order_total (2dp)          │
//! │                                                 │                       │
//! │  rules ──► process(rule, order_total) ──► CalculatedRule (all rules)   │
//! │                                                 │                       │
//! │            matches(rule, order_total) ◄─────────┘                       │
//! │               │  (before_filter veto, conditions, threshold)            │
//! │               ▼                                                         │
//! │  reduce left-to-right from 0:                                          │
//! │     when_matched(rule, order_total)   ← before the fee is added        │
//! │     fee += rule.calculated_fee                                         │
//! │               │                                                         │
//! │               ▼                                                         │
//! │  CommissionResult { order_total, calculated_fee }                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each `calculate()` call recomputes everything from the current
//! configuration; nothing is memoized across calls.

use rust_decimal::Decimal;
use tracing::debug;

use crate::aggregator::aggregate_base;
use crate::error::{CommissionError, CoreResult, HookError};
use crate::filter::{matches, BeforeFilter};
use crate::money::round_money;
use crate::order::Order;
use crate::processor::process;
use crate::types::{CalculatedRule, CommissionResult, Rule, SplitCondition, TotalLine};

/// Observer invoked once per matched rule, before its fee is added.
pub type RuleMatched<'a> = Box<dyn FnMut(&CalculatedRule, Decimal) -> Result<(), HookError> + 'a>;

/// Builder-style commission calculator.
///
/// ## Example
/// ```rust
/// use commission_core::{CommissionCalculator, Rule, TotalLine};
/// use rust_decimal::Decimal;
///
/// let mut calculator = CommissionCalculator::new()
///     .with_rules(vec![Rule::flat(Decimal::new(500, 2))])
///     .with_totals(vec![
///         TotalLine::new("subtotal", Decimal::new(8000, 2)),
///         TotalLine::new("shipping", Decimal::new(2000, 2)),
///     ]);
///
/// let result = calculator.calculate().unwrap();
/// assert_eq!(result.order_total, Decimal::new(8000, 2));
/// assert_eq!(result.calculated_fee, Decimal::new(500, 2));
/// ```
#[derive(Default)]
pub struct CommissionCalculator<'a> {
    order: Option<&'a dyn Order>,
    rules: Vec<Rule>,
    conditions: Vec<SplitCondition>,
    totals: Vec<TotalLine>,
    when_matched: Option<RuleMatched<'a>>,
    before_filter: Option<BeforeFilter<'a>>,
    result: Option<CommissionResult>,
}

impl<'a> CommissionCalculator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the order whose attributes rule conditions are tested against.
    pub fn use_order(mut self, order: &'a dyn Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the split / include conditions.
    pub fn with_conditions(mut self, conditions: Vec<SplitCondition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_totals(mut self, totals: Vec<TotalLine>) -> Self {
        self.totals = totals;
        self
    }

    /// Registers an observer for matched rules.
    pub fn when_matched<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&CalculatedRule, Decimal) -> Result<(), HookError> + 'a,
    {
        self.when_matched = Some(Box::new(callback));
        self
    }

    /// Registers an exclusion veto. Returning `Ok(true)` drops the rule.
    pub fn before_filter<F>(mut self, callback: F) -> Self
    where
        F: Fn(&CalculatedRule, Decimal) -> Result<bool, HookError> + 'a,
    {
        self.before_filter = Some(Box::new(callback));
        self
    }

    /// Runs the pipeline and stores the result.
    ///
    /// ## Errors
    /// - [`CommissionError::Attribute`](crate::CommissionError::Attribute) if the order cannot resolve an attribute
    /// - [`CommissionError::Hook`](crate::CommissionError::Hook) if a hook fails
    /// - [`CommissionError::OrderNotConfigured`](crate::CommissionError::OrderNotConfigured)
    ///   if a rule has conditions and no order was set
    /// - [`CommissionError::Overflow`](crate::CommissionError::Overflow) if any
    ///   amount leaves the `Decimal` range
    pub fn calculate(&mut self) -> CoreResult<CommissionResult> {
        self.result = None;

        let order_total = aggregate_base(&self.totals, &self.conditions)?;
        debug!(
            order_total = %order_total,
            rules = self.rules.len(),
            "Calculating commission"
        );

        let processed: Vec<CalculatedRule> = self
            .rules
            .iter()
            .map(|rule| process(rule, order_total, &self.totals, &self.conditions))
            .collect::<CoreResult<_>>()?;

        let mut matched = Vec::with_capacity(processed.len());
        for rule in processed {
            let is_match = matches(
                &rule,
                order_total,
                self.order,
                self.before_filter.as_deref(),
            )?;
            debug!(rule = %rule.label(), matched = is_match, "Filtered rule");
            if is_match {
                matched.push(rule);
            }
        }

        let mut calculated_fee = Decimal::ZERO;
        for rule in &matched {
            if let Some(callback) = self.when_matched.as_mut() {
                callback(rule, order_total)?;
            }
            calculated_fee = calculated_fee
                .checked_add(rule.calculated_fee)
                .ok_or_else(|| CommissionError::overflow("commission fee"))?;
        }

        let result = CommissionResult {
            order_total,
            calculated_fee: round_money(calculated_fee),
        };
        debug!(
            order_total = %result.order_total,
            calculated_fee = %result.calculated_fee,
            matched = matched.len(),
            "Commission calculated"
        );

        self.result = Some(result);
        Ok(result)
    }

    /// Result of the last successful `calculate()`.
    pub fn result(&self) -> Option<CommissionResult> {
        self.result
    }

    pub fn order_total(&self) -> Option<Decimal> {
        self.result.map(|result| result.order_total)
    }

    pub fn calculated_fee(&self) -> Option<Decimal> {
        self.result.map(|result| result.calculated_fee)
    }
}

impl std::fmt::Debug for CommissionCalculator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommissionCalculator")
            .field("order", &self.order.map(|_| "<Order>"))
            .field("rules", &self.rules)
            .field("conditions", &self.conditions)
            .field("totals", &self.totals)
            .field("when_matched", &self.when_matched.as_ref().map(|_| "<hook>"))
            .field("before_filter", &self.before_filter.as_ref().map(|_| "<hook>"))
            .field("result", &self.result)
            .finish()
    }
}
