//! # Scenario Files
//!
//! A scenario bundles everything one calculation needs:
//!
//! ```json
//! {
//!   "order": { "order_type": "delivery" },
//!   "rules": [{ "name": "standard", "fee_type": "percent", "fee": 10 }],
//!   "conditions": [{ "action": "split", "code": "shipping" }],
//!   "totals": [
//!     { "code": "subtotal", "value": 80.00 },
//!     { "code": "shipping", "value": 20.00 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use commission_core::money::format_money;
use commission_core::{
    validate_rules, AttributeMap, CommissionCalculator, CommissionResult, RuleRecord,
    SplitCondition, TotalLine,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// One order's worth of calculator input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub order: AttributeMap,
    #[serde(default)]
    pub rules: Vec<RuleRecord>,
    #[serde(default)]
    pub conditions: Vec<SplitCondition>,
    #[serde(default)]
    pub totals: Vec<TotalLine>,
}

impl Scenario {
    pub fn from_path(path: &Path) -> CliResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = raw.len(), "Read scenario file");
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// A rule that contributed to the commission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRule {
    pub name: Option<String>,
    pub fee: Decimal,
}

/// What the binary prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub result: CommissionResult,
    pub matched_rules: Vec<MatchedRule>,
}

/// Runs one scenario through the calculator.
///
/// With `max_fee` set, rules whose calculated fee exceeds it are vetoed
/// before filtering.
pub fn run(scenario: Scenario, max_fee: Option<Decimal>) -> CliResult<Report> {
    let Scenario {
        order,
        rules,
        conditions,
        totals,
    } = scenario;

    let rules = validate_rules(rules)?;
    let mut matched_rules = Vec::new();

    let result = {
        let mut calculator = CommissionCalculator::new()
            .use_order(&order)
            .with_rules(rules)
            .with_conditions(conditions)
            .with_totals(totals)
            .when_matched(|rule, order_total| {
                info!(
                    rule = %rule.label(),
                    fee = %format_money(rule.calculated_fee),
                    order_total = %format_money(order_total),
                    "Rule matched"
                );
                matched_rules.push(MatchedRule {
                    name: rule.name.clone(),
                    fee: rule.calculated_fee,
                });
                Ok(())
            });

        if let Some(limit) = max_fee {
            calculator = calculator.before_filter(move |rule, _| Ok(rule.calculated_fee > limit));
        }

        calculator.calculate()?
    };

    Ok(Report {
        result,
        matched_rules,
    })
}
