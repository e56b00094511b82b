//! # Inbound Records
//!
//! Loosely-shaped rule and condition records, exactly as an admin UI or a
//! storage layer hands them over. Every field is optional here; the
//! [`crate::validation`] module turns them into [`Rule`](crate::Rule) and
//! [`RuleCondition`](crate::RuleCondition) or rejects them.
//!
//! ## Field Names
//! snake_case on the wire, with camelCase aliases:
//! ```json
//! {
//!   "name": "Large orders",
//!   "fee_type": "percent",
//!   "fee": 2.5,
//!   "match_type": "above",
//!   "total": "100.00",
//!   "conditions": [
//!     { "attribute": "order_type", "operator": "is", "value": "delivery", "priority": 1 }
//!   ]
//! }
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A commission rule before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RuleRecord {
    #[serde(default)]
    pub name: Option<String>,

    /// `"percent"` or `"flat"`.
    #[serde(default, alias = "feeType")]
    pub fee_type: Option<String>,

    #[serde(default)]
    #[ts(type = "string | number | null")]
    pub fee: Option<Decimal>,

    /// `"below"`, `"above"`, or anything else for "no threshold".
    #[serde(default, alias = "matchType", alias = "type")]
    pub match_type: Option<String>,

    #[serde(default)]
    #[ts(type = "string | number | null")]
    pub total: Option<Decimal>,

    #[serde(default)]
    pub conditions: Option<Vec<ConditionRecord>>,
}

/// A rule condition before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConditionRecord {
    #[serde(default)]
    pub attribute: Option<String>,

    #[serde(default)]
    pub operator: Option<String>,

    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    #[ts(type = "number | null")]
    pub priority: Option<i64>,
}
