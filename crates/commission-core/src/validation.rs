//! # Validation Module
//!
//! Turns loosely-shaped [`RuleRecord`]s into validated [`Rule`]s.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Non-numeric fee / total / value → serde error                     │
//! │  └── Unknown fields ignored                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields (fee_type, fee, attribute, operator)              │
//! │  ├── Allowed values (fee_type)                                         │
//! │  └── Threshold completeness (below/above need a total)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculator                                                   │
//! │  └── Lenient by contract: unknown operator → false,                    │
//! │      unknown match type → unconditional match                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use commission_core::records::RuleRecord;
//! use commission_core::Rule;
//! use rust_decimal::Decimal;
//!
//! let record = RuleRecord {
//!     fee_type: Some("flat".to_string()),
//!     fee: Some(Decimal::new(500, 2)),
//!     ..Default::default()
//! };
//! let rule = Rule::try_from(record).unwrap();
//! assert_eq!(rule.fee, Decimal::new(5, 0));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{CommissionError, ValidationError};
use crate::records::{ConditionRecord, RuleRecord};
use crate::types::{FeeType, MatchType, Operator, Rule, RuleCondition};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Returns the trimmed value of a required string field.
///
/// ## Example
/// ```rust
/// use commission_core::validation::require_text;
///
/// assert_eq!(require_text("operator", Some(" is ")).unwrap(), "is");
/// assert!(require_text("operator", Some("   ")).is_err());
/// assert!(require_text("operator", None).is_err());
/// ```
pub fn require_text<'a>(field: &str, value: Option<&'a str>) -> ValidationResult<&'a str> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

/// Returns a required decimal field.
pub fn require_amount(field: &str, value: Option<Decimal>) -> ValidationResult<Decimal> {
    value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })
}

/// Validates a fee type.
///
/// ## Rules
/// - Must be present
/// - Must be `percent` or `flat` (case-insensitive)
pub fn validate_fee_type(fee_type: Option<&str>) -> ValidationResult<FeeType> {
    let fee_type = require_text("fee_type", fee_type)?;

    match fee_type.to_lowercase().as_str() {
        "percent" => Ok(FeeType::Percent),
        "flat" => Ok(FeeType::Flat),
        _ => Err(ValidationError::NotAllowed {
            field: "fee_type".to_string(),
            allowed: FeeType::ALLOWED.iter().map(|s| s.to_string()).collect(),
        }),
    }
}

/// Validates the threshold half of a rule.
///
/// ## Rules
/// - No match type, or an unrecognized one → no threshold
/// - `below` / `above` → `total` is required
pub fn validate_threshold(
    match_type: Option<&str>,
    total: Option<Decimal>,
) -> ValidationResult<(Option<MatchType>, Decimal)> {
    let Some(raw) = match_type else {
        return Ok((None, total.unwrap_or_default()));
    };

    match MatchType::parse(raw) {
        Some(match_type) => Ok((Some(match_type), require_amount("total", total)?)),
        None => {
            debug!(match_type = %raw, "Unrecognized match type, rule matches unconditionally");
            Ok((None, total.unwrap_or_default()))
        }
    }
}

// =============================================================================
// Record Conversions
// =============================================================================

impl TryFrom<ConditionRecord> for RuleCondition {
    type Error = ValidationError;

    fn try_from(record: ConditionRecord) -> ValidationResult<Self> {
        let attribute = require_text("attribute", record.attribute.as_deref())?.to_string();
        let operator = Operator::from(require_text("operator", record.operator.as_deref())?);

        Ok(RuleCondition {
            attribute,
            operator,
            value: record.value.unwrap_or_default(),
            priority: record.priority.unwrap_or_default(),
        })
    }
}

impl TryFrom<RuleRecord> for Rule {
    type Error = ValidationError;

    fn try_from(record: RuleRecord) -> ValidationResult<Self> {
        let fee_type = validate_fee_type(record.fee_type.as_deref())?;
        let fee = require_amount("fee", record.fee)?;
        let (match_type, total) = validate_threshold(record.match_type.as_deref(), record.total)?;

        let conditions = record
            .conditions
            .map(|conditions| {
                conditions
                    .into_iter()
                    .map(RuleCondition::try_from)
                    .collect::<ValidationResult<Vec<_>>>()
            })
            .transpose()?;

        Ok(Rule {
            name: record.name,
            fee_type,
            fee,
            match_type,
            total,
            conditions,
        })
    }
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a batch of rule records.
///
/// Fails on the first invalid record, reporting its position.
pub fn validate_rules(
    records: impl IntoIterator<Item = RuleRecord>,
) -> Result<Vec<Rule>, CommissionError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Rule::try_from(record).map_err(|source| CommissionError::InvalidRule { index, source })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
