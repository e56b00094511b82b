//! # Error Types
//!
//! Domain-specific error types for commission-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  commission-core errors (this file)                                    │
//! │  ├── CommissionError  - Anything that aborts calculate()               │
//! │  ├── ValidationError  - Malformed rule / condition records             │
//! │  ├── AttributeError   - Order could not resolve an attribute           │
//! │  └── HookError        - A caller-supplied hook failed                  │
//! │                                                                         │
//! │  commission-cli errors (separate crate)                                │
//! │  └── CliError         - Scenario file, config, output failures         │
//! │                                                                         │
//! │  Flow: ValidationError / AttributeError / HookError / overflow         │
//! │          → CommissionError → CliError → exit code                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, attribute, rule index)
//! 3. Errors are enum variants, never String
//! 4. There is no partial result: any error fails the whole calculation

use thiserror::Error;

// =============================================================================
// Commission Error
// =============================================================================

/// Errors that abort a commission calculation.
///
/// All of these surface synchronously from `calculate()`. Nothing is retried,
/// the pipeline is deterministic so a failure is never transient.
#[derive(Debug, Error)]
pub enum CommissionError {
    /// A rule record failed boundary validation.
    ///
    /// ## When This Occurs
    /// - `fee_type` or `fee` missing
    /// - `fee_type` is neither `percent` nor `flat`
    /// - A threshold match type without a `total`
    /// - One of the rule's conditions is malformed
    #[error("Invalid rule at index {index}: {source}")]
    InvalidRule {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// The order could not resolve an attribute a condition asked for.
    #[error("Order attribute lookup failed: {0}")]
    Attribute(#[from] AttributeError),

    /// A `before_filter` or `when_matched` hook returned an error.
    #[error("Hook failed: {0}")]
    Hook(#[from] HookError),

    /// A rule carries conditions but no order was configured to test them.
    #[error("Rule conditions require an order, but none was configured")]
    OrderNotConfigured,

    /// A sum or product left the range `Decimal` can represent.
    ///
    /// ## When This Occurs
    /// - Total lines large enough that their sum overflows
    /// - A percentage fee multiplied by a huge order total
    /// - Matched fees or include adjustments summing past the maximum
    #[error("Arithmetic overflow while computing {context}")]
    Overflow { context: String },
}

impl CommissionError {
    pub fn overflow(context: impl Into<String>) -> Self {
        CommissionError::Overflow {
            context: context.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when inbound rule or condition records don't have the shape the
/// calculator needs. Raised at the boundary, before any fee math runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Attribute Error
// =============================================================================

/// Failure to resolve an order attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// The order has no attribute with this name.
    #[error("attribute '{attribute}' not found on order")]
    Missing { attribute: String },

    /// The order's backing store failed while resolving the attribute.
    #[error("attribute '{attribute}' could not be read: {reason}")]
    Lookup { attribute: String, reason: String },
}

// =============================================================================
// Hook Error
// =============================================================================

/// Error returned by a caller-supplied hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    pub message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        HookError {
            message: message.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CommissionError.
pub type CoreResult<T> = Result<T, CommissionError>;

// =============================================================================
// Unit Tests
// =============================================================================
