//! # commission-core: Pure Commission Calculation
//!
//! Computes the commission fee owed on an order from its total lines, a set
//! of commission rules and a set of split conditions. All functions are pure;
//! the order itself is only reached through the [`order::Order`] trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Commission Calculation                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Host application (ORM, admin UI, commission-cli)         │   │
//! │  │   loads orders, rules, totals ──► hands in-memory records over  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ commission-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌────────────┐  │   │
//! │  │  │ aggregator │ │ conditions │ │   filter   │ │ processor  │  │   │
//! │  │  │ base total │ │ AND of ops │ │ veto/thres │ │ flat / %   │  │   │
//! │  │  └────────────┘ └────────────┘ └────────────┘ └────────────┘  │   │
//! │  │                        calculator                               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (TotalLine, SplitCondition, Rule, ...)
//! - [`records`] - Loosely-shaped inbound rule records
//! - [`validation`] - Record → Rule conversion
//! - [`order`] - Order attribute lookup
//! - [`money`] - Decimal rounding and formatting
//! - [`aggregator`] - Taxable base from total lines
//! - [`conditions`] - Rule condition evaluation
//! - [`filter`] - Rule matching
//! - [`processor`] - Per-rule fee computation
//! - [`calculator`] - The pipeline
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use commission_core::{CommissionCalculator, MatchType, Rule, SplitCondition, TotalLine};
//! use rust_decimal::Decimal;
//!
//! let rule = Rule::percent(Decimal::TEN).with_threshold(MatchType::Above, Decimal::from(50));
//!
//! let mut calculator = CommissionCalculator::new()
//!     .with_rules(vec![rule])
//!     .with_conditions(vec![SplitCondition::split("shipping")])
//!     .with_totals(vec![
//!         TotalLine::new("subtotal", Decimal::from(50)),
//!         TotalLine::new("shipping", Decimal::from(10)),
//!     ]);
//!
//! let result = calculator.calculate().unwrap();
//! assert_eq!(result.order_total, Decimal::new(6000, 2));
//! assert_eq!(result.calculated_fee, Decimal::new(600, 2));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregator;
pub mod calculator;
pub mod conditions;
pub mod error;
pub mod filter;
pub mod money;
pub mod order;
pub mod processor;
pub mod records;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{CommissionCalculator, RuleMatched};
pub use error::{AttributeError, CommissionError, CoreResult, HookError, ValidationError};
pub use filter::BeforeFilter;
pub use order::{AttributeMap, Order};
pub use records::{ConditionRecord, RuleRecord};
pub use types::*;
pub use validation::validate_rules;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Decimal places every monetary result is rounded to.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Total-line code that is always part of the taxable base.
pub const BASE_TOTAL_CODE: &str = "subtotal";
