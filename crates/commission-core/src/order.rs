//! # Order Attribute Lookup
//!
//! The calculator never loads orders. It only asks the host for string-valued
//! attributes by name, through the [`Order`] trait.
//!
//! ```text
//! ┌──────────────────┐   attribute("order_type")   ┌──────────────────────┐
//! │ ConditionEvaluator│ ───────────────────────────► │ host Order impl      │
//! │                  │ ◄─────────────────────────── │ (ORM model, map, ..) │
//! └──────────────────┘   Ok("Delivery") / Err(..)  └──────────────────────┘
//! ```
//!
//! Lookup failures are returned, not swallowed, and abort the calculation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::AttributeError;

/// Attribute lookup capability of an order.
pub trait Order {
    /// Returns the raw attribute value. Normalization (trim + lowercase) is
    /// done by the evaluator, not the implementor.
    fn attribute(&self, name: &str) -> Result<String, AttributeError>;
}

impl<T: Order + ?Sized> Order for &T {
    fn attribute(&self, name: &str) -> Result<String, AttributeError> {
        (**self).attribute(name)
    }
}

/// In-memory order backed by a map of attribute names to values.
///
/// ## Example
/// ```rust
/// use commission_core::order::{AttributeMap, Order};
///
/// let order = AttributeMap::new().with("order_type", "delivery");
/// assert_eq!(order.attribute("order_type").unwrap(), "delivery");
/// assert!(order.attribute("location").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap {
    attributes: HashMap<String, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        AttributeMap::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AttributeMap {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Order for AttributeMap {
    fn attribute(&self, name: &str) -> Result<String, AttributeError> {
        self.attributes
            .get(name)
            .cloned()
            .ok_or_else(|| AttributeError::Missing {
                attribute: name.to_string(),
            })
    }
}
