//! Filter value holders.
//!
//! A filter expresses which comparison operators a caller wants applied to one attribute.
//! Every operator is independently optional: an absent operator is simply not applied, and a
//! filter with every operator absent contributes nothing.
//!
//! - [`Filter`]: equality, set membership and presence, for any element type.
//! - [`RangeFilter`]: adds `greaterThan`, `greaterThanOrEqual`, `lessThan`, `lessThanOrEqual`
//!   for ordered element types.
//! - [`StringFilter`]: adds `contains`, `notContains` and `ignoreCase` for text.
//!
//! The typed aliases ([`IntegerFilter`], [`InstantFilter`], ...) cover the usual column types.
//!
//! Filters deserialize from JSON objects keyed by operator name:
//!
//! ```rust
//! use criteriacrate::filter::{IntegerFilter, StringFilter};
//!
//! let price: IntegerFilter = serde_json::from_str(r#"{"greaterThan": 10, "in": [20, 30]}"#).unwrap();
//! assert_eq!(price.greater_than, Some(10));
//! assert_eq!(price.in_values, Some(vec![20, 30]));
//!
//! let name: StringFilter = serde_json::from_str(r#"{"contains": "ali"}"#).unwrap();
//! assert!(name.ignore_case);
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};
use uuid::Uuid;

/// Operators a filter can carry, in the order they are evaluated and emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    In,
    NotIn,
    Specified,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Contains,
    NotContains,
    IgnoreCase,
}

impl FilterOperator {
    /// Every operator in evaluation order.
    pub const ALL: [Self; 12] = [
        Self::Equals,
        Self::NotEquals,
        Self::In,
        Self::NotIn,
        Self::Specified,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::Contains,
        Self::NotContains,
        Self::IgnoreCase,
    ];

    /// The operator name used as query-parameter suffix (`price.greaterThan`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::Specified => "specified",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::IgnoreCase => "ignoreCase",
        }
    }

    /// Parse an operator from its query-parameter name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operator| operator.name() == name)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value carried by one present operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a, T> {
    Single(&'a T),
    Many(&'a [T]),
    Flag(bool),
}

/// Typed access to the present operators of a filter.
///
/// Implementations list operators in [`FilterOperator::ALL`] order; the translator and the
/// condition builder both rely on that order.
pub trait FilterValue {
    type Element;

    /// The present operators, in evaluation order.
    fn operands(&self) -> Vec<(FilterOperator, Operand<'_, Self::Element>)>;

    /// Whether text comparisons should ignore case.
    fn ignore_case(&self) -> bool {
        false
    }

    /// `true` when no comparison operator is present. A lone `ignoreCase` flag does not count.
    fn is_empty(&self) -> bool {
        self.operands()
            .iter()
            .all(|(operator, _)| *operator == FilterOperator::IgnoreCase)
    }
}

/// Equality, set-membership and presence operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filter<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<T>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub in_values: Option<Vec<T>>,
    #[serde(rename = "notIn", skip_serializing_if = "Option::is_none")]
    pub not_in_values: Option<Vec<T>>,
    /// `Some(true)` requires a value, `Some(false)` requires its absence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specified: Option<bool>,
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            in_values: None,
            not_in_values: None,
            specified: None,
        }
    }
}

impl<T> Filter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn base_operands(&self) -> Vec<(FilterOperator, Operand<'_, T>)> {
        let mut operands = Vec::new();
        if let Some(value) = &self.equals {
            operands.push((FilterOperator::Equals, Operand::Single(value)));
        }
        if let Some(value) = &self.not_equals {
            operands.push((FilterOperator::NotEquals, Operand::Single(value)));
        }
        if let Some(values) = &self.in_values {
            operands.push((FilterOperator::In, Operand::Many(values.as_slice())));
        }
        if let Some(values) = &self.not_in_values {
            operands.push((FilterOperator::NotIn, Operand::Many(values.as_slice())));
        }
        if let Some(specified) = self.specified {
            operands.push((FilterOperator::Specified, Operand::Flag(specified)));
        }
        operands
    }
}

impl<T> FilterValue for Filter<T> {
    type Element = T;

    fn operands(&self) -> Vec<(FilterOperator, Operand<'_, T>)> {
        self.base_operands()
    }
}

/// Builder methods for the operators every filter carries.
macro_rules! base_filter_builders {
    ($element:ty) => {
        #[must_use]
        pub fn with_equals(mut self, value: impl Into<$element>) -> Self {
            self.equals = Some(value.into());
            self
        }

        #[must_use]
        pub fn with_not_equals(mut self, value: impl Into<$element>) -> Self {
            self.not_equals = Some(value.into());
            self
        }

        #[must_use]
        pub fn with_in<I, V>(mut self, values: I) -> Self
        where
            I: IntoIterator<Item = V>,
            V: Into<$element>,
        {
            self.in_values = Some(values.into_iter().map(Into::into).collect());
            self
        }

        #[must_use]
        pub fn with_not_in<I, V>(mut self, values: I) -> Self
        where
            I: IntoIterator<Item = V>,
            V: Into<$element>,
        {
            self.not_in_values = Some(values.into_iter().map(Into::into).collect());
            self
        }

        #[must_use]
        pub fn with_specified(mut self, specified: bool) -> Self {
            self.specified = Some(specified);
            self
        }
    };
}

impl<T> Filter<T> {
    base_filter_builders!(T);
}

/// [`Filter`] plus range operators for ordered element types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RangeFilter<T> {
    #[serde(flatten)]
    pub filter: Filter<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub less_than: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            greater_than: None,
            greater_than_or_equal: None,
            less_than: None,
            less_than_or_equal: None,
        }
    }
}

impl<T> RangeFilter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive range: `lower <= value <= upper`.
    #[must_use]
    pub fn between(lower: impl Into<T>, upper: impl Into<T>) -> Self {
        Self::new()
            .with_greater_than_or_equal(lower)
            .with_less_than_or_equal(upper)
    }

    base_filter_builders!(T);

    #[must_use]
    pub fn with_greater_than(mut self, value: impl Into<T>) -> Self {
        self.greater_than = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_greater_than_or_equal(mut self, value: impl Into<T>) -> Self {
        self.greater_than_or_equal = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_less_than(mut self, value: impl Into<T>) -> Self {
        self.less_than = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_less_than_or_equal(mut self, value: impl Into<T>) -> Self {
        self.less_than_or_equal = Some(value.into());
        self
    }
}

impl<T> FilterValue for RangeFilter<T> {
    type Element = T;

    fn operands(&self) -> Vec<(FilterOperator, Operand<'_, T>)> {
        let mut operands = self.filter.base_operands();
        let range = [
            (FilterOperator::GreaterThan, &self.greater_than),
            (FilterOperator::GreaterThanOrEqual, &self.greater_than_or_equal),
            (FilterOperator::LessThan, &self.less_than),
            (FilterOperator::LessThanOrEqual, &self.less_than_or_equal),
        ];
        for (operator, value) in range {
            if let Some(value) = value {
                operands.push((operator, Operand::Single(value)));
            }
        }
        operands
    }
}

impl<T> Deref for RangeFilter<T> {
    type Target = Filter<T>;

    fn deref(&self) -> &Filter<T> {
        &self.filter
    }
}

impl<T> DerefMut for RangeFilter<T> {
    fn deref_mut(&mut self) -> &mut Filter<T> {
        &mut self.filter
    }
}

const fn default_ignore_case() -> bool {
    true
}

/// [`Filter`] over text plus substring operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StringFilter {
    #[serde(flatten)]
    pub filter: Filter<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_contains: Option<String>,
    /// Applies to `contains` and `notContains`. Defaults to `true`.
    #[serde(default = "default_ignore_case")]
    pub ignore_case: bool,
}

impl Default for StringFilter {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            contains: None,
            not_contains: None,
            ignore_case: default_ignore_case(),
        }
    }
}

impl StringFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    base_filter_builders!(String);

    #[must_use]
    pub fn with_contains(mut self, value: impl Into<String>) -> Self {
        self.contains = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_not_contains(mut self, value: impl Into<String>) -> Self {
        self.not_contains = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}

impl FilterValue for StringFilter {
    type Element = String;

    fn operands(&self) -> Vec<(FilterOperator, Operand<'_, String>)> {
        let mut operands = self.filter.base_operands();
        if let Some(value) = &self.contains {
            operands.push((FilterOperator::Contains, Operand::Single(value)));
        }
        if let Some(value) = &self.not_contains {
            operands.push((FilterOperator::NotContains, Operand::Single(value)));
        }
        // `true` is the default and is left implicit
        if !self.ignore_case {
            operands.push((FilterOperator::IgnoreCase, Operand::Flag(false)));
        }
        operands
    }

    fn ignore_case(&self) -> bool {
        self.ignore_case
    }
}

impl Deref for StringFilter {
    type Target = Filter<String>;

    fn deref(&self) -> &Filter<String> {
        &self.filter
    }
}

impl DerefMut for StringFilter {
    fn deref_mut(&mut self) -> &mut Filter<String> {
        &mut self.filter
    }
}

pub type BooleanFilter = Filter<bool>;
pub type UuidFilter = Filter<Uuid>;
pub type IntegerFilter = RangeFilter<i32>;
pub type LongFilter = RangeFilter<i64>;
pub type FloatFilter = RangeFilter<f32>;
pub type DoubleFilter = RangeFilter<f64>;
pub type LocalDateFilter = RangeFilter<NaiveDate>;
pub type InstantFilter = RangeFilter<DateTime<Utc>>;
