use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{CriteriaError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `ASC` in any case is ascending; anything else is descending.
    #[must_use]
    pub fn from_order(order: &str) -> Self {
        if order.eq_ignore_ascii_case("ASC") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl From<SortDirection> for sea_orm::Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

/// Where null values go in the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NullHandling {
    /// Whatever the database does by default.
    #[default]
    Native,
    NullsFirst,
    NullsLast,
}

impl NullHandling {
    #[must_use]
    pub const fn null_ordering(self) -> Option<sea_orm::sea_query::NullOrdering> {
        match self {
            Self::Native => None,
            Self::NullsFirst => Some(sea_orm::sea_query::NullOrdering::First),
            Self::NullsLast => Some(sea_orm::sea_query::NullOrdering::Last),
        }
    }
}

/// One requested sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub key: String,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub null_handling: NullHandling,
    #[serde(default)]
    pub ignore_case: bool,
}

impl SortOrder {
    /// Ascending, native nulls, case-sensitive.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
            null_handling: NullHandling::Native,
            ignore_case: false,
        }
    }

    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key)
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self::new(key).with_direction(SortDirection::Desc)
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn with_null_handling(mut self, null_handling: NullHandling) -> Self {
        self.null_handling = null_handling;
        self
    }

    #[must_use]
    pub const fn nulls_first(self) -> Self {
        self.with_null_handling(NullHandling::NullsFirst)
    }

    #[must_use]
    pub const fn nulls_last(self) -> Self {
        self.with_null_handling(NullHandling::NullsLast)
    }

    #[must_use]
    pub const fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Parse `key[,asc|desc][,ignorecase][,nullsfirst|nullslast|nativenulls]`.
    ///
    /// Modifier tokens are case-insensitive and may come in any order.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::InvalidSortParameter`] for an empty key or an unknown modifier.
    pub fn parse(entry: &str) -> Result<Self> {
        let mut tokens = entry.split(',').map(str::trim);
        let key = tokens.next().unwrap_or_default();
        if key.is_empty() {
            return Err(CriteriaError::InvalidSortParameter(entry.to_string()));
        }

        let mut order = Self::new(key);
        for token in tokens {
            order = match token.to_ascii_lowercase().as_str() {
                "asc" => order.with_direction(SortDirection::Asc),
                "desc" => order.with_direction(SortDirection::Desc),
                "ignorecase" => order.ignore_case(),
                "nullsfirst" => order.nulls_first(),
                "nullslast" => order.nulls_last(),
                "nativenulls" => order.with_null_handling(NullHandling::Native),
                _ => return Err(CriteriaError::InvalidSortParameter(token.to_string())),
            };
        }
        Ok(order)
    }
}

/// An ordered sequence of requested sort keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortRequest {
    orders: Vec<SortOrder>,
}

impl SortRequest {
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// A request for a single key.
    #[must_use]
    pub fn by(order: SortOrder) -> Self {
        Self {
            orders: vec![order],
        }
    }

    /// Append a lower-priority key.
    #[must_use]
    pub fn then(mut self, order: SortOrder) -> Self {
        self.orders.push(order);
        self
    }

    #[must_use]
    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SortOrder> {
        self.orders.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Parse `;`-separated entries, each in [`SortOrder::parse`] syntax. Blank entries are
    /// skipped, so an empty string is an empty request.
    ///
    /// ```rust
    /// use criteriacrate::sort::{NullHandling, SortDirection, SortRequest};
    ///
    /// let request = SortRequest::parse("name,desc,ignorecase; created_at,nullslast").unwrap();
    /// assert_eq!(request.len(), 2);
    /// assert_eq!(request.orders()[0].direction, SortDirection::Desc);
    /// assert!(request.orders()[0].ignore_case);
    /// assert_eq!(request.orders()[1].null_handling, NullHandling::NullsLast);
    /// ```
    ///
    /// # Errors
    ///
    /// [`CriteriaError::InvalidSortParameter`] for a malformed entry.
    pub fn parse(input: &str) -> Result<Self> {
        input
            .split(';')
            .filter(|entry| !entry.trim().is_empty())
            .map(SortOrder::parse)
            .collect()
    }

    /// Parse repeated `sort=` parameter values, in order.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::InvalidSortParameter`] for a malformed value.
    pub fn from_params<I, S>(params: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut request = Self::new();
        for param in params {
            request.orders.extend(Self::parse(param.as_ref())?.orders);
        }
        Ok(request)
    }
}

impl FromIterator<SortOrder> for SortRequest {
    fn from_iter<I: IntoIterator<Item = SortOrder>>(iter: I) -> Self {
        Self {
            orders: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<SortOrder>> for SortRequest {
    fn from(orders: Vec<SortOrder>) -> Self {
        Self { orders }
    }
}

impl<'a> IntoIterator for &'a SortRequest {
    type Item = &'a SortOrder;
    type IntoIter = std::slice::Iter<'a, SortOrder>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}
