//! Alias table configuration and sort resolution.

use std::collections::HashMap;

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use tracing::{debug, info, warn};

use super::column::SortableColumn;
use super::request::{NullHandling, SortDirection, SortOrder, SortRequest};
use crate::errors::{CriteriaError, Result};

/// What an alias or a resolved entry orders by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortTarget<C> {
    Column(C),
    /// A 1-based position in the select list.
    Position(u32),
}

/// One concrete ordering directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSortColumn<C> {
    pub target: SortTarget<C>,
    pub direction: SortDirection,
    pub null_handling: NullHandling,
    /// Order by the upper-cased value. Only ever set on textual columns.
    pub ignore_case: bool,
}

impl<C: SortableColumn> ResolvedSortColumn<C> {
    /// Ascending, native nulls, case-sensitive.
    pub const fn column(column: C) -> Self {
        Self {
            target: SortTarget::Column(column),
            direction: SortDirection::Asc,
            null_handling: NullHandling::Native,
            ignore_case: false,
        }
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// The column name, or the position rendered as text.
    #[must_use]
    pub fn name(&self) -> String {
        match &self.target {
            SortTarget::Column(column) => column.column_name().to_string(),
            SortTarget::Position(position) => position.to_string(),
        }
    }

    /// The expression to order by, case-folded when requested.
    #[must_use]
    pub fn order_expr(&self) -> SimpleExpr {
        match &self.target {
            SortTarget::Column(column) if self.ignore_case => Func::upper(column.order_expr()).into(),
            SortTarget::Column(column) => column.order_expr(),
            SortTarget::Position(position) => Expr::cust(position.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
enum DefaultOrdering<C> {
    Request(SortRequest),
    Columns(Vec<ResolvedSortColumn<C>>),
}

/// Immutable sort configuration. Built with [`SortConfig::builder`].
#[derive(Debug, Clone)]
pub struct SortConfig<C> {
    aliases: HashMap<String, Vec<SortTarget<C>>>,
    default_ordering: Option<DefaultOrdering<C>>,
    case_insensitive_sort: bool,
    null_handling: bool,
    error_on_property_not_found: bool,
    error_on_alias_not_found: bool,
}

/// Consuming builder for [`SortConfig`]. Every method returns a new builder.
///
/// ```rust
/// use criteriacrate::sort::{ColumnRef, SortConfig, SortOrder, SortRequest};
///
/// let config = SortConfig::builder()
///     .alias("name", [ColumnRef::text("last_name"), ColumnRef::text("first_name")])?
///     .alias_positions("rank", [2])?
///     .default_request(SortRequest::by(SortOrder::desc("rank")))?
///     .build();
///
/// let resolved = config.resolve(&SortRequest::parse("name,desc")?, None)?;
/// assert_eq!(resolved.len(), 2);
/// assert_eq!(resolved[0].name(), "last_name");
/// # Ok::<(), criteriacrate::CriteriaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SortConfigBuilder<C> {
    config: SortConfig<C>,
}

impl<C: SortableColumn> SortConfig<C> {
    /// All flags enabled, no aliases, no default ordering.
    #[must_use]
    pub fn builder() -> SortConfigBuilder<C> {
        SortConfigBuilder {
            config: Self {
                aliases: HashMap::new(),
                default_ordering: None,
                case_insensitive_sort: true,
                null_handling: true,
                error_on_property_not_found: true,
                error_on_alias_not_found: true,
            },
        }
    }

    #[must_use]
    pub fn has_aliases(&self) -> bool {
        !self.aliases.is_empty()
    }

    /// Targets registered under `alias`.
    #[must_use]
    pub fn alias_targets(&self, alias: &str) -> Option<&[SortTarget<C>]> {
        self.aliases.get(alias).map(Vec::as_slice)
    }

    #[must_use]
    pub const fn case_insensitive_sort_enabled(&self) -> bool {
        self.case_insensitive_sort
    }

    #[must_use]
    pub const fn null_handling_enabled(&self) -> bool {
        self.null_handling
    }

    #[must_use]
    pub const fn errors_on_property_not_found(&self) -> bool {
        self.error_on_property_not_found
    }

    #[must_use]
    pub const fn errors_on_alias_not_found(&self) -> bool {
        self.error_on_alias_not_found
    }

    /// Map a sort request to concrete ordering directives.
    ///
    /// Each key is looked up in the alias table, then in `columns`. A key found in neither
    /// fails when the matching flag is set (the alias flag when aliases are configured, the
    /// property flag otherwise) and is skipped otherwise. When nothing resolves, the default
    /// ordering is used, or an empty ordering when there is none.
    ///
    /// # Errors
    ///
    /// - [`CriteriaError::NoSortTargets`] without aliases and without `columns`.
    /// - [`CriteriaError::SortAliasNotFound`] / [`CriteriaError::SortPropertyNotFound`] for an
    ///   unknown key, depending on the flags.
    pub fn resolve(
        &self,
        request: &SortRequest,
        columns: Option<&[(&str, C)]>,
    ) -> Result<Vec<ResolvedSortColumn<C>>> {
        if self.aliases.is_empty() && columns.is_none() {
            return Err(CriteriaError::NoSortTargets);
        }

        let mut resolved = Vec::new();
        for order in request {
            match self.lookup(&order.key, columns) {
                Some(targets) => {
                    resolved.extend(targets.into_iter().map(|target| self.apply(order, target)));
                }
                None => self.on_miss(&order.key)?,
            }
        }

        if resolved.is_empty() {
            return Ok(self.default_resolution(columns));
        }
        Ok(resolved)
    }

    fn lookup(&self, key: &str, columns: Option<&[(&str, C)]>) -> Option<Vec<SortTarget<C>>> {
        if let Some(targets) = self.aliases.get(key) {
            return Some(targets.clone());
        }
        columns?
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, column)| vec![SortTarget::Column(column.clone())])
    }

    fn on_miss(&self, key: &str) -> Result<()> {
        if self.aliases.is_empty() {
            if self.error_on_property_not_found {
                return Err(CriteriaError::SortPropertyNotFound(key.to_string()));
            }
        } else if self.error_on_alias_not_found {
            return Err(CriteriaError::SortAliasNotFound(key.to_string()));
        }
        info!(key, "Unknown sort key, skipping");
        Ok(())
    }

    fn apply(&self, order: &SortOrder, target: SortTarget<C>) -> ResolvedSortColumn<C> {
        let ignore_case = order.ignore_case && self.folds_case(&order.key, &target);
        let null_handling = if self.null_handling {
            order.null_handling
        } else {
            NullHandling::Native
        };
        ResolvedSortColumn {
            target,
            direction: order.direction,
            null_handling,
            ignore_case,
        }
    }

    fn folds_case(&self, key: &str, target: &SortTarget<C>) -> bool {
        if !self.case_insensitive_sort {
            debug!(key, "Case-insensitive sort disabled, ordering case-sensitively");
            return false;
        }
        match target {
            SortTarget::Column(column) if column.is_textual() => true,
            SortTarget::Column(column) => {
                debug!(key, column = column.column_name(), "Ignoring case fold on non-textual column");
                false
            }
            SortTarget::Position(position) => {
                debug!(key, position, "Ignoring case fold on positional sort");
                false
            }
        }
    }

    fn default_resolution(&self, columns: Option<&[(&str, C)]>) -> Vec<ResolvedSortColumn<C>> {
        match &self.default_ordering {
            Some(DefaultOrdering::Request(request)) => request
                .iter()
                .flat_map(|order| match self.lookup(&order.key, columns) {
                    Some(targets) => targets
                        .into_iter()
                        .map(|target| self.apply(order, target))
                        .collect(),
                    None => {
                        warn!(key = %order.key, "Default sort key does not resolve, skipping");
                        Vec::new()
                    }
                })
                .collect(),
            Some(DefaultOrdering::Columns(defaults)) => defaults.clone(),
            None => Vec::new(),
        }
    }
}

impl<C: SortableColumn> SortConfigBuilder<C> {
    /// Register `alias` for an ordered list of columns.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::DuplicateSortAlias`] when the alias is already registered.
    pub fn alias(self, alias: impl Into<String>, columns: impl IntoIterator<Item = C>) -> Result<Self> {
        self.register(alias.into(), columns.into_iter().map(SortTarget::Column).collect())
    }

    /// Register `alias` for an ordered list of 1-based select-list positions.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::DuplicateSortAlias`] when the alias is already registered.
    pub fn alias_positions(
        self,
        alias: impl Into<String>,
        positions: impl IntoIterator<Item = u32>,
    ) -> Result<Self> {
        self.register(alias.into(), positions.into_iter().map(SortTarget::Position).collect())
    }

    fn register(mut self, alias: String, targets: Vec<SortTarget<C>>) -> Result<Self> {
        if self.config.aliases.contains_key(&alias) {
            return Err(CriteriaError::DuplicateSortAlias(alias));
        }
        self.config.aliases.insert(alias, targets);
        Ok(self)
    }

    /// Resolve this request when nothing else resolves.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::ConflictingDefaultOrdering`] when default columns are already set.
    pub fn default_request(mut self, request: SortRequest) -> Result<Self> {
        if matches!(self.config.default_ordering, Some(DefaultOrdering::Columns(_))) {
            return Err(CriteriaError::ConflictingDefaultOrdering);
        }
        self.config.default_ordering = Some(DefaultOrdering::Request(request));
        Ok(self)
    }

    /// Order by these columns, as given, when nothing else resolves.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::ConflictingDefaultOrdering`] when a default request is already set.
    pub fn default_columns(
        mut self,
        columns: impl IntoIterator<Item = (C, SortDirection)>,
    ) -> Result<Self> {
        if matches!(self.config.default_ordering, Some(DefaultOrdering::Request(_))) {
            return Err(CriteriaError::ConflictingDefaultOrdering);
        }
        let columns = columns
            .into_iter()
            .map(|(column, direction)| ResolvedSortColumn::column(column).with_direction(direction))
            .collect();
        self.config.default_ordering = Some(DefaultOrdering::Columns(columns));
        Ok(self)
    }

    #[must_use]
    pub const fn case_insensitive_sort(mut self, enabled: bool) -> Self {
        self.config.case_insensitive_sort = enabled;
        self
    }

    #[must_use]
    pub const fn null_handling(mut self, enabled: bool) -> Self {
        self.config.null_handling = enabled;
        self
    }

    #[must_use]
    pub const fn error_on_property_not_found(mut self, enabled: bool) -> Self {
        self.config.error_on_property_not_found = enabled;
        self
    }

    #[must_use]
    pub const fn error_on_alias_not_found(mut self, enabled: bool) -> Self {
        self.config.error_on_alias_not_found = enabled;
        self
    }

    #[must_use]
    pub fn build(self) -> SortConfig<C> {
        self.config
    }
}
