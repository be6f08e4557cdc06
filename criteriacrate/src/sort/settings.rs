//! Sort configuration loaded from settings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::column::ColumnRef;
use super::config::{SortConfig, SortConfigBuilder};
use super::request::{SortOrder, SortRequest};
use crate::errors::Result;

/// One alias entry. `columns` wins when both lists are given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasSettings {
    pub alias: String,
    pub columns: Vec<String>,
    pub positions: Vec<u32>,
}

/// Serializable form of a [`SortConfig`] over named columns.
///
/// ```rust
/// use criteriacrate::sort::{SortConfig, SortRequest, SortSettings};
///
/// let settings: SortSettings = serde_json::from_str(r#"{
///     "aliases": [
///         {"alias": "name", "columns": ["last_name", "first_name"]},
///         {"alias": "rank", "positions": [2]}
///     ],
///     "text_columns": ["last_name", "first_name"],
///     "default_sort": ["rank,desc"],
///     "error_on_alias_not_found": false
/// }"#)?;
///
/// let config = SortConfig::from_settings(&settings)?;
/// let resolved = config.resolve(&SortRequest::parse("name,ignorecase")?, None)?;
/// assert!(resolved[0].ignore_case);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSettings {
    pub aliases: Vec<AliasSettings>,
    /// Columns eligible for case-insensitive ordering.
    pub text_columns: BTreeSet<String>,
    /// Default request entries, in [`SortRequest::parse`] syntax.
    pub default_sort: Vec<String>,
    /// Default literal ordering, each `column[,asc|desc]`.
    pub default_columns: Vec<String>,
    pub case_insensitive_sort: bool,
    pub null_handling: bool,
    pub error_on_property_not_found: bool,
    pub error_on_alias_not_found: bool,
}

impl Default for SortSettings {
    fn default() -> Self {
        Self {
            aliases: Vec::new(),
            text_columns: BTreeSet::new(),
            default_sort: Vec::new(),
            default_columns: Vec::new(),
            case_insensitive_sort: true,
            null_handling: true,
            error_on_property_not_found: true,
            error_on_alias_not_found: true,
        }
    }
}

impl SortSettings {
    fn column(&self, name: &str) -> ColumnRef {
        if self.text_columns.contains(name) {
            ColumnRef::text(name)
        } else {
            ColumnRef::new(name)
        }
    }
}

impl SortConfig<ColumnRef> {
    /// Build a configuration from settings, through the same builder checks.
    ///
    /// # Errors
    ///
    /// Duplicate aliases and conflicting defaults fail as they do on the builder; malformed
    /// default entries fail with [`CriteriaError::InvalidSortParameter`](crate::CriteriaError::InvalidSortParameter).
    pub fn from_settings(settings: &SortSettings) -> Result<Self> {
        let mut builder: SortConfigBuilder<ColumnRef> = Self::builder()
            .case_insensitive_sort(settings.case_insensitive_sort)
            .null_handling(settings.null_handling)
            .error_on_property_not_found(settings.error_on_property_not_found)
            .error_on_alias_not_found(settings.error_on_alias_not_found);

        for entry in &settings.aliases {
            builder = if entry.columns.is_empty() {
                builder.alias_positions(entry.alias.as_str(), entry.positions.iter().copied())?
            } else {
                let columns = entry.columns.iter().map(|name| settings.column(name));
                builder.alias(entry.alias.as_str(), columns)?
            };
        }

        if !settings.default_sort.is_empty() {
            builder = builder.default_request(SortRequest::from_params(&settings.default_sort)?)?;
        }
        if !settings.default_columns.is_empty() {
            let columns = settings
                .default_columns
                .iter()
                .map(|entry| {
                    let order = SortOrder::parse(entry)?;
                    Ok((settings.column(&order.key), order.direction))
                })
                .collect::<Result<Vec<_>>>()?;
            builder = builder.default_columns(columns)?;
        }

        Ok(builder.build())
    }
}
