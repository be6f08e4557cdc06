//! Alias-based sort resolution.
//!
//! A [`SortConfig`] maps externally visible sort keys to concrete columns or select-list
//! positions. [`SortConfig::resolve`] turns a caller's [`SortRequest`] into
//! [`ResolvedSortColumn`]s, which [`apply_sort`] appends to any sea-orm query.
//!
//! Requests come from [`SortParams`] (React Admin or REST query parameters) or from
//! [`SortRequest::parse`]; configurations from the builder or from [`SortSettings`].

mod apply;
mod column;
mod config;
mod params;
mod request;
mod settings;

pub use apply::apply_sort;
pub use column::{ColumnRef, SortableColumn};
pub use config::{ResolvedSortColumn, SortConfig, SortConfigBuilder, SortTarget};
pub use params::SortParams;
pub use request::{NullHandling, SortDirection, SortOrder, SortRequest};
pub use settings::{AliasSettings, SortSettings};
