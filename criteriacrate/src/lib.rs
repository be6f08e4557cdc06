//! # criteriacrate
//!
//! Declare a criteria struct once and derive from it the query parameters, the filter
//! conditions and the sort ordering of a REST listing endpoint backed by sea-orm.
//!
//! ```rust
//! use criteriacrate::filter::{Formatters, IntegerFilter, StringFilter};
//! use criteriacrate::Criteria;
//!
//! #[derive(Criteria, Default)]
//! struct ProductCriteria {
//!     name: Option<StringFilter>,
//!     #[criteria(alias = "cost")]
//!     price: Option<IntegerFilter>,
//!     #[criteria(include)]
//!     tags: Vec<String>,
//!     #[criteria(ignore)]
//!     internal: Option<StringFilter>,
//! }
//!
//! let criteria = ProductCriteria {
//!     name: Some(StringFilter::new().with_contains("lamp")),
//!     price: Some(IntegerFilter::between(10, 50)),
//!     tags: vec!["desk".into(), "led".into()],
//!     ..Default::default()
//! };
//!
//! let params = criteria.to_query_params(&Formatters::new())?;
//! assert_eq!(
//!     params.to_query_string(),
//!     "name.contains=lamp&cost.greaterThanOrEqual=10&cost.lessThanOrEqual=50&tags=desk%2Cled"
//! );
//! assert_eq!(criteria.filter_bindings()?.len(), 2);
//! # Ok::<(), criteriacrate::CriteriaError>(())
//! ```
//!
//! ## Attributes
//!
//! | Attribute | On | Effect |
//! |---|---|---|
//! | `ignore` (`skip`, `exclude`) | field, method | Never extracted, whatever else is set |
//! | `include` | field, method | Extracted even when not a filter |
//! | `alias = "name"` | field, method | Query-parameter name; implies `include` |
//! | `element = Type` | collection field | Element type recorded in the descriptor |
//! | `filter` | field, method | Treat a custom type as a filter |
//! | `base` | field | Embedded base criteria, whose members are inherited |
//! | `methods` | struct | Read accessors from a `#[criteria_methods]` impl block |
//!
//! Filter-typed fields (`StringFilter`, `IntegerFilter`, ...) are extracted without
//! annotation. Descriptors are computed once per type; see [`metadata::extract`].
//!
//! ## Sorting
//!
//! [`sort::SortConfig`] maps sort keys to columns through an alias table, with defaults,
//! case-insensitive ordering and null placement; [`sort::apply_sort`] writes the result
//! into a sea-orm query.

pub mod errors;
pub mod filter;
pub mod metadata;
pub mod sort;

pub use errors::{CriteriaError, Result};
pub use metadata::{Criteria, CriteriaDescriptor, CriteriaMethods, MemberDescriptor};

#[cfg(feature = "derive")]
pub use criteriacrate_derive::*;
