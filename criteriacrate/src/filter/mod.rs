//! Filter value model, query-parameter translation and condition building.
//!
//! A filter member on a criteria struct holds one of the value types from [`value`]. From
//! there it can be rendered two ways: as `name.operator=value` query parameters through
//! [`translate`] (or the erased [`FilterParams::query_params`]), or as a sea-orm
//! [`Condition`](sea_orm::Condition) through [`filter_condition`].

pub mod condition;
pub mod format;
pub mod query_param;
pub mod translate;
pub mod value;

pub use condition::filter_condition;
pub use format::{Formatters, QueryValue};
pub use query_param::{QueryParam, QueryParams};
pub use translate::{FilterParams, translate};
pub use value::{
    BooleanFilter, DoubleFilter, Filter, FilterOperator, FilterValue, FloatFilter, InstantFilter,
    IntegerFilter, LocalDateFilter, LongFilter, Operand, RangeFilter, StringFilter, UuidFilter,
};
