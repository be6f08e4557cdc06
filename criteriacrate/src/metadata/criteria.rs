use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use sea_orm::Condition;

use super::cache;
use super::declaration::{Declaration, DeclaredMethod};
use super::descriptor::{CriteriaDescriptor, MemberDescriptor, MemberKind};
use crate::errors::Result;
use crate::filter::{FilterParams, Formatters, QueryParam, QueryParams, QueryValue};

/// A member value, either borrowed from the criteria struct or produced by an accessor.
pub enum MemberRef<'a, T: ?Sized> {
    Borrowed(&'a T),
    Owned(Box<T>),
}

impl<T: ?Sized> Deref for MemberRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Self::Borrowed(value) => value,
            Self::Owned(value) => value,
        }
    }
}

impl<T: ?Sized> fmt::Debug for MemberRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed(_) => f.write_str("Borrowed(..)"),
            Self::Owned(_) => f.write_str("Owned(..)"),
        }
    }
}

/// The live value of one declared member.
#[derive(Debug)]
pub enum MemberValue<'a> {
    /// An optional member holding `None`.
    Absent,
    Scalar(MemberRef<'a, dyn QueryValue>),
    Sequence(Vec<MemberRef<'a, dyn QueryValue>>),
    Filter(MemberRef<'a, dyn FilterParams>),
}

impl<'a> MemberValue<'a> {
    pub fn scalar<T: QueryValue>(value: &'a T) -> Self {
        Self::Scalar(MemberRef::Borrowed(value))
    }

    pub fn owned_scalar<T: QueryValue>(value: T) -> Self {
        Self::Scalar(MemberRef::Owned(Box::new(value)))
    }

    pub fn sequence<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: QueryValue,
    {
        Self::Sequence(
            values
                .into_iter()
                .map(|value| MemberRef::Borrowed(value as &dyn QueryValue))
                .collect(),
        )
    }

    pub fn owned_sequence<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: QueryValue,
    {
        Self::Sequence(
            values
                .into_iter()
                .map(|value| MemberRef::Owned(Box::new(value) as Box<dyn QueryValue>))
                .collect(),
        )
    }

    pub fn filter<F: FilterParams + 'static>(filter: &'a F) -> Self {
        Self::Filter(MemberRef::Borrowed(filter))
    }

    pub fn owned_filter<F: FilterParams + 'static>(filter: F) -> Self {
        Self::Filter(MemberRef::Owned(Box::new(filter)))
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// A non-empty filter member, ready for a condition builder.
#[derive(Debug)]
pub struct FilterBinding<'a> {
    /// Declared member name, used as column name.
    pub name: &'static str,
    pub param_name: String,
    pub filter: MemberRef<'a, dyn FilterParams>,
}

impl FilterBinding<'_> {
    #[must_use]
    pub fn condition(&self) -> Condition {
        self.filter.condition(self.name)
    }
}

/// A struct whose members describe filterable and sortable attributes.
///
/// Usually derived with `#[derive(Criteria)]`; see the crate documentation for the
/// attributes. The two required methods expose the raw declaration and live member values;
/// everything else is provided on top of the cached [`CriteriaDescriptor`].
pub trait Criteria: 'static {
    /// Every declared member with its annotations, including base levels.
    fn declaration() -> Declaration
    where
        Self: Sized;

    /// Read the value of a declared member. `None` when this type has no readable member
    /// of that name.
    fn member_value(&self, kind: MemberKind, name: &str) -> Option<MemberValue<'_>>;

    /// The process-wide descriptor of this type.
    ///
    /// # Errors
    ///
    /// Returns the configuration error found while extracting (a blank alias or method name).
    fn descriptor() -> Result<Arc<CriteriaDescriptor>>
    where
        Self: Sized,
    {
        cache::extract::<Self>()
    }

    /// Render every accepted member that holds a value as query parameters, fields first.
    ///
    /// # Errors
    ///
    /// Fails when the descriptor cannot be extracted.
    fn to_query_params(&self, formatters: &Formatters) -> Result<QueryParams>
    where
        Self: Sized,
    {
        let descriptor = Self::descriptor()?;
        let mut params = QueryParams::new();
        for member in descriptor.members() {
            if let Some(value) = self.member_value(member.kind, member.name) {
                push_member_params(&mut params, member, &value, formatters);
            }
        }
        Ok(params)
    }

    /// `(name, filter)` pairs for every accepted filter member holding a non-empty filter.
    ///
    /// # Errors
    ///
    /// Fails when the descriptor cannot be extracted.
    fn filter_bindings(&self) -> Result<Vec<FilterBinding<'_>>>
    where
        Self: Sized,
    {
        let descriptor = Self::descriptor()?;
        let bindings = descriptor
            .filter_members()
            .filter_map(|member| match self.member_value(member.kind, member.name)? {
                MemberValue::Filter(filter) if !filter.is_empty() => Some(FilterBinding {
                    name: member.name,
                    param_name: member.param_name.clone(),
                    filter,
                }),
                _ => None,
            })
            .collect();
        Ok(bindings)
    }

    /// All filter bindings AND-ed into one condition, each applied to the column named
    /// after its member.
    ///
    /// # Errors
    ///
    /// Fails when the descriptor cannot be extracted.
    fn to_condition(&self) -> Result<Condition>
    where
        Self: Sized,
    {
        Ok(self
            .filter_bindings()?
            .iter()
            .map(FilterBinding::condition)
            .fold(Condition::all(), Condition::add))
    }
}

/// Accessor methods of a criteria type, generated by `#[criteria_methods]` on an inherent impl.
pub trait CriteriaMethods {
    fn declared_methods() -> Vec<DeclaredMethod>
    where
        Self: Sized;

    fn method_value(&self, name: &str) -> Option<MemberValue<'_>>;
}

fn push_member_params(
    params: &mut QueryParams,
    member: &MemberDescriptor,
    value: &MemberValue<'_>,
    formatters: &Formatters,
) {
    match value {
        MemberValue::Absent => {}
        MemberValue::Scalar(value) => {
            params.push(QueryParam::single(
                member.param_name(),
                formatters.format(&**value),
            ));
        }
        MemberValue::Sequence(values) if values.is_empty() => {}
        MemberValue::Sequence(values) => {
            let rendered = values.iter().map(|value| formatters.format(&**value)).collect();
            params.push(QueryParam::new(member.param_name(), rendered));
        }
        MemberValue::Filter(filter) if filter.is_empty() => {}
        MemberValue::Filter(filter) => {
            params.extend(filter.query_params(member.param_name(), formatters));
        }
    }
}
