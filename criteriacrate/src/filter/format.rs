//! Per-type value formatting for query parameters.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A value that can be rendered into a query parameter.
///
/// Implemented for every `Display + 'static` type. [`Formatters`] can override the rendering
/// per concrete type.
pub trait QueryValue: Any {
    fn as_any(&self) -> &dyn Any;

    /// Default rendering, used when no formatter is registered for the type.
    fn render(&self) -> String;
}

impl<T: fmt::Display + Any> QueryValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

type FormatFn = Arc<dyn Fn(&dyn Any) -> Option<String> + Send + Sync>;

/// Immutable registry of caller-supplied formatting functions, keyed by value type.
///
/// ```rust
/// use chrono::NaiveDate;
/// use criteriacrate::filter::Formatters;
///
/// let formatters = Formatters::new()
///     .with(|date: &NaiveDate| date.format("%d/%m/%Y").to_string())
///     .with_bool(|flag| if flag { "1".into() } else { "0".into() });
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(formatters.format(&date), "01/03/2024");
/// assert_eq!(formatters.format_bool(true), "1");
/// assert_eq!(formatters.format(&42), "42");
/// ```
#[derive(Clone, Default)]
pub struct Formatters {
    by_type: HashMap<TypeId, FormatFn>,
}

impl Formatters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the formatter for values of type `T`, replacing any previous one.
    #[must_use]
    pub fn with<T, F>(mut self, formatter: F) -> Self
    where
        T: Any,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let erased: FormatFn =
            Arc::new(move |value: &dyn Any| value.downcast_ref::<T>().map(&formatter));
        self.by_type.insert(TypeId::of::<T>(), erased);
        self
    }

    /// Register the formatter for booleans, including the `specified` and `ignoreCase` flags.
    #[must_use]
    pub fn with_bool<F>(self, formatter: F) -> Self
    where
        F: Fn(bool) -> String + Send + Sync + 'static,
    {
        self.with(move |flag: &bool| formatter(*flag))
    }

    /// Render a value with its registered formatter, or through `Display` when there is none.
    #[must_use]
    pub fn format(&self, value: &dyn QueryValue) -> String {
        let any = value.as_any();
        self.by_type
            .get(&any.type_id())
            .and_then(|formatter| formatter(any))
            .unwrap_or_else(|| value.render())
    }

    #[must_use]
    pub fn format_bool(&self, flag: bool) -> String {
        self.format(&flag)
    }
}

impl fmt::Debug for Formatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatters")
            .field("registered", &self.by_type.len())
            .finish()
    }
}
