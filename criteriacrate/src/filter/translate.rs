//! Filter → query-parameter translation.

use super::condition::filter_condition;
use super::format::{Formatters, QueryValue};
use super::query_param::QueryParam;
use super::value::{FilterValue, Operand};
use sea_orm::Condition;

/// Translate a filter into query parameters named `param_name.operator`.
///
/// Operators are emitted in [`FilterOperator::ALL`](super::FilterOperator::ALL) order.
/// Element values go through `element_formatter`, the `specified` and `ignoreCase` flags
/// through `bool_formatter`. `in`/`notIn` produce one multi-valued parameter each.
///
/// ```rust
/// use criteriacrate::filter::{IntegerFilter, translate};
///
/// let filter = IntegerFilter::new().with_in([1, 2]).with_greater_than(0);
/// let params = translate("id", &filter, |v| v.to_string(), |b| b.to_string());
///
/// assert_eq!(params[0].name(), "id.in");
/// assert_eq!(params[0].joined(), "1,2");
/// assert!(params[0].value().is_err());
/// assert_eq!(params[1].value().unwrap(), "0");
/// ```
pub fn translate<F, E, B>(
    param_name: &str,
    filter: &F,
    element_formatter: E,
    bool_formatter: B,
) -> Vec<QueryParam>
where
    F: FilterValue + ?Sized,
    E: Fn(&F::Element) -> String,
    B: Fn(bool) -> String,
{
    filter
        .operands()
        .into_iter()
        .map(|(operator, operand)| {
            let values = match operand {
                Operand::Single(value) => vec![element_formatter(value)],
                Operand::Many(values) => values.iter().map(&element_formatter).collect(),
                Operand::Flag(flag) => vec![bool_formatter(flag)],
            };
            QueryParam::new(format!("{param_name}.{operator}"), values)
        })
        .collect()
}

/// Type-erased view of a filter, as read from a criteria member.
pub trait FilterParams {
    /// Translate through the per-type formatter registry.
    fn query_params(&self, param_name: &str, formatters: &Formatters) -> Vec<QueryParam>;

    /// Build the `Condition` this filter applies to `column`.
    fn condition(&self, column: &str) -> Condition;

    /// `true` when no comparison operator is present.
    fn is_empty(&self) -> bool;
}

impl<F> FilterParams for F
where
    F: FilterValue,
    F::Element: QueryValue + Clone + Into<sea_orm::Value>,
{
    fn query_params(&self, param_name: &str, formatters: &Formatters) -> Vec<QueryParam> {
        translate(
            param_name,
            self,
            |value| formatters.format(value),
            |flag| formatters.format_bool(flag),
        )
    }

    fn condition(&self, column: &str) -> Condition {
        filter_condition(self, column)
    }

    fn is_empty(&self) -> bool {
        FilterValue::is_empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{BooleanFilter, Filter, IntegerFilter, StringFilter};

    fn display<T: ToString>(value: &T) -> String {
        value.to_string()
    }

    fn names(params: &[QueryParam]) -> Vec<&str> {
        params.iter().map(QueryParam::name).collect()
    }

    #[test]
    fn test_empty_filter_translates_to_nothing() {
        let params = translate("x", &Filter::<i32>::new(), display, |b| b.to_string());
        assert!(params.is_empty());
    }

    #[test]
    fn test_multi_valued_in_list() {
        let filter = Filter::<i32>::new().with_in([1, 2]);
        let params = translate("x", &filter, display, |b| b.to_string());

        assert_eq!(params.len(), 1);
        assert!(params[0].value().is_err());
        assert_eq!(params[0].values(), ["1", "2"]);
        assert_eq!(params[0].joined(), "1,2");
    }

    #[test]
    fn test_full_operator_order() {
        let filter = IntegerFilter::new()
            .with_equals(1)
            .with_not_equals(2)
            .with_in([3])
            .with_not_in([4])
            .with_specified(true)
            .with_greater_than(5)
            .with_greater_than_or_equal(6)
            .with_less_than(7)
            .with_less_than_or_equal(8);
        let params = translate("n", &filter, display, |b| b.to_string());

        assert_eq!(
            names(&params),
            vec![
                "n.equals",
                "n.notEquals",
                "n.in",
                "n.notIn",
                "n.specified",
                "n.greaterThan",
                "n.greaterThanOrEqual",
                "n.lessThan",
                "n.lessThanOrEqual",
            ]
        );
    }

    #[test]
    fn test_text_operators_and_ignore_case() {
        let filter = StringFilter::new()
            .with_equals("a")
            .with_contains("b")
            .with_not_contains("c")
            .with_ignore_case(false);
        let params = translate("s", &filter, display, |b| (if b { "Y" } else { "N" }).to_owned());

        assert_eq!(
            names(&params),
            vec!["s.equals", "s.contains", "s.notContains", "s.ignoreCase"]
        );
        assert_eq!(params[3].value().unwrap(), "N");
    }

    #[test]
    fn test_ignore_case_default_is_elided() {
        let filter = StringFilter::new().with_contains("b");
        let params = translate("s", &filter, display, |b| b.to_string());
        assert_eq!(names(&params), vec!["s.contains"]);
    }

    #[test]
    fn test_flags_use_bool_formatter() {
        let filter = Filter::<i32>::new().with_specified(false);
        let params = translate("x", &filter, display, |b| u8::from(b).to_string());
        assert_eq!(params[0].value().unwrap(), "0");
    }

    #[test]
    fn test_erased_translation_uses_registry() {
        let filter = BooleanFilter::new().with_equals(true).with_specified(true);
        let formatters = Formatters::new().with_bool(|b| (if b { "on" } else { "off" }).to_owned());
        let erased: &dyn FilterParams = &filter;

        let params = erased.query_params("active", &formatters);
        assert_eq!(params[0].value().unwrap(), "on");
        assert_eq!(params[1].value().unwrap(), "on");
        assert!(!erased.is_empty());
    }
}
