use sea_orm::{
    Condition, Value,
    sea_query::{Alias, Expr, Func, SimpleExpr},
};

use super::format::QueryValue;
use super::value::{FilterOperator, FilterValue, Operand};

fn column_expr(column: &str) -> Expr {
    Expr::col(Alias::new(column))
}

/// Build a case-insensitive or case-sensitive LIKE expression for substring matching
fn like_expr(column: &str, needle: &str, ignore_case: bool, negate: bool) -> SimpleExpr {
    let (target, pattern) = if ignore_case {
        (
            Expr::expr(Func::upper(column_expr(column))),
            format!("%{}%", needle.to_uppercase()),
        )
    } else {
        (column_expr(column), format!("%{needle}%"))
    };
    if negate {
        target.not_like(pattern)
    } else {
        target.like(pattern)
    }
}

fn operator_expr<T>(
    column: &str,
    operator: FilterOperator,
    operand: Operand<'_, T>,
    ignore_case: bool,
) -> Option<SimpleExpr>
where
    T: QueryValue + Clone + Into<Value>,
{
    let value = |v: &T| -> Value { v.clone().into() };
    let expr = match (operator, operand) {
        (FilterOperator::Equals, Operand::Single(v)) => column_expr(column).eq(value(v)),
        (FilterOperator::NotEquals, Operand::Single(v)) => column_expr(column).ne(value(v)),
        (FilterOperator::In, Operand::Many(vs)) => column_expr(column).is_in(vs.iter().map(value)),
        (FilterOperator::NotIn, Operand::Many(vs)) => {
            column_expr(column).is_not_in(vs.iter().map(value))
        }
        (FilterOperator::Specified, Operand::Flag(true)) => column_expr(column).is_not_null(),
        (FilterOperator::Specified, Operand::Flag(false)) => column_expr(column).is_null(),
        (FilterOperator::GreaterThan, Operand::Single(v)) => column_expr(column).gt(value(v)),
        (FilterOperator::GreaterThanOrEqual, Operand::Single(v)) => {
            column_expr(column).gte(value(v))
        }
        (FilterOperator::LessThan, Operand::Single(v)) => column_expr(column).lt(value(v)),
        (FilterOperator::LessThanOrEqual, Operand::Single(v)) => column_expr(column).lte(value(v)),
        (FilterOperator::Contains, Operand::Single(v)) => {
            like_expr(column, &v.render(), ignore_case, false)
        }
        (FilterOperator::NotContains, Operand::Single(v)) => {
            like_expr(column, &v.render(), ignore_case, true)
        }
        // ignoreCase only modifies the substring operators
        _ => return None,
    };
    Some(expr)
}

/// Build the `Condition` a filter applies to `column`: every present operator, AND-ed.
///
/// An empty filter yields `Condition::all()` with no expressions, which matches every row.
pub fn filter_condition<F>(filter: &F, column: &str) -> Condition
where
    F: FilterValue + ?Sized,
    F::Element: QueryValue + Clone + Into<Value>,
{
    let ignore_case = filter.ignore_case();
    filter
        .operands()
        .into_iter()
        .filter_map(|(operator, operand)| operator_expr(column, operator, operand, ignore_case))
        .fold(Condition::all(), Condition::add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Filter, IntegerFilter, StringFilter, UuidFilter};
    use sea_orm::{
        DbBackend,
        sea_query::{PostgresQueryBuilder, Query, QueryStatementWriter},
    };
    use uuid::Uuid;

    fn where_sql(condition: Condition) -> String {
        let sql = Query::select()
            .column(Alias::new("id"))
            .from(Alias::new("items"))
            .cond_where(condition)
            .to_string(PostgresQueryBuilder);
        sql.split_once(" WHERE ")
            .map_or_else(String::new, |(_, clause)| clause.to_string())
    }

    #[test]
    fn test_empty_filter_has_no_expressions() {
        let condition = filter_condition(&Filter::<i32>::new(), "id");
        assert!(condition.is_empty());
        assert_eq!(where_sql(condition), "TRUE");
    }

    #[test]
    fn test_range_operators() {
        let filter = IntegerFilter::between(1, 9).with_not_equals(5);
        let sql = where_sql(filter_condition(&filter, "price"));
        assert_eq!(
            sql,
            r#""price" <> 5 AND "price" >= 1 AND "price" <= 9"#
        );
    }

    #[test]
    fn test_set_membership_and_presence() {
        let filter = Filter::<i32>::new()
            .with_in([1, 2])
            .with_not_in([3])
            .with_specified(true);
        let sql = where_sql(filter_condition(&filter, "n"));
        assert_eq!(
            sql,
            r#""n" IN (1, 2) AND "n" NOT IN (3) AND "n" IS NOT NULL"#
        );
    }

    #[test]
    fn test_specified_false_is_null() {
        let filter = UuidFilter::new().with_specified(false);
        assert_eq!(where_sql(filter_condition(&filter, "owner_id")), r#""owner_id" IS NULL"#);
    }

    #[test]
    fn test_uuid_equality_binds_value() {
        let filter = UuidFilter::new().with_equals(Uuid::nil());
        let sql = where_sql(filter_condition(&filter, "id"));
        assert!(sql.starts_with(r#""id" = "#));
        assert!(sql.contains("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_contains_ignores_case_by_default() {
        let filter = StringFilter::new().with_contains("Ali");
        let sql = where_sql(filter_condition(&filter, "name"));
        assert_eq!(sql, r#"UPPER("name") LIKE '%ALI%'"#);
    }

    #[test]
    fn test_case_sensitive_not_contains() {
        let filter = StringFilter::new()
            .with_not_contains("Ali")
            .with_ignore_case(false);
        let sql = where_sql(filter_condition(&filter, "name"));
        assert_eq!(sql, r#""name" NOT LIKE '%Ali%'"#);
    }

    #[test]
    fn test_condition_embeds_in_entity_query_builder() {
        let condition = filter_condition(&StringFilter::new().with_equals("x"), "code");
        let statement = Query::select()
            .column(Alias::new("code"))
            .from(Alias::new("things"))
            .cond_where(condition)
            .to_owned();
        let built = DbBackend::Sqlite.build(&statement);
        assert!(built.sql.contains(r#""code" = ?"#));
    }
}
