use sea_orm::QueryOrder;

use super::column::SortableColumn;
use super::config::ResolvedSortColumn;

/// Append the resolved ordering to a sea-orm query, in order.
///
/// Case-folded columns are ordered by `UPPER(column)`, positions by their literal number.
pub fn apply_sort<Q, C>(mut query: Q, resolved: &[ResolvedSortColumn<C>]) -> Q
where
    Q: QueryOrder,
    C: SortableColumn,
{
    for column in resolved {
        let expr = column.order_expr();
        let order = column.direction.into();
        match column.null_handling.null_ordering() {
            Some(nulls) => {
                query.query().order_by_expr_with_nulls(expr, order, nulls);
            }
            None => {
                query.query().order_by_expr(expr, order);
            }
        }
    }
    query
}
