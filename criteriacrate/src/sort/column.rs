use std::fmt;

use sea_orm::{
    ColumnTrait, ColumnType, IntoSimpleExpr,
    sea_query::{Alias, Expr, SimpleExpr},
};

/// A column that can appear in an `ORDER BY`.
pub trait SortableColumn: Clone + fmt::Debug {
    fn column_name(&self) -> &str;

    /// Whether case-insensitive ordering applies to this column.
    fn is_textual(&self) -> bool;

    /// The expression ordered by.
    fn order_expr(&self) -> SimpleExpr;
}

/// A column known only by name, as configured from settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    name: String,
    textual: bool,
}

impl ColumnRef {
    /// A non-textual column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            textual: false,
        }
    }

    /// A textual column, eligible for case-insensitive ordering.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            textual: true,
        }
    }
}

impl SortableColumn for ColumnRef {
    fn column_name(&self) -> &str {
        &self.name
    }

    fn is_textual(&self) -> bool {
        self.textual
    }

    fn order_expr(&self) -> SimpleExpr {
        Expr::col(Alias::new(&self.name)).into()
    }
}

impl<C: ColumnTrait> SortableColumn for C {
    fn column_name(&self) -> &str {
        self.as_str()
    }

    fn is_textual(&self) -> bool {
        matches!(
            self.def().get_column_type(),
            ColumnType::String(_) | ColumnType::Char(_) | ColumnType::Text
        )
    }

    fn order_expr(&self) -> SimpleExpr {
        self.into_simple_expr()
    }
}
