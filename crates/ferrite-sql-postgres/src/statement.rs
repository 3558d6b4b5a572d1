//! DELETE statement rendering.

use std::sync::Arc;

use ferrite_sql_core::{Dialect, Printer, SqlType, Visitor};

use crate::error::{PgExprError, Result};
use crate::expr::{PgExpr, PgSqlExprRef};
use crate::table::{TableRef, TableSource};

/// A `DELETE FROM ... [USING ...] [WHERE ...]` statement.
///
/// PostgreSQL expresses deletes that join against other relations through the
/// `USING` clause rather than a joined `FROM`. The predicate, when present,
/// must be boolean-typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PgDelete {
    table: TableRef,
    using: Vec<TableSource>,
    predicate: Option<PgSqlExprRef>,
}

impl PgDelete {
    /// Creates an unfiltered delete over a table.
    #[must_use]
    pub const fn new(table: TableRef) -> Self {
        Self {
            table,
            using: Vec::new(),
            predicate: None,
        }
    }

    /// Appends a `USING` source.
    #[must_use]
    pub fn using(mut self, source: impl Into<TableSource>) -> Self {
        self.using.push(source.into());
        self
    }

    /// Sets the `WHERE` predicate.
    ///
    /// # Errors
    ///
    /// Rejects a predicate whose type is not boolean.
    pub fn filter(mut self, predicate: PgSqlExprRef) -> Result<Self> {
        if *predicate.ty() != SqlType::Boolean {
            return Err(PgExprError::NonBooleanPredicate {
                found: predicate.ty().clone(),
            });
        }
        self.predicate = Some(predicate);
        Ok(self)
    }

    /// The target table.
    #[must_use]
    pub const fn table(&self) -> &TableRef {
        &self.table
    }

    /// The `USING` sources, in clause order.
    #[must_use]
    pub fn using_sources(&self) -> &[TableSource] {
        &self.using
    }

    /// The `WHERE` predicate, if any.
    #[must_use]
    pub fn predicate(&self) -> Option<&PgSqlExprRef> {
        self.predicate.as_ref()
    }

    /// Rewrites the statement's embedded expressions through a visitor,
    /// sharing every unchanged part.
    #[must_use]
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Self {
        let mut changed = false;
        let using = self
            .using
            .iter()
            .map(|source| match source.visit_children(visitor) {
                Some(rebuilt) => {
                    changed = true;
                    rebuilt
                }
                None => source.clone(),
            })
            .collect();
        let predicate = self.predicate.as_ref().map(|predicate| {
            let visited = visitor.visit(predicate);
            if !Arc::ptr_eq(&visited, predicate) {
                changed = true;
            }
            visited
        });
        if changed {
            Self {
                table: self.table.clone(),
                using,
                predicate,
            }
        } else {
            self.clone()
        }
    }

    /// Renders the statement for a dialect.
    #[must_use]
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        tracing::trace!(table = %self.table.name(), dialect = dialect.name(), "rendering DELETE");
        let mut printer = Printer::<PgExpr>::new(dialect);
        printer.append("DELETE FROM ");
        self.table.print(&mut printer);
        for (index, source) in self.using.iter().enumerate() {
            printer.append(if index == 0 { " USING " } else { ", " });
            source.print(&mut printer);
        }
        if let Some(predicate) = &self.predicate {
            printer.append(" WHERE ");
            printer.visit(predicate);
        }
        printer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::PgSqlExpr;
    use crate::table::{ColumnInfo, Unnest};
    use crate::PostgresDialect;

    #[test]
    fn test_plain_delete() {
        let delete = PgDelete::new(TableRef::new("orders"));
        assert_eq!(delete.to_sql(&PostgresDialect), "DELETE FROM \"orders\"");
    }

    #[test]
    fn test_delete_with_predicate() {
        let delete = PgDelete::new(TableRef::new("orders"))
            .filter(
                PgSqlExpr::column("total", SqlType::Integer)
                    .eq(PgSqlExpr::integer(0))
                    .shared(),
            )
            .unwrap();
        assert_eq!(
            delete.to_sql(&PostgresDialect),
            "DELETE FROM \"orders\" WHERE total = 0"
        );
    }

    #[test]
    fn test_delete_rejects_non_boolean_predicate() {
        let err = PgDelete::new(TableRef::new("orders"))
            .filter(PgSqlExpr::integer(1).shared())
            .unwrap_err();
        assert_eq!(
            err,
            PgExprError::NonBooleanPredicate {
                found: SqlType::Integer
            }
        );
    }

    #[test]
    fn test_delete_with_using_unnest() {
        let ids = PgSqlExpr::parameter(1, SqlType::array(SqlType::BigInt)).shared();
        let source = Unnest::new(ids, "ids")
            .unwrap()
            .with_columns(vec![ColumnInfo::new("id")])
            .unwrap();
        let delete = PgDelete::new(TableRef::new("orders").with_alias("o"))
            .using(source)
            .filter(
                PgSqlExpr::column_qualified("o", "id", SqlType::BigInt)
                    .eq(PgSqlExpr::column_qualified("ids", "id", SqlType::BigInt))
                    .shared(),
            )
            .unwrap();
        assert_eq!(
            delete.to_sql(&PostgresDialect),
            "DELETE FROM \"orders\" AS \"o\" USING unnest($1) AS \"ids\"(\"id\") WHERE o.id = ids.id"
        );
    }
}
