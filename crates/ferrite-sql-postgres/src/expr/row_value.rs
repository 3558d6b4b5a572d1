//! Row value construction.

use std::sync::Arc;

use ferrite_sql_core::{Printer, SqlType, Visitor};

use crate::error::{PgExprError, Result};
use crate::expr::{PgExpr, PgSqlExprRef};

/// An n-ary row value: `(a, b, c)`.
///
/// Used for row-value comparisons (e.g. keyset pagination predicates).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowValue {
    values: Vec<PgSqlExprRef>,
    ty: SqlType,
}

impl RowValue {
    /// Creates a row value with a declared row type.
    ///
    /// # Errors
    ///
    /// Rejects a non-row declared type and a field-count mismatch between the
    /// declared type and the supplied values.
    pub fn new(values: Vec<PgSqlExprRef>, ty: SqlType) -> Result<Self> {
        let Some(fields) = ty.row_fields() else {
            return Err(PgExprError::NonRowType { found: ty });
        };
        if fields.len() != values.len() {
            return Err(PgExprError::RowArityMismatch {
                expected: fields.len(),
                found: values.len(),
            });
        }
        Ok(Self { values, ty })
    }

    /// The row's values, in field order.
    #[must_use]
    pub fn values(&self) -> &[PgSqlExprRef] {
        &self.values
    }

    /// The semantic result type (the declared row type).
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// Update-if-changed over the value list: returns `self` (sharing all
    /// children) when every value is reference-identical, a rebuilt node
    /// otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `values` has a different length than the current list.
    #[must_use]
    pub fn update(&self, values: Vec<PgSqlExprRef>) -> Self {
        assert_eq!(
            values.len(),
            self.values.len(),
            "rewritten value list changed arity"
        );
        if values
            .iter()
            .zip(&self.values)
            .all(|(new, old)| Arc::ptr_eq(new, old))
        {
            self.clone()
        } else {
            Self {
                values,
                ty: self.ty.clone(),
            }
        }
    }

    /// Visits the values in field order.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        ferrite_sql_core::visit_expr_list(visitor, &self.values).map(|values| self.update(values))
    }

    /// Renders `(a, b, c)`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.append("(");
        printer.visit_collection(&self.values, ", ");
        printer.append(")");
    }
}
