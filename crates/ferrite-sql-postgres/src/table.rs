//! Table sources for statement rendering.
//!
//! A PostgreSQL `USING` or `FROM` item is either a plain table reference or a
//! table-valued `unnest(...)` call. Column aliases declared on an `unnest`
//! source belong to the source itself, not to its table alias: renaming the
//! alias never changes the exposed column names.

use std::sync::Arc;

use ferrite_sql_core::{Printer, SqlType, TypeMapping, Visitor};

use crate::error::{PgExprError, Result};
use crate::expr::{PgExpr, PgSqlExprRef};

/// A plain table reference, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    name: String,
    alias: Option<String>,
}

impl TableRef {
    /// Creates an unaliased table reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Sets the table alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Renders `"name"` or `"name" AS "alias"`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        let quoted = printer.dialect().quote_identifier(&self.name);
        printer.append(&quoted);
        if let Some(alias) = &self.alias {
            printer.append(" AS ");
            let quoted = printer.dialect().quote_identifier(alias);
            printer.append(&quoted);
        }
    }
}

/// A column exposed by an [`Unnest`] source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnInfo {
    name: String,
    type_mapping: Option<TypeMapping>,
}

impl ColumnInfo {
    /// Creates a column with no store-type annotation.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_mapping: None,
        }
    }

    /// Attaches a store-type mapping.
    #[must_use]
    pub fn with_mapping(mut self, mapping: TypeMapping) -> Self {
        self.type_mapping = Some(mapping);
        self
    }

    /// The exposed column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The store-type mapping, if any.
    #[must_use]
    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }
}

/// A table-valued `unnest(array)` source.
///
/// `unnest(x) WITH ORDINALITY AS items(value, ordinal)` expands the array
/// into one row per element; the ordinality column numbers the rows from one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unnest {
    array: PgSqlExprRef,
    alias: String,
    columns: Option<Vec<ColumnInfo>>,
    with_ordinality: bool,
}

impl Unnest {
    /// Creates an unnest source over an array expression.
    ///
    /// # Errors
    ///
    /// Rejects a non-array operand.
    pub fn new(array: PgSqlExprRef, alias: impl Into<String>) -> Result<Self> {
        if !matches!(array.ty(), SqlType::Array(_)) {
            return Err(PgExprError::NonArrayOperand {
                found: array.ty().clone(),
            });
        }
        Ok(Self {
            array,
            alias: alias.into(),
            columns: None,
            with_ordinality: false,
        })
    }

    /// Declares the exposed column names.
    ///
    /// # Errors
    ///
    /// Rejects an empty column list.
    pub fn with_columns(mut self, columns: Vec<ColumnInfo>) -> Result<Self> {
        if columns.is_empty() {
            return Err(PgExprError::EmptyColumnList);
        }
        self.columns = Some(columns);
        Ok(self)
    }

    /// Adds the `WITH ORDINALITY` clause.
    #[must_use]
    pub const fn with_ordinality(mut self) -> Self {
        self.with_ordinality = true;
        self
    }

    /// Returns a copy under a new table alias.
    ///
    /// The exposed column names are declared per-column and survive the
    /// rename untouched.
    #[must_use]
    pub fn with_alias(&self, alias: impl Into<String>) -> Self {
        Self {
            array: Arc::clone(&self.array),
            alias: alias.into(),
            columns: self.columns.clone(),
            with_ordinality: self.with_ordinality,
        }
    }

    /// The array expression being expanded.
    #[must_use]
    pub const fn array(&self) -> &PgSqlExprRef {
        &self.array
    }

    /// The table alias.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The declared columns, if any.
    #[must_use]
    pub fn columns(&self) -> Option<&[ColumnInfo]> {
        self.columns.as_deref()
    }

    /// Whether the source carries `WITH ORDINALITY`.
    #[must_use]
    pub const fn has_ordinality(&self) -> bool {
        self.with_ordinality
    }

    /// Update-if-changed over the array expression.
    #[must_use]
    pub fn update(&self, array: PgSqlExprRef) -> Self {
        if Arc::ptr_eq(&array, &self.array) {
            self.clone()
        } else {
            Self {
                array,
                alias: self.alias.clone(),
                columns: self.columns.clone(),
                with_ordinality: self.with_ordinality,
            }
        }
    }

    /// Visits the array expression.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let array = visitor.visit(&self.array);
        if Arc::ptr_eq(&array, &self.array) {
            None
        } else {
            Some(self.update(array))
        }
    }

    /// Renders `unnest(x) [WITH ORDINALITY] AS "alias"[("col", ...)]`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.append("unnest(");
        printer.visit(&self.array);
        printer.append(")");
        if self.with_ordinality {
            printer.append(" WITH ORDINALITY");
        }
        printer.append(" AS ");
        let quoted = printer.dialect().quote_identifier(&self.alias);
        printer.append(&quoted);
        if let Some(columns) = &self.columns {
            printer.append("(");
            for (index, column) in columns.iter().enumerate() {
                if index > 0 {
                    printer.append(", ");
                }
                let quoted = printer.dialect().quote_identifier(column.name());
                printer.append(&quoted);
            }
            printer.append(")");
        }
    }
}

/// A source item in a statement's table list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableSource {
    /// A plain table reference.
    Table(TableRef),
    /// A table-valued `unnest` call.
    Unnest(Unnest),
}

impl TableSource {
    /// Visits any expressions embedded in the source.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        match self {
            Self::Table(_) => None,
            Self::Unnest(unnest) => unnest.visit_children(visitor).map(Self::Unnest),
        }
    }

    /// Renders the source.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        match self {
            Self::Table(table) => table.print(printer),
            Self::Unnest(unnest) => unnest.print(printer),
        }
    }
}

impl From<TableRef> for TableSource {
    fn from(table: TableRef) -> Self {
        Self::Table(table)
    }
}

impl From<Unnest> for TableSource {
    fn from(unnest: Unnest) -> Self {
        Self::Unnest(unnest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::PgSqlExpr;
    use crate::PostgresDialect;

    fn items_array() -> PgSqlExprRef {
        PgSqlExpr::column("tags", SqlType::array(SqlType::Text)).shared()
    }

    fn print_source(source: &TableSource) -> String {
        let mut printer = Printer::new(&PostgresDialect);
        source.print(&mut printer);
        printer.finish()
    }

    #[test]
    fn test_unnest_rejects_non_array() {
        let scalar = PgSqlExpr::integer(1).shared();
        let err = Unnest::new(scalar, "t").unwrap_err();
        assert_eq!(
            err,
            PgExprError::NonArrayOperand {
                found: SqlType::Integer
            }
        );
    }

    #[test]
    fn test_unnest_rejects_empty_column_list() {
        let err = Unnest::new(items_array(), "t")
            .unwrap()
            .with_columns(Vec::new())
            .unwrap_err();
        assert_eq!(err, PgExprError::EmptyColumnList);
    }

    #[test]
    fn test_unnest_prints_ordinality_and_columns() {
        let source: TableSource = Unnest::new(items_array(), "items")
            .unwrap()
            .with_columns(vec![ColumnInfo::new("value"), ColumnInfo::new("ordinal")])
            .unwrap()
            .with_ordinality()
            .into();
        assert_eq!(
            print_source(&source),
            "unnest(tags) WITH ORDINALITY AS \"items\"(\"value\", \"ordinal\")"
        );
    }

    #[test]
    fn test_alias_rename_keeps_column_names() {
        let original = Unnest::new(items_array(), "items")
            .unwrap()
            .with_columns(vec![ColumnInfo::new("value")])
            .unwrap();
        let renamed = original.with_alias("entries");
        assert_eq!(renamed.alias(), "entries");
        assert_eq!(
            renamed.columns().map(|c| c[0].name()),
            original.columns().map(|c| c[0].name())
        );
    }

    #[test]
    fn test_table_ref_alias() {
        let source: TableSource = TableRef::new("orders").with_alias("o").into();
        assert_eq!(print_source(&source), "\"orders\" AS \"o\"");
    }
}
