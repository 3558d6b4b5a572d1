//! PostgreSQL expression nodes for the `ferrite-sql` tree.
//!
//! This crate extends [`ferrite_sql_core`]'s generic expression tree with the
//! PostgreSQL-only surface: array subscripts and slices, `ANY`/`ALL`
//! comparisons, `ILIKE`, regex matches, JSON path traversal, range and
//! containment operators, row values, named-argument function calls,
//! `unnest` table sources and `DELETE` statements.
//!
//! Nodes validate their shape when constructed and freeze their result type;
//! rewrites go through the visitor machinery and share every unchanged
//! subtree.
//!
//! ```rust
//! use ferrite_sql_core::{Printer, SqlType};
//! use ferrite_sql_postgres::{
//!     ArrayAnyAll, ComparisonOp, PgExpr, PgSqlExpr, PostgresDialect, Quantifier,
//! };
//!
//! let tags = PgSqlExpr::column("tags", SqlType::array(SqlType::Text)).shared();
//! let wanted = PgSqlExpr::text("urgent").shared();
//! let any = ArrayAnyAll::new(wanted, tags, ComparisonOp::Eq, Quantifier::Any)?;
//! let predicate = PgExpr::ArrayAnyAll(any).shared();
//!
//! assert_eq!(
//!     Printer::print(&PostgresDialect, &predicate),
//!     "'urgent' = ANY(tags)"
//! );
//! # Ok::<(), ferrite_sql_postgres::PgExprError>(())
//! ```

pub mod dialect;
pub mod error;
pub mod expr;
pub mod operators;
pub mod statement;
pub mod table;
pub mod visitor;

pub use dialect::PostgresDialect;
pub use error::{PgExprError, Result};
pub use expr::{
    ArrayAnyAll, ArrayIndex, ArraySlice, AtTimeZone, Collate, ComparisonOp, CustomBinary,
    CustomUnary, FieldAccess, ILike, JsonTraversal, NewArray, PgBinary, PgExpr, PgFunction,
    PgSqlExpr, PgSqlExprRef, Quantifier, RegexMatch, RowValue, StoreCast,
};
pub use operators::{OperatorResult, PgOperator};
pub use statement::PgDelete;
pub use table::{ColumnInfo, TableRef, TableSource, Unnest};
pub use visitor::{dispatch, PgVisitor};
