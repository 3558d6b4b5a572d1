//! # ferrite-sql-core
//!
//! A dialect-extensible SQL expression tree with visitor-based rewriting and
//! printing.
//!
//! The tree is immutable and value-like: children live behind [`std::sync::Arc`]
//! and rewrites share every unchanged subtree. A dialect plugs its own node
//! family into the generic tree through the [`DialectExpr`] trait and the
//! [`SqlExpr::Dialect`] variant:
//!
//! - generic visitors (caching comparers, parameter collectors, pretty
//!   printers) traverse dialect nodes structurally through
//!   [`DialectExpr::visit_children`] without knowing their shapes;
//! - the dialect's own SQL generator gets a statically-typed per-node-kind
//!   surface from the dialect crate.
//!
//! ```rust
//! use ferrite_sql_core::{GenericDialect, Printer, SqlExpr, SqlType};
//!
//! # #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! # enum NoDialect {}
//! # impl ferrite_sql_core::DialectExpr for NoDialect {
//! #     fn ty(&self) -> &SqlType { match *self {} }
//! #     fn type_mapping(&self) -> Option<&ferrite_sql_core::TypeMapping> { match *self {} }
//! #     fn visit_children<V: ferrite_sql_core::Visitor<Self>>(&self, _: &mut V) -> Option<Self> { match *self {} }
//! #     fn print(&self, _: &mut Printer<'_, Self>) { match *self {} }
//! # }
//! let tree: SqlExpr<NoDialect> = SqlExpr::column("age", SqlType::Integer)
//!     .eq(SqlExpr::integer(18))
//!     .and(SqlExpr::column("active", SqlType::Boolean));
//!
//! assert_eq!(Printer::print(&GenericDialect, &tree), "(age = 18) AND active");
//! ```

pub mod dialect;
pub mod expr;
pub mod mapping;
pub mod printer;
pub mod types;
pub mod visit;

pub use dialect::{Dialect, GenericDialect};
pub use expr::{
    Binary, BinaryOp, Column, DialectExpr, Function, Like, Literal, Parameter, SqlExpr,
    SqlExprRef, Unary, UnaryOp, Value,
};
pub use mapping::TypeMapping;
pub use printer::Printer;
pub use types::SqlType;
pub use visit::{visit_expr_list, walk_expr, Visitor};
