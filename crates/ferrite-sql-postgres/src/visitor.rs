//! The per-node-kind visit surface for PostgreSQL-aware visitors.
//!
//! Generic visitors traverse [`PgExpr`] nodes structurally and never see
//! their shapes. A visitor that wants a dedicated, statically-typed callback
//! per node kind implements [`PgVisitor`] and routes
//! [`Visitor::visit_dialect`] through [`dispatch`]:
//!
//! ```rust
//! use ferrite_sql_postgres::{dispatch, PgExpr, PgSqlExprRef, PgVisitor};
//! use ferrite_sql_core::Visitor;
//!
//! struct CollationAudit {
//!     collations: Vec<String>,
//! }
//!
//! impl Visitor<PgExpr> for CollationAudit {
//!     fn visit_dialect(&mut self, expr: &PgSqlExprRef, node: &PgExpr) -> PgSqlExprRef {
//!         dispatch(self, expr, node)
//!     }
//! }
//!
//! impl PgVisitor for CollationAudit {
//!     fn visit_collate(
//!         &mut self,
//!         expr: &PgSqlExprRef,
//!         node: &ferrite_sql_postgres::Collate,
//!     ) -> PgSqlExprRef {
//!         self.collations.push(node.collation().to_owned());
//!         pg_visitor::walk_collate(self, expr, node)
//!     }
//! }
//! # use ferrite_sql_postgres::visitor as pg_visitor;
//! ```

use std::sync::Arc;

use ferrite_sql_core::Visitor;

use crate::expr::{
    ArrayAnyAll, ArrayIndex, ArraySlice, AtTimeZone, Collate, CustomBinary, CustomUnary,
    FieldAccess, ILike, JsonTraversal, NewArray, PgBinary, PgExpr, PgFunction, PgSqlExprRef,
    RegexMatch, RowValue, StoreCast,
};

macro_rules! walk_fn {
    ($(#[$doc:meta])* $walk:ident, $node:ty, $variant:ident) => {
        $(#[$doc])*
        pub fn $walk<V: PgVisitor>(
            visitor: &mut V,
            expr: &PgSqlExprRef,
            node: &$node,
        ) -> PgSqlExprRef {
            match node.visit_children(visitor) {
                Some(rebuilt) => PgExpr::$variant(rebuilt).shared(),
                None => Arc::clone(expr),
            }
        }
    };
}

walk_fn!(
    /// Structurally recurses into an array-index node.
    walk_array_index, ArrayIndex, ArrayIndex
);
walk_fn!(
    /// Structurally recurses into an array-slice node.
    walk_array_slice, ArraySlice, ArraySlice
);
walk_fn!(
    /// Structurally recurses into an array-construction node.
    walk_new_array, NewArray, NewArray
);
walk_fn!(
    /// Structurally recurses into an ANY/ALL comparison node.
    walk_array_any_all, ArrayAnyAll, ArrayAnyAll
);
walk_fn!(
    /// Structurally recurses into a binary-operator node.
    walk_binary, PgBinary, Binary
);
walk_fn!(
    /// Structurally recurses into a custom-binary node.
    walk_custom_binary, CustomBinary, CustomBinary
);
walk_fn!(
    /// Structurally recurses into a custom-unary node.
    walk_custom_unary, CustomUnary, CustomUnary
);
walk_fn!(
    /// Structurally recurses into an ILIKE node.
    walk_ilike, ILike, ILike
);
walk_fn!(
    /// Structurally recurses into a regex-match node.
    walk_regex_match, RegexMatch, RegexMatch
);
walk_fn!(
    /// Structurally recurses into a JSON-traversal node.
    walk_json_traversal, JsonTraversal, JsonTraversal
);
walk_fn!(
    /// Structurally recurses into a field-access node.
    walk_field_access, FieldAccess, FieldAccess
);
walk_fn!(
    /// Structurally recurses into a row-value node.
    walk_row_value, RowValue, RowValue
);
walk_fn!(
    /// Structurally recurses into a function-call node.
    walk_function, PgFunction, Function
);
walk_fn!(
    /// Structurally recurses into an AT TIME ZONE node.
    walk_at_time_zone, AtTimeZone, AtTimeZone
);
walk_fn!(
    /// Structurally recurses into a collation node.
    walk_collate, Collate, Collate
);
walk_fn!(
    /// Structurally recurses into a store-cast node.
    walk_cast, StoreCast, Cast
);

/// A visitor with one dedicated method per PostgreSQL node kind.
///
/// Every method defaults to structural recursion (the matching `walk_*`
/// free function), so implementations override only the kinds they care
/// about. `expr` is always the enclosing dialect expression reference, to be
/// returned as-is when nothing changed.
pub trait PgVisitor: Visitor<PgExpr> {
    /// Visits `array[index]`.
    fn visit_array_index(&mut self, expr: &PgSqlExprRef, node: &ArrayIndex) -> PgSqlExprRef {
        walk_array_index(self, expr, node)
    }

    /// Visits `array[lower:upper]`.
    fn visit_array_slice(&mut self, expr: &PgSqlExprRef, node: &ArraySlice) -> PgSqlExprRef {
        walk_array_slice(self, expr, node)
    }

    /// Visits `ARRAY[...]`.
    fn visit_new_array(&mut self, expr: &PgSqlExprRef, node: &NewArray) -> PgSqlExprRef {
        walk_new_array(self, expr, node)
    }

    /// Visits `item <op> ANY/ALL(array)`.
    fn visit_array_any_all(&mut self, expr: &PgSqlExprRef, node: &ArrayAnyAll) -> PgSqlExprRef {
        walk_array_any_all(self, expr, node)
    }

    /// Visits a [`PgBinary`] node.
    fn visit_binary(&mut self, expr: &PgSqlExprRef, node: &PgBinary) -> PgSqlExprRef {
        walk_binary(self, expr, node)
    }

    /// Visits a custom-binary node.
    fn visit_custom_binary(&mut self, expr: &PgSqlExprRef, node: &CustomBinary) -> PgSqlExprRef {
        walk_custom_binary(self, expr, node)
    }

    /// Visits a custom-unary node.
    fn visit_custom_unary(&mut self, expr: &PgSqlExprRef, node: &CustomUnary) -> PgSqlExprRef {
        walk_custom_unary(self, expr, node)
    }

    /// Visits an ILIKE node.
    fn visit_ilike(&mut self, expr: &PgSqlExprRef, node: &ILike) -> PgSqlExprRef {
        walk_ilike(self, expr, node)
    }

    /// Visits a regex-match node.
    fn visit_regex_match(&mut self, expr: &PgSqlExprRef, node: &RegexMatch) -> PgSqlExprRef {
        walk_regex_match(self, expr, node)
    }

    /// Visits a JSON-traversal node.
    fn visit_json_traversal(&mut self, expr: &PgSqlExprRef, node: &JsonTraversal) -> PgSqlExprRef {
        walk_json_traversal(self, expr, node)
    }

    /// Visits a field-access node.
    fn visit_field_access(&mut self, expr: &PgSqlExprRef, node: &FieldAccess) -> PgSqlExprRef {
        walk_field_access(self, expr, node)
    }

    /// Visits a row-value node.
    fn visit_row_value(&mut self, expr: &PgSqlExprRef, node: &RowValue) -> PgSqlExprRef {
        walk_row_value(self, expr, node)
    }

    /// Visits a function-call node.
    fn visit_function(&mut self, expr: &PgSqlExprRef, node: &PgFunction) -> PgSqlExprRef {
        walk_function(self, expr, node)
    }

    /// Visits an AT TIME ZONE node.
    fn visit_at_time_zone(&mut self, expr: &PgSqlExprRef, node: &AtTimeZone) -> PgSqlExprRef {
        walk_at_time_zone(self, expr, node)
    }

    /// Visits a collation node.
    fn visit_collate(&mut self, expr: &PgSqlExprRef, node: &Collate) -> PgSqlExprRef {
        walk_collate(self, expr, node)
    }

    /// Visits a store-cast node.
    fn visit_cast(&mut self, expr: &PgSqlExprRef, node: &StoreCast) -> PgSqlExprRef {
        walk_cast(self, expr, node)
    }
}

/// Routes a dialect node to the dedicated [`PgVisitor`] method for its kind.
pub fn dispatch<V: PgVisitor>(visitor: &mut V, expr: &PgSqlExprRef, node: &PgExpr) -> PgSqlExprRef {
    match node {
        PgExpr::ArrayIndex(n) => visitor.visit_array_index(expr, n),
        PgExpr::ArraySlice(n) => visitor.visit_array_slice(expr, n),
        PgExpr::NewArray(n) => visitor.visit_new_array(expr, n),
        PgExpr::ArrayAnyAll(n) => visitor.visit_array_any_all(expr, n),
        PgExpr::Binary(n) => visitor.visit_binary(expr, n),
        PgExpr::CustomBinary(n) => visitor.visit_custom_binary(expr, n),
        PgExpr::CustomUnary(n) => visitor.visit_custom_unary(expr, n),
        PgExpr::ILike(n) => visitor.visit_ilike(expr, n),
        PgExpr::RegexMatch(n) => visitor.visit_regex_match(expr, n),
        PgExpr::JsonTraversal(n) => visitor.visit_json_traversal(expr, n),
        PgExpr::FieldAccess(n) => visitor.visit_field_access(expr, n),
        PgExpr::RowValue(n) => visitor.visit_row_value(expr, n),
        PgExpr::Function(n) => visitor.visit_function(expr, n),
        PgExpr::AtTimeZone(n) => visitor.visit_at_time_zone(expr, n),
        PgExpr::Collate(n) => visitor.visit_collate(expr, n),
        PgExpr::Cast(n) => visitor.visit_cast(expr, n),
    }
}
