//! Case-insensitive LIKE and regular-expression matching.

use std::sync::Arc;

use ferrite_sql_core::{Printer, SqlType, Visitor};

use crate::expr::array::option_ptr_eq;
use crate::expr::{PgExpr, PgSqlExprRef};

/// `ILIKE` / `NOT ILIKE` with an optional escape expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ILike {
    expr: PgSqlExprRef,
    pattern: PgSqlExprRef,
    escape: Option<PgSqlExprRef>,
    negated: bool,
    ty: SqlType,
}

impl ILike {
    /// Creates an ILIKE match.
    #[must_use]
    pub const fn new(
        expr: PgSqlExprRef,
        pattern: PgSqlExprRef,
        escape: Option<PgSqlExprRef>,
    ) -> Self {
        Self {
            expr,
            pattern,
            escape,
            negated: false,
            ty: SqlType::Boolean,
        }
    }

    /// Flips the match into NOT ILIKE.
    #[must_use]
    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    /// The matched expression.
    #[must_use]
    pub const fn expr(&self) -> &PgSqlExprRef {
        &self.expr
    }

    /// The pattern.
    #[must_use]
    pub const fn pattern(&self) -> &PgSqlExprRef {
        &self.pattern
    }

    /// The escape expression, if any.
    #[must_use]
    pub const fn escape(&self) -> Option<&PgSqlExprRef> {
        self.escape.as_ref()
    }

    /// True for NOT ILIKE.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// The semantic result type (always boolean).
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// Returns `self` (sharing all children) when every child is
    /// reference-identical to the current one, a rebuilt node otherwise.
    #[must_use]
    pub fn update(
        &self,
        expr: PgSqlExprRef,
        pattern: PgSqlExprRef,
        escape: Option<PgSqlExprRef>,
    ) -> Self {
        if Arc::ptr_eq(&expr, &self.expr)
            && Arc::ptr_eq(&pattern, &self.pattern)
            && option_ptr_eq(escape.as_ref(), self.escape.as_ref())
        {
            self.clone()
        } else {
            Self {
                expr,
                pattern,
                escape,
                negated: self.negated,
                ty: SqlType::Boolean,
            }
        }
    }

    /// Visits match, pattern, escape, in that order.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let expr = visitor.visit(&self.expr);
        let pattern = visitor.visit(&self.pattern);
        let escape = self.escape.as_ref().map(|escape| visitor.visit(escape));
        if Arc::ptr_eq(&expr, &self.expr)
            && Arc::ptr_eq(&pattern, &self.pattern)
            && option_ptr_eq(escape.as_ref(), self.escape.as_ref())
        {
            None
        } else {
            Some(self.update(expr, pattern, escape))
        }
    }

    /// Renders `expr ILIKE pattern [ESCAPE escape]`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.visit_operand(&self.expr);
        printer.append(if self.negated {
            " NOT ILIKE "
        } else {
            " ILIKE "
        });
        printer.visit_operand(&self.pattern);
        if let Some(escape) = &self.escape {
            printer.append(" ESCAPE ");
            printer.visit(escape);
        }
    }
}

/// Regular-expression match: `~` (case-sensitive) or `~*` (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegexMatch {
    expr: PgSqlExprRef,
    pattern: PgSqlExprRef,
    case_insensitive: bool,
    ty: SqlType,
}

impl RegexMatch {
    /// Creates a case-sensitive regex match.
    #[must_use]
    pub const fn new(expr: PgSqlExprRef, pattern: PgSqlExprRef) -> Self {
        Self {
            expr,
            pattern,
            case_insensitive: false,
            ty: SqlType::Boolean,
        }
    }

    /// Makes the match case-insensitive (`~*`).
    #[must_use]
    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// The matched expression.
    #[must_use]
    pub const fn expr(&self) -> &PgSqlExprRef {
        &self.expr
    }

    /// The pattern.
    #[must_use]
    pub const fn pattern(&self) -> &PgSqlExprRef {
        &self.pattern
    }

    /// True for `~*`.
    #[must_use]
    pub const fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// The semantic result type (always boolean).
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// Update-if-changed; see [`ILike::update`].
    #[must_use]
    pub fn update(&self, expr: PgSqlExprRef, pattern: PgSqlExprRef) -> Self {
        if Arc::ptr_eq(&expr, &self.expr) && Arc::ptr_eq(&pattern, &self.pattern) {
            self.clone()
        } else {
            Self {
                expr,
                pattern,
                case_insensitive: self.case_insensitive,
                ty: SqlType::Boolean,
            }
        }
    }

    /// Visits match then pattern.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let expr = visitor.visit(&self.expr);
        let pattern = visitor.visit(&self.pattern);
        if Arc::ptr_eq(&expr, &self.expr) && Arc::ptr_eq(&pattern, &self.pattern) {
            None
        } else {
            Some(self.update(expr, pattern))
        }
    }

    /// Renders `expr ~ pattern` or `expr ~* pattern`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.visit_operand(&self.expr);
        printer.append(if self.case_insensitive { " ~* " } else { " ~ " });
        printer.visit_operand(&self.pattern);
    }
}
