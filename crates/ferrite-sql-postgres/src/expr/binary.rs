//! PostgreSQL binary and custom operators.

use std::sync::Arc;

use ferrite_sql_core::{Printer, SqlType, TypeMapping, Visitor};

use crate::error::{PgExprError, Result};
use crate::expr::{PgExpr, PgSqlExprRef};
use crate::operators::PgOperator;

/// A binary expression over a [`PgOperator`].
///
/// The result type is derived from the operator's metadata: predicates yield
/// boolean, range-combining operators keep the left operand's (range or
/// multirange) type, distance yields double precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PgBinary {
    left: PgSqlExprRef,
    op: PgOperator,
    right: PgSqlExprRef,
    ty: SqlType,
    type_mapping: Option<TypeMapping>,
}

impl PgBinary {
    /// Creates a binary expression.
    ///
    /// # Errors
    ///
    /// Rejects non-range left operands for range-combining operators.
    pub fn new(left: PgSqlExprRef, op: PgOperator, right: PgSqlExprRef) -> Result<Self> {
        if op.requires_range_operands() && !left.ty().is_range_like() {
            return Err(PgExprError::InvalidRangeOperand {
                operator: op.symbol(),
                found: left.ty().clone(),
            });
        }
        let ty = op.result_type(left.ty());
        Ok(Self {
            left,
            op,
            right,
            ty,
            type_mapping: None,
        })
    }

    /// Attaches a store-type mapping.
    #[must_use]
    pub fn with_mapping(mut self, mapping: TypeMapping) -> Self {
        self.type_mapping = Some(mapping);
        self
    }

    /// The left operand.
    #[must_use]
    pub const fn left(&self) -> &PgSqlExprRef {
        &self.left
    }

    /// The operator.
    #[must_use]
    pub const fn op(&self) -> PgOperator {
        self.op
    }

    /// The right operand.
    #[must_use]
    pub const fn right(&self) -> &PgSqlExprRef {
        &self.right
    }

    /// The semantic result type.
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// The store-type mapping, if any.
    #[must_use]
    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    /// Returns `self` (sharing all children) when both operands are
    /// reference-identical to the current ones, a rebuilt node otherwise.
    #[must_use]
    pub fn update(&self, left: PgSqlExprRef, right: PgSqlExprRef) -> Self {
        if Arc::ptr_eq(&left, &self.left) && Arc::ptr_eq(&right, &self.right) {
            self.clone()
        } else {
            Self {
                left,
                op: self.op,
                right,
                ty: self.ty.clone(),
                type_mapping: self.type_mapping.clone(),
            }
        }
    }

    /// Visits left then right.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let left = visitor.visit(&self.left);
        let right = visitor.visit(&self.right);
        if Arc::ptr_eq(&left, &self.left) && Arc::ptr_eq(&right, &self.right) {
            None
        } else {
            Some(self.update(left, right))
        }
    }

    /// Renders `left <symbol> right` with operand bracketing.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.visit_operand(&self.left);
        printer.append(" ");
        printer.append(self.op.symbol());
        printer.append(" ");
        printer.visit_operand(&self.right);
    }
}

/// A binary expression over operator text the node family has no enum entry
/// for (user-defined operators, extensions).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomBinary {
    left: PgSqlExprRef,
    operator: String,
    right: PgSqlExprRef,
    ty: SqlType,
    type_mapping: Option<TypeMapping>,
}

impl CustomBinary {
    /// Creates a custom binary expression with a declared result type.
    ///
    /// # Errors
    ///
    /// Rejects empty operator text.
    pub fn new(
        left: PgSqlExprRef,
        operator: impl Into<String>,
        right: PgSqlExprRef,
        ty: SqlType,
    ) -> Result<Self> {
        let operator = operator.into();
        if operator.is_empty() {
            return Err(PgExprError::EmptyOperator);
        }
        Ok(Self {
            left,
            operator,
            right,
            ty,
            type_mapping: None,
        })
    }

    /// Attaches a store-type mapping.
    #[must_use]
    pub fn with_mapping(mut self, mapping: TypeMapping) -> Self {
        self.type_mapping = Some(mapping);
        self
    }

    /// The left operand.
    #[must_use]
    pub const fn left(&self) -> &PgSqlExprRef {
        &self.left
    }

    /// The operator text.
    #[must_use]
    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// The right operand.
    #[must_use]
    pub const fn right(&self) -> &PgSqlExprRef {
        &self.right
    }

    /// The semantic result type.
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// The store-type mapping, if any.
    #[must_use]
    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    /// Update-if-changed; see [`PgBinary::update`].
    #[must_use]
    pub fn update(&self, left: PgSqlExprRef, right: PgSqlExprRef) -> Self {
        if Arc::ptr_eq(&left, &self.left) && Arc::ptr_eq(&right, &self.right) {
            self.clone()
        } else {
            Self {
                left,
                operator: self.operator.clone(),
                right,
                ty: self.ty.clone(),
                type_mapping: self.type_mapping.clone(),
            }
        }
    }

    /// Visits left then right.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let left = visitor.visit(&self.left);
        let right = visitor.visit(&self.right);
        if Arc::ptr_eq(&left, &self.left) && Arc::ptr_eq(&right, &self.right) {
            None
        } else {
            Some(self.update(left, right))
        }
    }

    /// Renders `left <operator> right`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.visit_operand(&self.left);
        printer.append(" ");
        printer.append(&self.operator);
        printer.append(" ");
        printer.visit_operand(&self.right);
    }
}

/// A unary expression over custom operator text, prefix or postfix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomUnary {
    operand: PgSqlExprRef,
    operator: String,
    postfix: bool,
    ty: SqlType,
}

impl CustomUnary {
    /// Creates a prefix custom unary expression.
    ///
    /// # Errors
    ///
    /// Rejects empty operator text.
    pub fn prefix(operator: impl Into<String>, operand: PgSqlExprRef, ty: SqlType) -> Result<Self> {
        Self::new(operator, operand, ty, false)
    }

    /// Creates a postfix custom unary expression.
    ///
    /// # Errors
    ///
    /// Rejects empty operator text.
    pub fn postfix(
        operator: impl Into<String>,
        operand: PgSqlExprRef,
        ty: SqlType,
    ) -> Result<Self> {
        Self::new(operator, operand, ty, true)
    }

    fn new(
        operator: impl Into<String>,
        operand: PgSqlExprRef,
        ty: SqlType,
        postfix: bool,
    ) -> Result<Self> {
        let operator = operator.into();
        if operator.is_empty() {
            return Err(PgExprError::EmptyOperator);
        }
        Ok(Self {
            operand,
            operator,
            postfix,
            ty,
        })
    }

    /// The operand.
    #[must_use]
    pub const fn operand(&self) -> &PgSqlExprRef {
        &self.operand
    }

    /// The operator text.
    #[must_use]
    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// True for postfix operators.
    #[must_use]
    pub const fn is_postfix(&self) -> bool {
        self.postfix
    }

    /// The semantic result type.
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// Update-if-changed; see [`PgBinary::update`].
    #[must_use]
    pub fn update(&self, operand: PgSqlExprRef) -> Self {
        if Arc::ptr_eq(&operand, &self.operand) {
            self.clone()
        } else {
            Self {
                operand,
                operator: self.operator.clone(),
                postfix: self.postfix,
                ty: self.ty.clone(),
            }
        }
    }

    /// Visits the operand.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let operand = visitor.visit(&self.operand);
        if Arc::ptr_eq(&operand, &self.operand) {
            None
        } else {
            Some(self.update(operand))
        }
    }

    /// Renders `<operator> operand` or `operand <operator>`.
    ///
    /// A space always separates operator and operand: PostgreSQL's lexer is
    /// greedy over operator characters, and e.g. `|/-1` would lex `|/-` as
    /// one operator.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        if self.postfix {
            printer.visit_operand(&self.operand);
            printer.append(" ");
            printer.append(&self.operator);
        } else {
            printer.append(&self.operator);
            printer.append(" ");
            printer.visit_operand(&self.operand);
        }
    }
}
