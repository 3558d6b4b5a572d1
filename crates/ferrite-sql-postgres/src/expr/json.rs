//! JSON path traversal and composite field access.

use std::sync::Arc;

use ferrite_sql_core::{Printer, SqlExpr, SqlType, TypeMapping, Value, Visitor};

use crate::error::{PgExprError, Result};
use crate::expr::{PgExpr, PgSqlExprRef};

/// JSON path traversal: `expr#>{a,b,c}` (JSON result) or `expr#>>{a,b,c}`
/// (text result).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonTraversal {
    expr: PgSqlExprRef,
    path: Vec<PgSqlExprRef>,
    returns_text: bool,
    ty: SqlType,
    type_mapping: Option<TypeMapping>,
}

impl JsonTraversal {
    /// Creates a traversal node.
    ///
    /// # Errors
    ///
    /// Rejects a non-JSON operand and an empty path.
    pub fn new(expr: PgSqlExprRef, path: Vec<PgSqlExprRef>, returns_text: bool) -> Result<Self> {
        if !expr.ty().is_json() {
            return Err(PgExprError::NonJsonOperand {
                found: expr.ty().clone(),
            });
        }
        if path.is_empty() {
            return Err(PgExprError::EmptyPath);
        }
        let ty = if returns_text {
            SqlType::Text
        } else {
            expr.ty().clone()
        };
        Ok(Self {
            expr,
            path,
            returns_text,
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

    /// The traversed JSON expression.
    #[must_use]
    pub const fn expr(&self) -> &PgSqlExprRef {
        &self.expr
    }

    /// The path components, in traversal order.
    #[must_use]
    pub fn path(&self) -> &[PgSqlExprRef] {
        &self.path
    }

    /// True for `#>>` (text-returning) traversal.
    #[must_use]
    pub const fn returns_text(&self) -> bool {
        self.returns_text
    }

    /// The semantic result type: text for `#>>`, the operand's JSON type for
    /// `#>`.
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// The store-type mapping, if any.
    #[must_use]
    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    /// Returns a new traversal whose path is this node's path plus
    /// `component`; `self` is left untouched.
    #[must_use]
    pub fn append(&self, component: PgSqlExprRef) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend(self.path.iter().map(Arc::clone));
        path.push(component);
        Self {
            expr: Arc::clone(&self.expr),
            path,
            returns_text: self.returns_text,
            ty: self.ty.clone(),
            type_mapping: self.type_mapping.clone(),
        }
    }

    /// Update-if-changed over the operand and the path list.
    ///
    /// # Panics
    ///
    /// Panics if `path` has a different length than the current path.
    #[must_use]
    pub fn update(&self, expr: PgSqlExprRef, path: Vec<PgSqlExprRef>) -> Self {
        assert_eq!(
            path.len(),
            self.path.len(),
            "rewritten path list changed arity"
        );
        if Arc::ptr_eq(&expr, &self.expr)
            && path
                .iter()
                .zip(&self.path)
                .all(|(new, old)| Arc::ptr_eq(new, old))
        {
            self.clone()
        } else {
            Self {
                expr,
                path,
                returns_text: self.returns_text,
                ty: self.ty.clone(),
                type_mapping: self.type_mapping.clone(),
            }
        }
    }

    /// Visits the operand, then every path component in order.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let expr = visitor.visit(&self.expr);
        let path = ferrite_sql_core::visit_expr_list(visitor, &self.path);
        if Arc::ptr_eq(&expr, &self.expr) && path.is_none() {
            None
        } else {
            let path = path.unwrap_or_else(|| self.path.iter().map(Arc::clone).collect());
            Some(self.update(expr, path))
        }
    }

    /// Renders `expr#>{a,b,c}` / `expr#>>{a,b,c}`.
    ///
    /// Text-literal components render bare inside the braces; other
    /// components (parameters, nested expressions) render normally.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.visit_operand(&self.expr);
        printer.append(if self.returns_text { "#>>" } else { "#>" });
        printer.append("{");
        for (index, component) in self.path.iter().enumerate() {
            if index > 0 {
                printer.append(",");
            }
            if let SqlExpr::Literal(literal) = &**component {
                if let Value::Text(text) = literal.value() {
                    printer.append(text);
                    continue;
                }
            }
            printer.visit(component);
        }
        printer.append("}");
    }
}

/// Composite field access: `(composite).field`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldAccess {
    operand: PgSqlExprRef,
    field: String,
    ty: SqlType,
    type_mapping: Option<TypeMapping>,
}

impl FieldAccess {
    /// Creates a field access with the field's declared type.
    ///
    /// # Errors
    ///
    /// Rejects an operand that is not a named composite type.
    pub fn new(operand: PgSqlExprRef, field: impl Into<String>, ty: SqlType) -> Result<Self> {
        if !matches!(operand.ty(), SqlType::Composite(_)) {
            return Err(PgExprError::NonCompositeOperand {
                found: operand.ty().clone(),
            });
        }
        Ok(Self {
            operand,
            field: field.into(),
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

    /// The composite operand.
    #[must_use]
    pub const fn operand(&self) -> &PgSqlExprRef {
        &self.operand
    }

    /// The accessed field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The semantic result type (the field's declared type).
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// The store-type mapping, if any.
    #[must_use]
    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    /// Update-if-changed; see [`JsonTraversal::update`].
    #[must_use]
    pub fn update(&self, operand: PgSqlExprRef) -> Self {
        if Arc::ptr_eq(&operand, &self.operand) {
            self.clone()
        } else {
            Self {
                operand,
                field: self.field.clone(),
                ty: self.ty.clone(),
                type_mapping: self.type_mapping.clone(),
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

    /// Renders `(operand).field`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.append("(");
        printer.visit(&self.operand);
        printer.append(").");
        printer.append(&self.field);
    }
}
