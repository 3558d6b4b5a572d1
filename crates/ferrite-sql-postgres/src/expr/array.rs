//! Array indexing, slicing, construction and ANY/ALL comparisons.

use std::sync::Arc;

use ferrite_sql_core::{Printer, SqlType, TypeMapping, Visitor};

use crate::error::{PgExprError, Result};
use crate::expr::{PgExpr, PgSqlExprRef};

/// `array[index]`: subscripting an array yields its element type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayIndex {
    array: PgSqlExprRef,
    index: PgSqlExprRef,
    ty: SqlType,
    type_mapping: Option<TypeMapping>,
}

impl ArrayIndex {
    /// Creates an array-index node.
    ///
    /// # Errors
    ///
    /// Rejects a non-array `array` operand and a non-integer `index`.
    pub fn new(array: PgSqlExprRef, index: PgSqlExprRef) -> Result<Self> {
        let SqlType::Array(element) = array.ty() else {
            return Err(PgExprError::NonArrayOperand {
                found: array.ty().clone(),
            });
        };
        if !index.ty().is_integer() {
            return Err(PgExprError::NonIntegerIndex {
                found: index.ty().clone(),
            });
        }
        let ty = element.as_ref().clone();
        Ok(Self {
            array,
            index,
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

    /// The array operand.
    #[must_use]
    pub const fn array(&self) -> &PgSqlExprRef {
        &self.array
    }

    /// The index operand.
    #[must_use]
    pub const fn index(&self) -> &PgSqlExprRef {
        &self.index
    }

    /// The semantic result type (the array's element type).
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
    pub fn update(&self, array: PgSqlExprRef, index: PgSqlExprRef) -> Self {
        if Arc::ptr_eq(&array, &self.array) && Arc::ptr_eq(&index, &self.index) {
            self.clone()
        } else {
            Self {
                array,
                index,
                ty: self.ty.clone(),
                type_mapping: self.type_mapping.clone(),
            }
        }
    }

    /// Visits array then index; `None` when both are unchanged.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let array = visitor.visit(&self.array);
        let index = visitor.visit(&self.index);
        if Arc::ptr_eq(&array, &self.array) && Arc::ptr_eq(&index, &self.index) {
            None
        } else {
            Some(self.update(array, index))
        }
    }

    /// Renders `array[index]`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.visit_operand(&self.array);
        printer.append("[");
        printer.visit(&self.index);
        printer.append("]");
    }
}

/// `array[lower:upper]`: slicing keeps the array type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArraySlice {
    array: PgSqlExprRef,
    lower: Option<PgSqlExprRef>,
    upper: Option<PgSqlExprRef>,
    ty: SqlType,
}

impl ArraySlice {
    /// Creates an array-slice node.
    ///
    /// # Errors
    ///
    /// Rejects a non-array operand, non-integer bounds, and the case where
    /// both bounds are absent.
    pub fn new(
        array: PgSqlExprRef,
        lower: Option<PgSqlExprRef>,
        upper: Option<PgSqlExprRef>,
    ) -> Result<Self> {
        if !matches!(array.ty(), SqlType::Array(_)) {
            return Err(PgExprError::NonArrayOperand {
                found: array.ty().clone(),
            });
        }
        if lower.is_none() && upper.is_none() {
            return Err(PgExprError::SliceWithoutBounds);
        }
        for bound in lower.iter().chain(upper.iter()) {
            if !bound.ty().is_integer() {
                return Err(PgExprError::NonIntegerBound {
                    found: bound.ty().clone(),
                });
            }
        }
        let ty = array.ty().clone();
        Ok(Self {
            array,
            lower,
            upper,
            ty,
        })
    }

    /// The array operand.
    #[must_use]
    pub const fn array(&self) -> &PgSqlExprRef {
        &self.array
    }

    /// The lower bound, if any.
    #[must_use]
    pub const fn lower(&self) -> Option<&PgSqlExprRef> {
        self.lower.as_ref()
    }

    /// The upper bound, if any.
    #[must_use]
    pub const fn upper(&self) -> Option<&PgSqlExprRef> {
        self.upper.as_ref()
    }

    /// The semantic result type (the array type itself).
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// Update-if-changed; see [`ArrayIndex::update`].
    #[must_use]
    pub fn update(
        &self,
        array: PgSqlExprRef,
        lower: Option<PgSqlExprRef>,
        upper: Option<PgSqlExprRef>,
    ) -> Self {
        if Arc::ptr_eq(&array, &self.array)
            && option_ptr_eq(lower.as_ref(), self.lower.as_ref())
            && option_ptr_eq(upper.as_ref(), self.upper.as_ref())
        {
            self.clone()
        } else {
            Self {
                array,
                lower,
                upper,
                ty: self.ty.clone(),
            }
        }
    }

    /// Visits array, lower, upper, in that order.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let array = visitor.visit(&self.array);
        let lower = self.lower.as_ref().map(|bound| visitor.visit(bound));
        let upper = self.upper.as_ref().map(|bound| visitor.visit(bound));
        if Arc::ptr_eq(&array, &self.array)
            && option_ptr_eq(lower.as_ref(), self.lower.as_ref())
            && option_ptr_eq(upper.as_ref(), self.upper.as_ref())
        {
            None
        } else {
            Some(self.update(array, lower, upper))
        }
    }

    /// Renders `array[lower:upper]`, omitting absent bounds.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.visit_operand(&self.array);
        printer.append("[");
        if let Some(lower) = &self.lower {
            printer.visit(lower);
        }
        printer.append(":");
        if let Some(upper) = &self.upper {
            printer.visit(upper);
        }
        printer.append("]");
    }
}

/// `ARRAY[...]` construction with a declared array type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewArray {
    elements: Vec<PgSqlExprRef>,
    ty: SqlType,
}

impl NewArray {
    /// Creates an array-construction node.
    ///
    /// # Errors
    ///
    /// Rejects a non-array declared type and elements whose type disagrees
    /// with the declared element type (unknown types pass on either side).
    pub fn new(elements: Vec<PgSqlExprRef>, ty: SqlType) -> Result<Self> {
        let SqlType::Array(element) = &ty else {
            return Err(PgExprError::NonArrayOperand { found: ty });
        };
        for supplied in &elements {
            let supplied_ty = supplied.ty();
            if supplied_ty != element.as_ref()
                && *supplied_ty != SqlType::Unknown
                && **element != SqlType::Unknown
            {
                return Err(PgExprError::ElementTypeMismatch {
                    element: element.as_ref().clone(),
                    found: supplied_ty.clone(),
                });
            }
        }
        Ok(Self { elements, ty })
    }

    /// The elements, in order.
    #[must_use]
    pub fn elements(&self) -> &[PgSqlExprRef] {
        &self.elements
    }

    /// The semantic result type (the declared array type).
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// Update-if-changed over the element list.
    ///
    /// # Panics
    ///
    /// Panics if `elements` has a different length than the current list.
    #[must_use]
    pub fn update(&self, elements: Vec<PgSqlExprRef>) -> Self {
        assert_eq!(
            elements.len(),
            self.elements.len(),
            "rewritten element list changed arity"
        );
        if elements
            .iter()
            .zip(&self.elements)
            .all(|(new, old)| Arc::ptr_eq(new, old))
        {
            self.clone()
        } else {
            Self {
                elements,
                ty: self.ty.clone(),
            }
        }
    }

    /// Visits the elements in order.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        ferrite_sql_core::visit_expr_list(visitor, &self.elements)
            .map(|elements| self.update(elements))
    }

    /// Renders `ARRAY[a, b, c]`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.append("ARRAY[");
        printer.visit_collection(&self.elements, ", ");
        printer.append("]");
    }
}

/// The quantifier of an array comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// True if the comparison holds for at least one element.
    Any,
    /// True if the comparison holds for every element.
    All,
}

impl Quantifier {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::All => "ALL",
        }
    }
}

/// The comparison applied between the item and each array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// `=`
    Eq,
    /// `<>`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `LIKE`
    Like,
    /// `ILIKE`
    ILike,
}

impl ComparisonOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::ILike => "ILIKE",
        }
    }
}

/// `item <op> ANY(array)` / `item <op> ALL(array)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayAnyAll {
    item: PgSqlExprRef,
    array: PgSqlExprRef,
    op: ComparisonOp,
    quantifier: Quantifier,
    ty: SqlType,
}

impl ArrayAnyAll {
    /// Creates an ANY/ALL array comparison.
    ///
    /// # Errors
    ///
    /// Rejects a non-array `array` operand and an item whose type disagrees
    /// with the array's element type (unknown types pass on either side).
    pub fn new(
        item: PgSqlExprRef,
        array: PgSqlExprRef,
        op: ComparisonOp,
        quantifier: Quantifier,
    ) -> Result<Self> {
        let SqlType::Array(element) = array.ty() else {
            return Err(PgExprError::NonArrayOperand {
                found: array.ty().clone(),
            });
        };
        let item_ty = item.ty();
        if item_ty != element.as_ref()
            && *item_ty != SqlType::Unknown
            && **element != SqlType::Unknown
        {
            return Err(PgExprError::ElementTypeMismatch {
                element: element.as_ref().clone(),
                found: item_ty.clone(),
            });
        }
        Ok(Self {
            item,
            array,
            op,
            quantifier,
            ty: SqlType::Boolean,
        })
    }

    /// The item compared against the elements.
    #[must_use]
    pub const fn item(&self) -> &PgSqlExprRef {
        &self.item
    }

    /// The array operand.
    #[must_use]
    pub const fn array(&self) -> &PgSqlExprRef {
        &self.array
    }

    /// The element comparison operator.
    #[must_use]
    pub const fn op(&self) -> ComparisonOp {
        self.op
    }

    /// The quantifier.
    #[must_use]
    pub const fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// The semantic result type (always boolean).
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// Update-if-changed; see [`ArrayIndex::update`].
    #[must_use]
    pub fn update(&self, item: PgSqlExprRef, array: PgSqlExprRef) -> Self {
        if Arc::ptr_eq(&item, &self.item) && Arc::ptr_eq(&array, &self.array) {
            self.clone()
        } else {
            Self {
                item,
                array,
                op: self.op,
                quantifier: self.quantifier,
                ty: SqlType::Boolean,
            }
        }
    }

    /// Visits item then array.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let item = visitor.visit(&self.item);
        let array = visitor.visit(&self.array);
        if Arc::ptr_eq(&item, &self.item) && Arc::ptr_eq(&array, &self.array) {
            None
        } else {
            Some(self.update(item, array))
        }
    }

    /// Renders `item <op> ANY(array)`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.visit_operand(&self.item);
        printer.append(" ");
        printer.append(self.op.as_str());
        printer.append(" ");
        printer.append(self.quantifier.as_str());
        printer.append("(");
        printer.visit(&self.array);
        printer.append(")");
    }
}

pub(crate) fn option_ptr_eq(new: Option<&PgSqlExprRef>, old: Option<&PgSqlExprRef>) -> bool {
    match (new, old) {
        (Some(new), Some(old)) => Arc::ptr_eq(new, old),
        (None, None) => true,
        _ => false,
    }
}
