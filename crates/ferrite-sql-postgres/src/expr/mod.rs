//! The PostgreSQL node family.
//!
//! One canonical node kind per concept; every node validates its shape at
//! construction and carries its frozen result type. The [`PgExpr`] enum plugs
//! the family into the generic tree through [`DialectExpr`].

pub mod array;
pub mod binary;
pub mod conversion;
pub mod function;
pub mod json;
pub mod pattern;
pub mod row_value;

use ferrite_sql_core::{DialectExpr, Printer, SqlExpr, SqlExprRef, SqlType, TypeMapping, Visitor};

pub use array::{ArrayAnyAll, ArrayIndex, ArraySlice, ComparisonOp, NewArray, Quantifier};
pub use binary::{CustomBinary, CustomUnary, PgBinary};
pub use conversion::{AtTimeZone, Collate, StoreCast};
pub use function::PgFunction;
pub use json::{FieldAccess, JsonTraversal};
pub use pattern::{ILike, RegexMatch};
pub use row_value::RowValue;

/// An SQL expression over the PostgreSQL node family.
pub type PgSqlExpr = SqlExpr<PgExpr>;

/// A shared reference to an expression over the PostgreSQL node family.
pub type PgSqlExprRef = SqlExprRef<PgExpr>;

/// A PostgreSQL-specific expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PgExpr {
    /// `array[index]`
    ArrayIndex(ArrayIndex),
    /// `array[lower:upper]`
    ArraySlice(ArraySlice),
    /// `ARRAY[...]`
    NewArray(NewArray),
    /// `item <op> ANY/ALL(array)`
    ArrayAnyAll(ArrayAnyAll),
    /// A [`crate::PgOperator`] binary expression.
    Binary(PgBinary),
    /// A binary expression over raw operator text.
    CustomBinary(CustomBinary),
    /// A unary expression over raw operator text.
    CustomUnary(CustomUnary),
    /// `ILIKE` / `NOT ILIKE`
    ILike(ILike),
    /// `~` / `~*`
    RegexMatch(RegexMatch),
    /// `#>` / `#>>` path traversal.
    JsonTraversal(JsonTraversal),
    /// `(composite).field`
    FieldAccess(FieldAccess),
    /// `(a, b, c)` row value.
    RowValue(RowValue),
    /// A function call with named arguments or custom separators.
    Function(PgFunction),
    /// `AT TIME ZONE`
    AtTimeZone(AtTimeZone),
    /// `COLLATE`
    Collate(Collate),
    /// `operand::storetype`
    Cast(StoreCast),
}

impl PgExpr {
    /// Wraps the node into a shared generic expression.
    #[must_use]
    pub fn shared(self) -> PgSqlExprRef {
        SqlExpr::Dialect(self).shared()
    }
}

impl DialectExpr for PgExpr {
    fn ty(&self) -> &SqlType {
        match self {
            Self::ArrayIndex(node) => node.ty(),
            Self::ArraySlice(node) => node.ty(),
            Self::NewArray(node) => node.ty(),
            Self::ArrayAnyAll(node) => node.ty(),
            Self::Binary(node) => node.ty(),
            Self::CustomBinary(node) => node.ty(),
            Self::CustomUnary(node) => node.ty(),
            Self::ILike(node) => node.ty(),
            Self::RegexMatch(node) => node.ty(),
            Self::JsonTraversal(node) => node.ty(),
            Self::FieldAccess(node) => node.ty(),
            Self::RowValue(node) => node.ty(),
            Self::Function(node) => node.ty(),
            Self::AtTimeZone(node) => node.ty(),
            Self::Collate(node) => node.ty(),
            Self::Cast(node) => node.ty(),
        }
    }

    fn type_mapping(&self) -> Option<&TypeMapping> {
        match self {
            Self::ArrayIndex(node) => node.type_mapping(),
            Self::Binary(node) => node.type_mapping(),
            Self::CustomBinary(node) => node.type_mapping(),
            Self::JsonTraversal(node) => node.type_mapping(),
            Self::FieldAccess(node) => node.type_mapping(),
            Self::Function(node) => node.type_mapping(),
            Self::Cast(node) => Some(node.type_mapping()),
            Self::ArraySlice(_)
            | Self::NewArray(_)
            | Self::ArrayAnyAll(_)
            | Self::CustomUnary(_)
            | Self::ILike(_)
            | Self::RegexMatch(_)
            | Self::RowValue(_)
            | Self::AtTimeZone(_)
            | Self::Collate(_) => None,
        }
    }

    fn visit_children<V: Visitor<Self>>(&self, visitor: &mut V) -> Option<Self> {
        match self {
            Self::ArrayIndex(node) => node.visit_children(visitor).map(Self::ArrayIndex),
            Self::ArraySlice(node) => node.visit_children(visitor).map(Self::ArraySlice),
            Self::NewArray(node) => node.visit_children(visitor).map(Self::NewArray),
            Self::ArrayAnyAll(node) => node.visit_children(visitor).map(Self::ArrayAnyAll),
            Self::Binary(node) => node.visit_children(visitor).map(Self::Binary),
            Self::CustomBinary(node) => node.visit_children(visitor).map(Self::CustomBinary),
            Self::CustomUnary(node) => node.visit_children(visitor).map(Self::CustomUnary),
            Self::ILike(node) => node.visit_children(visitor).map(Self::ILike),
            Self::RegexMatch(node) => node.visit_children(visitor).map(Self::RegexMatch),
            Self::JsonTraversal(node) => node.visit_children(visitor).map(Self::JsonTraversal),
            Self::FieldAccess(node) => node.visit_children(visitor).map(Self::FieldAccess),
            Self::RowValue(node) => node.visit_children(visitor).map(Self::RowValue),
            Self::Function(node) => node.visit_children(visitor).map(Self::Function),
            Self::AtTimeZone(node) => node.visit_children(visitor).map(Self::AtTimeZone),
            Self::Collate(node) => node.visit_children(visitor).map(Self::Collate),
            Self::Cast(node) => node.visit_children(visitor).map(Self::Cast),
        }
    }

    fn print(&self, printer: &mut Printer<'_, Self>) {
        match self {
            Self::ArrayIndex(node) => node.print(printer),
            Self::ArraySlice(node) => node.print(printer),
            Self::NewArray(node) => node.print(printer),
            Self::ArrayAnyAll(node) => node.print(printer),
            Self::Binary(node) => node.print(printer),
            Self::CustomBinary(node) => node.print(printer),
            Self::CustomUnary(node) => node.print(printer),
            Self::ILike(node) => node.print(printer),
            Self::RegexMatch(node) => node.print(printer),
            Self::JsonTraversal(node) => node.print(printer),
            Self::FieldAccess(node) => node.print(printer),
            Self::RowValue(node) => node.print(printer),
            Self::Function(node) => node.print(printer),
            Self::AtTimeZone(node) => node.print(printer),
            Self::Collate(node) => node.print(printer),
            Self::Cast(node) => node.print(printer),
        }
    }

    // The bracketing predicate: re-derive this for any new infix node kind.
    fn requires_brackets(&self) -> bool {
        matches!(
            self,
            Self::Binary(_)
                | Self::CustomBinary(_)
                | Self::ArrayAnyAll(_)
                | Self::ILike(_)
                | Self::RegexMatch(_)
        )
    }
}
