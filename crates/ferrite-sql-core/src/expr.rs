//! The generic expression tree and its dialect extension seam.
//!
//! Trees are immutable: children are held behind [`Arc`] and shared between
//! rewrites. A rewrite either returns the original reference (nothing
//! changed) or a fresh node that shares every unchanged child.

use std::sync::Arc;

use crate::mapping::TypeMapping;
use crate::printer::Printer;
use crate::types::SqlType;
use crate::visit::Visitor;

/// A shared reference to an expression node.
pub type SqlExprRef<D> = Arc<SqlExpr<D>>;

/// The contract a dialect-specific node family must satisfy to participate
/// in the generic tree.
///
/// Generic visitors that do not understand a dialect reach its nodes through
/// [`DialectExpr::visit_children`], which must visit every child in declared
/// order and report whether anything changed. Dialect-aware visitors get a
/// per-node-kind surface from the dialect crate instead.
pub trait DialectExpr:
    Clone + PartialEq + Eq + std::hash::Hash + std::fmt::Debug + Sized
{
    /// The semantic result type of the node.
    fn ty(&self) -> &SqlType;

    /// The store-type mapping of the node, if one has been inferred.
    fn type_mapping(&self) -> Option<&TypeMapping>;

    /// Visits every child through `visitor`, in declared child order.
    ///
    /// Returns `None` when every child came back reference-identical, so the
    /// caller can keep the existing node. Returns the rebuilt node otherwise.
    fn visit_children<V: Visitor<Self>>(&self, visitor: &mut V) -> Option<Self>;

    /// Renders the node as SQL text.
    fn print(&self, printer: &mut Printer<'_, Self>);

    /// True when the node renders as an infix operator or a pattern match
    /// and therefore needs parentheses when used as a binary operand.
    fn requires_brackets(&self) -> bool {
        false
    }
}

/// Binary operators shared by every dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Concat,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Concat => "||",
        }
    }

    /// True for operators whose result type is boolean regardless of the
    /// operand types.
    #[must_use]
    pub const fn returns_boolean(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::NotEq
                | Self::Lt
                | Self::LtEq
                | Self::Gt
                | Self::GtEq
                | Self::And
                | Self::Or
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Negation (`-`).
    Neg,
    /// Logical NOT.
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT",
        }
    }
}

/// A literal value.
///
/// Non-integer numerics are kept as their source text so the tree stays
/// `Eq + Hash` and printing is byte-deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Integer literal.
    Integer(i64),
    /// Numeric literal, carried verbatim.
    Numeric(String),
    /// String literal.
    Text(String),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
}

impl Value {
    /// The semantic type the literal carries by itself.
    #[must_use]
    pub const fn ty(&self) -> SqlType {
        match self {
            Self::Integer(_) => SqlType::Integer,
            Self::Numeric(_) => SqlType::Numeric,
            Self::Text(_) => SqlType::Text,
            Self::Boolean(_) => SqlType::Boolean,
            Self::Null => SqlType::Unknown,
        }
    }
}

/// A column reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    table: Option<String>,
    name: String,
    ty: SqlType,
    type_mapping: Option<TypeMapping>,
}

impl Column {
    /// Creates an unqualified column reference.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: SqlType) -> Self {
        Self {
            table: None,
            name: name.into(),
            ty,
            type_mapping: None,
        }
    }

    /// Creates a column reference qualified with a table name or alias.
    #[must_use]
    pub fn qualified(table: impl Into<String>, name: impl Into<String>, ty: SqlType) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
            ty,
            type_mapping: None,
        }
    }

    /// Attaches a store-type mapping.
    #[must_use]
    pub fn with_mapping(mut self, mapping: TypeMapping) -> Self {
        self.type_mapping = Some(mapping);
        self
    }

    /// The table qualifier, if any.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// The column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The semantic type.
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// The store-type mapping, if any.
    #[must_use]
    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }
}

/// A literal node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    value: Value,
    ty: SqlType,
    type_mapping: Option<TypeMapping>,
}

impl Literal {
    /// Creates a literal node; the result type is derived from the value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        let ty = value.ty();
        Self {
            value,
            ty,
            type_mapping: None,
        }
    }

    /// Attaches a store-type mapping.
    #[must_use]
    pub fn with_mapping(mut self, mapping: TypeMapping) -> Self {
        self.type_mapping = Some(mapping);
        self
    }

    /// The literal value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// The semantic type.
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// The store-type mapping, if any.
    #[must_use]
    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }
}

/// A positional query parameter, rendered with the dialect's placeholder
/// syntax (`$1` on PostgreSQL).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    position: usize,
    ty: SqlType,
    type_mapping: Option<TypeMapping>,
}

impl Parameter {
    /// Creates a parameter with a 1-based position.
    #[must_use]
    pub const fn new(position: usize, ty: SqlType) -> Self {
        Self {
            position,
            ty,
            type_mapping: None,
        }
    }

    /// Attaches a store-type mapping.
    #[must_use]
    pub fn with_mapping(mut self, mapping: TypeMapping) -> Self {
        self.type_mapping = Some(mapping);
        self
    }

    /// The 1-based parameter position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The semantic type.
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// The store-type mapping, if any.
    #[must_use]
    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }
}

/// A binary expression over a shared operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binary<D: DialectExpr> {
    left: SqlExprRef<D>,
    op: BinaryOp,
    right: SqlExprRef<D>,
    ty: SqlType,
}

impl<D: DialectExpr> Binary<D> {
    /// Creates a binary expression; comparisons and logical operators yield
    /// boolean, concatenation yields text, arithmetic keeps the left type.
    #[must_use]
    pub fn new(left: SqlExprRef<D>, op: BinaryOp, right: SqlExprRef<D>) -> Self {
        let ty = if op.returns_boolean() {
            SqlType::Boolean
        } else if op == BinaryOp::Concat {
            SqlType::Text
        } else {
            left.ty().clone()
        };
        Self {
            left,
            op,
            right,
            ty,
        }
    }

    /// The left operand.
    #[must_use]
    pub const fn left(&self) -> &SqlExprRef<D> {
        &self.left
    }

    /// The operator.
    #[must_use]
    pub const fn op(&self) -> BinaryOp {
        self.op
    }

    /// The right operand.
    #[must_use]
    pub const fn right(&self) -> &SqlExprRef<D> {
        &self.right
    }

    /// The semantic result type.
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// Returns `self` (shallow clone, all children shared) when both operands
    /// are reference-identical to the current ones, a rebuilt node otherwise.
    #[must_use]
    pub fn update(&self, left: SqlExprRef<D>, right: SqlExprRef<D>) -> Self {
        if Arc::ptr_eq(&left, &self.left) && Arc::ptr_eq(&right, &self.right) {
            self.clone()
        } else {
            Self {
                left,
                op: self.op,
                right,
                ty: self.ty.clone(),
            }
        }
    }
}

/// A unary expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unary<D: DialectExpr> {
    op: UnaryOp,
    operand: SqlExprRef<D>,
    ty: SqlType,
}

impl<D: DialectExpr> Unary<D> {
    /// Creates a unary expression; NOT yields boolean, negation keeps the
    /// operand type.
    #[must_use]
    pub fn new(op: UnaryOp, operand: SqlExprRef<D>) -> Self {
        let ty = match op {
            UnaryOp::Not => SqlType::Boolean,
            UnaryOp::Neg => operand.ty().clone(),
        };
        Self { op, operand, ty }
    }

    /// The operator.
    #[must_use]
    pub const fn op(&self) -> UnaryOp {
        self.op
    }

    /// The operand.
    #[must_use]
    pub const fn operand(&self) -> &SqlExprRef<D> {
        &self.operand
    }

    /// The semantic result type.
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// Update-if-changed; see [`Binary::update`].
    #[must_use]
    pub fn update(&self, operand: SqlExprRef<D>) -> Self {
        if Arc::ptr_eq(&operand, &self.operand) {
            self.clone()
        } else {
            Self {
                op: self.op,
                operand,
                ty: self.ty.clone(),
            }
        }
    }
}

/// A LIKE pattern match with an optional escape expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Like<D: DialectExpr> {
    expr: SqlExprRef<D>,
    pattern: SqlExprRef<D>,
    escape: Option<SqlExprRef<D>>,
    negated: bool,
}

impl<D: DialectExpr> Like<D> {
    /// Creates a LIKE match.
    #[must_use]
    pub const fn new(
        expr: SqlExprRef<D>,
        pattern: SqlExprRef<D>,
        escape: Option<SqlExprRef<D>>,
    ) -> Self {
        Self {
            expr,
            pattern,
            escape,
            negated: false,
        }
    }

    /// Flips the match into NOT LIKE.
    #[must_use]
    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    /// The matched expression.
    #[must_use]
    pub const fn expr(&self) -> &SqlExprRef<D> {
        &self.expr
    }

    /// The pattern.
    #[must_use]
    pub const fn pattern(&self) -> &SqlExprRef<D> {
        &self.pattern
    }

    /// The escape expression, if any.
    #[must_use]
    pub const fn escape(&self) -> Option<&SqlExprRef<D>> {
        self.escape.as_ref()
    }

    /// True for NOT LIKE.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Update-if-changed; see [`Binary::update`].
    #[must_use]
    pub fn update(
        &self,
        expr: SqlExprRef<D>,
        pattern: SqlExprRef<D>,
        escape: Option<SqlExprRef<D>>,
    ) -> Self {
        let escape_unchanged = match (&escape, &self.escape) {
            (Some(new), Some(old)) => Arc::ptr_eq(new, old),
            (None, None) => true,
            _ => false,
        };
        if Arc::ptr_eq(&expr, &self.expr) && Arc::ptr_eq(&pattern, &self.pattern) && escape_unchanged
        {
            self.clone()
        } else {
            Self {
                expr,
                pattern,
                escape,
                negated: self.negated,
            }
        }
    }
}

/// A positional-argument function call shared by every dialect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function<D: DialectExpr> {
    name: String,
    args: Vec<SqlExprRef<D>>,
    ty: SqlType,
    type_mapping: Option<TypeMapping>,
}

impl<D: DialectExpr> Function<D> {
    /// Creates a function call with a declared result type.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<SqlExprRef<D>>, ty: SqlType) -> Self {
        Self {
            name: name.into(),
            args,
            ty,
            type_mapping: None,
        }
    }

    /// Attaches a store-type mapping.
    #[must_use]
    pub fn with_mapping(mut self, mapping: TypeMapping) -> Self {
        self.type_mapping = Some(mapping);
        self
    }

    /// The function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The arguments, in call order.
    #[must_use]
    pub fn args(&self) -> &[SqlExprRef<D>] {
        &self.args
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

    /// Update-if-changed over the argument list.
    ///
    /// # Panics
    ///
    /// Panics if `args` has a different length than the current argument
    /// list: a rewrite pass must never change a node's arity.
    #[must_use]
    pub fn update(&self, args: Vec<SqlExprRef<D>>) -> Self {
        assert_eq!(
            args.len(),
            self.args.len(),
            "rewritten argument list changed arity"
        );
        if args
            .iter()
            .zip(&self.args)
            .all(|(new, old)| Arc::ptr_eq(new, old))
        {
            self.clone()
        } else {
            Self {
                name: self.name.clone(),
                args,
                ty: self.ty.clone(),
                type_mapping: self.type_mapping.clone(),
            }
        }
    }
}

/// An SQL expression, generic over a dialect node family `D`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlExpr<D: DialectExpr> {
    /// A column reference.
    Column(Column),
    /// A literal value.
    Literal(Literal),
    /// A positional parameter.
    Parameter(Parameter),
    /// A binary expression.
    Binary(Binary<D>),
    /// A unary expression.
    Unary(Unary<D>),
    /// A LIKE pattern match.
    Like(Like<D>),
    /// A function call with positional arguments.
    Function(Function<D>),
    /// A dialect-specific node.
    Dialect(D),
}

impl<D: DialectExpr> SqlExpr<D> {
    /// The semantic result type of the expression.
    #[must_use]
    pub fn ty(&self) -> &SqlType {
        match self {
            Self::Column(column) => column.ty(),
            Self::Literal(literal) => literal.ty(),
            Self::Parameter(parameter) => parameter.ty(),
            Self::Binary(binary) => binary.ty(),
            Self::Unary(unary) => unary.ty(),
            Self::Like(_) => &SqlType::Boolean,
            Self::Function(function) => function.ty(),
            Self::Dialect(node) => node.ty(),
        }
    }

    /// The store-type mapping, if one has been inferred.
    #[must_use]
    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        match self {
            Self::Column(column) => column.type_mapping(),
            Self::Literal(literal) => literal.type_mapping(),
            Self::Parameter(parameter) => parameter.type_mapping(),
            Self::Function(function) => function.type_mapping(),
            Self::Dialect(node) => node.type_mapping(),
            Self::Binary(_) | Self::Unary(_) | Self::Like(_) => None,
        }
    }

    /// True when the expression must be parenthesized as a binary operand.
    #[must_use]
    pub fn requires_brackets(&self) -> bool {
        match self {
            Self::Binary(_) | Self::Like(_) => true,
            Self::Dialect(node) => node.requires_brackets(),
            _ => false,
        }
    }

    /// Wraps the expression for sharing between parents.
    #[must_use]
    pub fn shared(self) -> SqlExprRef<D> {
        Arc::new(self)
    }

    /// Creates an unqualified column reference.
    #[must_use]
    pub fn column(name: impl Into<String>, ty: SqlType) -> Self {
        Self::Column(Column::new(name, ty))
    }

    /// Creates a qualified column reference.
    #[must_use]
    pub fn column_qualified(
        table: impl Into<String>,
        name: impl Into<String>,
        ty: SqlType,
    ) -> Self {
        Self::Column(Column::qualified(table, name, ty))
    }

    /// Creates a positional parameter.
    #[must_use]
    pub const fn parameter(position: usize, ty: SqlType) -> Self {
        Self::Parameter(Parameter::new(position, ty))
    }

    /// Creates an integer literal.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::Literal(Literal::new(Value::Integer(value)))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Literal(Literal::new(Value::Text(value.into())))
    }

    /// Creates a boolean literal.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::Literal(Literal::new(Value::Boolean(value)))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub fn null() -> Self {
        Self::Literal(Literal::new(Value::Null))
    }

    /// Combines two expressions with a binary operator.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary(Binary::new(self.shared(), op, right.shared()))
    }

    /// Creates an equality comparison.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates an AND conjunction.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR disjunction.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }
}

impl<D: DialectExpr> std::fmt::Display for SqlExpr<D> {
    /// Renders through the generic dialect; use [`Printer::print`] directly
    /// for dialect-accurate output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&Printer::print(&crate::dialect::GenericDialect, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::Visitor;

    // A dialect with no nodes, for exercising the generic tree alone.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    enum NoDialect {}

    impl DialectExpr for NoDialect {
        fn ty(&self) -> &SqlType {
            match *self {}
        }

        fn type_mapping(&self) -> Option<&TypeMapping> {
            match *self {}
        }

        fn visit_children<V: Visitor<Self>>(&self, _visitor: &mut V) -> Option<Self> {
            match *self {}
        }

        fn print(&self, _printer: &mut Printer<'_, Self>) {
            match *self {}
        }
    }

    type Expr = SqlExpr<NoDialect>;

    #[test]
    fn test_binary_result_types() {
        let cmp = Expr::column("age", SqlType::Integer).eq(Expr::integer(18));
        assert_eq!(cmp.ty(), &SqlType::Boolean);

        let sum = Expr::column("a", SqlType::BigInt).binary(BinaryOp::Add, Expr::integer(1));
        assert_eq!(sum.ty(), &SqlType::BigInt);

        let concat = Expr::column("a", SqlType::Text).binary(BinaryOp::Concat, Expr::text("x"));
        assert_eq!(concat.ty(), &SqlType::Text);
    }

    #[test]
    fn test_structural_equality_of_twins() {
        let build = || {
            Expr::column("status", SqlType::Text)
                .eq(Expr::text("active"))
                .and(Expr::column("age", SqlType::Integer).eq(Expr::integer(21)))
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_requires_brackets() {
        assert!(Expr::boolean(true).and(Expr::boolean(false)).requires_brackets());
        assert!(!Expr::integer(1).requires_brackets());

        let like = Expr::Like(Like::new(
            Expr::column("name", SqlType::Text).shared(),
            Expr::text("a%").shared(),
            None,
        ));
        assert!(like.requires_brackets());
    }

    #[test]
    fn test_update_shares_children_when_unchanged() {
        let left = Expr::integer(1).shared();
        let right = Expr::integer(2).shared();
        let binary = Binary::new(Arc::clone(&left), BinaryOp::Add, Arc::clone(&right));

        let same = binary.update(Arc::clone(&left), Arc::clone(&right));
        assert!(Arc::ptr_eq(same.left(), &left));
        assert!(Arc::ptr_eq(same.right(), &right));

        let replacement = Expr::integer(3).shared();
        let changed = binary.update(Arc::clone(&left), Arc::clone(&replacement));
        assert!(Arc::ptr_eq(changed.left(), &left));
        assert!(Arc::ptr_eq(changed.right(), &replacement));
        assert_eq!(changed.ty(), &SqlType::Integer);
    }

    #[test]
    fn test_display_renders_generic_sql() {
        let tree = Expr::column("age", SqlType::Integer).eq(Expr::integer(18));
        assert_eq!(tree.to_string(), "age = 18");
    }

    #[test]
    #[should_panic(expected = "changed arity")]
    fn test_function_update_rejects_arity_change() {
        let function = Function::<NoDialect>::new(
            "coalesce",
            vec![Expr::null().shared(), Expr::integer(0).shared()],
            SqlType::Integer,
        );
        let _ = function.update(vec![Expr::integer(0).shared()]);
    }
}
