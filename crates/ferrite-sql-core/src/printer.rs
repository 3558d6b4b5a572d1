//! SQL text rendering.

use std::marker::PhantomData;

use crate::dialect::Dialect;
use crate::expr::{DialectExpr, SqlExpr, SqlExprRef, UnaryOp, Value};

/// Renders an expression tree as SQL text.
///
/// The printer owns the output buffer and the bracketing policy; dialect
/// nodes render themselves through [`DialectExpr::print`] and call back into
/// the printer for their children. Printing is deterministic: the same tree
/// always yields byte-identical text.
pub struct Printer<'a, D: DialectExpr> {
    dialect: &'a dyn Dialect,
    sql: String,
    _family: PhantomData<fn() -> D>,
}

impl<'a, D: DialectExpr> Printer<'a, D> {
    /// Creates a printer for the given dialect.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            _family: PhantomData,
        }
    }

    /// Renders one expression to a string.
    #[must_use]
    pub fn print(dialect: &'a dyn Dialect, expr: &SqlExpr<D>) -> String {
        let mut printer = Self::new(dialect);
        printer.visit(expr);
        printer.finish()
    }

    /// The dialect being rendered for.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect
    }

    /// Appends raw SQL text.
    pub fn append(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Appends a single-quoted string literal, doubling embedded quotes.
    pub fn append_string_literal(&mut self, value: &str) {
        self.sql.push('\'');
        for c in value.chars() {
            if c == '\'' {
                self.sql.push('\'');
            }
            self.sql.push(c);
        }
        self.sql.push('\'');
    }

    /// Appends the dialect's placeholder for a parameter position.
    pub fn append_parameter(&mut self, position: usize) {
        let placeholder = self.dialect.parameter_placeholder(position);
        self.sql.push_str(&placeholder);
    }

    /// Renders an expression.
    pub fn visit(&mut self, expr: &SqlExpr<D>) {
        match expr {
            SqlExpr::Column(column) => {
                if let Some(table) = column.table() {
                    self.sql.push_str(table);
                    self.sql.push('.');
                }
                self.sql.push_str(column.name());
            }
            SqlExpr::Literal(literal) => match literal.value() {
                Value::Integer(value) => {
                    let rendered = value.to_string();
                    self.sql.push_str(&rendered);
                }
                Value::Numeric(text) => self.sql.push_str(text),
                Value::Text(text) => self.append_string_literal(text),
                Value::Boolean(true) => self.sql.push_str("TRUE"),
                Value::Boolean(false) => self.sql.push_str("FALSE"),
                Value::Null => self.sql.push_str("NULL"),
            },
            SqlExpr::Parameter(parameter) => self.append_parameter(parameter.position()),
            SqlExpr::Binary(binary) => {
                self.visit_operand(binary.left());
                self.sql.push(' ');
                self.sql.push_str(binary.op().as_str());
                self.sql.push(' ');
                self.visit_operand(binary.right());
            }
            SqlExpr::Unary(unary) => {
                match unary.op() {
                    UnaryOp::Not => self.sql.push_str("NOT "),
                    UnaryOp::Neg => self.sql.push('-'),
                }
                self.visit_operand(unary.operand());
            }
            SqlExpr::Like(like) => {
                self.visit_operand(like.expr());
                self.sql
                    .push_str(if like.is_negated() { " NOT LIKE " } else { " LIKE " });
                self.visit_operand(like.pattern());
                if let Some(escape) = like.escape() {
                    self.sql.push_str(" ESCAPE ");
                    self.visit(escape);
                }
            }
            SqlExpr::Function(function) => {
                self.sql.push_str(function.name());
                self.sql.push('(');
                self.visit_collection(function.args(), ", ");
                self.sql.push(')');
            }
            SqlExpr::Dialect(node) => node.print(self),
        }
    }

    /// Renders a binary-operand child, parenthesizing it when the child is
    /// itself an infix or pattern-match node.
    pub fn visit_operand(&mut self, expr: &SqlExprRef<D>) {
        if expr.requires_brackets() {
            self.sql.push('(');
            self.visit(expr);
            self.sql.push(')');
        } else {
            self.visit(expr);
        }
    }

    /// Renders a list of expressions with a separator between them.
    pub fn visit_collection(&mut self, items: &[SqlExprRef<D>], separator: &str) {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.sql.push_str(separator);
            }
            self.visit(item);
        }
    }

    /// Consumes the printer and returns the rendered SQL.
    #[must_use]
    pub fn finish(self) -> String {
        self.sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::expr::BinaryOp;
    use crate::types::SqlType;
    use crate::visit::Visitor;
    use crate::TypeMapping;

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

    fn print(expr: &Expr) -> String {
        Printer::print(&GenericDialect, expr)
    }

    #[test]
    fn test_nested_binary_brackets() {
        let a = Expr::column("a", SqlType::Boolean);
        let c = Expr::column("c", SqlType::Boolean);
        let d = Expr::column("d", SqlType::Boolean);
        let tree = a.and(c.or(d));
        assert_eq!(print(&tree), "a AND (c OR d)");
    }

    #[test]
    fn test_string_literal_escaping() {
        let tree = Expr::column("name", SqlType::Text).eq(Expr::text("O'Brien"));
        assert_eq!(print(&tree), "name = 'O''Brien'");
    }

    #[test]
    fn test_arithmetic_operand_brackets() {
        let sum = Expr::column("a", SqlType::Integer).binary(BinaryOp::Add, Expr::integer(1));
        let product = sum.binary(BinaryOp::Mul, Expr::integer(2));
        assert_eq!(print(&product), "(a + 1) * 2");
    }

    #[test]
    fn test_print_is_deterministic() {
        let tree = Expr::column("age", SqlType::Integer)
            .eq(Expr::integer(18))
            .and(Expr::column("active", SqlType::Boolean));
        assert_eq!(print(&tree), print(&tree));
    }
}
