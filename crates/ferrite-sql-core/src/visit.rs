//! Visitor-based traversal and rewriting.
//!
//! Rewrites are expressed as "visit, possibly replace a leaf, let the change
//! bubble upward": [`walk_expr`] rebuilds a node only when at least one child
//! came back as a different reference, so an identity visit returns the
//! original [`SqlExprRef`] untouched at every level.

use std::sync::Arc;

use crate::expr::{DialectExpr, SqlExpr, SqlExprRef};

/// A tree visitor.
///
/// The default [`Visitor::visit`] performs structural recursion through
/// [`walk_expr`]; implementations override it to substitute nodes. Dialect
/// nodes are reached through [`Visitor::visit_dialect`], whose default also
/// recurses structurally — a visitor that knows nothing about a dialect must
/// still traverse its nodes safely.
pub trait Visitor<D: DialectExpr>: Sized {
    /// Visits one expression, returning it unchanged or replaced.
    fn visit(&mut self, expr: &SqlExprRef<D>) -> SqlExprRef<D> {
        walk_expr(self, expr)
    }

    /// Visits a dialect node.
    ///
    /// `expr` is the enclosing [`SqlExpr::Dialect`] reference, returned as-is
    /// when the node's children are unchanged.
    fn visit_dialect(&mut self, expr: &SqlExprRef<D>, node: &D) -> SqlExprRef<D> {
        match node.visit_children(self) {
            Some(rebuilt) => Arc::new(SqlExpr::Dialect(rebuilt)),
            None => Arc::clone(expr),
        }
    }
}

/// Structurally visits every child of `expr` in declared child order and
/// rebuilds the node only if a child changed.
pub fn walk_expr<D: DialectExpr, V: Visitor<D>>(
    visitor: &mut V,
    expr: &SqlExprRef<D>,
) -> SqlExprRef<D> {
    match &**expr {
        SqlExpr::Column(_) | SqlExpr::Literal(_) | SqlExpr::Parameter(_) => Arc::clone(expr),
        SqlExpr::Binary(binary) => {
            let left = visitor.visit(binary.left());
            let right = visitor.visit(binary.right());
            if Arc::ptr_eq(&left, binary.left()) && Arc::ptr_eq(&right, binary.right()) {
                Arc::clone(expr)
            } else {
                Arc::new(SqlExpr::Binary(binary.update(left, right)))
            }
        }
        SqlExpr::Unary(unary) => {
            let operand = visitor.visit(unary.operand());
            if Arc::ptr_eq(&operand, unary.operand()) {
                Arc::clone(expr)
            } else {
                Arc::new(SqlExpr::Unary(unary.update(operand)))
            }
        }
        SqlExpr::Like(like) => {
            // Declared order: match, pattern, escape.
            let matched = visitor.visit(like.expr());
            let pattern = visitor.visit(like.pattern());
            let escape = like.escape().map(|escape| visitor.visit(escape));
            let unchanged = Arc::ptr_eq(&matched, like.expr())
                && Arc::ptr_eq(&pattern, like.pattern())
                && match (&escape, like.escape()) {
                    (Some(new), Some(old)) => Arc::ptr_eq(new, old),
                    (None, None) => true,
                    _ => false,
                };
            if unchanged {
                Arc::clone(expr)
            } else {
                Arc::new(SqlExpr::Like(like.update(matched, pattern, escape)))
            }
        }
        SqlExpr::Function(function) => match visit_expr_list(visitor, function.args()) {
            Some(args) => Arc::new(SqlExpr::Function(function.update(args))),
            None => Arc::clone(expr),
        },
        SqlExpr::Dialect(node) => visitor.visit_dialect(expr, node),
    }
}

/// Visits a list of children in order.
///
/// Returns `None` when every element came back reference-identical. The
/// backing vector is only allocated at the first changed element; the
/// unchanged prefix is then copied over by reference.
pub fn visit_expr_list<D: DialectExpr, V: Visitor<D>>(
    visitor: &mut V,
    items: &[SqlExprRef<D>],
) -> Option<Vec<SqlExprRef<D>>> {
    let mut rebuilt: Option<Vec<SqlExprRef<D>>> = None;
    for (index, item) in items.iter().enumerate() {
        let visited = visitor.visit(item);
        if let Some(list) = rebuilt.as_mut() {
            list.push(visited);
        } else if !Arc::ptr_eq(&visited, item) {
            let mut list = Vec::with_capacity(items.len());
            list.extend(items[..index].iter().map(Arc::clone));
            list.push(visited);
            rebuilt = Some(list);
        }
    }
    rebuilt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{BinaryOp, Function};
    use crate::printer::Printer;
    use crate::types::SqlType;
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

    struct Identity;

    impl Visitor<NoDialect> for Identity {}

    /// Replaces every integer literal with the given value.
    struct ReplaceIntegers(i64);

    impl Visitor<NoDialect> for ReplaceIntegers {
        fn visit(&mut self, expr: &SqlExprRef<NoDialect>) -> SqlExprRef<NoDialect> {
            if let SqlExpr::Literal(literal) = &**expr {
                if matches!(literal.value(), crate::expr::Value::Integer(_)) {
                    return Expr::integer(self.0).shared();
                }
            }
            walk_expr(self, expr)
        }
    }

    #[test]
    fn test_identity_visit_returns_same_reference() {
        let tree = Expr::column("age", SqlType::Integer)
            .eq(Expr::integer(18))
            .and(Expr::column("name", SqlType::Text).eq(Expr::text("a")))
            .shared();
        let visited = Identity.visit(&tree);
        assert!(Arc::ptr_eq(&visited, &tree));
    }

    #[test]
    fn test_replacement_bubbles_up() {
        let tree = Expr::column("age", SqlType::Integer)
            .eq(Expr::integer(18))
            .shared();
        let visited = ReplaceIntegers(21).visit(&tree);
        assert!(!Arc::ptr_eq(&visited, &tree));

        let SqlExpr::Binary(binary) = &*visited else {
            panic!("expected binary node");
        };
        // Unchanged left child is shared with the original tree.
        let SqlExpr::Binary(original) = &*tree else {
            panic!("expected binary node");
        };
        assert!(Arc::ptr_eq(binary.left(), original.left()));
        assert_eq!(&**binary.right(), &Expr::integer(21));
    }

    #[test]
    fn test_list_rewrite_shares_unchanged_prefix() {
        let args = vec![
            Expr::column("a", SqlType::Integer).shared(),
            Expr::integer(1).shared(),
            Expr::column("b", SqlType::Integer).shared(),
        ];
        let function = Expr::Function(Function::new(
            "greatest",
            args.clone(),
            SqlType::Integer,
        ))
        .shared();

        let visited = ReplaceIntegers(9).visit(&function);
        let SqlExpr::Function(rebuilt) = &*visited else {
            panic!("expected function node");
        };
        assert!(Arc::ptr_eq(&rebuilt.args()[0], &args[0]));
        assert!(Arc::ptr_eq(&rebuilt.args()[2], &args[2]));
        assert_eq!(&*rebuilt.args()[1], &Expr::integer(9));
    }

    #[test]
    fn test_list_visit_unchanged_is_none() {
        let args = vec![Expr::integer(1).shared(), Expr::integer(2).shared()];
        assert!(visit_expr_list(&mut Identity, &args).is_none());
    }
}
