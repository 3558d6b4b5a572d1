//! Rewrite semantics: identity visits return the original reference at every
//! level, substitutions bubble upward, and every unchanged sibling stays
//! shared with the original tree.

use std::sync::Arc;

use ferrite_sql_core::{SqlExpr, SqlType, Value, Visitor};
use ferrite_sql_postgres::{
    dispatch, ArrayIndex, Collate, ComparisonOp, ILike, JsonTraversal, PgExpr, PgSqlExpr,
    PgSqlExprRef, PgVisitor, Quantifier,
};

/// A visitor that changes nothing.
struct Identity;

impl Visitor<PgExpr> for Identity {}

/// Replaces every integer literal with the given value.
struct ReplaceIntegers(i64);

impl Visitor<PgExpr> for ReplaceIntegers {
    fn visit(&mut self, expr: &PgSqlExprRef) -> PgSqlExprRef {
        if let SqlExpr::Literal(literal) = &**expr {
            if matches!(literal.value(), Value::Integer(_)) {
                return PgSqlExpr::integer(self.0).shared();
            }
        }
        ferrite_sql_core::walk_expr(self, expr)
    }
}

fn sample_predicate() -> PgSqlExprRef {
    // payload#>>{limits,max} = ANY(scores) AND name ILIKE 'a%'
    let traversal = JsonTraversal::new(
        PgSqlExpr::column("payload", SqlType::Jsonb).shared(),
        vec![
            PgSqlExpr::text("limits").shared(),
            PgSqlExpr::text("max").shared(),
        ],
        true,
    )
    .unwrap();
    let any = ferrite_sql_postgres::ArrayAnyAll::new(
        PgExpr::JsonTraversal(traversal).shared(),
        PgSqlExpr::column("labels", SqlType::array(SqlType::Text)).shared(),
        ComparisonOp::Eq,
        Quantifier::Any,
    )
    .unwrap();
    let ilike = ILike::new(
        PgSqlExpr::column("name", SqlType::Text).shared(),
        PgSqlExpr::text("a%").shared(),
        None,
    );
    SqlExpr::Dialect(PgExpr::ArrayAnyAll(any))
        .and(SqlExpr::Dialect(PgExpr::ILike(ilike)))
        .shared()
}

#[test]
fn test_identity_visit_returns_same_reference() {
    let tree = sample_predicate();
    let visited = Identity.visit(&tree);
    assert!(Arc::ptr_eq(&visited, &tree));
}

#[test]
fn test_substitution_bubbles_and_shares_siblings() {
    let index = ArrayIndex::new(
        PgSqlExpr::column("scores", SqlType::array(SqlType::Integer)).shared(),
        PgSqlExpr::integer(1).shared(),
    )
    .unwrap();
    let array = Arc::clone(index.array());
    let tree = PgExpr::ArrayIndex(index).shared();

    let visited = ReplaceIntegers(3).visit(&tree);
    assert!(!Arc::ptr_eq(&visited, &tree));

    let SqlExpr::Dialect(PgExpr::ArrayIndex(rebuilt)) = &*visited else {
        panic!("expected an array-index node");
    };
    // The untouched array operand is shared with the original tree.
    assert!(Arc::ptr_eq(rebuilt.array(), &array));
    assert_eq!(&**rebuilt.index(), &PgSqlExpr::integer(3));
}

#[test]
fn test_update_returns_self_when_unchanged() {
    let array = PgSqlExpr::column("scores", SqlType::array(SqlType::Integer)).shared();
    let index = PgSqlExpr::integer(1).shared();
    let node = ArrayIndex::new(Arc::clone(&array), Arc::clone(&index)).unwrap();

    let same = node.update(Arc::clone(&array), Arc::clone(&index));
    assert!(Arc::ptr_eq(same.array(), &array));
    assert!(Arc::ptr_eq(same.index(), &index));
    assert_eq!(same, node);
}

#[test]
fn test_row_value_rewrite_shares_unchanged_prefix() {
    let row_ty = SqlType::Row(vec![SqlType::Text, SqlType::Integer, SqlType::Text]);
    let values = vec![
        PgSqlExpr::column("status", SqlType::Text).shared(),
        PgSqlExpr::integer(1).shared(),
        PgSqlExpr::column("kind", SqlType::Text).shared(),
    ];
    let row = ferrite_sql_postgres::RowValue::new(values.clone(), row_ty).unwrap();
    let tree = PgExpr::RowValue(row).shared();

    let visited = ReplaceIntegers(7).visit(&tree);
    let SqlExpr::Dialect(PgExpr::RowValue(rebuilt)) = &*visited else {
        panic!("expected a row-value node");
    };
    // First and last values came back unchanged and stay shared; only the
    // middle element was reallocated.
    assert!(Arc::ptr_eq(&rebuilt.values()[0], &values[0]));
    assert!(Arc::ptr_eq(&rebuilt.values()[2], &values[2]));
    assert_eq!(&*rebuilt.values()[1], &PgSqlExpr::integer(7));
}

#[test]
fn test_path_append_leaves_original_untouched() {
    let doc = PgSqlExpr::column("payload", SqlType::Jsonb).shared();
    let original =
        JsonTraversal::new(doc, vec![PgSqlExpr::text("address").shared()], false).unwrap();
    let extended = original.append(PgSqlExpr::text("city").shared());

    assert_eq!(original.path().len(), 1);
    assert_eq!(extended.path().len(), 2);
    // Shared prefix and operand, not copies.
    assert!(Arc::ptr_eq(&extended.path()[0], &original.path()[0]));
    assert!(Arc::ptr_eq(extended.expr(), original.expr()));
}

/// Rewrites every collation to a fixed one through the typed dispatch
/// surface.
struct ForceCollation(&'static str);

impl Visitor<PgExpr> for ForceCollation {
    fn visit_dialect(&mut self, expr: &PgSqlExprRef, node: &PgExpr) -> PgSqlExprRef {
        dispatch(self, expr, node)
    }
}

impl PgVisitor for ForceCollation {
    fn visit_collate(&mut self, _expr: &PgSqlExprRef, node: &Collate) -> PgSqlExprRef {
        let operand = self.visit(node.operand());
        PgExpr::Collate(Collate::new(operand, self.0)).shared()
    }
}

#[test]
fn test_typed_dispatch_reaches_node_kind() {
    let collated = PgExpr::Collate(Collate::new(
        PgSqlExpr::column("name", SqlType::Text).shared(),
        "en_US",
    ))
    .shared();
    let tree = SqlExpr::Binary(ferrite_sql_core::Binary::new(
        collated,
        ferrite_sql_core::BinaryOp::Eq,
        PgSqlExpr::text("anna").shared(),
    ))
    .shared();

    let visited = ForceCollation("C").visit(&tree);
    let SqlExpr::Binary(binary) = &*visited else {
        panic!("expected a binary node");
    };
    let SqlExpr::Dialect(PgExpr::Collate(rebuilt)) = &**binary.left() else {
        panic!("expected a collation node");
    };
    assert_eq!(rebuilt.collation(), "C");
}

#[test]
fn test_typed_dispatch_defaults_to_identity() {
    let tree = sample_predicate();

    struct Typed;
    impl Visitor<PgExpr> for Typed {
        fn visit_dialect(&mut self, expr: &PgSqlExprRef, node: &PgExpr) -> PgSqlExprRef {
            dispatch(self, expr, node)
        }
    }
    impl PgVisitor for Typed {}

    let visited = Typed.visit(&tree);
    assert!(Arc::ptr_eq(&visited, &tree));
}
