//! Construction-time validation: every malformed shape is rejected before a
//! node exists, so printing never sees an invalid tree.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use ferrite_sql_core::SqlType;
use ferrite_sql_postgres::{
    ArrayAnyAll, ArrayIndex, ArraySlice, AtTimeZone, ComparisonOp, CustomBinary, JsonTraversal,
    NewArray, PgBinary, PgExprError, PgFunction, PgOperator, PgSqlExpr, PgSqlExprRef, Quantifier,
    RowValue,
};

fn int_array() -> PgSqlExprRef {
    PgSqlExpr::column("scores", SqlType::array(SqlType::Integer)).shared()
}

fn jsonb_doc() -> PgSqlExprRef {
    PgSqlExpr::column("payload", SqlType::Jsonb).shared()
}

#[test]
fn test_index_rejects_non_array_operand() {
    let scalar = PgSqlExpr::column("total", SqlType::Integer).shared();
    let index = PgSqlExpr::integer(1).shared();
    assert_eq!(
        ArrayIndex::new(scalar, index).unwrap_err(),
        PgExprError::NonArrayOperand {
            found: SqlType::Integer
        }
    );
}

#[test]
fn test_index_rejects_non_integer_index() {
    let index = PgSqlExpr::text("first").shared();
    assert_eq!(
        ArrayIndex::new(int_array(), index).unwrap_err(),
        PgExprError::NonIntegerIndex {
            found: SqlType::Text
        }
    );
}

#[test]
fn test_index_yields_element_type() {
    let node = ArrayIndex::new(int_array(), PgSqlExpr::integer(1).shared()).unwrap();
    assert_eq!(node.ty(), &SqlType::Integer);
}

#[test]
fn test_slice_requires_at_least_one_bound() {
    assert_eq!(
        ArraySlice::new(int_array(), None, None).unwrap_err(),
        PgExprError::SliceWithoutBounds
    );
}

#[test]
fn test_slice_rejects_non_integer_bound() {
    let bound = PgSqlExpr::boolean(true).shared();
    assert_eq!(
        ArraySlice::new(int_array(), Some(bound), None).unwrap_err(),
        PgExprError::NonIntegerBound {
            found: SqlType::Boolean
        }
    );
}

#[test]
fn test_slice_keeps_array_type() {
    let node = ArraySlice::new(int_array(), Some(PgSqlExpr::integer(2).shared()), None).unwrap();
    assert_eq!(node.ty(), &SqlType::array(SqlType::Integer));
}

#[test]
fn test_new_array_rejects_element_type_mismatch() {
    let elements = vec![PgSqlExpr::integer(1).shared(), PgSqlExpr::text("x").shared()];
    assert_eq!(
        NewArray::new(elements, SqlType::array(SqlType::Integer)).unwrap_err(),
        PgExprError::ElementTypeMismatch {
            element: SqlType::Integer,
            found: SqlType::Text,
        }
    );
}

#[test]
fn test_new_array_accepts_unknown_elements() {
    // NULL literals carry an unknown type and pass the element check.
    let elements = vec![PgSqlExpr::integer(1).shared(), PgSqlExpr::null().shared()];
    assert!(NewArray::new(elements, SqlType::array(SqlType::Integer)).is_ok());
}

#[test]
fn test_any_all_rejects_item_type_mismatch() {
    let item = PgSqlExpr::text("urgent").shared();
    assert_eq!(
        ArrayAnyAll::new(item, int_array(), ComparisonOp::Eq, Quantifier::Any).unwrap_err(),
        PgExprError::ElementTypeMismatch {
            element: SqlType::Integer,
            found: SqlType::Text,
        }
    );
}

#[test]
fn test_range_operator_rejects_non_range_operand() {
    let left = PgSqlExpr::column("total", SqlType::Integer).shared();
    let right = PgSqlExpr::column("other", SqlType::Integer).shared();
    assert_eq!(
        PgBinary::new(left, PgOperator::RangeUnion, right).unwrap_err(),
        PgExprError::InvalidRangeOperand {
            operator: "+",
            found: SqlType::Integer,
        }
    );
}

#[test]
fn test_range_operator_keeps_left_type() {
    let range = SqlType::range(SqlType::Date);
    let left = PgSqlExpr::column("booked", range.clone()).shared();
    let right = PgSqlExpr::column("requested", range.clone()).shared();
    let node = PgBinary::new(left, PgOperator::RangeIntersect, right).unwrap();
    assert_eq!(node.ty(), &range);
}

#[test]
fn test_custom_operator_rejects_empty_text() {
    let left = PgSqlExpr::integer(1).shared();
    let right = PgSqlExpr::integer(2).shared();
    assert_eq!(
        CustomBinary::new(left, "", right, SqlType::Integer).unwrap_err(),
        PgExprError::EmptyOperator
    );
}

#[test]
fn test_json_traversal_rejects_non_json_operand() {
    let scalar = PgSqlExpr::column("name", SqlType::Text).shared();
    assert_eq!(
        JsonTraversal::new(scalar, vec![PgSqlExpr::text("a").shared()], false).unwrap_err(),
        PgExprError::NonJsonOperand {
            found: SqlType::Text
        }
    );
}

#[test]
fn test_json_traversal_rejects_empty_path() {
    assert_eq!(
        JsonTraversal::new(jsonb_doc(), Vec::new(), false).unwrap_err(),
        PgExprError::EmptyPath
    );
}

#[test]
fn test_json_traversal_result_types() {
    let path = vec![PgSqlExpr::text("a").shared()];
    let json = JsonTraversal::new(jsonb_doc(), path.clone(), false).unwrap();
    assert_eq!(json.ty(), &SqlType::Jsonb);

    let text = JsonTraversal::new(jsonb_doc(), path, true).unwrap();
    assert_eq!(text.ty(), &SqlType::Text);
}

#[test]
fn test_row_value_rejects_non_row_type() {
    let values = vec![PgSqlExpr::integer(1).shared()];
    assert_eq!(
        RowValue::new(values, SqlType::Integer).unwrap_err(),
        PgExprError::NonRowType {
            found: SqlType::Integer
        }
    );
}

#[test]
fn test_row_value_rejects_arity_mismatch() {
    let values = vec![PgSqlExpr::integer(1).shared()];
    let ty = SqlType::Row(vec![SqlType::Integer, SqlType::Text]);
    assert_eq!(
        RowValue::new(values, ty).unwrap_err(),
        PgExprError::RowArityMismatch {
            expected: 2,
            found: 1,
        }
    );
}

#[test]
fn test_function_rejects_positional_after_named() {
    let args = vec![
        PgSqlExpr::null().shared(),
        PgSqlExpr::text("a").shared(),
        PgSqlExpr::null().shared(),
    ];
    let names = vec![None, Some(String::from("pattern")), None];
    assert_eq!(
        PgFunction::named("regexp_replace", args, names, SqlType::Text).unwrap_err(),
        PgExprError::PositionalAfterNamed { index: 2 }
    );
}

#[test]
fn test_function_rejects_name_count_mismatch() {
    let args = vec![PgSqlExpr::integer(1).shared()];
    assert_eq!(
        PgFunction::named("f", args, Vec::new(), SqlType::Integer).unwrap_err(),
        PgExprError::ArgumentNameCountMismatch {
            names: 0,
            arguments: 1,
        }
    );
}

#[test]
fn test_function_rejects_separator_count_mismatch() {
    let args = vec![
        PgSqlExpr::column("body", SqlType::Text).shared(),
        PgSqlExpr::integer(2).shared(),
    ];
    let err = PgFunction::positional("substring", args, SqlType::Text)
        .with_separators(vec![String::from(" FROM "), String::from(" FOR ")])
        .unwrap_err();
    assert_eq!(
        err,
        PgExprError::SeparatorCountMismatch {
            separators: 2,
            arguments: 2,
        }
    );
}

#[test]
fn test_at_time_zone_flips_timestamp_flavor() {
    let zone = PgSqlExpr::text("UTC").shared();

    let stamped = PgSqlExpr::column("created_at", SqlType::TimestampTz).shared();
    let node = AtTimeZone::new(stamped, zone.clone()).unwrap();
    assert_eq!(node.ty(), &SqlType::Timestamp);

    let naive = PgSqlExpr::column("occurred_at", SqlType::Timestamp).shared();
    let node = AtTimeZone::new(naive, zone.clone()).unwrap();
    assert_eq!(node.ty(), &SqlType::TimestampTz);

    let date = PgSqlExpr::column("day", SqlType::Date).shared();
    assert_eq!(
        AtTimeZone::new(date, zone).unwrap_err(),
        PgExprError::NonTimestampOperand {
            found: SqlType::Date
        }
    );
}

fn hash_of(expr: &PgSqlExprRef) -> u64 {
    let mut hasher = DefaultHasher::new();
    expr.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_independently_built_twins_are_equal() {
    let build = || -> PgSqlExprRef {
        let traversal = JsonTraversal::new(
            jsonb_doc(),
            vec![
                PgSqlExpr::text("address").shared(),
                PgSqlExpr::text("city").shared(),
            ],
            true,
        )
        .unwrap();
        ferrite_sql_postgres::PgExpr::JsonTraversal(traversal).shared()
    };
    let first = build();
    let second = build();
    assert_eq!(first, second);
    assert_eq!(hash_of(&first), hash_of(&second));
}
