//! Error types for node construction.
//!
//! Every variant is a construction-time shape violation: a malformed tree is
//! a bug in the translator producing it, so constructors reject it eagerly
//! and nothing is ever deferred to the printing stage.

use ferrite_sql_core::SqlType;
use thiserror::Error;

/// Shape violations rejected at node construction time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PgExprError {
    /// An operand that must be an array has some other type.
    #[error("expected an array operand, got {found}")]
    NonArrayOperand {
        /// The offending operand type.
        found: SqlType,
    },

    /// An array index with a non-integer type.
    #[error("array index must have an integer type, got {found}")]
    NonIntegerIndex {
        /// The offending index type.
        found: SqlType,
    },

    /// An array slice bound with a non-integer type.
    #[error("array slice bound must have an integer type, got {found}")]
    NonIntegerBound {
        /// The offending bound type.
        found: SqlType,
    },

    /// An array slice with neither a lower nor an upper bound.
    #[error("array slice requires at least one of the lower and upper bounds")]
    SliceWithoutBounds,

    /// An element whose type disagrees with the array's element type.
    #[error("element type {found} does not match array element type {element}")]
    ElementTypeMismatch {
        /// The array's element type.
        element: SqlType,
        /// The offending element type.
        found: SqlType,
    },

    /// A row value whose declared result type is not row-shaped.
    #[error("row value must have a row result type, got {found}")]
    NonRowType {
        /// The offending result type.
        found: SqlType,
    },

    /// A row value whose declared row type has the wrong number of fields.
    #[error("row type declares {expected} fields but {found} values were supplied")]
    RowArityMismatch {
        /// Fields declared by the row type.
        expected: usize,
        /// Values supplied.
        found: usize,
    },

    /// A positional (unnamed) argument appearing after a named one.
    #[error("positional argument at index {index} follows a named argument")]
    PositionalAfterNamed {
        /// Index of the offending argument.
        index: usize,
    },

    /// An argument-name list whose length disagrees with the argument list.
    #[error("{names} argument names supplied for {arguments} arguments")]
    ArgumentNameCountMismatch {
        /// Number of name entries.
        names: usize,
        /// Number of arguments.
        arguments: usize,
    },

    /// A separator list whose length disagrees with the argument list.
    #[error("{separators} separators supplied for {arguments} arguments")]
    SeparatorCountMismatch {
        /// Number of separators.
        separators: usize,
        /// Number of arguments.
        arguments: usize,
    },

    /// A JSON path traversal with an empty path.
    #[error("json traversal path must not be empty")]
    EmptyPath,

    /// A JSON path traversal over a non-JSON operand.
    #[error("json traversal requires a json or jsonb operand, got {found}")]
    NonJsonOperand {
        /// The offending operand type.
        found: SqlType,
    },

    /// A field access on a non-composite operand.
    #[error("field access requires a composite operand, got {found}")]
    NonCompositeOperand {
        /// The offending operand type.
        found: SqlType,
    },

    /// AT TIME ZONE applied to something that is not a timestamp.
    #[error("AT TIME ZONE requires a timestamp operand, got {found}")]
    NonTimestampOperand {
        /// The offending operand type.
        found: SqlType,
    },

    /// A range-combining operator applied to a non-range operand.
    #[error("operator {operator} requires a range operand, got {found}")]
    InvalidRangeOperand {
        /// The operator's SQL symbol.
        operator: &'static str,
        /// The offending operand type.
        found: SqlType,
    },

    /// A custom operator with empty operator text.
    #[error("custom operator text must not be empty")]
    EmptyOperator,

    /// An explicit output-column list with no columns.
    #[error("explicit column list must not be empty")]
    EmptyColumnList,

    /// A predicate that is not boolean-typed.
    #[error("predicate must have a boolean type, got {found}")]
    NonBooleanPredicate {
        /// The offending predicate type.
        found: SqlType,
    },
}

/// Result type alias for node construction.
pub type Result<T> = std::result::Result<T, PgExprError>;
