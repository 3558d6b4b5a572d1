//! PostgreSQL operator metadata.
//!
//! One declarative table maps each operator to its SQL symbol, its result
//! shape and its operand requirements. The table is a set of exhaustive
//! `const fn` matches over the operator enum, so an operator without metadata
//! cannot exist: adding a variant without extending the matches is a compile
//! error, not a runtime "unhandled operator" failure.

use ferrite_sql_core::SqlType;

/// PostgreSQL-specific binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PgOperator {
    /// Containment (`@>`): array/range/jsonb contains the right operand.
    Contains,
    /// Containment (`<@`): left operand is contained by the right.
    ContainedBy,
    /// Overlap (`&&`): arrays or ranges have elements in common.
    Overlaps,
    /// Range strictly left of (`<<`).
    StrictlyLeftOf,
    /// Range strictly right of (`>>`).
    StrictlyRightOf,
    /// Range does not extend to the right of (`&<`).
    DoesNotExtendRightOf,
    /// Range does not extend to the left of (`&>`).
    DoesNotExtendLeftOf,
    /// Ranges are adjacent (`-|-`).
    IsAdjacentTo,
    /// Range union (`+`).
    RangeUnion,
    /// Range intersection (`*`).
    RangeIntersect,
    /// Range difference (`-`).
    RangeDifference,
    /// Full-text search match (`@@`).
    TextSearchMatch,
    /// Key existence (`?`): jsonb or hstore contains the key.
    ContainsKey,
    /// Any key exists (`?|`).
    ContainsAnyKey,
    /// All keys exist (`?&`).
    ContainsAllKeys,
    /// Label path matches lquery (`~`).
    MatchesLQuery,
    /// Label path matches ltxtquery (`@`).
    MatchesLtxtquery,
    /// Distance (`<->`).
    Distance,
}

/// The result-type shape an operator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorResult {
    /// The operator is a predicate.
    Boolean,
    /// The operator combines two values of the left operand's type.
    LeftOperand,
    /// The operator measures a distance.
    Double,
}

impl PgOperator {
    /// The SQL symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Contains => "@>",
            Self::ContainedBy => "<@",
            Self::Overlaps => "&&",
            Self::StrictlyLeftOf => "<<",
            Self::StrictlyRightOf => ">>",
            Self::DoesNotExtendRightOf => "&<",
            Self::DoesNotExtendLeftOf => "&>",
            Self::IsAdjacentTo => "-|-",
            Self::RangeUnion => "+",
            Self::RangeIntersect => "*",
            Self::RangeDifference => "-",
            Self::TextSearchMatch => "@@",
            Self::ContainsKey => "?",
            Self::ContainsAnyKey => "?|",
            Self::ContainsAllKeys => "?&",
            Self::MatchesLQuery => "~",
            Self::MatchesLtxtquery => "@",
            Self::Distance => "<->",
        }
    }

    /// The result shape of the operator.
    #[must_use]
    pub const fn result(self) -> OperatorResult {
        match self {
            Self::RangeUnion | Self::RangeIntersect | Self::RangeDifference => {
                OperatorResult::LeftOperand
            }
            Self::Distance => OperatorResult::Double,
            Self::Contains
            | Self::ContainedBy
            | Self::Overlaps
            | Self::StrictlyLeftOf
            | Self::StrictlyRightOf
            | Self::DoesNotExtendRightOf
            | Self::DoesNotExtendLeftOf
            | Self::IsAdjacentTo
            | Self::TextSearchMatch
            | Self::ContainsKey
            | Self::ContainsAnyKey
            | Self::ContainsAllKeys
            | Self::MatchesLQuery
            | Self::MatchesLtxtquery => OperatorResult::Boolean,
        }
    }

    /// True for operators that only make sense over range or multirange
    /// operands; constructors reject other operand types for these.
    #[must_use]
    pub const fn requires_range_operands(self) -> bool {
        matches!(
            self,
            Self::RangeUnion | Self::RangeIntersect | Self::RangeDifference | Self::IsAdjacentTo
        )
    }

    /// Derives the operator's result type from the left operand type.
    #[must_use]
    pub fn result_type(self, left: &SqlType) -> SqlType {
        match self.result() {
            OperatorResult::Boolean => SqlType::Boolean,
            OperatorResult::LeftOperand => left.clone(),
            OperatorResult::Double => SqlType::DoublePrecision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols() {
        assert_eq!(PgOperator::Contains.symbol(), "@>");
        assert_eq!(PgOperator::IsAdjacentTo.symbol(), "-|-");
        assert_eq!(PgOperator::ContainsAllKeys.symbol(), "?&");
        assert_eq!(PgOperator::Distance.symbol(), "<->");
    }

    #[test]
    fn test_result_shapes() {
        let range = SqlType::range(SqlType::Integer);
        assert_eq!(PgOperator::RangeUnion.result_type(&range), range);
        assert_eq!(
            PgOperator::Contains.result_type(&range),
            SqlType::Boolean
        );
        assert_eq!(
            PgOperator::Distance.result_type(&SqlType::LTree),
            SqlType::DoublePrecision
        );
    }

    #[test]
    fn test_range_requirement() {
        assert!(PgOperator::RangeIntersect.requires_range_operands());
        assert!(!PgOperator::Overlaps.requires_range_operands());
    }
}
