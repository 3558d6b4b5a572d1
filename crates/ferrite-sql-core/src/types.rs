//! Semantic result types for expression nodes.

use core::fmt;

/// The semantic type of an expression node's result.
///
/// Node constructors use this to validate shape invariants (an index must be
/// an integer, an array operand must actually be an array) and to derive
/// result types (indexing an array yields its element type).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// Boolean.
    Boolean,
    /// 16-bit integer (`smallint`).
    SmallInt,
    /// 32-bit integer (`integer`).
    Integer,
    /// 64-bit integer (`bigint`).
    BigInt,
    /// 32-bit float (`real`).
    Real,
    /// 64-bit float (`double precision`).
    DoublePrecision,
    /// Arbitrary-precision numeric.
    Numeric,
    /// Character text.
    Text,
    /// Raw bytes.
    Bytea,
    /// UUID.
    Uuid,
    /// Calendar date.
    Date,
    /// Time of day without time zone.
    Time,
    /// Timestamp without time zone.
    Timestamp,
    /// Timestamp with time zone.
    TimestampTz,
    /// Time interval.
    Interval,
    /// JSON document (text representation).
    Json,
    /// JSON document (binary representation).
    Jsonb,
    /// Key/value dictionary (`hstore`).
    Hstore,
    /// Full-text search document.
    TsVector,
    /// Full-text search query.
    TsQuery,
    /// Hierarchical label path (`ltree`).
    LTree,
    /// Label-path match pattern (`lquery`).
    LQuery,
    /// Array with the given element type.
    Array(Box<SqlType>),
    /// Anonymous row value with the given field types.
    Row(Vec<SqlType>),
    /// Named composite type.
    Composite(String),
    /// Range over the given element type.
    Range(Box<SqlType>),
    /// Multirange over the given element type.
    Multirange(Box<SqlType>),
    /// Type not known at construction time.
    Unknown,
}

impl SqlType {
    /// Returns an array type over `element`.
    #[must_use]
    pub fn array(element: SqlType) -> Self {
        Self::Array(Box::new(element))
    }

    /// Returns a range type over `element`.
    #[must_use]
    pub fn range(element: SqlType) -> Self {
        Self::Range(Box::new(element))
    }

    /// Returns a multirange type over `element`.
    #[must_use]
    pub fn multirange(element: SqlType) -> Self {
        Self::Multirange(Box::new(element))
    }

    /// Returns true for the integer types.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::SmallInt | Self::Integer | Self::BigInt)
    }

    /// Returns true for the JSON document types.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::Jsonb)
    }

    /// Returns true for range and multirange types.
    #[must_use]
    pub const fn is_range_like(&self) -> bool {
        matches!(self, Self::Range(_) | Self::Multirange(_))
    }

    /// Returns the element type of an array, range or multirange.
    #[must_use]
    pub fn element(&self) -> Option<&SqlType> {
        match self {
            Self::Array(element) | Self::Range(element) | Self::Multirange(element) => {
                Some(element)
            }
            _ => None,
        }
    }

    /// Returns the field types of a row value.
    #[must_use]
    pub fn row_fields(&self) -> Option<&[SqlType]> {
        match self {
            Self::Row(fields) => Some(fields),
            _ => None,
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("boolean"),
            Self::SmallInt => f.write_str("smallint"),
            Self::Integer => f.write_str("integer"),
            Self::BigInt => f.write_str("bigint"),
            Self::Real => f.write_str("real"),
            Self::DoublePrecision => f.write_str("double precision"),
            Self::Numeric => f.write_str("numeric"),
            Self::Text => f.write_str("text"),
            Self::Bytea => f.write_str("bytea"),
            Self::Uuid => f.write_str("uuid"),
            Self::Date => f.write_str("date"),
            Self::Time => f.write_str("time"),
            Self::Timestamp => f.write_str("timestamp"),
            Self::TimestampTz => f.write_str("timestamp with time zone"),
            Self::Interval => f.write_str("interval"),
            Self::Json => f.write_str("json"),
            Self::Jsonb => f.write_str("jsonb"),
            Self::Hstore => f.write_str("hstore"),
            Self::TsVector => f.write_str("tsvector"),
            Self::TsQuery => f.write_str("tsquery"),
            Self::LTree => f.write_str("ltree"),
            Self::LQuery => f.write_str("lquery"),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Row(fields) => {
                f.write_str("row(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str(")")
            }
            Self::Composite(name) => f.write_str(name),
            Self::Range(element) => write!(f, "range of {element}"),
            Self::Multirange(element) => write!(f, "multirange of {element}"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_predicate() {
        assert!(SqlType::Integer.is_integer());
        assert!(SqlType::BigInt.is_integer());
        assert!(!SqlType::Text.is_integer());
        assert!(!SqlType::Numeric.is_integer());
    }

    #[test]
    fn test_element_access() {
        let ty = SqlType::array(SqlType::Text);
        assert_eq!(ty.element(), Some(&SqlType::Text));
        assert_eq!(SqlType::Boolean.element(), None);

        let range = SqlType::range(SqlType::Integer);
        assert_eq!(range.element(), Some(&SqlType::Integer));
    }

    #[test]
    fn test_display() {
        assert_eq!(SqlType::array(SqlType::Integer).to_string(), "integer[]");
        assert_eq!(
            SqlType::Row(vec![SqlType::Integer, SqlType::Text]).to_string(),
            "row(integer, text)"
        );
        assert_eq!(SqlType::TimestampTz.to_string(), "timestamp with time zone");
    }
}
