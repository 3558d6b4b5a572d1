//! The PostgreSQL dialect.

use ferrite_sql_core::Dialect;

/// PostgreSQL syntax: double-quoted identifiers and `$n` parameter
/// placeholders.
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn parameter_placeholder(&self, position: usize) -> String {
        format!("${position}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_positional() {
        assert_eq!(PostgresDialect.parameter_placeholder(1), "$1");
        assert_eq!(PostgresDialect.parameter_placeholder(12), "$12");
    }

    #[test]
    fn test_identifier_quoting() {
        assert_eq!(PostgresDialect.quote_identifier("order"), "\"order\"");
    }
}
