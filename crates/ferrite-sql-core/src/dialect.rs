//! SQL dialect support.
//!
//! Different databases have slightly different SQL syntax. This module
//! provides a trait for the dialect-specific behavior the printer consults.

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Renders the placeholder for the parameter at the given 1-based
    /// position.
    fn parameter_placeholder(&self, position: usize) -> String {
        let _ = position;
        String::from("?")
    }

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        format!("{quote}{name}{quote}")
    }
}

/// A dialect with standard-SQL defaults.
pub struct GenericDialect;

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_defaults() {
        let dialect = GenericDialect;
        assert_eq!(dialect.quote_identifier("order"), "\"order\"");
        assert_eq!(dialect.parameter_placeholder(3), "?");
    }
}
