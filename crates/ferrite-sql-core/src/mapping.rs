//! Opaque store-type descriptors.

/// A store-type descriptor attached to an expression node.
///
/// The tree treats this as opaque metadata: it participates in node identity
/// (equality and hashing) and is carried unchanged through rewrites, but the
/// only thing the printer ever reads from it is the store type name (for
/// explicit casts).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeMapping {
    store_type: String,
}

impl TypeMapping {
    /// Creates a mapping for the given store type name, e.g. `"text"` or
    /// `"tstzrange"`.
    #[must_use]
    pub fn new(store_type: impl Into<String>) -> Self {
        Self {
            store_type: store_type.into(),
        }
    }

    /// The store type name.
    #[must_use]
    pub fn store_type(&self) -> &str {
        &self.store_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_type() {
        let mapping = TypeMapping::new("integer[]");
        assert_eq!(mapping.store_type(), "integer[]");
    }

    #[test]
    fn test_equality() {
        assert_eq!(TypeMapping::new("text"), TypeMapping::new("text"));
        assert_ne!(TypeMapping::new("text"), TypeMapping::new("citext"));
    }
}
