//! Error types for lambda-sql.

use thiserror::Error;

use crate::ast::BinaryOp;

/// The main error type for lambda-sql operations.
///
/// Lenient rendering never produces these; they surface from the strict
/// paths (`try_compile`, `QueryBuilder::render`) and from loading files.
#[derive(Debug, Error)]
pub enum SqlError {
    /// An expression node with no SQL rendering.
    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// A binary operator with no SQL token.
    #[error("Unsupported operator: {0:?}")]
    UnsupportedOperator(BinaryOp),

    /// A membership test against an empty collection (`x IN ()`).
    #[error("Membership test against an empty collection")]
    EmptyCollection,

    /// Rendering required a WHERE clause but no filter was set.
    #[error("Missing predicate: refusing to select from '{table}' without a filter")]
    MissingPredicate { table: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A query document could not be decoded.
    #[error("Document error: {0}")]
    Document(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SqlError {
    /// Create an unsupported expression error.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedExpression(kind.into())
    }

    /// Create a missing predicate error for the given table.
    pub fn missing_predicate(table: impl Into<String>) -> Self {
        Self::MissingPredicate {
            table: table.into(),
        }
    }
}

/// Result type alias for lambda-sql operations.
pub type SqlResult<T> = Result<T, SqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SqlError::unsupported("Conditional");
        assert_eq!(err.to_string(), "Unsupported expression: Conditional");
    }

    #[test]
    fn test_missing_predicate_display() {
        let err = SqlError::missing_predicate("Orders");
        assert_eq!(
            err.to_string(),
            "Missing predicate: refusing to select from 'Orders' without a filter"
        );
    }

    #[test]
    fn test_operator_display() {
        let err = SqlError::UnsupportedOperator(BinaryOp::Add);
        assert_eq!(err.to_string(), "Unsupported operator: Add");
    }
}
