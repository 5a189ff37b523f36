use serde::{Deserialize, Serialize};

/// Binary operator tags carried by `Expr::Binary`.
///
/// Only the boolean and comparison tags have an SQL token; the arithmetic
/// tags exist so trees can describe them, but they do not render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Logical AND (non short-circuit)
    And,
    /// Logical AND
    AndAlso,
    /// Logical OR (non short-circuit)
    Or,
    /// Logical OR
    OrElse,
    /// NOT
    Not,
    /// Equal (=)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    ExclusiveOr,
    Coalesce,
}

impl BinaryOp {
    /// Every operator tag, in declaration order.
    pub const ALL: [BinaryOp; 18] = [
        BinaryOp::And,
        BinaryOp::AndAlso,
        BinaryOp::Or,
        BinaryOp::OrElse,
        BinaryOp::Not,
        BinaryOp::Equal,
        BinaryOp::NotEqual,
        BinaryOp::GreaterThan,
        BinaryOp::GreaterThanOrEqual,
        BinaryOp::LessThan,
        BinaryOp::LessThanOrEqual,
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
        BinaryOp::Modulo,
        BinaryOp::ExclusiveOr,
        BinaryOp::Coalesce,
    ];

    /// Returns the SQL token for this operator, spacing included.
    ///
    /// `AND`/`OR` carry a single space on each side; comparisons carry none.
    pub fn sql_token(&self) -> Option<&'static str> {
        match self {
            BinaryOp::And | BinaryOp::AndAlso => Some(" AND "),
            BinaryOp::Or | BinaryOp::OrElse => Some(" OR "),
            BinaryOp::Not => Some("NOT"),
            BinaryOp::NotEqual => Some("!="),
            BinaryOp::Equal => Some("="),
            BinaryOp::GreaterThan => Some(">"),
            BinaryOp::GreaterThanOrEqual => Some(">="),
            BinaryOp::LessThan => Some("<"),
            BinaryOp::LessThanOrEqual => Some("<="),
            BinaryOp::Add
            | BinaryOp::Subtract
            | BinaryOp::Multiply
            | BinaryOp::Divide
            | BinaryOp::Modulo
            | BinaryOp::ExclusiveOr
            | BinaryOp::Coalesce => None,
        }
    }

    /// Whether this is a boolean connective.
    pub fn is_logical(&self) -> bool {
        matches!(
            self,
            BinaryOp::And | BinaryOp::AndAlso | BinaryOp::Or | BinaryOp::OrElse
        )
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sql_token() {
            Some(token) => write!(f, "{}", token.trim()),
            None => write!(f, "{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_tokens_are_spaced() {
        assert_eq!(BinaryOp::AndAlso.sql_token(), Some(" AND "));
        assert_eq!(BinaryOp::And.sql_token(), Some(" AND "));
        assert_eq!(BinaryOp::OrElse.sql_token(), Some(" OR "));
    }

    #[test]
    fn test_comparison_tokens_are_bare() {
        assert_eq!(BinaryOp::Equal.sql_token(), Some("="));
        assert_eq!(BinaryOp::NotEqual.sql_token(), Some("!="));
        assert_eq!(BinaryOp::GreaterThanOrEqual.sql_token(), Some(">="));
        assert_eq!(BinaryOp::LessThanOrEqual.sql_token(), Some("<="));
    }

    #[test]
    fn test_arithmetic_has_no_token() {
        let unrendered: Vec<_> = BinaryOp::ALL
            .iter()
            .filter(|op| op.sql_token().is_none())
            .collect();
        assert_eq!(unrendered.len(), 7);
        assert_eq!(BinaryOp::Coalesce.to_string(), "Coalesce");
        assert_eq!(BinaryOp::OrElse.to_string(), "OR");
    }
}
