//! Ergonomic builder functions for expression trees.
//!
//! These construct AST nodes without spelling out the enum variants.
//! Bound values are resolved here, at construction time, so the compiler
//! only ever sees finished literals.
//!
//! # Example
//! ```
//! use lambda_sql::ast::builders::*;
//!
//! let ids = vec![1, 2, 3];
//! let expr = gt("Age", 18).and(col("Id").is_in(computed_seq(ids)));
//! assert_eq!(expr.to_string(), "((Age>18) AND (Id IN (1,2,3)))");
//! ```

use crate::ast::{BinaryOp, Expr, Value};

/// Reference a column by name.
pub fn col(name: impl Into<String>) -> Expr {
    Expr::Field(name.into())
}

/// A constant literal.
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

/// A bound value from the enclosing scope.
pub fn computed(value: impl Into<Value>) -> Expr {
    Expr::Computed(value.into())
}

/// Evaluate `getter` now and bind its result.
pub fn computed_with<V, F>(getter: F) -> Expr
where
    V: Into<Value>,
    F: FnOnce() -> V,
{
    Expr::Computed(getter().into())
}

/// Collect `items` now and bind them as a sequence.
pub fn computed_seq<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Expr {
    Expr::Computed(Value::Array(items.into_iter().map(Into::into).collect()))
}

/// Conversion wrapper around `operand`.
pub fn convert(operand: impl Into<Expr>) -> Expr {
    Expr::Unary(Box::new(operand.into()))
}

/// Predicate entry point around `body`.
pub fn lambda(body: impl Into<Expr>) -> Expr {
    Expr::Lambda(Some(Box::new(body.into())))
}

/// A node the compiler has no rule for.
pub fn opaque(kind: impl Into<String>) -> Expr {
    Expr::Opaque(kind.into())
}

fn compare(column: &str, op: BinaryOp, value: Value) -> Expr {
    Expr::binary(op, col(column), Expr::Literal(value))
}

/// Create an equality condition (column = value)
pub fn eq(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, BinaryOp::Equal, value.into())
}

/// Create a not-equal condition (column != value)
pub fn ne(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, BinaryOp::NotEqual, value.into())
}

/// Create a greater-than condition (column > value)
pub fn gt(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, BinaryOp::GreaterThan, value.into())
}

/// Create a greater-than-or-equal condition (column >= value)
pub fn gte(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, BinaryOp::GreaterThanOrEqual, value.into())
}

/// Create a less-than condition (column < value)
pub fn lt(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, BinaryOp::LessThan, value.into())
}

/// Create a less-than-or-equal condition (column <= value)
pub fn lte(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, BinaryOp::LessThanOrEqual, value.into())
}

/// Create a membership condition (column IN (values))
pub fn is_in<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Expr {
    col(column).is_in(computed_seq(values))
}

/// Conjoin two predicates.
pub fn and(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::AndAlso, left, right)
}

/// Disjoin two predicates.
pub fn or(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::OrElse, left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_with_runs_immediately() {
        let mut calls = 0;
        let expr = computed_with(|| {
            calls += 1;
            40 + 2
        });
        assert_eq!(calls, 1);
        assert_eq!(expr, Expr::Computed(Value::Int(42)));
    }

    #[test]
    fn test_computed_seq_snapshots_items() {
        let mut ids = vec![1, 2];
        let expr = computed_seq(ids.iter().copied());
        ids.push(3);
        assert_eq!(expr, Expr::Computed(Value::Array(vec![1.into(), 2.into()])));
    }

    #[test]
    fn test_compare_shape() {
        let expr = eq("Name", "Bob");
        assert!(matches!(
            expr,
            Expr::Binary { op: BinaryOp::Equal, ref left, .. } if **left == Expr::Field("Name".into())
        ));
    }

    #[test]
    fn test_is_in_builds_membership() {
        let expr = is_in("Id", [7, 8]);
        assert!(matches!(expr, Expr::Membership { .. }));
    }
}
