use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ast::{BinaryOp, Value};

/// A predicate or value expression node.
///
/// Trees are built explicitly (see [`crate::ast::builders`]); nothing is
/// captured lazily. A `Computed` node already holds its resolved value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A constant.
    Literal(Value),
    /// A column of the entity, by declared name.
    Field(String),
    /// A value bound from the caller's scope, resolved at construction.
    Computed(Value),
    /// Conversion wrapper; renders as its operand.
    Unary(Box<Expr>),
    /// Boolean or comparison operator over two operands.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `item IN (collection)`
    Membership {
        item: Box<Expr>,
        collection: Box<Expr>,
    },
    /// Predicate entry point. An absent body renders empty.
    Lambda(Option<Box<Expr>>),
    /// A node shape with no SQL rendering, kept for diagnostics.
    Opaque(String),
}

impl Expr {
    /// Build a binary node.
    pub fn binary(op: BinaryOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// `self AND other`
    pub fn and(self, other: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::AndAlso, self, other)
    }

    /// `self OR other`
    pub fn or(self, other: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::OrElse, self, other)
    }

    pub fn eq(self, other: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::Equal, self, other)
    }

    pub fn ne(self, other: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::NotEqual, self, other)
    }

    pub fn gt(self, other: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::GreaterThan, self, other)
    }

    pub fn gte(self, other: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::GreaterThanOrEqual, self, other)
    }

    pub fn lt(self, other: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::LessThan, self, other)
    }

    pub fn lte(self, other: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::LessThanOrEqual, self, other)
    }

    /// `self IN (collection)`
    pub fn is_in(self, collection: impl Into<Expr>) -> Self {
        Expr::Membership {
            item: Box::new(self),
            collection: Box::new(collection.into()),
        }
    }

    /// Wrap in a conversion node.
    pub fn convert(self) -> Self {
        Expr::Unary(Box::new(self))
    }

    /// Wrap as a predicate entry point.
    pub fn lambda(self) -> Self {
        Expr::Lambda(Some(Box::new(self)))
    }

    /// Short name of the node shape, used in diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Expr::Literal(_) => "Literal",
            Expr::Field(_) => "Field",
            Expr::Computed(_) => "Computed",
            Expr::Unary(_) => "Unary",
            Expr::Binary { .. } => "Binary",
            Expr::Membership { .. } => "Membership",
            Expr::Lambda(_) => "Lambda",
            Expr::Opaque(kind) => kind,
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Unary(inner) => 1 + inner.node_count(),
            Expr::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Expr::Membership { item, collection } => {
                1 + item.node_count() + collection.node_count()
            }
            Expr::Lambda(Some(body)) => 1 + body.node_count(),
            _ => 1,
        }
    }
}

/// Renders the lenient SQL form of the tree.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::transpiler::compile(self))
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Literal(v)
    }
}

macro_rules! literal_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Expr {
                fn from(v: $t) -> Self {
                    Expr::Literal(Value::from(v))
                }
            }
        )*
    };
}

literal_from!(bool, i32, u32, i64, f64, Decimal, &str, String, NaiveDateTime, NaiveDate);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_uses_and_also() {
        let expr = Expr::Field("a".into()).and(Expr::Field("b".into()));
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::AndAlso, .. }));
    }

    #[test]
    fn test_scalar_into_literal() {
        let expr: Expr = 5.into();
        assert_eq!(expr, Expr::Literal(Value::Int(5)));
        let expr: Expr = "x".into();
        assert_eq!(expr, Expr::Literal(Value::Text("x".into())));
    }

    #[test]
    fn test_node_count() {
        let expr = Expr::Field("a".into())
            .gt(1)
            .and(Expr::Field("b".into()).is_in(Expr::Computed(vec![1, 2].into())))
            .lambda();
        assert_eq!(expr.node_count(), 8);
    }

    #[test]
    fn test_kind_of_opaque() {
        assert_eq!(Expr::Opaque("Conditional".into()).kind(), "Conditional");
        assert_eq!(Expr::Lambda(None).kind(), "Lambda");
    }
}
