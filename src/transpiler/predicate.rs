//! Recursive predicate renderer.

use std::convert::Infallible;

use tracing::trace;

use crate::ast::{BinaryOp, Expr};
use crate::error::SqlError;

/// What to do when a tree has no SQL rendering.
pub trait Policy {
    type Error;

    /// Text for a node shape with no rule.
    fn unsupported_node(kind: &str) -> Result<String, Self::Error>;
    /// Token for an operator with no rule.
    fn unsupported_operator(op: BinaryOp) -> Result<&'static str, Self::Error>;
    /// Called when a membership collection renders empty.
    fn empty_collection() -> Result<(), Self::Error>;
}

/// Degrade to empty text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lenient;

impl Policy for Lenient {
    type Error = Infallible;

    fn unsupported_node(kind: &str) -> Result<String, Self::Error> {
        trace!(kind, "expression has no SQL rendering, emitting nothing");
        Ok(String::new())
    }

    fn unsupported_operator(op: BinaryOp) -> Result<&'static str, Self::Error> {
        trace!(?op, "operator has no SQL token, emitting nothing");
        Ok("")
    }

    fn empty_collection() -> Result<(), Self::Error> {
        trace!("membership collection is empty");
        Ok(())
    }
}

/// Fail with a diagnosable error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

impl Policy for Strict {
    type Error = SqlError;

    fn unsupported_node(kind: &str) -> Result<String, Self::Error> {
        Err(SqlError::unsupported(kind))
    }

    fn unsupported_operator(op: BinaryOp) -> Result<&'static str, Self::Error> {
        Err(SqlError::UnsupportedOperator(op))
    }

    fn empty_collection() -> Result<(), Self::Error> {
        Err(SqlError::EmptyCollection)
    }
}

/// Render `expr` under policy `P`.
pub fn render<P: Policy>(expr: &Expr) -> Result<String, P::Error> {
    let mut out = String::new();
    write_expr::<P>(expr, &mut out)?;
    Ok(out)
}

fn write_expr<P: Policy>(expr: &Expr, out: &mut String) -> Result<(), P::Error> {
    match expr {
        // A computed sequence uses the same comma-joined literal form.
        Expr::Literal(value) | Expr::Computed(value) => out.push_str(&value.to_string()),
        Expr::Field(name) => out.push_str(name),
        Expr::Unary(operand) => write_expr::<P>(operand, out)?,
        Expr::Binary { op, left, right } => {
            let token = match op.sql_token() {
                Some(token) => token,
                None => P::unsupported_operator(*op)?,
            };
            out.push('(');
            write_expr::<P>(left, out)?;
            out.push_str(token);
            write_expr::<P>(right, out)?;
            out.push(')');
        }
        Expr::Membership { item, collection } => {
            let items = render::<P>(collection)?;
            if items.is_empty() {
                P::empty_collection()?;
            }
            out.push('(');
            write_expr::<P>(item, out)?;
            out.push_str(" IN (");
            out.push_str(&items);
            out.push_str("))");
        }
        Expr::Lambda(Some(body)) => write_expr::<P>(body, out)?,
        Expr::Lambda(None) => {}
        Expr::Opaque(kind) => out.push_str(&P::unsupported_node(kind)?),
    }
    Ok(())
}
