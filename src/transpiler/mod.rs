//! SQL transpiler for expression trees and query specifications.
//!
//! Two rendering policies share one recursive renderer:
//!
//! - [`Lenient`]: nodes or operators without a rule render as empty text.
//!   This matches the historical output byte for byte and never fails.
//! - [`Strict`]: the same cases raise [`SqlError`](crate::error::SqlError).
//!
//! Literals are inlined as text, not bound as parameters. Text values are
//! quoted but never escaped, so untrusted input must not reach a tree that
//! is executed against a real database.

pub mod predicate;
pub mod select;


use crate::ast::Expr;
use crate::error::SqlResult;

pub use predicate::{Lenient, Policy, Strict};

/// Trait for converting nodes to SQL.
pub trait ToSql {
    /// Render leniently; never fails.
    fn to_sql(&self) -> String;
    /// Render strictly, rejecting anything without an SQL rule.
    fn try_to_sql(&self) -> SqlResult<String>;
}

impl ToSql for Expr {
    fn to_sql(&self) -> String {
        compile(self)
    }

    fn try_to_sql(&self) -> SqlResult<String> {
        try_compile(self)
    }
}

/// Compile a predicate tree to SQL text, leniently.
///
/// # Example
/// ```
/// use lambda_sql::ast::builders::*;
/// use lambda_sql::transpiler::compile;
///
/// let tree = gt("Total", 100).and(eq("Status", "Open").or(col("Flagged")));
/// assert_eq!(compile(&tree), "((Total>100) AND ((Status='Open') OR Flagged))");
/// ```
pub fn compile(expr: &Expr) -> String {
    match predicate::render::<Lenient>(expr) {
        Ok(sql) => sql,
        Err(never) => match never {},
    }
}

/// Compile a predicate tree to SQL text, rejecting unsupported shapes.
pub fn try_compile(expr: &Expr) -> SqlResult<String> {
    predicate::render::<Strict>(expr)
}
