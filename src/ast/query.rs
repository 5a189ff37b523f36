use serde::{Deserialize, Serialize};

use crate::ast::Expr;

/// Clause fragments accumulated for one SELECT statement.
///
/// Field lists keep insertion order, which is also the emitted order.
/// Duplicates are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    /// Combined filter; successive filters are conjoined.
    pub predicate: Option<Expr>,
    /// GROUP BY columns
    pub group_by: Vec<String>,
    /// ORDER BY columns
    pub order_by: Vec<String>,
    /// Explicitly requested output columns
    pub projection: Vec<String>,
    /// Columns rendered as `SUM(col) AS col`
    pub sum: Vec<String>,
    /// Columns rendered as `COUNT(col) AS col`
    pub count: Vec<String>,
    pub limit: u64,
    pub offset: u64,
}

impl QuerySpec {
    /// Conjoin `predicate` with any existing filter.
    pub fn push_predicate(&mut self, predicate: Expr) {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
    }

    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;

    #[test]
    fn test_first_predicate_is_stored_as_is() {
        let mut spec = QuerySpec::default();
        spec.push_predicate(Expr::Field("a".into()));
        assert_eq!(spec.predicate, Some(Expr::Field("a".into())));
    }

    #[test]
    fn test_second_predicate_is_conjoined() {
        let mut spec = QuerySpec::default();
        spec.push_predicate(Expr::Field("a".into()));
        spec.push_predicate(Expr::Field("b".into()));
        assert!(matches!(
            spec.predicate,
            Some(Expr::Binary { op: BinaryOp::AndAlso, .. })
        ));
    }

    #[test]
    fn test_defaults() {
        let spec = QuerySpec::default();
        assert!(!spec.has_predicate());
        assert_eq!((spec.limit, spec.offset), (0, 0));
    }
}
