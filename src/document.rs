//! Query documents: an entity description plus its clauses, stored as
//! TOML or JSON.
//!
//! ```toml
//! [entity]
//! table = "Orders"
//! columns = [
//!     { name = "Id", order = 1, primary = true },
//!     { name = "Status", order = 2 },
//! ]
//!
//! [query]
//! limit = 10
//! order_by = ["Id"]
//! predicate = { Binary = { op = "Equal", left = { Field = "Status" }, right = { Literal = { Text = "open" } } } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::QuerySpec;
use crate::builder::QueryBuilder;
use crate::entity::{Dynamic, EntityMeta};
use crate::error::{SqlError, SqlResult};

/// An entity and the query to run over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDocument {
    pub entity: EntityMeta,
    #[serde(default)]
    pub query: QuerySpec,
}

impl QueryDocument {
    pub fn from_toml(text: &str) -> SqlResult<Self> {
        toml::from_str(text).map_err(|e| SqlError::Document(e.to_string()))
    }

    pub fn from_json(text: &str) -> SqlResult<Self> {
        serde_json::from_str(text).map_err(|e| SqlError::Document(e.to_string()))
    }

    /// Load a document; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: &Path) -> SqlResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let doc = if is_json {
            Self::from_json(&text)?
        } else {
            Self::from_toml(&text)?
        };
        debug!(path = %path.display(), table = doc.entity.table(), "loaded query document");
        Ok(doc)
    }

    pub fn to_json(&self) -> SqlResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SqlError::Document(e.to_string()))
    }

    /// A builder over this document's entity, holding its clauses.
    pub fn builder(&self) -> QueryBuilder<Dynamic> {
        QueryBuilder::from_spec(self.entity.clone(), self.query.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr, Value};
    use crate::transpiler::ToSql;
    use pretty_assertions::assert_eq;

    const ORDERS_TOML: &str = r#"
        [entity]
        table = "Orders"
        columns = [
            { name = "Id", order = 1, primary = true },
            { name = "Status", order = 2 },
        ]

        [query]
        limit = 10
        order_by = ["Id"]
        predicate = { Binary = { op = "Equal", left = { Field = "Status" }, right = { Literal = { Text = "open" } } } }
    "#;

    #[test]
    fn test_toml_document() {
        let doc = QueryDocument::from_toml(ORDERS_TOML).unwrap();
        assert_eq!(doc.entity.primary_field(), Some("Id"));
        assert_eq!(
            doc.builder().to_sql(),
            "SELECT Id,Status FROM Orders WHERE (Status='open') ORDER BY Id OFFSET 0 LIMIT 10"
        );
    }

    #[test]
    fn test_json_document_with_membership() {
        let doc = QueryDocument::from_json(
            r#"{
                "entity": { "table": "Orders", "columns": [{ "name": "Id" }, { "name": "Status" }] },
                "query": {
                    "predicate": {
                        "Membership": {
                            "item": { "Field": "Id" },
                            "collection": { "Computed": { "Array": [{ "Int": 4 }, { "Int": 5 }] } }
                        }
                    },
                    "count": ["Id"]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(
            doc.builder().to_sql(),
            "SELECT Id,Status,COUNT(Id) AS Id FROM Orders WHERE (Id IN (4,5)) OFFSET 0 LIMIT 0"
        );
    }

    #[test]
    fn test_json_round_trip_keeps_tree() {
        let doc = QueryDocument::from_toml(ORDERS_TOML).unwrap();
        let again = QueryDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(again, doc);
        assert!(matches!(
            again.query.predicate,
            Some(Expr::Binary { op: BinaryOp::Equal, ref right, .. })
                if **right == Expr::Literal(Value::Text("open".into()))
        ));
    }

    #[test]
    fn test_query_section_is_optional() {
        let doc = QueryDocument::from_toml("[entity]\ntable = \"Empty\"\n").unwrap();
        assert_eq!(doc.builder().to_sql(), "SELECT  FROM Empty OFFSET 0 LIMIT 0");
    }

    #[test]
    fn test_bad_document() {
        let err = QueryDocument::from_json("{ \"entity\": 3 }").unwrap_err();
        assert!(matches!(err, SqlError::Document(_)));
    }
}
