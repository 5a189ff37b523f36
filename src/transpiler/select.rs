//! SELECT SQL generation.
//!
//! Each clause renders to its own fragment; `build_select` joins them in a
//! fixed order: projection and aggregates, FROM, WHERE, GROUP BY, ORDER BY,
//! OFFSET, LIMIT.

use tracing::debug;

use crate::ast::QuerySpec;
use crate::config::RenderOptions;
use crate::entity::EntityMeta;
use crate::transpiler::predicate::{self, Policy};

/// Output columns, before aggregates.
///
/// The base list is the GROUP BY columns if any, else the entity's
/// queryable fields. Explicit projection columns are intersected with the
/// base (their order, first occurrence wins); an empty intersection falls
/// back to the base.
pub fn projection_fields(meta: &EntityMeta, spec: &QuerySpec) -> Vec<String> {
    let base: Vec<String> = if spec.group_by.is_empty() {
        meta.queryable_fields().into_iter().map(String::from).collect()
    } else {
        spec.group_by.clone()
    };

    let mut custom: Vec<String> = Vec::new();
    for field in &spec.projection {
        if base.contains(field) && !custom.contains(field) {
            custom.push(field.clone());
        }
    }

    if custom.is_empty() { base } else { custom }
}

pub fn projection(meta: &EntityMeta, spec: &QuerySpec) -> String {
    projection_fields(meta, spec).join(",")
}

/// `,SUM(f) AS f` for each sum column, then `,COUNT(f) AS f` for each count column.
pub fn aggregates(spec: &QuerySpec) -> String {
    let mut sql = String::new();
    for field in &spec.sum {
        sql.push_str(&format!(",SUM({0}) AS {0}", field));
    }
    for field in &spec.count {
        sql.push_str(&format!(",COUNT({0}) AS {0}", field));
    }
    sql
}

/// `WHERE <predicate>`, or empty when unset or when it compiles to nothing.
pub fn where_clause<P: Policy>(spec: &QuerySpec) -> Result<String, P::Error> {
    let Some(expr) = &spec.predicate else {
        return Ok(String::new());
    };
    let compiled = predicate::render::<P>(expr)?;
    if compiled.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("WHERE {}", compiled))
    }
}

fn list_clause(keyword: &str, fields: &[String]) -> String {
    if fields.is_empty() {
        String::new()
    } else {
        format!("{} {}", keyword, fields.join(","))
    }
}

pub fn group_by_clause(spec: &QuerySpec) -> String {
    list_clause("GROUP BY", &spec.group_by)
}

pub fn order_by_clause(spec: &QuerySpec) -> String {
    list_clause("ORDER BY", &spec.order_by)
}

pub fn offset_clause(spec: &QuerySpec) -> String {
    format!("OFFSET {}", spec.offset)
}

pub fn limit_clause(spec: &QuerySpec) -> String {
    format!("LIMIT {}", spec.limit)
}

/// Generate SELECT SQL.
pub fn build_select<P: Policy>(
    meta: &EntityMeta,
    spec: &QuerySpec,
    options: &RenderOptions,
) -> Result<String, P::Error> {
    let fragments = [
        format!("SELECT {}{}", projection(meta, spec), aggregates(spec)),
        format!("FROM {}", meta.table()),
        where_clause::<P>(spec)?,
        group_by_clause(spec),
        order_by_clause(spec),
        offset_clause(spec),
        limit_clause(spec),
    ];

    let sql = if options.legacy_spacing {
        fragments.join(" ")
    } else {
        fragments
            .iter()
            .filter(|f| !f.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    };

    debug!(table = meta.table(), len = sql.len(), "rendered select");
    Ok(sql)
}
