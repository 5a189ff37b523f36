//! Fluent SELECT builder over an entity.
//!
//! # Example
//! ```
//! use lambda_sql::prelude::*;
//!
//! struct Sale;
//!
//! impl Entity for Sale {
//!     const TABLE: &'static str = "Sale";
//!     const COLUMNS: &'static [ColumnDef] = &[
//!         ColumnDef::primary_key("Id", 1),
//!         ColumnDef::new("Region", 2),
//!         ColumnDef::new("Amount", 3),
//!     ];
//! }
//!
//! impl Sale {
//!     const REGION: Field<Sale, String> = Field::new("Region");
//!     const AMOUNT: Field<Sale, i64> = Field::new("Amount");
//! }
//!
//! let sql = QueryBuilder::<Sale>::new()
//!     .filter(Sale::AMOUNT.gt(0))
//!     .group_by(Sale::REGION)
//!     .sum(Sale::AMOUNT)
//!     .limit(10)
//!     .to_sql();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT Region,SUM(Amount) AS Amount FROM Sale WHERE (Amount>0) GROUP BY Region OFFSET 0 LIMIT 10"
//! );
//! ```

use std::marker::PhantomData;

use crate::ast::{Expr, QuerySpec};
use crate::config::RenderOptions;
use crate::entity::{Dynamic, Entity, EntityMeta};
use crate::error::{SqlError, SqlResult};
use crate::transpiler::predicate::{Lenient, Strict};
use crate::transpiler::{ToSql, select};
use crate::typed::{FieldList, Predicate};

/// Accumulates clauses for one SELECT over entity `E`.
///
/// Every clause method takes the builder by value and hands it back, so
/// calls chain. Rendering only reads the accumulated state.
pub struct QueryBuilder<E> {
    meta: EntityMeta,
    spec: QuerySpec,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> QueryBuilder<E> {
    /// An empty builder over `E`'s declared metadata.
    pub fn new() -> Self {
        Self::from_parts(E::metadata(), QuerySpec::default())
    }
}

impl<E: Entity> Default for QueryBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder<Dynamic> {
    /// An empty builder over runtime metadata.
    pub fn with_metadata(meta: EntityMeta) -> Self {
        Self::from_parts(meta, QuerySpec::default())
    }

    /// A builder resuming from a stored specification.
    pub fn from_spec(meta: EntityMeta, spec: QuerySpec) -> Self {
        Self::from_parts(meta, spec)
    }
}

impl<E> QueryBuilder<E> {
    fn from_parts(meta: EntityMeta, spec: QuerySpec) -> Self {
        Self {
            meta,
            spec,
            _entity: PhantomData,
        }
    }

    /// Add a WHERE predicate, ANDed with any previous one.
    pub fn filter(mut self, predicate: impl Into<Predicate<E>>) -> Self {
        self.spec.push_predicate(predicate.into().into_expr());
        self
    }

    /// Append GROUP BY columns.
    pub fn group_by(mut self, fields: impl FieldList<E>) -> Self {
        fields.append_to(&mut self.spec.group_by);
        self
    }

    /// Append ORDER BY columns.
    pub fn order_by(mut self, fields: impl FieldList<E>) -> Self {
        fields.append_to(&mut self.spec.order_by);
        self
    }

    /// Append `SUM(col) AS col` aggregates.
    pub fn sum(mut self, fields: impl FieldList<E>) -> Self {
        fields.append_to(&mut self.spec.sum);
        self
    }

    /// Append `COUNT(col) AS col` aggregates.
    pub fn count(mut self, fields: impl FieldList<E>) -> Self {
        fields.append_to(&mut self.spec.count);
        self
    }

    /// Request explicit output columns.
    ///
    /// Columns outside the default projection are ignored; if none remain
    /// the default projection is used.
    pub fn select(mut self, fields: impl FieldList<E>) -> Self {
        fields.append_to(&mut self.spec.projection);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.spec.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.spec.offset = offset;
        self
    }

    pub fn metadata(&self) -> &EntityMeta {
        &self.meta
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// The combined predicate, if any filter was added.
    pub fn predicate(&self) -> Option<&Expr> {
        self.spec.predicate.as_ref()
    }

    pub fn projection_fields(&self) -> Vec<String> {
        select::projection_fields(&self.meta, &self.spec)
    }

    pub fn projection(&self) -> String {
        select::projection(&self.meta, &self.spec)
    }

    pub fn aggregates(&self) -> String {
        select::aggregates(&self.spec)
    }

    pub fn where_clause(&self) -> String {
        match select::where_clause::<Lenient>(&self.spec) {
            Ok(sql) => sql,
            Err(never) => match never {},
        }
    }

    pub fn group_by_clause(&self) -> String {
        select::group_by_clause(&self.spec)
    }

    pub fn order_by_clause(&self) -> String {
        select::order_by_clause(&self.spec)
    }

    pub fn offset_clause(&self) -> String {
        select::offset_clause(&self.spec)
    }

    pub fn limit_clause(&self) -> String {
        select::limit_clause(&self.spec)
    }

    /// Render the statement with explicit options.
    pub fn render(&self, options: &RenderOptions) -> SqlResult<String> {
        if options.require_filter && !self.spec.has_predicate() {
            return Err(SqlError::missing_predicate(self.meta.table()));
        }
        if options.strict {
            select::build_select::<Strict>(&self.meta, &self.spec, options)
        } else {
            Ok(self.render_lenient(options))
        }
    }

    fn render_lenient(&self, options: &RenderOptions) -> String {
        match select::build_select::<Lenient>(&self.meta, &self.spec, options) {
            Ok(sql) => sql,
            Err(never) => match never {},
        }
    }
}

impl<E> ToSql for QueryBuilder<E> {
    fn to_sql(&self) -> String {
        self.render_lenient(&RenderOptions::default())
    }

    fn try_to_sql(&self) -> SqlResult<String> {
        self.render(&RenderOptions::default().with_strict(true))
    }
}

impl<E> Clone for QueryBuilder<E> {
    fn clone(&self) -> Self {
        Self::from_parts(self.meta.clone(), self.spec.clone())
    }
}

impl<E> std::fmt::Debug for QueryBuilder<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("table", &self.meta.table())
            .field("spec", &self.spec)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use crate::ast::builders::*;
    use crate::entity::ColumnDef;
    use crate::typed::Field;
    use pretty_assertions::assert_eq;

    struct Ledger;

    impl Entity for Ledger {
        const TABLE: &'static str = "Ledger";
        const COLUMNS: &'static [ColumnDef] = &[
            ColumnDef::primary_key("Id", 1),
            ColumnDef::new("Account", 2),
            ColumnDef::new("Amount", 3),
        ];
    }

    impl Ledger {
        const ID: Field<Ledger, i64> = Field::new("Id");
        const ACCOUNT: Field<Ledger, String> = Field::new("Account");
        const AMOUNT: Field<Ledger, i64> = Field::new("Amount");
    }

    #[test]
    fn test_default_projection_and_paging() {
        let sql = QueryBuilder::<Ledger>::new().to_sql();
        assert_eq!(sql, "SELECT Id,Account,Amount FROM Ledger OFFSET 0 LIMIT 0");
    }

    #[test]
    fn test_last_limit_and_offset_win() {
        let qb = QueryBuilder::<Ledger>::new()
            .limit(5)
            .offset(2)
            .limit(50)
            .offset(20);
        assert_eq!(qb.limit_clause(), "LIMIT 50");
        assert_eq!(qb.offset_clause(), "OFFSET 20");
    }

    #[test]
    fn test_chained_filters_equal_single_conjunction() {
        let chained = QueryBuilder::<Ledger>::new()
            .filter(Ledger::AMOUNT.gt(10))
            .filter(Ledger::ACCOUNT.eq("cash"));
        let single = QueryBuilder::<Ledger>::new()
            .filter(Ledger::AMOUNT.gt(10).and(Ledger::ACCOUNT.eq("cash")));
        assert_eq!(chained.where_clause(), single.where_clause());
        assert_eq!(
            chained.where_clause(),
            "WHERE ((Amount>10) AND (Account='cash'))"
        );
    }

    #[test]
    fn test_group_by_replaces_default_projection() {
        let qb = QueryBuilder::<Ledger>::new().group_by(Ledger::ACCOUNT);
        assert_eq!(qb.projection(), "Account");
        assert_eq!(qb.group_by_clause(), "GROUP BY Account");
    }

    #[test]
    fn test_aggregates_follow_call_order() {
        let qb = QueryBuilder::<Ledger>::new()
            .group_by(Ledger::ACCOUNT)
            .sum(Ledger::AMOUNT)
            .count(Ledger::ID)
            .sum(Ledger::ID);
        assert_eq!(
            qb.to_sql(),
            "SELECT Account,SUM(Amount) AS Amount,SUM(Id) AS Id,COUNT(Id) AS Id FROM Ledger GROUP BY Account OFFSET 0 LIMIT 0"
        );
    }

    #[test]
    fn test_explicit_projection_is_intersected() {
        let qb = QueryBuilder::<Ledger>::new().select((
            Ledger::AMOUNT,
            Field::<Ledger, i64>::new("Bogus"),
            Ledger::ID,
            Ledger::AMOUNT,
        ));
        assert_eq!(qb.projection_fields(), ["Amount", "Id"]);
    }

    #[test]
    fn test_projection_outside_group_by_falls_back() {
        let qb = QueryBuilder::<Ledger>::new()
            .group_by(Ledger::ACCOUNT)
            .select(Ledger::AMOUNT);
        assert_eq!(qb.projection(), "Account");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let qb = QueryBuilder::<Ledger>::new()
            .order_by((Ledger::ID, Ledger::ID))
            .order_by(Ledger::AMOUNT);
        assert_eq!(qb.order_by_clause(), "ORDER BY Id,Id,Amount");
    }

    #[test]
    fn test_require_filter() {
        let opts = RenderOptions::default().with_require_filter(true);
        let err = QueryBuilder::<Ledger>::new().render(&opts).unwrap_err();
        assert!(matches!(err, SqlError::MissingPredicate { ref table } if table == "Ledger"));

        let sql = QueryBuilder::<Ledger>::new()
            .filter(Ledger::ID.eq(1))
            .render(&opts)
            .unwrap();
        assert_eq!(sql, "SELECT Id,Account,Amount FROM Ledger WHERE (Id=1) OFFSET 0 LIMIT 0");
    }

    #[test]
    fn test_strict_rejects_what_lenient_drops() {
        let qb = QueryBuilder::<Ledger>::new()
            .filter(Predicate::<Ledger>::raw(Expr::binary(BinaryOp::Add, col("Amount"), lit(1))));
        assert_eq!(
            qb.to_sql(),
            "SELECT Id,Account,Amount FROM Ledger WHERE (Amount1) OFFSET 0 LIMIT 0"
        );
        assert!(matches!(qb.try_to_sql(), Err(SqlError::UnsupportedOperator(_))));
    }

    #[test]
    fn test_empty_predicate_emits_no_where() {
        let qb = QueryBuilder::<Ledger>::new().filter(Predicate::<Ledger>::raw(Expr::Lambda(None)));
        assert_eq!(qb.where_clause(), "");
        assert_eq!(qb.to_sql(), "SELECT Id,Account,Amount FROM Ledger OFFSET 0 LIMIT 0");
    }

    #[test]
    fn test_legacy_spacing_keeps_empty_fragments() {
        let opts = RenderOptions::default().with_legacy_spacing(true);
        let sql = QueryBuilder::<Ledger>::new().render(&opts).unwrap();
        assert_eq!(sql, "SELECT Id,Account,Amount FROM Ledger    OFFSET 0 LIMIT 0");
    }

    #[test]
    fn test_dynamic_metadata() {
        let meta = EntityMeta::from_columns(
            "Events",
            vec![ColumnDef::named("Kind", 1, false), ColumnDef::named("At", 2, false)],
        );
        let sql = QueryBuilder::with_metadata(meta)
            .filter(eq("Kind", "login"))
            .order_by(["At"])
            .limit(3)
            .to_sql();
        assert_eq!(
            sql,
            "SELECT Kind,At FROM Events WHERE (Kind='login') ORDER BY At OFFSET 0 LIMIT 3"
        );
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let qb = QueryBuilder::<Ledger>::new()
            .filter(Ledger::ID.is_in([1, 2, 3]))
            .order_by(Ledger::ID);
        assert_eq!(qb.to_sql(), qb.to_sql());
        assert_eq!(qb.clone().to_sql(), qb.to_sql());
    }
}
