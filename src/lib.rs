//! # lambda-sql
//!
//! Compose filters, grouping, ordering, aggregates and paging over a typed
//! entity, then render one SQL `SELECT` statement as text.
//!
//! ## Quick Example
//!
//! ```
//! use lambda_sql::prelude::*;
//!
//! struct Example;
//!
//! impl Entity for Example {
//!     const TABLE: &'static str = "Example";
//!     const COLUMNS: &'static [ColumnDef] = &[
//!         ColumnDef::primary_key("Id", 1),
//!         ColumnDef::new("Name", 2),
//!         ColumnDef::new("Active", 3),
//!     ];
//! }
//!
//! impl Example {
//!     const ID: Field<Example, i64> = Field::new("Id");
//!     const NAME: Field<Example, String> = Field::new("Name");
//!     const ACTIVE: Field<Example, bool> = Field::new("Active");
//! }
//!
//! let wanted = vec![3, 5, 8];
//! let sql = QueryBuilder::<Example>::new()
//!     .filter(Example::ID.is_in(wanted) & (Example::NAME.eq("Test") | Example::ACTIVE.is_true()))
//!     .order_by(Example::ID)
//!     .limit(20)
//!     .to_sql();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT Id,Name,Active FROM Example WHERE ((Id IN (3,5,8)) AND ((Name='Test') OR Active)) ORDER BY Id OFFSET 0 LIMIT 20"
//! );
//! ```
//!
//! ## Node rendering
//!
//! | Node         | SQL                              |
//! |--------------|----------------------------------|
//! | `Literal`    | `'text'`, `'YYYY-MM-DD HH:MM:SS'`, `42` |
//! | `Field`      | bare column name                 |
//! | `Computed`   | literal form; sequences comma-joined |
//! | `Unary`      | its operand                      |
//! | `Binary`     | `(left<op>right)`                |
//! | `Membership` | `(item IN (collection))`         |
//! | `Lambda`     | its body                         |
//!
//! Values are inlined, not parameterized. See [`transpiler`].

pub mod ast;
pub mod builder;
pub mod config;
pub mod document;
pub mod entity;
pub mod error;
pub mod transpiler;
pub mod typed;

pub mod prelude {
    pub use crate::ast::builders::*;
    pub use crate::ast::*;
    pub use crate::builder::QueryBuilder;
    pub use crate::config::{Config, RenderOptions};
    pub use crate::document::QueryDocument;
    pub use crate::entity::{ColumnDef, Dynamic, Entity, EntityMeta};
    pub use crate::error::*;
    pub use crate::transpiler::{ToSql, compile, try_compile};
    pub use crate::typed::{ColumnValue, Field, FieldList, FieldRef, Predicate};
}

pub use builder::QueryBuilder;
pub use transpiler::{compile, try_compile};
