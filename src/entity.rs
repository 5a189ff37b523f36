//! Entity metadata: which fields of an entity are queryable columns.
//!
//! Metadata is declared statically next to the entity type; there is no
//! reflection. Each column carries an explicit ordinal so the emitted
//! column order does not depend on how the table was assembled.
//!
//! ```
//! use lambda_sql::entity::{ColumnDef, Entity};
//!
//! struct Order;
//!
//! impl Entity for Order {
//!     const TABLE: &'static str = "Orders";
//!     const COLUMNS: &'static [ColumnDef] = &[
//!         ColumnDef::primary_key("Id", 1),
//!         ColumnDef::new("Total", 2),
//!     ];
//! }
//!
//! assert_eq!(Order::metadata().queryable_fields(), ["Id", "Total"]);
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// One queryable column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Declared column name, emitted verbatim.
    pub name: Cow<'static, str>,
    /// Ordinal used to sort columns; ties keep declaration order.
    #[serde(default)]
    pub order: u32,
    /// Whether this is the primary column.
    #[serde(default)]
    pub primary: bool,
}

impl ColumnDef {
    /// A regular queryable column.
    pub const fn new(name: &'static str, order: u32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            order,
            primary: false,
        }
    }

    /// The primary column.
    pub const fn primary_key(name: &'static str, order: u32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            order,
            primary: true,
        }
    }

    /// A column whose name is only known at runtime.
    pub fn named(name: impl Into<String>, order: u32, primary: bool) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            order,
            primary,
        }
    }
}

/// Table name plus its queryable columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta {
    /// Table name, emitted as a bare token after `FROM`.
    pub table: Cow<'static, str>,
    /// Queryable columns in declaration order.
    #[serde(default)]
    pub columns: Cow<'static, [ColumnDef]>,
}

impl EntityMeta {
    /// Metadata over static declarations.
    pub const fn new(table: &'static str, columns: &'static [ColumnDef]) -> Self {
        Self {
            table: Cow::Borrowed(table),
            columns: Cow::Borrowed(columns),
        }
    }

    /// Metadata assembled at runtime.
    pub fn from_columns(table: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            table: Cow::Owned(table.into()),
            columns: Cow::Owned(columns),
        }
    }

    /// The table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    fn ordered(&self) -> Vec<&ColumnDef> {
        let mut cols: Vec<&ColumnDef> = self.columns.iter().collect();
        cols.sort_by_key(|c| c.order);
        cols
    }

    /// Queryable column names, by ordinal.
    pub fn queryable_fields(&self) -> Vec<&str> {
        self.ordered().into_iter().map(|c| c.name.as_ref()).collect()
    }

    /// The primary column, if one is flagged.
    pub fn primary_field(&self) -> Option<&str> {
        self.ordered()
            .into_iter()
            .find(|c| c.primary)
            .map(|c| c.name.as_ref())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A type with statically declared column metadata.
pub trait Entity {
    /// The table name.
    const TABLE: &'static str;
    /// Queryable columns.
    const COLUMNS: &'static [ColumnDef];

    fn metadata() -> EntityMeta {
        EntityMeta::new(Self::TABLE, Self::COLUMNS)
    }
}

/// Marker entity for metadata only known at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dynamic;
