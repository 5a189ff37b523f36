//! Type-safe field handles and predicates.
//!
//! A [`Field<E, T>`] names a column of entity `E` whose Rust type is `T`.
//! Comparison methods only accept values that match `T`, and the
//! resulting [`Predicate<E>`] can only be handed to a builder for `E`.
//!
//! # Example
//! ```
//! use lambda_sql::prelude::*;
//!
//! struct User;
//!
//! impl Entity for User {
//!     const TABLE: &'static str = "User";
//!     const COLUMNS: &'static [ColumnDef] = &[ColumnDef::new("Age", 1), ColumnDef::new("Name", 2)];
//! }
//!
//! impl User {
//!     const AGE: Field<User, i64> = Field::new("Age");
//!     const NAME: Field<User, String> = Field::new("Name");
//! }
//!
//! let pred = User::AGE.gte(18) & User::NAME.ne("root");
//! assert_eq!(pred.to_string(), "((Age>=18) AND (Name!='root'))");
//! ```

use std::borrow::Cow;
use std::marker::PhantomData;
use std::ops::{BitAnd, BitOr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::ast::builders::computed_seq;
use crate::ast::{BinaryOp, Expr, Value};
use crate::entity::Dynamic;

/// A typed column reference.
pub struct Field<E, T> {
    name: Cow<'static, str>,
    _phantom: PhantomData<fn() -> (E, T)>,
}

impl<E, T> Field<E, T> {
    /// Create a field handle from a static column name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _phantom: PhantomData,
        }
    }

    /// Create a field handle from a runtime column name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _phantom: PhantomData,
        }
    }

    /// Get the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field as an expression node.
    pub fn expr(&self) -> Expr {
        Expr::Field(self.name.to_string())
    }

    fn compare<V: ColumnValue<T> + Into<Value>>(&self, op: BinaryOp, value: V) -> Predicate<E> {
        Predicate::raw(Expr::binary(op, self.expr(), Expr::Literal(value.into())))
    }

    pub fn eq<V: ColumnValue<T> + Into<Value>>(&self, value: V) -> Predicate<E> {
        self.compare(BinaryOp::Equal, value)
    }

    pub fn ne<V: ColumnValue<T> + Into<Value>>(&self, value: V) -> Predicate<E> {
        self.compare(BinaryOp::NotEqual, value)
    }

    pub fn gt<V: ColumnValue<T> + Into<Value>>(&self, value: V) -> Predicate<E> {
        self.compare(BinaryOp::GreaterThan, value)
    }

    pub fn gte<V: ColumnValue<T> + Into<Value>>(&self, value: V) -> Predicate<E> {
        self.compare(BinaryOp::GreaterThanOrEqual, value)
    }

    pub fn lt<V: ColumnValue<T> + Into<Value>>(&self, value: V) -> Predicate<E> {
        self.compare(BinaryOp::LessThan, value)
    }

    pub fn lte<V: ColumnValue<T> + Into<Value>>(&self, value: V) -> Predicate<E> {
        self.compare(BinaryOp::LessThanOrEqual, value)
    }

    /// `field IN (values)`; the values are collected immediately.
    pub fn is_in<V, I>(&self, values: I) -> Predicate<E>
    where
        V: ColumnValue<T> + Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Predicate::raw(self.expr().is_in(computed_seq(values)))
    }
}

impl<E> Field<E, bool> {
    /// The bare boolean column used as a predicate.
    pub fn is_true(&self) -> Predicate<E> {
        Predicate::raw(self.expr())
    }
}

impl<E, T> Clone for Field<E, T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<E, T> std::fmt::Debug for Field<E, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

/// Allow Field to be used where &str is expected.
impl<E, T> AsRef<str> for Field<E, T> {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

/// Marker trait for value types that match a column type.
pub trait ColumnValue<C> {}

impl ColumnValue<i64> for i64 {}
impl ColumnValue<i64> for i32 {}
impl ColumnValue<i64> for u32 {}
impl ColumnValue<i32> for i32 {}

impl ColumnValue<f64> for f64 {}

impl ColumnValue<Decimal> for Decimal {}
impl ColumnValue<Decimal> for i64 {}
impl ColumnValue<Decimal> for i32 {}

impl ColumnValue<String> for String {}
impl ColumnValue<String> for &str {}
impl ColumnValue<String> for &String {}

impl ColumnValue<bool> for bool {}

impl ColumnValue<NaiveDateTime> for NaiveDateTime {}
impl ColumnValue<NaiveDateTime> for NaiveDate {}
impl ColumnValue<DateTime<Utc>> for DateTime<Utc> {}

// Untyped columns accept anything that converts.
impl<V: Into<Value>> ColumnValue<Value> for V {}

/// A column name bound to an entity, with the value type erased.
pub struct FieldRef<E> {
    name: String,
    _phantom: PhantomData<fn() -> E>,
}

impl<E> FieldRef<E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_name(self) -> String {
        self.name
    }
}

impl<E> std::fmt::Debug for FieldRef<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FieldRef").field(&self.name).finish()
    }
}

impl<E, T> From<Field<E, T>> for FieldRef<E> {
    fn from(field: Field<E, T>) -> Self {
        Self {
            name: field.name.into_owned(),
            _phantom: PhantomData,
        }
    }
}

impl<E, T> From<&Field<E, T>> for FieldRef<E> {
    fn from(field: &Field<E, T>) -> Self {
        Self {
            name: field.name.to_string(),
            _phantom: PhantomData,
        }
    }
}

impl From<&str> for FieldRef<Dynamic> {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_string(),
            _phantom: PhantomData,
        }
    }
}

impl From<String> for FieldRef<Dynamic> {
    fn from(name: String) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }
}

/// One or more fields of entity `E`, as accepted by the clause methods.
pub trait FieldList<E> {
    /// Append the column names, in order.
    fn append_to(self, out: &mut Vec<String>);
}

impl<E, T> FieldList<E> for Field<E, T> {
    fn append_to(self, out: &mut Vec<String>) {
        out.push(self.name.into_owned());
    }
}

impl<E, T> FieldList<E> for &Field<E, T> {
    fn append_to(self, out: &mut Vec<String>) {
        out.push(self.name.to_string());
    }
}

impl<E> FieldList<E> for FieldRef<E> {
    fn append_to(self, out: &mut Vec<String>) {
        out.push(self.name);
    }
}

impl FieldList<Dynamic> for &str {
    fn append_to(self, out: &mut Vec<String>) {
        out.push(self.to_string());
    }
}

impl<E, F: Into<FieldRef<E>>> FieldList<E> for Vec<F> {
    fn append_to(self, out: &mut Vec<String>) {
        out.extend(self.into_iter().map(|f| Into::<FieldRef<E>>::into(f).name));
    }
}

impl<E, F: Into<FieldRef<E>>, const N: usize> FieldList<E> for [F; N] {
    fn append_to(self, out: &mut Vec<String>) {
        out.extend(self.into_iter().map(|f| Into::<FieldRef<E>>::into(f).name));
    }
}

macro_rules! tuple_field_list {
    ($($name:ident),+) => {
        impl<E, $($name: FieldList<E>),+> FieldList<E> for ($($name,)+) {
            #[allow(non_snake_case)]
            fn append_to(self, out: &mut Vec<String>) {
                let ($($name,)+) = self;
                $($name.append_to(out);)+
            }
        }
    };
}

tuple_field_list!(A);
tuple_field_list!(A, B);
tuple_field_list!(A, B, C);
tuple_field_list!(A, B, C, D);
tuple_field_list!(A, B, C, D, F);
tuple_field_list!(A, B, C, D, F, G);

/// A predicate tree over entity `E`.
pub struct Predicate<E> {
    expr: Expr,
    _phantom: PhantomData<fn() -> E>,
}

impl<E> Predicate<E> {
    /// Wrap a hand-built tree. Field names inside are not checked.
    pub fn raw(expr: Expr) -> Self {
        Self {
            expr,
            _phantom: PhantomData,
        }
    }

    /// `self AND other`
    pub fn and(self, other: Predicate<E>) -> Self {
        Self::raw(self.expr.and(other.expr))
    }

    /// `self OR other`
    pub fn or(self, other: Predicate<E>) -> Self {
        Self::raw(self.expr.or(other.expr))
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }
}

impl<E> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        Self::raw(self.expr.clone())
    }
}

impl<E> std::fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Predicate").field(&self.expr).finish()
    }
}

impl<E> std::fmt::Display for Predicate<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.expr, f)
    }
}

impl<E> BitAnd for Predicate<E> {
    type Output = Predicate<E>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl<E> BitOr for Predicate<E> {
    type Output = Predicate<E>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl<E> From<Predicate<E>> for Expr {
    fn from(pred: Predicate<E>) -> Self {
        pred.expr
    }
}

impl From<Expr> for Predicate<Dynamic> {
    fn from(expr: Expr) -> Self {
        Self::raw(expr)
    }
}
