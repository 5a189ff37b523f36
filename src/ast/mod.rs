pub mod builders;
pub mod expr;
pub mod operators;
pub mod query;
pub mod values;

pub use self::expr::Expr;
pub use self::operators::BinaryOp;
pub use self::query::QuerySpec;
pub use self::values::{DATETIME_FORMAT, Value};
