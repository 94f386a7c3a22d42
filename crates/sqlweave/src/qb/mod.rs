//! Query builder.
//!
//! This module provides the fluent [`QueryBuilder`] and its dialect entry
//! points:
//! - [`Query`] renders with the ANSI dialect
//! - [`PostgreSqlQuery`] renders with the PostgreSQL dialect
//! - [`Dialect::query`] starts a builder for any dialect value
//!
//! # Usage
//!
//! ```ignore
//! use sqlweave::{PostgreSqlQuery, Table, TermOps, values};
//!
//! let abc = Table::new("abc");
//!
//! // SELECT
//! let sql = PostgreSqlQuery::from_(&abc)
//!     .select(["*"])
//!     .where_(abc.field("json").has_keys(values!["dates", "imported"]))
//!     .to_sql()?;
//! assert_eq!(sql, r#"SELECT * FROM "abc" WHERE "json"?&ARRAY['dates','imported']"#);
//!
//! // INSERT
//! let sql = PostgreSqlQuery::into(&abc)
//!     .insert(values![1, values![1, "a", true]])
//!     .to_sql()?;
//! assert_eq!(sql, r#"INSERT INTO "abc" VALUES (1,ARRAY[1,'a',true])"#);
//!
//! // UPDATE
//! let sql = PostgreSqlQuery::update(&abc)
//!     .set("status", "inactive")
//!     .where_(abc.field("id").eq(1))
//!     .to_sql()?;
//!
//! // DELETE
//! let sql = PostgreSqlQuery::from_(&abc)
//!     .delete()
//!     .where_(abc.field("id").eq(1))
//!     .to_sql()?;
//! # Ok::<(), sqlweave::QueryError>(())
//! ```

mod builder;
mod clause;
mod render;

pub use builder::QueryBuilder;
pub use clause::{ConflictAction, Join, JoinType, OnConflict, Order, OrderItem, StatementKind};

use crate::dialect::Dialect;
use crate::expr::IntoColumn;
use crate::table::Table;

macro_rules! entry_points {
    ($(#[$meta:meta])* $name:ident => $dialect:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl $name {
            /// Start a builder reading from `table`.
            pub fn from_(table: impl Into<Table>) -> QueryBuilder {
                QueryBuilder::new($dialect).from_(table)
            }

            /// Start a SELECT with the given projection.
            pub fn select<I, C>(columns: I) -> QueryBuilder
            where
                I: IntoIterator<Item = C>,
                C: IntoColumn,
            {
                QueryBuilder::new($dialect).select(columns)
            }

            /// Start an INSERT into `table`.
            pub fn into(table: impl Into<Table>) -> QueryBuilder {
                QueryBuilder::new($dialect).into(table)
            }

            /// Start an UPDATE of `table`.
            pub fn update(table: impl Into<Table>) -> QueryBuilder {
                QueryBuilder::new($dialect).update(table)
            }

            /// The dialect builders from this entry point render with.
            pub fn dialect() -> Dialect {
                $dialect
            }
        }
    };
}

entry_points!(
    /// Builders for the ANSI dialect.
    Query => Dialect::ansi()
);

entry_points!(
    /// Builders for the PostgreSQL dialect.
    PostgreSqlQuery => Dialect::postgres()
);
