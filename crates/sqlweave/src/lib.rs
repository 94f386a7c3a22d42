//! # sqlweave
//!
//! SQL query construction and rendering, with a PostgreSQL dialect.
//!
//! ## Features
//!
//! - **Structural queries**: statements are built as trees of terms and criteria, never by string splicing
//! - **Deterministic rendering**: one pass, one line, parentheses derived from operator precedence
//! - **Dialects as values**: quoting, literal rules and optional operators live in a [`Dialect`] struct (loadable from TOML)
//! - **PostgreSQL extras**: `ARRAY[...]`, JSON operators (`->`, `->>`, `#>`, `#>>`, `@>`, `<@`, `?`, `?&`, `?|`), `DISTINCT ON`, `ON CONFLICT`, `RETURNING`
//! - **No execution**: the output is SQL text for whatever driver runs it
//!
//! ## Query Builder (qb)
//!
//! ```ignore
//! use sqlweave::{PostgreSqlQuery, Table, Term, TermOps};
//!
//! let abc = Table::new("abc");
//!
//! let sql = PostgreSqlQuery::from_(&abc)
//!     .distinct_on([Term::field("lname"), abc.field("fname").into()])
//!     .select(["lname", "id"])
//!     .to_sql()?;
//! assert_eq!(sql, r#"SELECT DISTINCT ON("lname","fname") "lname","id" FROM "abc""#);
//!
//! let sql = PostgreSqlQuery::from_(&abc)
//!     .select(["*"])
//!     .where_(abc.field("json").contained_by(vec!["One", "Two", "Three"]))
//!     .where_(abc.field("id").eq(26))
//!     .to_sql()?;
//! assert_eq!(sql, r#"SELECT * FROM "abc" WHERE "json"<@'["One","Two","Three"]' AND "id"=26"#);
//! # Ok::<(), sqlweave::QueryError>(())
//! ```
//!
//! ## Literals
//!
//! Values are converted with `From` impls (see [`Value`]); the [`values!`]
//! macro builds heterogeneous rows. Mappings only render inside [`json()`].

pub mod dialect;
pub mod error;
pub mod expr;
pub mod ident;
pub mod literal;
pub mod prelude;
pub mod qb;
mod render;
pub mod table;
pub mod value;

pub use dialect::{ArrayStyle, BooleanStyle, Capabilities, Dialect, DialectPreset};
pub use error::{QueryError, QueryResult};
pub use expr::functions;
pub use expr::{
    BinaryOperator, Criterion, IntoColumn, JsonOperator, Term, TermOps, UnaryOperator, array,
    json, parse_json,
};
pub use ident::{Ident, quote_ident};
pub use literal::{LiteralMode, format_value, quote_text};
pub use qb::{PostgreSqlQuery, Query, QueryBuilder, StatementKind};
pub use table::{Field, Table};
pub use value::{Number, Value};
