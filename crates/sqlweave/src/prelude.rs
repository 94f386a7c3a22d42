//! Convenient imports for typical `sqlweave` usage.
//!
//! ```ignore
//! use sqlweave::prelude::*;
//! ```

pub use crate::{
    Criterion, Dialect, Field, PostgreSqlQuery, Query, QueryBuilder, QueryError, QueryResult,
    Table, Term, TermOps, Value, array, json, parse_json, values,
};
