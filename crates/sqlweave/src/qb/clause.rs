//! Clause types held by [`QueryBuilder`](super::QueryBuilder).

use std::fmt;

use crate::expr::{Criterion, Term};
use crate::table::{Field, Table};

/// Statement kind, fixed by the first kind-specific builder call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinType {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinType::Inner => "JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL OUTER JOIN",
            JoinType::Cross => "CROSS JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub(crate) kind: JoinType,
    pub(crate) table: Table,
    /// `None` only for CROSS JOIN.
    pub(crate) on: Option<Criterion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub(crate) term: Term,
    pub(crate) order: Option<Order>,
}

/// `ON CONFLICT (...) DO ...`
#[derive(Debug, Clone, PartialEq)]
pub struct OnConflict {
    pub(crate) targets: Vec<Field>,
    pub(crate) action: Option<ConflictAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    DoNothing,
    /// `SET` pairs; a `None` value means `EXCLUDED.<field>`.
    DoUpdate(Vec<(Field, Option<Term>)>),
}
