//! Fluent statement builder.

use crate::dialect::Dialect;
use crate::error::QueryError;
use crate::expr::{Criterion, IntoColumn, Term};
use crate::qb::clause::{
    ConflictAction, Join, JoinType, OnConflict, Order, OrderItem, StatementKind,
};
use crate::table::{Field, Table};

/// Accumulates the clauses of one SQL statement.
///
/// Every method consumes the builder and returns it, so calls chain. The
/// statement kind is fixed by the first kind-specific call (`select`,
/// `insert`, `update`, `delete`, ...); later calls that belong to another
/// kind are recorded as [`QueryError::InvalidClauseCombination`]. The first
/// construction error is kept and returned by [`to_sql`](Self::to_sql).
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    pub(crate) dialect: Dialect,
    pub(crate) kind: Option<StatementKind>,
    /// FROM tables (SELECT/DELETE, or UPDATE ... FROM)
    pub(crate) from: Vec<Table>,
    pub(crate) joins: Vec<Join>,
    pub(crate) distinct: bool,
    pub(crate) distinct_on: Vec<Term>,
    pub(crate) projection: Vec<Term>,
    pub(crate) wheres: Option<Criterion>,
    pub(crate) group_by: Vec<Term>,
    pub(crate) having: Option<Criterion>,
    pub(crate) order_by: Vec<OrderItem>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    /// INSERT INTO / UPDATE target
    pub(crate) target: Option<Table>,
    pub(crate) columns: Vec<Field>,
    pub(crate) rows: Vec<Vec<Term>>,
    pub(crate) sets: Vec<(Field, Term)>,
    pub(crate) on_conflict: Option<OnConflict>,
    pub(crate) returning: Vec<Term>,
    /// First construction error
    pub(crate) build_error: Option<QueryError>,
}

/// Clauses shared by more than one statement kind.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SharedClause {
    From,
    Where,
    Returning,
}

impl SharedClause {
    pub(crate) fn name(self) -> &'static str {
        match self {
            SharedClause::From => "FROM",
            SharedClause::Where => "WHERE",
            SharedClause::Returning => "RETURNING",
        }
    }

    pub(crate) fn allowed_in(self, kind: StatementKind) -> bool {
        match self {
            SharedClause::From | SharedClause::Where => kind != StatementKind::Insert,
            SharedClause::Returning => kind != StatementKind::Select,
        }
    }
}

impl QueryBuilder {
    pub(crate) fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            kind: None,
            from: Vec::new(),
            joins: Vec::new(),
            distinct: false,
            distinct_on: Vec::new(),
            projection: Vec::new(),
            wheres: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
            target: None,
            columns: Vec::new(),
            rows: Vec::new(),
            sets: Vec::new(),
            on_conflict: None,
            returning: Vec::new(),
            build_error: None,
        }
    }

    /// The dialect `to_sql` renders with.
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Statement kind, once fixed.
    pub fn kind(&self) -> Option<StatementKind> {
        self.kind
    }

    /// The first construction error, if any.
    pub fn error(&self) -> Option<&QueryError> {
        self.build_error.as_ref()
    }

    // ==================== State helpers ====================

    fn fail(&mut self, err: QueryError) {
        if self.build_error.is_none() {
            self.build_error = Some(err);
        }
    }

    /// Fix the statement kind, or record a conflict. Returns whether the
    /// clause may be recorded.
    fn claim(&mut self, kind: StatementKind, clause: &str) -> bool {
        match self.kind {
            Some(current) if current == kind => true,
            Some(current) => {
                self.fail(QueryError::invalid_clause(format!(
                    "{clause} cannot be used in a {current} statement"
                )));
                false
            }
            None => {
                if let Some(shared) = self.shared_clause_conflict(kind) {
                    self.fail(QueryError::invalid_clause(format!(
                        "{} cannot be used in a {kind} statement",
                        shared.name()
                    )));
                    return false;
                }
                self.kind = Some(kind);
                true
            }
        }
    }

    fn allow(&mut self, clause: SharedClause) -> bool {
        match self.kind {
            Some(kind) if !clause.allowed_in(kind) => {
                self.fail(QueryError::invalid_clause(format!(
                    "{} cannot be used in a {kind} statement",
                    clause.name()
                )));
                false
            }
            _ => true,
        }
    }

    /// A shared clause already recorded that `kind` does not accept.
    pub(crate) fn shared_clause_conflict(&self, kind: StatementKind) -> Option<SharedClause> {
        let recorded = [
            (SharedClause::From, !self.from.is_empty()),
            (SharedClause::Where, self.wheres.is_some()),
            (SharedClause::Returning, !self.returning.is_empty()),
        ];
        recorded
            .into_iter()
            .find(|(clause, present)| *present && !clause.allowed_in(kind))
            .map(|(clause, _)| clause)
    }

    // ==================== Sources ====================

    /// Append a source table.
    pub fn from_(mut self, table: impl Into<Table>) -> Self {
        if self.allow(SharedClause::From) {
            self.from.push(table.into());
        }
        self
    }

    /// Target table of an INSERT.
    pub fn into(mut self, table: impl Into<Table>) -> Self {
        if self.claim(StatementKind::Insert, "INTO") {
            self.target = Some(table.into());
        }
        self
    }

    /// Target table of an UPDATE.
    pub fn update(mut self, table: impl Into<Table>) -> Self {
        if self.claim(StatementKind::Update, "UPDATE") {
            self.target = Some(table.into());
        }
        self
    }

    /// Turn the statement into a DELETE of the FROM table.
    pub fn delete(mut self) -> Self {
        self.claim(StatementKind::Delete, "DELETE");
        self
    }

    // ==================== SELECT ====================

    /// Append to the projection. `"*"` is the wildcard; other strings name
    /// fields.
    pub fn select<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoColumn,
    {
        if self.claim(StatementKind::Select, "SELECT") {
            self.projection
                .extend(columns.into_iter().map(IntoColumn::into_column));
        }
        self
    }

    /// Plain `DISTINCT`. Cannot be combined with [`distinct_on`](Self::distinct_on).
    pub fn distinct(mut self) -> Self {
        if !self.claim(StatementKind::Select, "DISTINCT") {
            return self;
        }
        if self.distinct_on.is_empty() {
            self.distinct = true;
        } else {
            self.fail(QueryError::invalid_clause("DISTINCT cannot be combined with DISTINCT ON"));
        }
        self
    }

    /// `DISTINCT ON(...)`; repeated columns are kept once, first position wins.
    pub fn distinct_on<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoColumn,
    {
        if self.claim(StatementKind::Select, "DISTINCT ON") {
            if self.distinct {
                self.fail(QueryError::invalid_clause(
                    "DISTINCT ON cannot be combined with DISTINCT",
                ));
                return self;
            }
            for column in columns {
                let term = column.into_column();
                if !self.distinct_on.contains(&term) {
                    self.distinct_on.push(term);
                }
            }
        }
        self
    }

    fn push_join(mut self, kind: JoinType, table: Table, on: Option<Criterion>) -> Self {
        if self.claim(StatementKind::Select, kind.keyword()) {
            self.joins.push(Join { kind, table, on });
        }
        self
    }

    /// `JOIN table ON criterion` (inner join).
    pub fn join(self, table: impl Into<Table>, on: impl Into<Criterion>) -> Self {
        self.inner_join(table, on)
    }

    pub fn inner_join(self, table: impl Into<Table>, on: impl Into<Criterion>) -> Self {
        self.push_join(JoinType::Inner, table.into(), Some(on.into()))
    }

    pub fn left_join(self, table: impl Into<Table>, on: impl Into<Criterion>) -> Self {
        self.push_join(JoinType::Left, table.into(), Some(on.into()))
    }

    pub fn right_join(self, table: impl Into<Table>, on: impl Into<Criterion>) -> Self {
        self.push_join(JoinType::Right, table.into(), Some(on.into()))
    }

    pub fn full_join(self, table: impl Into<Table>, on: impl Into<Criterion>) -> Self {
        self.push_join(JoinType::Full, table.into(), Some(on.into()))
    }

    pub fn cross_join(self, table: impl Into<Table>) -> Self {
        self.push_join(JoinType::Cross, table.into(), None)
    }

    // ==================== Filtering ====================

    /// AND the criterion into WHERE. Calls fold left to right.
    pub fn where_(mut self, criterion: impl Into<Criterion>) -> Self {
        if self.allow(SharedClause::Where) {
            let criterion = criterion.into();
            self.wheres = Some(match self.wheres.take() {
                Some(existing) => existing.and(criterion),
                None => criterion,
            });
        }
        self
    }

    pub fn group_by<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoColumn,
    {
        if self.claim(StatementKind::Select, "GROUP BY") {
            self.group_by
                .extend(columns.into_iter().map(IntoColumn::into_column));
        }
        self
    }

    /// AND the criterion into HAVING.
    pub fn having(mut self, criterion: impl Into<Criterion>) -> Self {
        if self.claim(StatementKind::Select, "HAVING") {
            let criterion = criterion.into();
            self.having = Some(match self.having.take() {
                Some(existing) => existing.and(criterion),
                None => criterion,
            });
        }
        self
    }

    // ==================== Ordering & Pagination ====================

    fn push_order(mut self, column: Term, order: Option<Order>) -> Self {
        if self.claim(StatementKind::Select, "ORDER BY") {
            self.order_by.push(OrderItem {
                term: column,
                order,
            });
        }
        self
    }

    /// ORDER BY without a direction.
    pub fn order_by(self, column: impl IntoColumn) -> Self {
        self.push_order(column.into_column(), None)
    }

    pub fn order_by_asc(self, column: impl IntoColumn) -> Self {
        self.push_order(column.into_column(), Some(Order::Asc))
    }

    pub fn order_by_desc(self, column: impl IntoColumn) -> Self {
        self.push_order(column.into_column(), Some(Order::Desc))
    }

    pub fn limit(mut self, n: u64) -> Self {
        if self.claim(StatementKind::Select, "LIMIT") {
            self.limit = Some(n);
        }
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        if self.claim(StatementKind::Select, "OFFSET") {
            self.offset = Some(n);
        }
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        if self.claim(StatementKind::Select, "LIMIT") {
            let size = per_page.max(1);
            self.limit = Some(size);
            self.offset = Some((page.max(1) - 1).saturating_mul(size));
        }
        self
    }

    // ==================== INSERT ====================

    /// INSERT column list. Fixes the row arity.
    pub fn columns<I, F>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        if self.claim(StatementKind::Insert, "columns") {
            self.columns.extend(columns.into_iter().map(Into::into));
        }
        self
    }

    /// Append one VALUES row.
    ///
    /// The column list, or else the first row, sets the arity; a row of a
    /// different length records [`QueryError::ArityMismatch`]. An empty row
    /// records [`QueryError::IncompleteQuery`] and sets no arity.
    pub fn insert<I, T>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        if !self.claim(StatementKind::Insert, "VALUES") {
            return self;
        }
        let row: Vec<Term> = row.into_iter().map(Into::into).collect();
        if row.is_empty() {
            self.fail(QueryError::incomplete("INSERT with an empty VALUES row"));
            return self;
        }
        let expected = if self.columns.is_empty() {
            self.rows.first().map(Vec::len)
        } else {
            Some(self.columns.len())
        };
        match expected {
            Some(expected) if expected != row.len() => self.fail(QueryError::ArityMismatch {
                expected,
                found: row.len(),
            }),
            _ => self.rows.push(row),
        }
        self
    }

    /// Start an `ON CONFLICT` clause; an empty target list means any
    /// conflict.
    pub fn on_conflict<I, F>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        if self.claim(StatementKind::Insert, "ON CONFLICT") {
            self.on_conflict = Some(OnConflict {
                targets: targets.into_iter().map(Into::into).collect(),
                action: None,
            });
        }
        self
    }

    /// `ON CONFLICT ... DO NOTHING`
    pub fn do_nothing(mut self) -> Self {
        let conflict = match self.on_conflict.as_mut() {
            Some(OnConflict { action, .. }) => match action {
                Some(ConflictAction::DoUpdate(_)) => Some("DO NOTHING cannot follow DO UPDATE"),
                _ => {
                    *action = Some(ConflictAction::DoNothing);
                    None
                }
            },
            None => Some("DO NOTHING requires ON CONFLICT"),
        };
        if let Some(message) = conflict {
            self.fail(QueryError::invalid_clause(message));
        }
        self
    }

    /// `ON CONFLICT ... DO UPDATE SET field=value`; repeated calls add pairs.
    pub fn do_update(self, field: impl Into<Field>, value: impl Into<Term>) -> Self {
        self.push_conflict_update(field.into(), Some(value.into()))
    }

    /// `ON CONFLICT ... DO UPDATE SET field=EXCLUDED.field`
    pub fn do_update_excluded(self, field: impl Into<Field>) -> Self {
        self.push_conflict_update(field.into(), None)
    }

    fn push_conflict_update(mut self, field: Field, value: Option<Term>) -> Self {
        let conflict = match self.on_conflict.as_mut() {
            Some(OnConflict { action, .. }) => match action {
                Some(ConflictAction::DoUpdate(pairs)) => {
                    pairs.push((field, value));
                    None
                }
                Some(ConflictAction::DoNothing) => Some("DO UPDATE cannot follow DO NOTHING"),
                None => {
                    *action = Some(ConflictAction::DoUpdate(vec![(field, value)]));
                    None
                }
            },
            None => Some("DO UPDATE requires ON CONFLICT"),
        };
        if let Some(message) = conflict {
            self.fail(QueryError::invalid_clause(message));
        }
        self
    }

    // ==================== UPDATE ====================

    /// `SET field=value`
    pub fn set(mut self, field: impl Into<Field>, value: impl Into<Term>) -> Self {
        if self.claim(StatementKind::Update, "SET") {
            self.sets.push((field.into(), value.into()));
        }
        self
    }

    // ==================== RETURNING ====================

    pub fn returning<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoColumn,
    {
        if self.allow(SharedClause::Returning) {
            self.returning
                .extend(columns.into_iter().map(IntoColumn::into_column));
        }
        self
    }
}
