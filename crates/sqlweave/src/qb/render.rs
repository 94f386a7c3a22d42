//! Statement rendering.

use crate::dialect::Dialect;
use crate::error::{QueryError, QueryResult};
use crate::expr::Criterion;
use crate::ident::write_ident;
use crate::qb::QueryBuilder;
use crate::qb::clause::{ConflictAction, Order, StatementKind};
use crate::render::RenderCtx;

impl QueryBuilder {
    /// Render with the builder's own dialect.
    pub fn to_sql(&self) -> QueryResult<String> {
        self.render(&self.dialect)
    }

    /// Render with `dialect`.
    ///
    /// Returns the first recorded construction error, or the complete SQL
    /// text. Nothing is written on failure.
    pub fn render(&self, dialect: &Dialect) -> QueryResult<String> {
        let kind = self.kind.unwrap_or(StatementKind::Select);
        let result = self.render_statement(kind, dialect);

        #[cfg(feature = "tracing")]
        match &result {
            Ok(sql) => tracing::debug!(
                target: "sqlweave.sql",
                dialect = %dialect.name,
                statement = %kind,
                sql = %sql,
                "rendered statement"
            ),
            Err(err) => tracing::debug!(
                target: "sqlweave.sql",
                dialect = %dialect.name,
                statement = %kind,
                error = %err,
                "statement rendering failed"
            ),
        }

        result
    }

    fn render_statement(&self, kind: StatementKind, dialect: &Dialect) -> QueryResult<String> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        if let Some(clause) = self.shared_clause_conflict(kind) {
            return Err(QueryError::invalid_clause(format!(
                "{} cannot be used in a {kind} statement",
                clause.name()
            )));
        }

        let mut out = String::new();
        match kind {
            StatementKind::Select => self.write_select(&mut out, dialect)?,
            StatementKind::Insert => self.write_insert(&mut out, dialect)?,
            StatementKind::Update => self.write_update(&mut out, dialect)?,
            StatementKind::Delete => self.write_delete(&mut out, dialect)?,
        }
        if !self.returning.is_empty() {
            dialect.require(dialect.capabilities.returning, "RETURNING")?;
            out.push_str(" RETURNING ");
            self.ctx(dialect).write_list(&mut out, &self.returning)?;
        }
        Ok(out)
    }

    /// Fields are qualified once more than one table is in scope.
    fn ctx<'a>(&self, dialect: &'a Dialect) -> RenderCtx<'a> {
        let tables = self.from.len() + self.joins.len() + usize::from(self.target.is_some());
        RenderCtx::new(dialect, tables > 1)
    }

    fn write_select(&self, out: &mut String, dialect: &Dialect) -> QueryResult<()> {
        if self.projection.is_empty() {
            return Err(QueryError::incomplete(if self.from.is_empty() {
                "empty query"
            } else {
                "SELECT without a projection"
            }));
        }
        let ctx = self.ctx(dialect);

        out.push_str("SELECT ");
        if !self.distinct_on.is_empty() {
            dialect.require(dialect.capabilities.distinct_on, "DISTINCT ON")?;
            out.push_str("DISTINCT ON(");
            ctx.write_list(out, &self.distinct_on)?;
            out.push_str(") ");
        } else if self.distinct {
            out.push_str("DISTINCT ");
        }
        for (i, term) in self.projection.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            ctx.write_projection(out, term)?;
        }

        if !self.from.is_empty() {
            out.push_str(" FROM ");
            self.write_tables(out, dialect);
        }
        for join in &self.joins {
            out.push(' ');
            out.push_str(join.kind.keyword());
            out.push(' ');
            join.table.write_sql(out, dialect, true);
            if let Some(on) = &join.on {
                out.push_str(" ON ");
                ctx.write_term(out, on.as_term())?;
            }
        }
        write_criterion(out, &ctx, " WHERE ", self.wheres.as_ref())?;
        if !self.group_by.is_empty() {
            out.push_str(" GROUP BY ");
            ctx.write_list(out, &self.group_by)?;
        }
        write_criterion(out, &ctx, " HAVING ", self.having.as_ref())?;
        for (i, item) in self.order_by.iter().enumerate() {
            out.push_str(if i == 0 { " ORDER BY " } else { "," });
            ctx.write_term(out, &item.term)?;
            match item.order {
                Some(Order::Asc) => out.push_str(" ASC"),
                Some(Order::Desc) => out.push_str(" DESC"),
                None => {}
            }
        }
        if let Some(limit) = self.limit {
            out.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            out.push_str(&format!(" OFFSET {offset}"));
        }
        Ok(())
    }

    fn write_insert(&self, out: &mut String, dialect: &Dialect) -> QueryResult<()> {
        let table = self
            .target
            .as_ref()
            .ok_or_else(|| QueryError::incomplete("INSERT without a target table"))?;
        if self.rows.is_empty() {
            return Err(QueryError::incomplete("INSERT without VALUES rows"));
        }
        if !self.columns.is_empty() {
            if let Some(row) = self.rows.iter().find(|row| row.len() != self.columns.len()) {
                return Err(QueryError::ArityMismatch {
                    expected: self.columns.len(),
                    found: row.len(),
                });
            }
        }
        if self.rows.iter().any(Vec::is_empty) {
            return Err(QueryError::incomplete("INSERT with an empty VALUES row"));
        }
        let ctx = RenderCtx::new(dialect, false);

        out.push_str("INSERT INTO ");
        table.write_sql(out, dialect, false);
        if !self.columns.is_empty() {
            out.push_str(" (");
            for (i, column) in self.columns.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_ident(out, column.name(), dialect);
            }
            out.push(')');
        }
        out.push_str(" VALUES ");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push('(');
            ctx.write_list(out, row)?;
            out.push(')');
        }

        if let Some(conflict) = &self.on_conflict {
            dialect.require(dialect.capabilities.on_conflict, "ON CONFLICT")?;
            out.push_str(" ON CONFLICT");
            if !conflict.targets.is_empty() {
                out.push_str(" (");
                for (i, target) in conflict.targets.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_ident(out, target.name(), dialect);
                }
                out.push(')');
            }
            match &conflict.action {
                None => return Err(QueryError::incomplete("ON CONFLICT without an action")),
                Some(ConflictAction::DoNothing) => out.push_str(" DO NOTHING"),
                Some(ConflictAction::DoUpdate(pairs)) => {
                    if conflict.targets.is_empty() {
                        return Err(QueryError::invalid_clause(
                            "DO UPDATE requires a conflict target",
                        ));
                    }
                    out.push_str(" DO UPDATE SET ");
                    for (i, (field, value)) in pairs.iter().enumerate() {
                        if i > 0 {
                            out.push(',');
                        }
                        write_ident(out, field.name(), dialect);
                        out.push('=');
                        match value {
                            Some(value) => ctx.write_term(out, value)?,
                            None => {
                                out.push_str("EXCLUDED.");
                                write_ident(out, field.name(), dialect);
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn write_update(&self, out: &mut String, dialect: &Dialect) -> QueryResult<()> {
        let table = self
            .target
            .as_ref()
            .ok_or_else(|| QueryError::incomplete("UPDATE without a target table"))?;
        if self.sets.is_empty() {
            return Err(QueryError::incomplete("UPDATE without SET pairs"));
        }
        let ctx = self.ctx(dialect);

        out.push_str("UPDATE ");
        table.write_sql(out, dialect, true);
        out.push_str(" SET ");
        for (i, (field, value)) in self.sets.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_ident(out, field.name(), dialect);
            out.push('=');
            ctx.write_term(out, value)?;
        }
        if !self.from.is_empty() {
            out.push_str(" FROM ");
            self.write_tables(out, dialect);
        }
        write_criterion(out, &ctx, " WHERE ", self.wheres.as_ref())
    }

    fn write_delete(&self, out: &mut String, dialect: &Dialect) -> QueryResult<()> {
        let table = match self.from.as_slice() {
            [] => return Err(QueryError::incomplete("DELETE without a FROM table")),
            [table] => table,
            _ => {
                return Err(QueryError::invalid_clause(
                    "DELETE accepts exactly one FROM table",
                ));
            }
        };
        let ctx = self.ctx(dialect);

        out.push_str("DELETE FROM ");
        table.write_sql(out, dialect, true);
        write_criterion(out, &ctx, " WHERE ", self.wheres.as_ref())
    }

    fn write_tables(&self, out: &mut String, dialect: &Dialect) {
        for (i, table) in self.from.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            table.write_sql(out, dialect, true);
        }
    }
}

fn write_criterion(
    out: &mut String,
    ctx: &RenderCtx<'_>,
    keyword: &str,
    criterion: Option<&Criterion>,
) -> QueryResult<()> {
    if let Some(criterion) = criterion {
        out.push_str(keyword);
        ctx.write_term(out, criterion.as_term())?;
    }
    Ok(())
}
