//! Tables and column references.

use crate::dialect::Dialect;
use crate::error::{QueryError, QueryResult};
use crate::expr::Term;
use crate::ident::{Ident, write_ident};

/// A source table: name plus optional schema and alias.
///
/// # Example
/// ```ignore
/// use sqlweave::{PostgreSqlQuery, Table, TermOps};
///
/// let abc = Table::new("abc");
/// let sql = PostgreSqlQuery::from_(&abc)
///     .select(["*"])
///     .where_(abc.field("id").eq(26))
///     .to_sql()?;
/// assert_eq!(sql, r#"SELECT * FROM "abc" WHERE "id"=26"#);
/// # Ok::<(), sqlweave::QueryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    schema: Option<String>,
    alias: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            alias: None,
        }
    }

    /// Parse `table` or `schema.table` (quoted parts allowed).
    pub fn parse(s: &str) -> QueryResult<Self> {
        let mut ident = Ident::parse(s)?;
        match ident.parts.len() {
            1 => Ok(Self::new(ident.parts.remove(0))),
            2 => {
                let name = ident.parts.remove(1);
                let schema = ident.parts.remove(0);
                Ok(Self::new(name).with_schema(schema))
            }
            n => Err(QueryError::validation(format!(
                "Table name must have at most 2 parts, got {n}: {s}"
            ))),
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the table alias used in FROM/JOIN and for qualifying fields.
    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// A column of this table.
    pub fn field(&self, name: impl Into<String>) -> Field {
        Field {
            name: name.into(),
            table: Some(self.qualifier().to_string()),
        }
    }

    /// `*` for this table (`"abc".*` when fields are qualified).
    pub fn star(&self) -> Term {
        Term::Star {
            table: Some(self.qualifier().to_string()),
        }
    }

    /// The name fields of this table are qualified with.
    pub(crate) fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub(crate) fn write_sql(&self, out: &mut String, dialect: &Dialect, with_alias: bool) {
        if let Some(schema) = &self.schema {
            write_ident(out, schema, dialect);
            out.push('.');
        }
        write_ident(out, &self.name, dialect);
        if with_alias {
            if let Some(alias) = &self.alias {
                out.push_str(if dialect.alias_keyword { " AS " } else { " " });
                write_ident(out, alias, dialect);
            }
        }
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Table::new(name)
    }
}

impl From<String> for Table {
    fn from(name: String) -> Self {
        Table::new(name)
    }
}

impl From<&Table> for Table {
    fn from(table: &Table) -> Self {
        table.clone()
    }
}

/// A column reference, optionally qualified by a table name or alias.
///
/// The qualifier is copied from the [`Table`] when the field is created;
/// the field does not keep the table alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) table: Option<String>,
}

impl Field {
    /// An unqualified column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub(crate) fn write_sql(&self, out: &mut String, dialect: &Dialect, qualify: bool) {
        if qualify {
            if let Some(table) = &self.table {
                write_ident(out, table, dialect);
                out.push('.');
            }
        }
        write_ident(out, &self.name, dialect);
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::new(name)
    }
}

impl From<&Field> for Field {
    fn from(field: &Field) -> Self {
        field.clone()
    }
}
