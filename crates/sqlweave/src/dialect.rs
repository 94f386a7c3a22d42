//! Dialect configuration.
//!
//! A [`Dialect`] is a plain configuration value: quoting character, literal
//! spelling rules and the set of dialect-specific operators/clauses that may
//! be rendered. New dialects are added by building a new value (or loading one
//! from TOML), not by adding a type.
//!
//! # Example
//! ```ignore
//! use sqlweave::Dialect;
//!
//! let pg = Dialect::postgres();
//! let custom = Dialect::ansi().with_quote_char(Some('`')).with_name("warehouse");
//!
//! let from_file = Dialect::from_toml_str(r#"
//!     preset = "postgresql"
//!     name = "cockroach"
//! "#)?;
//! # Ok::<(), sqlweave::QueryError>(())
//! ```

use crate::error::{QueryError, QueryResult};
use crate::qb::QueryBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How boolean values are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanStyle {
    /// `true` / `false`
    #[default]
    Keyword,
    /// `1` / `0`
    Numeric,
}

/// How sequence values are rendered outside of JSON context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayStyle {
    /// `ARRAY[1,2]`; the empty array is `'{}'`.
    Keyword,
    /// `[1,2]`
    #[default]
    Brackets,
    /// Sequences cannot be rendered.
    Unsupported,
}

/// Dialect-specific operators and clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// JSON operators (`->`, `->>`, `#>`, `#>>`, `@>`, `<@`, `?`, `?&`, `?|`).
    pub json_operators: bool,
    /// `SELECT DISTINCT ON(...)`.
    pub distinct_on: bool,
    /// `RETURNING ...` on INSERT/UPDATE/DELETE.
    pub returning: bool,
    /// `INSERT ... ON CONFLICT`.
    pub on_conflict: bool,
    /// `ILIKE` / `NOT ILIKE`.
    pub ilike: bool,
}

/// Configuration for one SQL dialect.
///
/// Read-only during rendering; cheap to clone and safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Name used in error messages and log events.
    pub name: String,
    /// Identifier quote character. `None` disables quoting.
    pub quote_char: Option<char>,
    /// Boolean literal spelling.
    pub boolean_style: BooleanStyle,
    /// Array literal syntax.
    pub array_style: ArrayStyle,
    /// Render aliases as `<term> AS <alias>` instead of `<term> <alias>`.
    pub alias_keyword: bool,
    /// Dialect-specific operators and clauses.
    pub capabilities: Capabilities,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::ansi()
    }
}

/// Named starting points for dialect configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectPreset {
    Ansi,
    #[serde(alias = "postgres")]
    Postgresql,
    Mysql,
    Sqlite,
    Mssql,
}

impl DialectPreset {
    /// Build the preset's dialect.
    pub fn dialect(self) -> Dialect {
        match self {
            DialectPreset::Ansi => Dialect::ansi(),
            DialectPreset::Postgresql => Dialect::postgres(),
            DialectPreset::Mysql => Dialect::mysql(),
            DialectPreset::Sqlite => Dialect::sqlite(),
            DialectPreset::Mssql => Dialect::mssql(),
        }
    }
}

impl Dialect {
    /// Standard SQL: `"` quoting, `true`/`false`, bracket arrays, no extensions.
    pub fn ansi() -> Self {
        Self {
            name: "ansi".to_string(),
            quote_char: Some('"'),
            boolean_style: BooleanStyle::Keyword,
            array_style: ArrayStyle::Brackets,
            alias_keyword: false,
            capabilities: Capabilities::default(),
        }
    }

    /// PostgreSQL: `ARRAY[...]`, JSON operators, `DISTINCT ON`, `RETURNING`,
    /// `ON CONFLICT` and `ILIKE`.
    pub fn postgres() -> Self {
        Self {
            name: "postgresql".to_string(),
            array_style: ArrayStyle::Keyword,
            capabilities: Capabilities {
                json_operators: true,
                distinct_on: true,
                returning: true,
                on_conflict: true,
                ilike: true,
            },
            ..Self::ansi()
        }
    }

    /// MySQL: backtick quoting, no array literals.
    pub fn mysql() -> Self {
        Self {
            name: "mysql".to_string(),
            quote_char: Some('`'),
            array_style: ArrayStyle::Unsupported,
            ..Self::ansi()
        }
    }

    /// SQLite: numeric booleans, no array literals, `RETURNING` and `ON CONFLICT`.
    pub fn sqlite() -> Self {
        Self {
            name: "sqlite".to_string(),
            boolean_style: BooleanStyle::Numeric,
            array_style: ArrayStyle::Unsupported,
            capabilities: Capabilities {
                returning: true,
                on_conflict: true,
                ..Capabilities::default()
            },
            ..Self::ansi()
        }
    }

    /// Microsoft SQL Server: numeric booleans, no array literals.
    pub fn mssql() -> Self {
        Self {
            name: "mssql".to_string(),
            boolean_style: BooleanStyle::Numeric,
            array_style: ArrayStyle::Unsupported,
            ..Self::ansi()
        }
    }

    /// Override the dialect name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the identifier quote character (`None` disables quoting).
    pub fn with_quote_char(mut self, quote_char: Option<char>) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Override the boolean literal spelling.
    pub fn with_boolean_style(mut self, style: BooleanStyle) -> Self {
        self.boolean_style = style;
        self
    }

    /// Override the array literal syntax.
    pub fn with_array_style(mut self, style: ArrayStyle) -> Self {
        self.array_style = style;
        self
    }

    /// Render aliases with the `AS` keyword.
    pub fn with_alias_keyword(mut self, enabled: bool) -> Self {
        self.alias_keyword = enabled;
        self
    }

    /// Replace the capability set.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Start a query builder governed by this dialect.
    pub fn query(&self) -> QueryBuilder {
        QueryBuilder::new(self.clone())
    }

    /// Quote an identifier with this dialect's rules.
    pub fn quote_ident(&self, name: &str) -> String {
        crate::ident::quote_ident(name, self)
    }

    /// Fail with [`QueryError::UnsupportedFeature`] unless `enabled`.
    pub(crate) fn require(&self, enabled: bool, feature: &str) -> QueryResult<()> {
        if enabled {
            Ok(())
        } else {
            Err(QueryError::unsupported_feature(feature, &self.name))
        }
    }

    /// Check that the configuration can produce valid SQL.
    pub fn validate(&self) -> QueryResult<()> {
        if self.name.trim().is_empty() {
            return Err(QueryError::validation("Dialect name cannot be empty"));
        }
        if let Some(q) = self.quote_char {
            if q == '\'' || q == '\0' || q.is_whitespace() || q.is_alphanumeric() {
                return Err(QueryError::validation(format!(
                    "Invalid identifier quote character: {q:?}"
                )));
            }
        }
        Ok(())
    }

    /// Parse a dialect from TOML.
    ///
    /// Missing keys fall back to the `preset` (default: ANSI). An empty
    /// `quote_char` disables identifier quoting.
    pub fn from_toml_str(raw: &str) -> QueryResult<Self> {
        let file: DialectFile = toml::from_str(raw)?;
        let dialect = file.into_dialect()?;
        dialect.validate()?;
        Ok(dialect)
    }

    /// Read and parse a dialect TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QueryError::config(format!("failed to read dialect file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw).map_err(|e| match e {
            QueryError::Config(msg) => QueryError::config(format!(
                "failed to parse dialect file {}: {msg}",
                path.display()
            )),
            other => other,
        })
    }
}

/// On-disk dialect description: a preset plus optional overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DialectFile {
    preset: Option<DialectPreset>,
    name: Option<String>,
    quote_char: Option<String>,
    boolean_style: Option<BooleanStyle>,
    array_style: Option<ArrayStyle>,
    alias_keyword: Option<bool>,
    capabilities: Option<CapabilitiesFile>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CapabilitiesFile {
    json_operators: Option<bool>,
    distinct_on: Option<bool>,
    returning: Option<bool>,
    on_conflict: Option<bool>,
    ilike: Option<bool>,
}

impl DialectFile {
    fn into_dialect(self) -> QueryResult<Dialect> {
        let mut dialect = self.preset.unwrap_or(DialectPreset::Ansi).dialect();

        if let Some(name) = self.name {
            dialect.name = name;
        }
        if let Some(raw) = self.quote_char {
            let mut chars = raw.chars();
            dialect.quote_char = match (chars.next(), chars.next()) {
                (None, _) => None,
                (Some(c), None) => Some(c),
                _ => {
                    return Err(QueryError::config(format!(
                        "quote_char must be a single character, got {raw:?}"
                    )));
                }
            };
        }
        if let Some(style) = self.boolean_style {
            dialect.boolean_style = style;
        }
        if let Some(style) = self.array_style {
            dialect.array_style = style;
        }
        if let Some(enabled) = self.alias_keyword {
            dialect.alias_keyword = enabled;
        }
        if let Some(caps) = self.capabilities {
            let c = &mut dialect.capabilities;
            c.json_operators = caps.json_operators.unwrap_or(c.json_operators);
            c.distinct_on = caps.distinct_on.unwrap_or(c.distinct_on);
            c.returning = caps.returning.unwrap_or(c.returning);
            c.on_conflict = caps.on_conflict.unwrap_or(c.on_conflict);
            c.ilike = caps.ilike.unwrap_or(c.ilike);
        }

        Ok(dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgres_preset_capabilities() {
        let pg = Dialect::postgres();
        assert_eq!(pg.quote_char, Some('"'));
        assert_eq!(pg.array_style, ArrayStyle::Keyword);
        assert!(pg.capabilities.json_operators);
        assert!(pg.capabilities.distinct_on);
        assert!(!Dialect::ansi().capabilities.distinct_on);
    }

    #[test]
    fn toml_preset_with_overrides() {
        let d = Dialect::from_toml_str(
            r#"
            preset = "postgres"
            name = "cockroach"
            alias_keyword = true

            [capabilities]
            distinct_on = false
            "#,
        )
        .unwrap();
        assert_eq!(d.name, "cockroach");
        assert!(d.alias_keyword);
        assert!(d.capabilities.json_operators);
        assert!(!d.capabilities.distinct_on);
        assert_eq!(d.array_style, ArrayStyle::Keyword);
    }

    #[test]
    fn toml_empty_quote_char_disables_quoting() {
        let d = Dialect::from_toml_str(r#"quote_char = """#).unwrap();
        assert_eq!(d.quote_char, None);
        assert_eq!(d.name, "ansi");
    }

    #[test]
    fn toml_rejects_multi_char_quote() {
        let err = Dialect::from_toml_str(r#"quote_char = "[]""#).unwrap_err();
        assert!(matches!(err, QueryError::Config(_)));
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        assert!(Dialect::from_toml_str("quoting = true").is_err());
    }

    #[test]
    fn validate_rejects_single_quote() {
        let d = Dialect::ansi().with_quote_char(Some('\''));
        assert!(d.validate().is_err());
    }

    #[test]
    fn from_toml_file_reports_missing_file() {
        let err = Dialect::from_toml_file("/nonexistent/sqlweave-dialect.toml").unwrap_err();
        assert!(err.to_string().contains("failed to read dialect file"));
    }
}
