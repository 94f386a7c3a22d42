//! Literal formatting.
//!
//! Converts a [`Value`] into SQL literal text. The same value renders
//! differently depending on the construction path that produced it, so the
//! formatter takes an explicit [`LiteralMode`]:
//!
//! | mode | `vec![1, 2]` | `"a"` |
//! |---|---|---|
//! | `Sql` | `ARRAY[1,2]` (PostgreSQL) | `'a'` |
//! | `Array` | `ARRAY[1,2]` | `ARRAY['a']` |
//! | `Json` | `'[1,2]'` | `'"a"'` |
//! | `Path` | `'{1,2}'` | `'a'` |

use crate::dialect::{ArrayStyle, BooleanStyle, Dialect};
use crate::error::{QueryError, QueryResult};
use crate::value::Value;

/// Rendering context for a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralMode {
    /// Plain SQL literal; sequences use the dialect's array syntax.
    Sql,
    /// Array literal; scalars become one-element arrays.
    Array,
    /// JSON document serialized into a single text literal.
    Json,
    /// PostgreSQL text-array path (`'{a,b}'`) used by `#>` / `#>>`.
    Path,
}

/// Format `value` as literal text for `dialect`.
pub fn format_value(value: &Value, dialect: &Dialect, mode: LiteralMode) -> QueryResult<String> {
    let mut out = String::new();
    write_value(&mut out, value, dialect, mode)?;
    Ok(out)
}

/// Single-quote `s`, doubling embedded single quotes.
pub fn quote_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    write_text(&mut out, s);
    out
}

pub(crate) fn write_value(
    out: &mut String,
    value: &Value,
    dialect: &Dialect,
    mode: LiteralMode,
) -> QueryResult<()> {
    match mode {
        LiteralMode::Sql => write_sql(out, value, dialect),
        LiteralMode::Array => match value {
            Value::Sequence(items) => write_array(out, items, dialect, false),
            scalar => write_array(out, std::slice::from_ref(scalar), dialect, false),
        },
        LiteralMode::Json => write_json(out, value),
        LiteralMode::Path => write_path(out, value),
    }
}

fn write_text(out: &mut String, s: &str) {
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
}

fn write_sql(out: &mut String, value: &Value, dialect: &Dialect) -> QueryResult<()> {
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Bool(b) => out.push_str(match (dialect.boolean_style, b) {
            (BooleanStyle::Keyword, true) => "true",
            (BooleanStyle::Keyword, false) => "false",
            (BooleanStyle::Numeric, true) => "1",
            (BooleanStyle::Numeric, false) => "0",
        }),
        Value::Number(n) => {
            if !n.is_finite() {
                return Err(QueryError::unsupported_value(format!(
                    "non-finite number {n} has no literal form"
                )));
            }
            out.push_str(&n.to_string());
        }
        Value::Text(s) => write_text(out, s),
        Value::Sequence(items) => write_array(out, items, dialect, false)?,
        Value::Mapping(_) => {
            return Err(QueryError::unsupported_value(format!(
                "mapping has no plain SQL literal in the {} dialect; wrap it with json()",
                dialect.name
            )));
        }
    }
    Ok(())
}

/// `nested` is set for elements of an enclosing array, where the empty
/// array stays in `ARRAY[]` form instead of the `'{}'` text literal.
fn write_array(
    out: &mut String,
    items: &[Value],
    dialect: &Dialect,
    nested: bool,
) -> QueryResult<()> {
    let (open, close) = match dialect.array_style {
        ArrayStyle::Keyword if items.is_empty() && !nested => {
            out.push_str("'{}'");
            return Ok(());
        }
        ArrayStyle::Keyword => ("ARRAY[", "]"),
        ArrayStyle::Brackets => ("[", "]"),
        ArrayStyle::Unsupported => {
            return Err(QueryError::unsupported_value(format!(
                "sequence has no array literal in the {} dialect",
                dialect.name
            )));
        }
    };
    out.push_str(open);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match item {
            Value::Sequence(inner) => write_array(out, inner, dialect, true)?,
            scalar => write_sql(out, scalar, dialect)?,
        }
    }
    out.push_str(close);
    Ok(())
}

fn write_json(out: &mut String, value: &Value) -> QueryResult<()> {
    ensure_json_compatible(value)?;
    let doc = serde_json::to_string(value)?;
    write_text(out, &doc);
    Ok(())
}

/// serde_json silently writes non-finite floats as `null`; reject them instead.
fn ensure_json_compatible(value: &Value) -> QueryResult<()> {
    match value {
        Value::Number(n) if !n.is_finite() => Err(QueryError::unsupported_value(format!(
            "non-finite number {n} has no JSON form"
        ))),
        Value::Sequence(items) => items.iter().try_for_each(ensure_json_compatible),
        Value::Mapping(members) => members
            .iter()
            .try_for_each(|(_, v)| ensure_json_compatible(v)),
        _ => Ok(()),
    }
}

fn write_path(out: &mut String, value: &Value) -> QueryResult<()> {
    match value {
        Value::Text(s) => {
            write_text(out, s);
            Ok(())
        }
        Value::Sequence(items) => {
            let mut path = String::from("{");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    path.push(',');
                }
                match item {
                    Value::Text(s) => push_array_element(&mut path, s),
                    Value::Number(n) if n.is_finite() => path.push_str(&n.to_string()),
                    other => {
                        return Err(QueryError::unsupported_value(format!(
                            "{} is not a valid JSON path element",
                            other.type_name()
                        )));
                    }
                }
            }
            path.push('}');
            write_text(out, &path);
            Ok(())
        }
        other => Err(QueryError::unsupported_value(format!(
            "{} is not a valid JSON path",
            other.type_name()
        ))),
    }
}

/// Text-array element, double-quoted when it would otherwise be ambiguous.
fn push_array_element(out: &mut String, s: &str) {
    let needs_quotes = s.is_empty()
        || s.eq_ignore_ascii_case("null")
        || s
            .chars()
            .any(|c| matches!(c, '{' | '}' | ',' | '"' | '\\') || c.is_whitespace());
    if !needs_quotes {
        out.push_str(s);
        return;
    }
    out.push('"');
    for ch in s.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;

    fn pg(value: impl Into<Value>, mode: LiteralMode) -> String {
        format_value(&value.into(), &Dialect::postgres(), mode).unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(pg(true, LiteralMode::Sql), "true");
        assert_eq!(pg(26, LiteralMode::Sql), "26");
        assert_eq!(pg(1.5, LiteralMode::Sql), "1.5");
        assert_eq!(pg(None::<i32>, LiteralMode::Sql), "NULL");
    }

    #[test]
    fn text_doubles_single_quotes() {
        assert_eq!(pg("it's", LiteralMode::Sql), "'it''s'");
    }

    #[test]
    fn numeric_booleans() {
        let v = Value::Bool(false);
        assert_eq!(format_value(&v, &Dialect::sqlite(), LiteralMode::Sql).unwrap(), "0");
    }

    #[test]
    fn postgres_array_keyword() {
        assert_eq!(pg(values![1, "a", true], LiteralMode::Sql), "ARRAY[1,'a',true]");
        assert_eq!(pg(Vec::<i32>::new(), LiteralMode::Sql), "'{}'");
    }

    #[test]
    fn nested_empty_array_keeps_array_form() {
        assert_eq!(pg(values![Value::Sequence(vec![])], LiteralMode::Sql), "ARRAY[ARRAY[]]");
        assert_eq!(
            pg(values![values![1, 2], Value::Sequence(vec![])], LiteralMode::Sql),
            "ARRAY[ARRAY[1,2],ARRAY[]]"
        );
        assert_eq!(pg(values![Value::Sequence(vec![])], LiteralMode::Array), "ARRAY[ARRAY[]]");
    }

    #[test]
    fn ansi_bracket_array() {
        let v = Value::from(vec![1, 2]);
        assert_eq!(format_value(&v, &Dialect::ansi(), LiteralMode::Sql).unwrap(), "[1,2]");
    }

    #[test]
    fn array_unsupported_dialect() {
        let v = Value::from(vec![1, 2]);
        let err = format_value(&v, &Dialect::mysql(), LiteralMode::Sql).unwrap_err();
        assert!(err.is_unsupported_value());
    }

    #[test]
    fn array_mode_wraps_scalar() {
        assert_eq!(pg("dates", LiteralMode::Array), "ARRAY['dates']");
        assert_eq!(pg(vec!["dates", "imported"], LiteralMode::Array), "ARRAY['dates','imported']");
    }

    #[test]
    fn json_sequence_and_mapping() {
        assert_eq!(pg(vec![1, 2, 3], LiteralMode::Json), "'[1,2,3]'");
        assert_eq!(pg(vec!["a", "b"], LiteralMode::Json), r#"'["a","b"]'"#);
        assert_eq!(pg(Value::mapping([("a", "foo")]), LiteralMode::Json), r#"'{"a":"foo"}'"#);
    }

    #[test]
    fn json_escapes_single_quote_in_document() {
        assert_eq!(pg(Value::mapping([("k", "it's")]), LiteralMode::Json), r#"'{"k":"it''s"}'"#);
    }

    #[test]
    fn json_top_level_text_is_a_json_string() {
        assert_eq!(pg("foo", LiteralMode::Json), r#"'"foo"'"#);
        assert_eq!(pg(r#"{"a":1}"#, LiteralMode::Json), r#"'"{\"a\":1}"'"#);
        assert_eq!(pg("it's", LiteralMode::Json), r#"'"it''s"'"#);
    }

    #[test]
    fn mapping_without_json_context_is_rejected() {
        let v = Value::mapping([("a", 1)]);
        let err = format_value(&v, &Dialect::postgres(), LiteralMode::Sql).unwrap_err();
        assert!(err.is_unsupported_value());
    }

    #[test]
    fn non_finite_float_is_rejected() {
        for mode in [LiteralMode::Sql, LiteralMode::Json] {
            let v = Value::from(vec![f64::NAN]);
            assert!(format_value(&v, &Dialect::postgres(), mode).is_err());
        }
    }

    #[test]
    fn path_literals() {
        assert_eq!(pg("{a,b}", LiteralMode::Path), "'{a,b}'");
        assert_eq!(pg(values!["a", 0, "b c"], LiteralMode::Path), r#"'{a,0,"b c"}'"#);
        assert!(format_value(&Value::Bool(true), &Dialect::postgres(), LiteralMode::Path).is_err());
    }
}
