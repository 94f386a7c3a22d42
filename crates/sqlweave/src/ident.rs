//! Identifier quoting.
//!
//! [`quote_ident`] wraps a table/column/alias name in the dialect's quote
//! character, doubling any embedded quote character. [`Ident`] parses dotted
//! names (`schema.table`) into parts so each part is quoted separately.
//!
//! - Unquoted parts are validated against: `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted parts allow any characters except NUL and use `""` for `"`
//!
//! # Example
//! ```ignore
//! use sqlweave::{Dialect, Ident};
//!
//! let pg = Dialect::postgres();
//! assert_eq!(sqlweave::quote_ident("weird\"name", &pg), r#""weird""name""#);
//!
//! let t = Ident::parse(r#"public."UserTable""#)?;
//! assert_eq!(t.render(&pg), r#""public"."UserTable""#);
//! # Ok::<(), sqlweave::QueryError>(())
//! ```

use crate::dialect::Dialect;
use crate::error::{QueryError, QueryResult};

/// Quote `name` with the dialect's quote character.
pub fn quote_ident(name: &str, dialect: &Dialect) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_ident(&mut out, name, dialect);
    out
}

pub(crate) fn write_ident(out: &mut String, name: &str, dialect: &Dialect) {
    let Some(q) = dialect.quote_char else {
        out.push_str(name);
        return;
    };
    out.push(q);
    for ch in name.chars() {
        if ch == q {
            out.push(q);
        }
        out.push(ch);
    }
    out.push(q);
}

/// A possibly dotted SQL identifier (`schema.table.column`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<String>,
}

impl Ident {
    /// Split a dotted name into parts. A part is either a bare name matching
    /// `[A-Za-z_][A-Za-z0-9_$]*` or a double-quoted name with `""` for `"`.
    ///
    /// `public."UserTable".id` yields `["public", "UserTable", "id"]`.
    pub fn parse(s: &str) -> QueryResult<Self> {
        if s.is_empty() {
            return Err(QueryError::validation("empty identifier"));
        }
        if s.contains('\0') {
            return Err(QueryError::validation(format!(
                "identifier {s:?} contains a NUL character"
            )));
        }

        let mut parts = Vec::new();
        let mut rest = s;
        loop {
            let (part, tail) = match rest.strip_prefix('"') {
                Some(quoted) => split_quoted(s, quoted)?,
                None => split_bare(s, rest)?,
            };
            parts.push(part);
            match tail.strip_prefix('.') {
                Some("") => {
                    return Err(QueryError::validation(format!(
                        "identifier {s:?} ends with '.'"
                    )));
                }
                Some(next) => rest = next,
                None if tail.is_empty() => break,
                None => {
                    return Err(QueryError::validation(format!(
                        "identifier {s:?} has text after a quoted part: {tail:?}"
                    )));
                }
            }
        }

        Ok(Self { parts })
    }

    /// Render every part quoted, joined with `.`.
    pub fn render(&self, dialect: &Dialect) -> String {
        let mut out = String::new();
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            write_ident(&mut out, part, dialect);
        }
        out
    }
}

/// Body of a quoted part, after the opening quote. Returns the unescaped
/// name and the input following the closing quote.
fn split_quoted<'a>(full: &str, body: &'a str) -> QueryResult<(String, &'a str)> {
    let mut name = String::new();
    let mut chars = body.char_indices();
    while let Some((i, ch)) = chars.next() {
        if ch != '"' {
            name.push(ch);
            continue;
        }
        if body[i + 1..].starts_with('"') {
            chars.next();
            name.push('"');
            continue;
        }
        if name.is_empty() {
            return Err(QueryError::validation(format!(
                "identifier {full:?} has an empty quoted part"
            )));
        }
        return Ok((name, &body[i + 1..]));
    }
    Err(QueryError::validation(format!(
        "identifier {full:?} has an unterminated quote"
    )))
}

/// A bare part running up to the next `.` or the end of input.
fn split_bare<'a>(full: &str, rest: &'a str) -> QueryResult<(String, &'a str)> {
    let end = rest.find('.').unwrap_or(rest.len());
    let name = &rest[..end];
    let mut chars = name.chars();
    match chars.next() {
        None => {
            return Err(QueryError::validation(format!(
                "identifier {full:?} has an empty part"
            )));
        }
        Some(first) if !(first == '_' || first.is_ascii_alphabetic()) => {
            return Err(QueryError::validation(format!(
                "identifier part {name:?} must start with a letter or '_'"
            )));
        }
        Some(_) => {}
    }
    if let Some(bad) = chars.find(|c| !(*c == '_' || *c == '$' || c.is_ascii_alphanumeric())) {
        return Err(QueryError::validation(format!(
            "identifier part {name:?} contains {bad:?}; quote it to allow that"
        )));
    }
    Ok((name.to_owned(), &rest[end..]))
}
