use super::Term;
use crate::error::QueryResult;
use crate::literal::LiteralMode;
use crate::value::Value;

/// PostgreSQL JSON/JSONB operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonOperator {
    /// `->`
    GetJsonValue,
    /// `->>`
    GetTextValue,
    /// `#>`
    GetPathJsonValue,
    /// `#>>`
    GetPathTextValue,
    /// `@>`
    Contains,
    /// `<@`
    ContainedBy,
    /// `?`
    HasKey,
    /// `?&`
    HasKeys,
    /// `?|`
    HasAnyKeys,
}

impl JsonOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            JsonOperator::GetJsonValue => "->",
            JsonOperator::GetTextValue => "->>",
            JsonOperator::GetPathJsonValue => "#>",
            JsonOperator::GetPathTextValue => "#>>",
            JsonOperator::Contains => "@>",
            JsonOperator::ContainedBy => "<@",
            JsonOperator::HasKey => "?",
            JsonOperator::HasKeys => "?&",
            JsonOperator::HasAnyKeys => "?|",
        }
    }

    /// How the right-hand operand is written.
    pub(crate) fn operand_mode(self) -> LiteralMode {
        match self {
            JsonOperator::GetJsonValue | JsonOperator::GetTextValue | JsonOperator::HasKey => {
                LiteralMode::Sql
            }
            JsonOperator::GetPathJsonValue | JsonOperator::GetPathTextValue => LiteralMode::Path,
            JsonOperator::Contains | JsonOperator::ContainedBy => LiteralMode::Json,
            JsonOperator::HasKeys | JsonOperator::HasAnyKeys => LiteralMode::Array,
        }
    }
}

/// A JSON document literal.
///
/// Mappings, sequences and scalars are serialized with JSON rules and
/// written as one single-quoted SQL string. A bare string becomes a JSON
/// string (`'"foo"'`); use [`parse_json`] for text that is already a document.
///
/// ```ignore
/// use sqlweave::{json, Value};
///
/// let doc = json(Value::mapping([("a", "foo")]));
/// ```
pub fn json(value: impl Into<Value>) -> Term {
    Term::Json(value.into())
}

/// A JSON document literal from already-serialized text.
///
/// The text is parsed first, so malformed input fails here with
/// [`QueryError::Serialization`](crate::QueryError::Serialization).
pub fn parse_json(text: &str) -> QueryResult<Term> {
    let doc: serde_json::Value = serde_json::from_str(text)?;
    Ok(Term::Json(doc.into()))
}
