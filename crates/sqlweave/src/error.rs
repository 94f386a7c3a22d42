//! Error types for sqlweave

use thiserror::Error;

/// Result type alias for sqlweave operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Error types for query construction and rendering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A value has no literal rendering in the active dialect
    #[error("Unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// INSERT rows of differing length
    #[error("Arity mismatch: expected {expected} values per row, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// Clauses that cannot appear together in one statement
    #[error("Invalid clause combination: {0}")]
    InvalidClauseCombination(String),

    /// The dialect does not support an operator or clause
    #[error("{feature} is not supported by the {dialect} dialect")]
    UnsupportedFeature { feature: String, dialect: String },

    /// Nothing renderable was accumulated
    #[error("Incomplete query: {0}")]
    IncompleteQuery(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Dialect configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl QueryError {
    /// Create an unsupported value type error
    pub fn unsupported_value(message: impl Into<String>) -> Self {
        Self::UnsupportedValueType(message.into())
    }

    /// Create an invalid clause combination error
    pub fn invalid_clause(message: impl Into<String>) -> Self {
        Self::InvalidClauseCombination(message.into())
    }

    /// Create an unsupported feature error for a dialect
    pub fn unsupported_feature(feature: impl Into<String>, dialect: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
            dialect: dialect.into(),
        }
    }

    /// Create an incomplete query error
    pub fn incomplete(message: impl Into<String>) -> Self {
        Self::IncompleteQuery(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an unsupported value type error
    pub fn is_unsupported_value(&self) -> bool {
        matches!(self, Self::UnsupportedValueType(_))
    }

    /// Check if this is an arity mismatch error
    pub fn is_arity_mismatch(&self) -> bool {
        matches!(self, Self::ArityMismatch { .. })
    }

    /// Check if this is an invalid clause combination error
    pub fn is_invalid_clause(&self) -> bool {
        matches!(self, Self::InvalidClauseCombination(_))
    }

    /// Check if this is an unsupported feature error
    pub fn is_unsupported_feature(&self) -> bool {
        matches!(self, Self::UnsupportedFeature { .. })
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for QueryError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
