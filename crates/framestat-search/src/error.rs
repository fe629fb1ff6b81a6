//! Search error types.

use thiserror::Error;

/// Errors that can occur while indexing frames or collecting statistics.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Tantivy index error
    #[error("Tantivy error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),

    /// Query parse error
    #[error("Query parse error: {0}")]
    QueryParse(#[from] tantivy::query::QueryParserError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configured field does not exist in the schema
    #[error("Field not found: `{0}` does not exist in the schema")]
    FieldNotFound(String),

    /// A configured field exists but cannot be read as a u64 fast field
    #[error("Field not fast: `{field}` {reason}")]
    FieldNotFast { field: String, reason: String },

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Schema mismatch
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Index is locked (another process has it open)
    #[error("Index is locked: {0}")]
    IndexLocked(String),
}

impl SearchError {
    /// Name of the offending field for field configuration errors.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            SearchError::FieldNotFound(field) => Some(field),
            SearchError::FieldNotFast { field, .. } => Some(field),
            _ => None,
        }
    }
}
