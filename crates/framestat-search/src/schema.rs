//! Tantivy schema definition for frame documents.
//!
//! Text lives in `title` and `body`; the three dimension ids are u64 fast
//! fields so the stat collector can read them per hit without touching the
//! doc store.

use tantivy::schema::{Field, FieldType, Schema, FAST, INDEXED, STORED, TEXT};

use framestat_types::DimensionFields;

use crate::SearchError;

/// Schema field handles for efficient access
#[derive(Debug, Clone)]
pub struct FrameSchema {
    schema: Schema,
    dimensions: DimensionFields,
    /// Short label (TEXT | STORED)
    pub title: Field,
    /// Searchable frame text (TEXT | STORED)
    pub body: Field,
    /// Document id (u64 STORED | INDEXED | FAST)
    pub document_id: Field,
    /// Frame id (u64 STORED | INDEXED | FAST)
    pub frame_id: Field,
    /// Sentence id (u64 STORED | INDEXED | FAST)
    pub sentence_id: Field,
}

impl FrameSchema {
    /// Get the underlying Tantivy schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Names of the dimension fields in this schema
    pub fn dimensions(&self) -> &DimensionFields {
        &self.dimensions
    }

    /// Create a FrameSchema from an existing Tantivy Schema
    pub fn from_schema(schema: Schema, dimensions: DimensionFields) -> Result<Self, SearchError> {
        let title = schema
            .get_field("title")
            .map_err(|_| SearchError::SchemaMismatch("missing title field".into()))?;
        let body = schema
            .get_field("body")
            .map_err(|_| SearchError::SchemaMismatch("missing body field".into()))?;

        let mut handles = [title; 3];
        for (slot, (dimension, name)) in handles.iter_mut().zip(dimensions.iter()) {
            *slot = validate_fast_field(&schema, name).map_err(|e| {
                SearchError::SchemaMismatch(format!("{} dimension: {}", dimension, e))
            })?;
        }
        let [document_id, frame_id, sentence_id] = handles;

        Ok(Self {
            schema,
            dimensions,
            title,
            body,
            document_id,
            frame_id,
            sentence_id,
        })
    }
}

/// Build the frame schema.
///
/// Schema fields:
/// - title: TEXT | STORED
/// - body: TEXT | STORED - searchable content
/// - one u64 STORED | INDEXED | FAST field per dimension
pub fn build_frame_schema(dimensions: &DimensionFields) -> FrameSchema {
    let mut schema_builder = Schema::builder();

    let title = schema_builder.add_text_field("title", TEXT | STORED);
    let body = schema_builder.add_text_field("body", TEXT | STORED);

    // INDEXED lets documents be deleted by document id
    let document_id = schema_builder.add_u64_field(&dimensions.document, STORED | INDEXED | FAST);
    let frame_id = schema_builder.add_u64_field(&dimensions.frame, STORED | INDEXED | FAST);
    let sentence_id = schema_builder.add_u64_field(&dimensions.sentence, STORED | INDEXED | FAST);

    let schema = schema_builder.build();

    FrameSchema {
        schema,
        dimensions: dimensions.clone(),
        title,
        body,
        document_id,
        frame_id,
        sentence_id,
    }
}

/// Check that `name` exists and is readable as a u64 fast field.
pub fn validate_fast_field(schema: &Schema, name: &str) -> Result<Field, SearchError> {
    let field = schema
        .get_field(name)
        .map_err(|_| SearchError::FieldNotFound(name.to_string()))?;
    let entry = schema.get_field_entry(field);

    if !entry.is_fast() {
        return Err(SearchError::FieldNotFast {
            field: name.to_string(),
            reason: "exists but is not stored as a fast field".to_string(),
        });
    }
    if !matches!(entry.field_type(), FieldType::U64(_)) {
        return Err(SearchError::FieldNotFast {
            field: name.to_string(),
            reason: format!(
                "is a {:?} fast field, expected u64",
                entry.field_type().value_type()
            ),
        });
    }
    Ok(field)
}
