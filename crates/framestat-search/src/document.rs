//! Document mapping between frame documents and Tantivy documents.

use tantivy::doc;
use tantivy::schema::{Field, Value};
use tantivy::TantivyDocument;

use framestat_types::FrameDocument;

use crate::error::SearchError;
use crate::schema::FrameSchema;

/// Convert a FrameDocument to a Tantivy document.
pub fn frame_to_doc(schema: &FrameSchema, frame: &FrameDocument) -> TantivyDocument {
    doc!(
        schema.title => frame.title.clone(),
        schema.body => frame.body.clone(),
        schema.document_id => frame.document_id,
        schema.frame_id => frame.frame_id,
        schema.sentence_id => frame.sentence_id
    )
}

/// Rebuild a FrameDocument from the stored fields of a Tantivy document.
///
/// Missing text fields read as empty; missing dimension ids are an error.
pub fn doc_to_frame(schema: &FrameSchema, doc: &TantivyDocument) -> Result<FrameDocument, SearchError> {
    let text = |field: Field| {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    };
    let id = |field: Field| {
        doc.get_first(field).and_then(|v| v.as_u64()).ok_or_else(|| {
            SearchError::DocumentNotFound(format!(
                "stored document has no value for `{}`",
                schema.schema().get_field_name(field)
            ))
        })
    };

    Ok(FrameDocument {
        title: text(schema.title),
        body: text(schema.body),
        document_id: id(schema.document_id)?,
        frame_id: id(schema.frame_id)?,
        sentence_id: id(schema.sentence_id)?,
    })
}
