//! Frame indexer for adding documents to the Tantivy index.
//!
//! The indexer wraps IndexWriter with shared access via Arc<Mutex>.
//! Documents are not visible until commit() is called.

use std::sync::{Arc, Mutex};

use tantivy::{IndexWriter, Term};
use tracing::{debug, info, warn};

use framestat_types::FrameDocument;

use crate::document::frame_to_doc;
use crate::error::SearchError;
use crate::index::SearchIndex;
use crate::schema::FrameSchema;

/// Manages document indexing operations.
pub struct FrameIndexer {
    writer: Arc<Mutex<IndexWriter>>,
    schema: FrameSchema,
}

impl FrameIndexer {
    /// Create a new indexer from a SearchIndex.
    pub fn new(index: &SearchIndex) -> Result<Self, SearchError> {
        let writer = index.writer()?;
        let schema = index.schema().clone();

        Ok(Self {
            writer: Arc::new(Mutex::new(writer)),
            schema,
        })
    }

    /// Get a clone of the writer Arc for sharing.
    pub fn writer_handle(&self) -> Arc<Mutex<IndexWriter>> {
        self.writer.clone()
    }

    /// Index a single frame.
    ///
    /// Frames are append-only: several frames share a document id, so
    /// nothing is replaced.
    pub fn index_frame(&self, frame: &FrameDocument) -> Result<(), SearchError> {
        let doc = frame_to_doc(&self.schema, frame);

        let writer = self
            .writer
            .lock()
            .map_err(|e| SearchError::IndexLocked(e.to_string()))?;
        writer.add_document(doc)?;

        debug!(
            document_id = frame.document_id,
            frame_id = frame.frame_id,
            sentence_id = frame.sentence_id,
            "Indexed frame"
        );
        Ok(())
    }

    /// Index multiple frames in batch.
    pub fn index_frames(&self, frames: &[FrameDocument]) -> Result<usize, SearchError> {
        let writer = self
            .writer
            .lock()
            .map_err(|e| SearchError::IndexLocked(e.to_string()))?;

        let mut count = 0;
        for frame in frames {
            writer.add_document(frame_to_doc(&self.schema, frame))?;
            count += 1;
        }

        debug!(count, "Indexed frames batch");
        Ok(count)
    }

    /// Delete every frame belonging to a document.
    pub fn delete_document(&self, document_id: u64) -> Result<(), SearchError> {
        let writer = self
            .writer
            .lock()
            .map_err(|e| SearchError::IndexLocked(e.to_string()))?;

        let term = Term::from_field_u64(self.schema.document_id, document_id);
        writer.delete_term(term);

        debug!(document_id, "Deleted document frames");
        Ok(())
    }

    /// Commit pending changes to make them searchable.
    ///
    /// This is expensive - batch document adds and commit periodically.
    pub fn commit(&self) -> Result<u64, SearchError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| SearchError::IndexLocked(e.to_string()))?;

        let opstamp = writer.commit()?;
        info!(opstamp, "Committed index changes");
        Ok(opstamp)
    }

    /// Rollback uncommitted changes.
    pub fn rollback(&self) -> Result<u64, SearchError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| SearchError::IndexLocked(e.to_string()))?;

        let opstamp = writer.rollback()?;
        warn!(opstamp, "Rolled back index changes");
        Ok(opstamp)
    }

    /// Get the current commit opstamp.
    pub fn pending_ops(&self) -> Result<u64, SearchError> {
        let writer = self
            .writer
            .lock()
            .map_err(|e| SearchError::IndexLocked(e.to_string()))?;

        Ok(writer.commit_opstamp())
    }
}
