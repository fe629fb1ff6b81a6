//! Dimension identifiers read from each matching document.
//!
//! Every indexed frame document carries three numeric ids:
//! - document: the source document the text belongs to
//! - frame: a grouping level inside the document
//! - sentence: a grouping level inside the frame

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three numeric axes tracked by the stat collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Document,
    Frame,
    Sentence,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Document, Dimension::Frame, Dimension::Sentence];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Document => "document",
            Dimension::Frame => "frame",
            Dimension::Sentence => "sentence",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `(doc, frame, sentence)` ids of a single hit.
///
/// Ordering is lexicographic on `(doc, frame, sentence)`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DimensionTriple {
    pub doc: u64,
    pub frame: u64,
    pub sentence: u64,
}

impl DimensionTriple {
    pub fn new(doc: u64, frame: u64, sentence: u64) -> Self {
        Self {
            doc,
            frame,
            sentence,
        }
    }

    /// Value of the given dimension.
    pub fn get(&self, dimension: Dimension) -> u64 {
        match dimension {
            Dimension::Document => self.doc,
            Dimension::Frame => self.frame,
            Dimension::Sentence => self.sentence,
        }
    }

    /// The `(doc, frame)` pair of this triple.
    pub fn doc_frame(&self) -> (u64, u64) {
        (self.doc, self.frame)
    }
}

impl From<(u64, u64, u64)> for DimensionTriple {
    fn from((doc, frame, sentence): (u64, u64, u64)) -> Self {
        Self::new(doc, frame, sentence)
    }
}

/// Names of the fast fields holding each dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionFields {
    #[serde(default = "default_document_field")]
    pub document: String,
    #[serde(default = "default_frame_field")]
    pub frame: String,
    #[serde(default = "default_sentence_field")]
    pub sentence: String,
}

pub(crate) fn default_document_field() -> String {
    "document_id".to_string()
}

pub(crate) fn default_frame_field() -> String {
    "frame_id".to_string()
}

pub(crate) fn default_sentence_field() -> String {
    "sentence_id".to_string()
}

impl Default for DimensionFields {
    fn default() -> Self {
        Self {
            document: default_document_field(),
            frame: default_frame_field(),
            sentence: default_sentence_field(),
        }
    }
}

impl DimensionFields {
    pub fn new(
        document: impl Into<String>,
        frame: impl Into<String>,
        sentence: impl Into<String>,
    ) -> Self {
        Self {
            document: document.into(),
            frame: frame.into(),
            sentence: sentence.into(),
        }
    }

    /// Field names with a trailing double underscore, as used by older indexes.
    pub fn suffixed() -> Self {
        Self::new("document_id__", "frame_id__", "sentence_id__")
    }

    /// Field name configured for a dimension.
    pub fn name(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Document => &self.document,
            Dimension::Frame => &self.frame,
            Dimension::Sentence => &self.sentence,
        }
    }

    /// Resolve a field name back to the dimension it holds, if any.
    pub fn dimension_for(&self, field_name: &str) -> Option<Dimension> {
        Dimension::ALL
            .into_iter()
            .find(|dimension| self.name(*dimension) == field_name)
    }

    /// Iterate `(dimension, field name)` in document, frame, sentence order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &str)> {
        Dimension::ALL
            .into_iter()
            .map(move |dimension| (dimension, self.name(dimension)))
    }
}
