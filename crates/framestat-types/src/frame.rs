//! Frame documents as they are ingested and read back.

use serde::{Deserialize, Serialize};

use crate::error::FramestatError;
use crate::triple::DimensionTriple;

/// A unit of indexed text tagged with its dimension ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDocument {
    #[serde(default)]
    pub title: String,
    pub body: String,
    pub document_id: u64,
    pub frame_id: u64,
    pub sentence_id: u64,
}

impl FrameDocument {
    pub fn new(body: impl Into<String>, document_id: u64, frame_id: u64, sentence_id: u64) -> Self {
        Self {
            title: String::new(),
            body: body.into(),
            document_id,
            frame_id,
            sentence_id,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn triple(&self) -> DimensionTriple {
        DimensionTriple::new(self.document_id, self.frame_id, self.sentence_id)
    }

    /// Parse one JSON object per non-blank line.
    pub fn parse_json_lines(input: &str) -> Result<Vec<Self>, FramestatError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(number, line)| {
                serde_json::from_str(line).map_err(|e| {
                    FramestatError::InvalidInput(format!("line {}: {}", number + 1, e))
                })
            })
            .collect()
    }
}
