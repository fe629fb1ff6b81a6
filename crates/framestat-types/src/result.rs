//! Aggregation output.
//!
//! A `StatResult` is an owned snapshot: every view is materialized once when
//! the result is built, so accessors are plain slice reads and the result can
//! outlive the searcher and index that produced it.

use std::fmt;

use crate::triple::DimensionTriple;

/// Deduplicated doc/frame/sentence statistics for one query.
///
/// All sequences are in ascending numeric order. The doc/frame pair view and
/// the doc/frame/sentence view are stored as parallel columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatResult {
    pub(crate) pair_docs: Vec<u64>,
    pub(crate) pair_frames: Vec<u64>,
    pub(crate) triple_docs: Vec<u64>,
    pub(crate) triple_frames: Vec<u64>,
    pub(crate) triple_sentences: Vec<u64>,
    pub(crate) docs: Vec<u64>,
    pub(crate) frames: Vec<u64>,
    pub(crate) sentences: Vec<u64>,
    pub(crate) hits: Option<Vec<DimensionTriple>>,
    pub(crate) scanned: u64,
    pub(crate) admitted: u64,
}

impl StatResult {
    /// Unique `(doc, frame)` pairs, ascending.
    pub fn unique_docs_frames(&self) -> impl ExactSizeIterator<Item = (u64, u64)> + '_ {
        self.pair_docs
            .iter()
            .copied()
            .zip(self.pair_frames.iter().copied())
    }

    /// The unique `(doc, frame)` pairs as two parallel columns.
    pub fn unique_docs_frames_unzipped(&self) -> (&[u64], &[u64]) {
        (&self.pair_docs, &self.pair_frames)
    }

    /// One row per distinct admitted `(doc, frame, sentence)` triple.
    ///
    /// Two hits sharing a doc/frame pair but differing in sentence both
    /// appear here.
    pub fn unique_docs_frames_sentences_unzipped(&self) -> (&[u64], &[u64], &[u64]) {
        (
            &self.triple_docs,
            &self.triple_frames,
            &self.triple_sentences,
        )
    }

    pub fn unique_docs(&self) -> &[u64] {
        &self.docs
    }

    pub fn unique_frames(&self) -> &[u64] {
        &self.frames
    }

    pub fn unique_sentences(&self) -> &[u64] {
        &self.sentences
    }

    /// Admitted hits in scan order, when hit recording was requested.
    pub fn hits(&self) -> Option<&[DimensionTriple]> {
        self.hits.as_deref()
    }

    /// Number of hits read from the hit stream, admitted or not.
    pub fn num_scanned(&self) -> u64 {
        self.scanned
    }

    /// Number of hits that passed the filter.
    pub fn num_admitted(&self) -> u64 {
        self.admitted
    }

    pub fn num_docs_frames(&self) -> usize {
        self.pair_docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admitted == 0
    }
}

impl fmt::Display for StatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StatResult({} hits, {} doc/frame pairs)",
            self.admitted,
            self.pair_docs.len()
        )
    }
}
