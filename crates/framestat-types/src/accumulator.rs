//! Ordered-set bookkeeping behind `StatResult`.
//!
//! Container growth is bounded by the number of unique values. The only
//! per-hit storage is the optional raw hit log, which is off unless asked for.

use std::collections::BTreeSet;

use crate::result::StatResult;
use crate::triple::DimensionTriple;

/// Incrementally built unique views over admitted hits.
#[derive(Debug, Default)]
pub struct StatAccumulator {
    pairs: BTreeSet<(u64, u64)>,
    triples: BTreeSet<DimensionTriple>,
    docs: BTreeSet<u64>,
    frames: BTreeSet<u64>,
    sentences: BTreeSet<u64>,
    hits: Option<Vec<DimensionTriple>>,
    scanned: u64,
    admitted: u64,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An accumulator that also keeps every admitted hit in scan order.
    pub fn recording_hits() -> Self {
        Self {
            hits: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn with_hits(record_hits: bool) -> Self {
        if record_hits {
            Self::recording_hits()
        } else {
            Self::new()
        }
    }

    /// Count a hit the filter rejected. No unique view is touched.
    pub fn reject(&mut self) {
        self.scanned += 1;
    }

    /// Add an admitted hit to every view.
    pub fn admit(&mut self, triple: DimensionTriple) {
        self.scanned += 1;
        self.admitted += 1;
        self.pairs.insert(triple.doc_frame());
        self.triples.insert(triple);
        self.docs.insert(triple.doc);
        self.frames.insert(triple.frame);
        self.sentences.insert(triple.sentence);
        if let Some(hits) = self.hits.as_mut() {
            hits.push(triple);
        }
    }

    /// Fold another accumulator into this one.
    ///
    /// Raw hits of `other` are appended after the hits already held.
    pub fn merge(&mut self, mut other: StatAccumulator) {
        self.pairs.append(&mut other.pairs);
        self.triples.append(&mut other.triples);
        self.docs.append(&mut other.docs);
        self.frames.append(&mut other.frames);
        self.sentences.append(&mut other.sentences);
        match (self.hits.as_mut(), other.hits.take()) {
            (Some(hits), Some(more)) => hits.extend(more),
            (None, Some(more)) => self.hits = Some(more),
            _ => {}
        }
        self.scanned += other.scanned;
        self.admitted += other.admitted;
    }

    pub fn num_scanned(&self) -> u64 {
        self.scanned
    }

    pub fn num_admitted(&self) -> u64 {
        self.admitted
    }

    pub fn num_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Materialize the sorted views and drop the working sets.
    pub fn finish(self) -> StatResult {
        let (pair_docs, pair_frames): (Vec<u64>, Vec<u64>) = self.pairs.into_iter().unzip();

        let mut triple_docs = Vec::with_capacity(self.triples.len());
        let mut triple_frames = Vec::with_capacity(self.triples.len());
        let mut triple_sentences = Vec::with_capacity(self.triples.len());
        for triple in self.triples {
            triple_docs.push(triple.doc);
            triple_frames.push(triple.frame);
            triple_sentences.push(triple.sentence);
        }

        StatResult {
            pair_docs,
            pair_frames,
            triple_docs,
            triple_frames,
            triple_sentences,
            docs: self.docs.into_iter().collect(),
            frames: self.frames.into_iter().collect(),
            sentences: self.sentences.into_iter().collect(),
            hits: self.hits.map(|mut hits| {
                hits.shrink_to_fit();
                hits
            }),
            scanned: self.scanned,
            admitted: self.admitted,
        }
    }
}
