//! End-to-end test infrastructure for framestat.
//!
//! Provides a shared TestHarness plus corpus builders used by the tests
//! covering the index-to-statistics pipeline.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use framestat_search::{FrameIndexer, SearchIndex, SearchIndexConfig, TripleExtractor};
use framestat_types::{DimensionFields, DimensionTriple, FrameDocument};

/// Nine short quotes with hand-picked ids.
///
/// "sea" matches rows 0, 1, 2, 5 and 6.
pub const QUOTES: [(&str, u64, u64, u64); 9] = [
    ("The sea", 1, 1, 1),
    ("The old man and the sea.", 1, 1, 2),
    ("The old duck and the sea.", 1, 2, 3),
    ("The old duck and the lake.", 2, 3, 4),
    ("The old man and the lake.", 2, 3, 5),
    ("The young man and the sea.", 2, 4, 6),
    ("The young duck and the sea.", 3, 5, 7),
    ("The young duck and the lake.", 4, 6, 8),
    ("The young man and the lake.", 5, 7, 8),
];

const WORDS: [&str; 8] = [
    "sea", "lake", "river", "duck", "man", "boat", "storm", "harbour",
];

/// Shared test harness for E2E tests.
///
/// Owns a temp directory holding an on-disk index path.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Path for the index files
    pub index_path: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let index_path = temp_dir.path().join("frame-index");

        Self {
            _temp_dir: temp_dir,
            index_path,
        }
    }

    /// Open (or create) the on-disk index with the given field names.
    pub fn open_index(&self, dimensions: DimensionFields) -> SearchIndex {
        let config = SearchIndexConfig::new(&self.index_path).with_dimensions(dimensions);
        SearchIndex::open_or_create(config).expect("Failed to open index")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// The `QUOTES` table as frame documents.
pub fn quote_frames() -> Vec<FrameDocument> {
    QUOTES
        .iter()
        .map(|(text, d, f, s)| FrameDocument::new(*text, *d, *f, *s).with_title("A quote"))
        .collect()
}

/// Random frames over a small vocabulary, reproducible from `seed`.
///
/// Ids are drawn from narrow ranges so that pairs and sentences repeat.
pub fn synthetic_frames(count: usize, seed: u64) -> Vec<FrameDocument> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let body = (0..6)
                .map(|_| *WORDS.choose(&mut rng).expect("vocabulary is not empty"))
                .collect::<Vec<_>>()
                .join(" ");
            FrameDocument::new(
                body,
                rng.random_range(1..=20),
                rng.random_range(1..=60),
                rng.random_range(1..=150),
            )
        })
        .collect()
}

/// Index and commit `frames`, one commit per batch.
pub fn index_frames(index: &SearchIndex, batches: &[&[FrameDocument]]) {
    let indexer = FrameIndexer::new(index).expect("Failed to create indexer");
    for batch in batches {
        indexer.index_frames(batch).expect("Failed to index frames");
        indexer.commit().expect("Failed to commit");
    }
}

/// In-memory index holding the `QUOTES` table.
pub fn quote_index(dimensions: DimensionFields) -> SearchIndex {
    let index = SearchIndex::create_in_ram(dimensions).expect("Failed to create index");
    index_frames(&index, &[&quote_frames()]);
    index
}

/// Extractor over an in-memory table of triples, addressed by row.
pub struct TableExtractor(pub Vec<DimensionTriple>);

impl TableExtractor {
    pub fn from_frames(frames: &[FrameDocument]) -> Self {
        Self(frames.iter().map(FrameDocument::triple).collect())
    }
}

impl TripleExtractor for TableExtractor {
    type Doc = usize;

    fn extract(&self, doc: usize) -> DimensionTriple {
        self.0[doc]
    }
}
