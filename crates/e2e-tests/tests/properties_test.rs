//! Invariant checks over synthetic corpora.
//!
//! Filtering, ordering and deduplication properties that must hold for any
//! hit stream, checked both through the full index and through the
//! aggregation engine directly.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tantivy::schema::{Schema, FAST, INDEXED, STORED, TEXT};
use tantivy::{doc, Index, IndexWriter};

use e2e_tests::{index_frames, quote_index, synthetic_frames, TableExtractor, TestHarness};
use framestat_search::{AggregationEngine, SearchError, SearchIndex, StatOptions, StatsCollector};
use framestat_types::{DimensionFields, FilterPredicate, FilterSet, StatResult};

const QUERIES: [&str; 4] = ["sea", "duck", "storm OR harbour", "man AND boat"];

fn synthetic_index(count: usize, seed: u64) -> SearchIndex {
    let index = SearchIndex::create_in_ram(DimensionFields::default()).unwrap();
    index_frames(&index, &[&synthetic_frames(count, seed)]);
    index
}

fn strictly_ascending<T: Ord>(values: impl IntoIterator<Item = T>) -> bool {
    let values: Vec<T> = values.into_iter().collect();
    values.windows(2).all(|w| w[0] < w[1])
}

fn assert_sorted_unique(result: &StatResult) {
    assert!(strictly_ascending(result.unique_docs_frames()));
    assert!(strictly_ascending(result.unique_docs().iter()));
    assert!(strictly_ascending(result.unique_frames().iter()));
    assert!(strictly_ascending(result.unique_sentences().iter()));

    let (docs, frames, sentences) = result.unique_docs_frames_sentences_unzipped();
    assert_eq!(docs.len(), frames.len());
    assert_eq!(frames.len(), sentences.len());
    let triples = docs
        .iter()
        .zip(frames)
        .zip(sentences)
        .map(|((d, f), s)| (*d, *f, *s));
    assert!(strictly_ascending(triples));
}

/// Views are sorted and duplicate free for every query.
#[test]
fn test_views_sorted_and_unique() {
    let index = synthetic_index(800, 11);
    let searcher = index.stat_searcher().unwrap();

    for query in QUERIES {
        let result = searcher.collect_stats_str(query, &StatOptions::new()).unwrap();
        assert_sorted_unique(&result);
    }
}

/// Filtering by every frame that occurs is the same as not filtering.
#[test]
fn test_filter_with_all_frames_equals_no_filter() {
    let index = synthetic_index(800, 12);
    let searcher = index.stat_searcher().unwrap();

    for query in QUERIES {
        let unfiltered = searcher.collect_stats_str(query, &StatOptions::new()).unwrap();
        let all_frames: FilterSet = unfiltered.unique_frames().iter().copied().collect();
        if all_frames.is_empty() {
            continue;
        }

        let filtered = searcher
            .collect_stats_str(query, &StatOptions::new().with_filter(all_frames))
            .unwrap();
        assert_eq!(filtered, unfiltered, "query {:?}", query);
    }
}

/// A smaller allow-set never yields anything a larger one does not.
#[test]
fn test_filter_monotonic() {
    let index = synthetic_index(800, 13);
    let searcher = index.stat_searcher().unwrap();

    let small = FilterSet::from((1..=10).collect::<Vec<u64>>());
    let large = FilterSet::from((1..=35).collect::<Vec<u64>>());
    assert!(small.is_subset(&large));

    for query in QUERIES {
        let a = searcher
            .collect_stats_str(query, &StatOptions::new().with_filter(small.clone()))
            .unwrap();
        let b = searcher
            .collect_stats_str(query, &StatOptions::new().with_filter(large.clone()))
            .unwrap();

        let pairs_b: BTreeSet<_> = b.unique_docs_frames().collect();
        assert!(a.unique_docs_frames().all(|p| pairs_b.contains(&p)));
        for (va, vb) in [
            (a.unique_docs(), b.unique_docs()),
            (a.unique_frames(), b.unique_frames()),
            (a.unique_sentences(), b.unique_sentences()),
        ] {
            assert!(va.iter().all(|v| vb.binary_search(v).is_ok()));
        }
        assert!(a.unique_frames().iter().all(|f| small.contains(*f)));
        assert_eq!(a.num_scanned(), b.num_scanned());
        assert!(a.num_admitted() <= b.num_admitted());
    }
}

/// Sentence ids are deduplicated on their own, across documents and frames.
#[test]
fn test_sentences_deduplicated_independently() {
    let frames = synthetic_frames(400, 14);
    let extractor = TableExtractor::from_frames(&frames);
    let result = AggregationEngine::new().run(
        0..frames.len(),
        &extractor,
        &FilterPredicate::admit_all(),
    );

    let expected: Vec<u64> = frames
        .iter()
        .map(|f| f.sentence_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    assert_eq!(result.unique_sentences(), expected.as_slice());

    // Sentences repeat across pairs, so the triple view is longer.
    let (_, _, sentences) = result.unique_docs_frames_sentences_unzipped();
    assert!(sentences.len() > result.unique_sentences().len());
}

/// Hit order has no effect on the unique views.
#[test]
fn test_hit_order_does_not_matter() {
    let frames = synthetic_frames(500, 15);
    let extractor = TableExtractor::from_frames(&frames);
    let predicate = FilterPredicate::only((1..=40).collect::<Vec<u64>>());
    let engine = AggregationEngine::new();

    let in_order = engine.run(0..frames.len(), &extractor, &predicate);

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..5 {
        let mut order: Vec<usize> = (0..frames.len()).collect();
        order.shuffle(&mut rng);
        let shuffled = engine.run(order, &extractor, &predicate);
        assert_eq!(shuffled, in_order);
    }
    assert_sorted_unique(&in_order);
}

/// Recorded hits keep scan order and cover exactly the admitted hits.
#[test]
fn test_recorded_hits_in_scan_order() {
    let frames = synthetic_frames(200, 16);
    let extractor = TableExtractor::from_frames(&frames);
    let predicate = FilterPredicate::only([2, 4, 6, 8, 10]);

    let mut order: Vec<usize> = (0..frames.len()).collect();
    order.shuffle(&mut StdRng::seed_from_u64(3));

    let result = AggregationEngine::new()
        .with_hits(true)
        .run(order.iter().copied(), &extractor, &predicate);

    let expected: Vec<_> = order
        .iter()
        .map(|&i| frames[i].triple())
        .filter(|t| predicate.admits(t.frame))
        .collect();
    assert_eq!(result.hits().unwrap(), expected.as_slice());
    assert_eq!(result.num_admitted(), expected.len() as u64);
    assert_eq!(result.num_scanned(), frames.len() as u64);
}

/// Validation happens even when the query would match nothing.
#[test]
fn test_validation_precedes_scan() {
    let index = quote_index(DimensionFields::default());
    let searcher = index.stat_searcher().unwrap();

    let options = StatOptions::new().with_fields(DimensionFields::new(
        "document_id",
        "frame_id",
        "paragraph_id",
    ));
    let err = searcher.collect_stats_str("whale", &options).unwrap_err();
    assert!(matches!(err, SearchError::FieldNotFound(ref f) if f == "paragraph_id"));
}

#[test]
fn test_non_fast_field_rejected() {
    let mut builder = Schema::builder();
    builder.add_text_field("body", TEXT);
    builder.add_u64_field("document_id", FAST);
    builder.add_u64_field("frame_id", FAST);
    builder.add_u64_field("sentence_id", STORED);
    let schema = builder.build();

    let err = StatsCollector::new(&schema, &StatOptions::new()).unwrap_err();
    assert!(matches!(err, SearchError::FieldNotFast { ref field, .. } if field == "sentence_id"));

    // A fast field of the wrong type is rejected the same way.
    let mut builder = Schema::builder();
    builder.add_u64_field("document_id", FAST);
    builder.add_u64_field("frame_id", FAST);
    builder.add_u64_field("sentence_id", FAST);
    builder.add_text_field("title", TEXT | FAST);
    let schema = builder.build();

    let options = StatOptions::new().with_filter_field("title").with_filter([1]);
    let err = StatsCollector::new(&schema, &options).unwrap_err();
    assert_eq!(err.field_name(), Some("title"));
}

/// An index whose sentence ids were written without fast storage fails on a
/// query that matches nothing, before any hit is read.
#[test]
fn test_non_fast_dimension_fails_on_empty_query() {
    let harness = TestHarness::new();
    std::fs::create_dir_all(&harness.index_path).unwrap();

    let mut builder = Schema::builder();
    let title = builder.add_text_field("title", TEXT | STORED);
    let body = builder.add_text_field("body", TEXT | STORED);
    let document = builder.add_u64_field("document_id", STORED | INDEXED | FAST);
    let frame = builder.add_u64_field("frame_id", STORED | INDEXED | FAST);
    let sentence = builder.add_u64_field("sentence_id", STORED | INDEXED);
    let raw = Index::create_in_dir(&harness.index_path, builder.build()).unwrap();

    let mut writer: IndexWriter = raw.writer_with_num_threads(1, 15_000_000).unwrap();
    writer
        .add_document(doc!(
            title => "A quote",
            body => "The sea",
            document => 1u64,
            frame => 1u64,
            sentence => 1u64
        ))
        .unwrap();
    writer.commit().unwrap();
    drop(writer);

    let index = harness.open_index(DimensionFields::default());
    let searcher = index.stat_searcher().unwrap();

    let err = searcher
        .collect_stats_str("whale", &StatOptions::new())
        .unwrap_err();
    assert!(matches!(err, SearchError::FieldNotFast { ref field, .. } if field == "sentence_id"));
    assert_eq!(err.field_name(), Some("sentence_id"));
}
