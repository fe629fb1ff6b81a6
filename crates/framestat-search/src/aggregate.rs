//! Aggregation of hits into deduplicated doc/frame/sentence views.
//!
//! Each hit is extracted, tested against the filter predicate, and only then
//! folded into the accumulator. A rejected hit never touches a unique view.

use tracing::debug;

use framestat_types::{FilterPredicate, StatAccumulator, StatResult};

use crate::extractor::TripleExtractor;

/// Extract, filter and fold a single hit.
pub fn observe<E: TripleExtractor>(
    acc: &mut StatAccumulator,
    extractor: &E,
    predicate: &FilterPredicate,
    doc: E::Doc,
) {
    let triple = extractor.extract(doc);
    if predicate.admits(extractor.filter_value(doc, &triple)) {
        acc.admit(triple);
    } else {
        acc.reject();
    }
}

/// Runs one aggregation pass over a stream of hits.
///
/// Holds no state between runs. To cap work, limit the hit stream before
/// handing it over; the result only covers the hits actually supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationEngine {
    record_hits: bool,
}

impl AggregationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also keep every admitted hit, in scan order, in the result.
    pub fn with_hits(mut self, record_hits: bool) -> Self {
        self.record_hits = record_hits;
        self
    }

    /// A fresh accumulator matching this engine's settings.
    pub fn accumulator(&self) -> StatAccumulator {
        StatAccumulator::with_hits(self.record_hits)
    }

    pub fn run<E, I>(&self, hits: I, extractor: &E, predicate: &FilterPredicate) -> StatResult
    where
        E: TripleExtractor,
        I: IntoIterator<Item = E::Doc>,
    {
        let mut acc = self.accumulator();
        for doc in hits {
            observe(&mut acc, extractor, predicate, doc);
        }
        debug!(
            scanned = acc.num_scanned(),
            admitted = acc.num_admitted(),
            pairs = acc.num_pairs(),
            "Aggregation pass complete"
        );
        acc.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framestat_types::{Dimension, DimensionTriple, FilterSet};

    /// Hits are row indexes into a fixed table of triples.
    struct TableExtractor {
        rows: Vec<DimensionTriple>,
        filter_on: Dimension,
    }

    impl TableExtractor {
        fn new(rows: &[(u64, u64, u64)]) -> Self {
            Self {
                rows: rows.iter().copied().map(DimensionTriple::from).collect(),
                filter_on: Dimension::Frame,
            }
        }

        fn filtering_on(mut self, dimension: Dimension) -> Self {
            self.filter_on = dimension;
            self
        }
    }

    impl TripleExtractor for TableExtractor {
        type Doc = usize;

        fn extract(&self, doc: usize) -> DimensionTriple {
            self.rows[doc]
        }

        fn filter_value(&self, _doc: usize, triple: &DimensionTriple) -> u64 {
            triple.get(self.filter_on)
        }
    }

    const ROWS: [(u64, u64, u64); 9] = [
        (1, 1, 1),
        (1, 1, 2),
        (1, 2, 3),
        (2, 3, 4),
        (2, 3, 5),
        (2, 4, 6),
        (3, 5, 7),
        (4, 6, 8),
        (5, 7, 8),
    ];

    // Rows whose text mentions "sea"
    const SEA_HITS: [usize; 5] = [0, 1, 2, 5, 6];

    #[test]
    fn test_run_without_filter() {
        let extractor = TableExtractor::new(&ROWS);
        let result =
            AggregationEngine::new().run(SEA_HITS, &extractor, &FilterPredicate::admit_all());

        assert_eq!(
            result.unique_docs_frames().collect::<Vec<_>>(),
            vec![(1, 1), (1, 2), (2, 4), (3, 5)]
        );
        assert_eq!(result.num_scanned(), 5);
        assert_eq!(result.num_admitted(), 5);
    }

    #[test]
    fn test_run_with_frame_filter() {
        let extractor = TableExtractor::new(&ROWS);
        let predicate = FilterPredicate::only([1, 3, 5, 6, 7]);
        let result = AggregationEngine::new().run(SEA_HITS, &extractor, &predicate);

        assert_eq!(
            result.unique_docs_frames().collect::<Vec<_>>(),
            vec![(1, 1), (3, 5)]
        );
        assert_eq!(result.unique_docs(), &[1, 3]);
        assert_eq!(result.unique_frames(), &[1, 5]);
        assert_eq!(result.unique_sentences(), &[1, 2, 7]);
        assert_eq!(result.num_scanned(), 5);
        assert_eq!(result.num_admitted(), 3);
    }

    #[test]
    fn test_rejected_hits_leave_sentences_untouched() {
        let extractor = TableExtractor::new(&ROWS);
        let predicate = FilterPredicate::only([2]);
        let result = AggregationEngine::new().run(SEA_HITS, &extractor, &predicate);

        assert_eq!(result.unique_sentences(), &[3]);
        assert_eq!(result.unique_docs(), &[1]);
    }

    #[test]
    fn test_filter_on_sentence_dimension() {
        let extractor = TableExtractor::new(&ROWS).filtering_on(Dimension::Sentence);
        let predicate = FilterPredicate::only([2, 6]);
        let result = AggregationEngine::new().run(0..ROWS.len(), &extractor, &predicate);

        assert_eq!(
            result.unique_docs_frames().collect::<Vec<_>>(),
            vec![(1, 1), (2, 4)]
        );
        assert_eq!(result.unique_sentences(), &[2, 6]);
    }

    #[test]
    fn test_empty_filter_set_admits_all() {
        let extractor = TableExtractor::new(&ROWS);
        let unfiltered =
            AggregationEngine::new().run(SEA_HITS, &extractor, &FilterPredicate::admit_all());
        let empty = AggregationEngine::new().run(
            SEA_HITS,
            &extractor,
            &FilterPredicate::new(Some(FilterSet::new())),
        );
        assert_eq!(unfiltered, empty);
    }

    #[test]
    fn test_hit_order_does_not_change_result() {
        let extractor = TableExtractor::new(&ROWS);
        let predicate = FilterPredicate::admit_all();
        let forward = AggregationEngine::new().run(0..ROWS.len(), &extractor, &predicate);
        let backward = AggregationEngine::new().run((0..ROWS.len()).rev(), &extractor, &predicate);
        assert_eq!(forward, backward);
        assert_eq!(forward.unique_sentences(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_recorded_hits() {
        let extractor = TableExtractor::new(&ROWS);
        let predicate = FilterPredicate::only([5, 1]);
        let result = AggregationEngine::new()
            .with_hits(true)
            .run([6, 1, 0], &extractor, &predicate);

        assert_eq!(
            result.hits().unwrap(),
            &[
                DimensionTriple::new(3, 5, 7),
                DimensionTriple::new(1, 1, 2),
                DimensionTriple::new(1, 1, 1),
            ]
        );
    }

    #[test]
    fn test_truncated_stream_covers_supplied_hits_only() {
        let extractor = TableExtractor::new(&ROWS);
        let result = AggregationEngine::new().run(
            SEA_HITS.into_iter().take(2),
            &extractor,
            &FilterPredicate::admit_all(),
        );
        assert_eq!(result.unique_docs_frames().collect::<Vec<_>>(), vec![(1, 1)]);
        assert_eq!(result.unique_sentences(), &[1, 2]);
    }
}
