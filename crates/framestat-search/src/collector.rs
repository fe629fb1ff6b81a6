//! Tantivy collector computing frame statistics.
//!
//! One `StatsSegmentCollector` runs per segment and folds hits into its own
//! accumulator; `merge_fruits` unions them in segment order. Scores are never
//! computed.

use std::sync::Arc;

use tantivy::collector::{Collector, SegmentCollector};
use tantivy::schema::Schema;
use tantivy::{DocId, Score, SegmentOrdinal, SegmentReader};
use tracing::debug;

use framestat_types::{
    Dimension, DimensionFields, FilterPredicate, StatAccumulator, StatResult,
};

use crate::aggregate::{observe, AggregationEngine};
use crate::error::SearchError;
use crate::extractor::{FastFieldExtractor, FilterTarget};
use crate::schema::validate_fast_field;
use crate::searcher::StatOptions;

/// Collects deduplicated doc/frame/sentence statistics for a query.
#[derive(Debug)]
pub struct StatsCollector {
    dimensions: DimensionFields,
    target: FilterTarget,
    predicate: Arc<FilterPredicate>,
    engine: AggregationEngine,
}

impl StatsCollector {
    /// Build a collector, checking every configured field against `schema`.
    ///
    /// All fields are validated here, before any segment is opened, so a bad
    /// configuration fails without scanning a single hit.
    pub fn new(schema: &Schema, options: &StatOptions) -> Result<Self, SearchError> {
        for (_, name) in options.fields.iter() {
            validate_fast_field(schema, name)?;
        }
        let filter_field = options.effective_filter_field();
        validate_fast_field(schema, filter_field)?;

        let predicate = options.predicate();
        // An inactive predicate never looks at its value; skip the extra column.
        let target = if predicate.is_active() {
            FilterTarget::resolve(filter_field, &options.fields)
        } else {
            FilterTarget::Dimension(Dimension::Frame)
        };

        Ok(Self {
            dimensions: options.fields.clone(),
            target,
            predicate: Arc::new(predicate),
            engine: AggregationEngine::new().with_hits(options.record_hits),
        })
    }

    pub fn filter_target(&self) -> &FilterTarget {
        &self.target
    }

    pub fn predicate(&self) -> &FilterPredicate {
        &self.predicate
    }
}

impl Collector for StatsCollector {
    type Fruit = StatResult;

    type Child = StatsSegmentCollector;

    fn for_segment(
        &self,
        segment_local_id: SegmentOrdinal,
        segment: &SegmentReader,
    ) -> tantivy::Result<StatsSegmentCollector> {
        let extractor = FastFieldExtractor::open(segment, &self.dimensions, &self.target)?;
        debug!(
            segment = segment_local_id,
            max_doc = segment.max_doc(),
            "Opened stat segment collector"
        );
        Ok(StatsSegmentCollector {
            extractor,
            predicate: Arc::clone(&self.predicate),
            acc: self.engine.accumulator(),
        })
    }

    fn requires_scoring(&self) -> bool {
        false
    }

    fn merge_fruits(&self, segment_fruits: Vec<StatAccumulator>) -> tantivy::Result<StatResult> {
        let mut acc = self.engine.accumulator();
        for fruit in segment_fruits {
            acc.merge(fruit);
        }
        Ok(acc.finish())
    }
}

/// Per-segment half of `StatsCollector`.
pub struct StatsSegmentCollector {
    extractor: FastFieldExtractor,
    predicate: Arc<FilterPredicate>,
    acc: StatAccumulator,
}

impl SegmentCollector for StatsSegmentCollector {
    type Fruit = StatAccumulator;

    fn collect(&mut self, doc: DocId, _score: Score) {
        observe(&mut self.acc, &self.extractor, &self.predicate, doc);
    }

    fn harvest(self) -> StatAccumulator {
        self.acc
    }
}
