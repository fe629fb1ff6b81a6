//! Stat searcher: runs a query and aggregates its hits.

use std::fmt;

use tantivy::collector::Count;
use tantivy::query::{Query, QueryParser};
use tantivy::{DocAddress, IndexReader, TantivyDocument};
use tracing::{debug, info};

use framestat_types::{
    DimensionFields, FilterPredicate, FilterSet, FrameDocument, Settings, StatResult,
};

use crate::aggregate::AggregationEngine;
use crate::collector::StatsCollector;
use crate::document::doc_to_frame;
use crate::error::SearchError;
use crate::index::SearchIndex;
use crate::schema::FrameSchema;

/// Options for one stat collection.
#[derive(Debug, Clone, Default)]
pub struct StatOptions {
    /// Fast fields holding the document, frame and sentence ids
    pub fields: DimensionFields,
    /// Field the filter set applies to (None = frame field)
    pub filter_field: Option<String>,
    /// Admissible values (empty = admit all)
    pub filter_values: FilterSet,
    /// Keep every admitted hit in the result
    pub record_hits: bool,
}

impl StatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            fields: settings.dimensions.clone(),
            filter_field: settings.filter_field.clone(),
            ..Self::default()
        }
    }

    pub fn with_fields(mut self, fields: DimensionFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_filter_field(mut self, field: impl Into<String>) -> Self {
        self.filter_field = Some(field.into());
        self
    }

    pub fn with_filter(mut self, values: impl Into<FilterSet>) -> Self {
        self.filter_values = values.into();
        self
    }

    pub fn with_hits(mut self, record_hits: bool) -> Self {
        self.record_hits = record_hits;
        self
    }

    /// Field the filter set is checked against.
    pub fn effective_filter_field(&self) -> &str {
        self.filter_field.as_deref().unwrap_or(&self.fields.frame)
    }

    pub fn predicate(&self) -> FilterPredicate {
        FilterPredicate::new(Some(self.filter_values.clone()))
    }
}

/// Searcher producing `StatResult`s.
///
/// Every call takes a fresh searcher snapshot from the reader; results own
/// their data and do not keep the snapshot alive.
pub struct StatSearcher {
    reader: IndexReader,
    schema: FrameSchema,
    query_parser: QueryParser,
}

impl StatSearcher {
    /// Create a new searcher querying the `body` field.
    pub fn new(index: &SearchIndex) -> Result<Self, SearchError> {
        Self::with_search_fields(index, &["body"])
    }

    /// Create a searcher whose query strings target the named text fields.
    pub fn with_search_fields(index: &SearchIndex, fields: &[&str]) -> Result<Self, SearchError> {
        let reader = index.reader()?;
        let schema = index.schema().clone();

        let fields = fields
            .iter()
            .map(|name| {
                schema
                    .schema()
                    .get_field(name)
                    .map_err(|_| SearchError::FieldNotFound(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let query_parser = QueryParser::for_index(index.index(), fields);

        Ok(Self {
            reader,
            schema,
            query_parser,
        })
    }

    /// Reload the reader to see recent commits.
    pub fn reload(&self) -> Result<(), SearchError> {
        self.reader.reload()?;
        debug!("Reloaded stat searcher reader");
        Ok(())
    }

    /// Default options for this index's dimension field names.
    pub fn options(&self) -> StatOptions {
        StatOptions::new().with_fields(self.schema.dimensions().clone())
    }

    /// Aggregate every hit of `query`.
    ///
    /// Fields are validated before the query runs; on error no hit has been
    /// scanned.
    pub fn collect_stats(
        &self,
        query: &dyn Query,
        options: &StatOptions,
    ) -> Result<StatResult, SearchError> {
        let searcher = self.reader.searcher();
        let collector = StatsCollector::new(searcher.schema(), options)?;

        let result = searcher.search(query, &collector)?;

        info!(
            filter_field = options.effective_filter_field(),
            filter_values = options.filter_values.len(),
            scanned = result.num_scanned(),
            admitted = result.num_admitted(),
            pairs = result.num_docs_frames(),
            "Stat search complete"
        );
        Ok(result)
    }

    /// Parse `query_str` and aggregate its hits.
    ///
    /// A blank query matches nothing, after the fields have been validated,
    /// and yields the same shape as a query with zero hits.
    pub fn collect_stats_str(
        &self,
        query_str: &str,
        options: &StatOptions,
    ) -> Result<StatResult, SearchError> {
        if query_str.trim().is_empty() {
            let searcher = self.reader.searcher();
            StatsCollector::new(searcher.schema(), options)?;
            let engine = AggregationEngine::new().with_hits(options.record_hits);
            return Ok(engine.accumulator().finish());
        }

        let query = self.query_parser.parse_query(query_str)?;
        debug!(query = query_str, "Parsed stat query");
        self.collect_stats(query.as_ref(), options)
    }

    /// Number of documents matching `query`.
    pub fn count(&self, query: &dyn Query) -> Result<usize, SearchError> {
        let searcher = self.reader.searcher();
        Ok(searcher.search(query, &Count)?)
    }

    /// Fetch a stored frame by address.
    pub fn doc(&self, address: DocAddress) -> Result<FrameDocument, SearchError> {
        let searcher = self.reader.searcher();
        let doc: TantivyDocument = searcher.doc(address)?;
        doc_to_frame(&self.schema, &doc)
    }

    /// Get the number of indexed documents.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    pub fn num_segments(&self) -> usize {
        self.reader.searcher().segment_readers().len()
    }
}

impl fmt::Display for StatSearcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let searcher = self.reader.searcher();
        write!(
            f,
            "StatSearcher(num_docs={}, num_segments={})",
            searcher.num_docs(),
            searcher.segment_readers().len()
        )
    }
}
