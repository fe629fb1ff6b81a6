//! # framestat-search
//!
//! Deduplicated document/frame/sentence statistics over a Tantivy index.
//!
//! Frames are indexed with three u64 fast fields (document, frame and
//! sentence ids). A query's hits are streamed through `StatsCollector`, which
//! reads the three ids per hit, applies an optional allow-set on one field,
//! and folds the admitted hits into sorted unique views.
//!
//! ## Features
//! - Embedded Tantivy index (mmap directory or in memory)
//! - Eager validation of every configured field before a query runs
//! - Filtering on any u64 fast field, by default the frame id
//! - Results that own their data and outlive the searcher

pub mod aggregate;
pub mod collector;
pub mod document;
pub mod error;
pub mod extractor;
pub mod index;
pub mod indexer;
pub mod schema;
pub mod searcher;

pub use aggregate::{observe, AggregationEngine};
pub use collector::{StatsCollector, StatsSegmentCollector};
pub use document::{doc_to_frame, frame_to_doc};
pub use error::SearchError;
pub use extractor::{FastFieldExtractor, FilterTarget, TripleExtractor};
pub use index::{open_or_create_index, SearchIndex, SearchIndexConfig};
pub use indexer::FrameIndexer;
pub use schema::{build_frame_schema, validate_fast_field, FrameSchema};
pub use searcher::{StatOptions, StatSearcher};
