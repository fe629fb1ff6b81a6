//! # framestat-types
//!
//! Shared domain types for frame statistics.
//!
//! This crate defines the data structures used throughout the system:
//! - Dimension triples: the `(doc, frame, sentence)` ids read per hit
//! - Filter sets: caller-supplied allow-lists on one dimension
//! - Stat results: deduplicated, sorted views over the admitted hits
//! - Frame documents: the ingestion format
//! - Settings: configuration types
//!
//! ## Usage
//!
//! ```rust
//! use framestat_types::{DimensionTriple, StatAccumulator};
//!
//! let mut acc = StatAccumulator::new();
//! acc.admit(DimensionTriple::new(1, 1, 2));
//! acc.admit(DimensionTriple::new(1, 1, 1));
//! let result = acc.finish();
//! assert_eq!(result.unique_sentences(), &[1, 2]);
//! ```

pub mod accumulator;
pub mod config;
pub mod error;
pub mod filter;
pub mod frame;
pub mod result;
pub mod triple;

pub use accumulator::StatAccumulator;
pub use config::Settings;
pub use error::FramestatError;
pub use filter::{FilterPredicate, FilterSet};
pub use frame::FrameDocument;
pub use result::StatResult;
pub use triple::{Dimension, DimensionFields, DimensionTriple};
