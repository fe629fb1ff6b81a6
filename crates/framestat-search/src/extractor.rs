//! Per-hit extraction of dimension triples from fast fields.

use tantivy::fastfield::Column;
use tantivy::{DocId, SegmentReader};

use framestat_types::{Dimension, DimensionFields, DimensionTriple};

/// Reads the dimension triple, and the value the filter checks, for a hit.
pub trait TripleExtractor {
    type Doc: Copy;

    /// Read the `(doc, frame, sentence)` ids of a hit.
    fn extract(&self, doc: Self::Doc) -> DimensionTriple;

    /// Value tested against the filter set. Defaults to the frame id.
    fn filter_value(&self, _doc: Self::Doc, triple: &DimensionTriple) -> u64 {
        triple.frame
    }
}

/// Where the filter predicate takes its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterTarget {
    /// One of the three extracted dimensions; no extra read.
    Dimension(Dimension),
    /// Any other u64 fast field, read as a fourth column.
    Field(String),
}

impl FilterTarget {
    pub fn resolve(field_name: &str, dimensions: &DimensionFields) -> Self {
        match dimensions.dimension_for(field_name) {
            Some(dimension) => FilterTarget::Dimension(dimension),
            None => FilterTarget::Field(field_name.to_string()),
        }
    }

    pub fn field_name<'a>(&'a self, dimensions: &'a DimensionFields) -> &'a str {
        match self {
            FilterTarget::Dimension(dimension) => dimensions.name(*dimension),
            FilterTarget::Field(name) => name,
        }
    }
}

enum FilterColumn {
    Dimension(Dimension),
    Column(Column<u64>),
}

/// Triple extractor over the fast-field columns of one segment.
///
/// A document with no value in a column reads as 0.
pub struct FastFieldExtractor {
    document: Column<u64>,
    frame: Column<u64>,
    sentence: Column<u64>,
    filter: FilterColumn,
}

impl FastFieldExtractor {
    /// Open the dimension columns (and filter column if needed) of a segment.
    pub fn open(
        segment: &SegmentReader,
        dimensions: &DimensionFields,
        target: &FilterTarget,
    ) -> tantivy::Result<Self> {
        let fast_fields = segment.fast_fields();
        let filter = match target {
            FilterTarget::Dimension(dimension) => FilterColumn::Dimension(*dimension),
            FilterTarget::Field(name) => FilterColumn::Column(fast_fields.u64(name)?),
        };

        Ok(Self {
            document: fast_fields.u64(&dimensions.document)?,
            frame: fast_fields.u64(&dimensions.frame)?,
            sentence: fast_fields.u64(&dimensions.sentence)?,
            filter,
        })
    }
}

fn read(column: &Column<u64>, doc: DocId) -> u64 {
    column.first(doc).unwrap_or_default()
}

impl TripleExtractor for FastFieldExtractor {
    type Doc = DocId;

    fn extract(&self, doc: DocId) -> DimensionTriple {
        DimensionTriple {
            doc: read(&self.document, doc),
            frame: read(&self.frame, doc),
            sentence: read(&self.sentence, doc),
        }
    }

    fn filter_value(&self, doc: DocId, triple: &DimensionTriple) -> u64 {
        match &self.filter {
            FilterColumn::Dimension(dimension) => triple.get(*dimension),
            FilterColumn::Column(column) => read(column, doc),
        }
    }
}
