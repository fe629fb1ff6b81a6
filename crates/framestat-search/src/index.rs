//! Tantivy index management.
//!
//! Handles index creation, opening, and lifecycle.

use std::path::{Path, PathBuf};

use tantivy::query::{Query, QueryParser};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy};
use tracing::{debug, info};

use framestat_types::{DimensionFields, Settings};

use crate::error::SearchError;
use crate::schema::{build_frame_schema, FrameSchema};
use crate::searcher::StatSearcher;

/// Default memory budget for IndexWriter (50MB)
const DEFAULT_WRITER_MEMORY_MB: usize = 50;

/// Search index configuration
#[derive(Debug, Clone)]
pub struct SearchIndexConfig {
    /// Path to index directory (None = in-memory index)
    pub index_path: Option<PathBuf>,
    /// Memory budget for writer in MB
    pub writer_memory_mb: usize,
    /// Fixed number of indexing threads (None = Tantivy's choice)
    pub writer_threads: Option<usize>,
    /// Names of the dimension fast fields
    pub dimensions: DimensionFields,
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            index_path: Some(PathBuf::from("./framestat-index")),
            writer_memory_mb: DEFAULT_WRITER_MEMORY_MB,
            writer_threads: None,
            dimensions: DimensionFields::default(),
        }
    }
}

impl SearchIndexConfig {
    pub fn new(index_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: Some(index_path.into()),
            ..Self::default()
        }
    }

    pub fn in_ram() -> Self {
        Self {
            index_path: None,
            ..Self::default()
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            index_path: Some(settings.index_dir()),
            writer_memory_mb: settings.writer_memory_mb,
            writer_threads: None,
            dimensions: settings.dimensions.clone(),
        }
    }

    pub fn with_memory_mb(mut self, mb: usize) -> Self {
        self.writer_memory_mb = mb;
        self
    }

    pub fn with_writer_threads(mut self, threads: usize) -> Self {
        self.writer_threads = Some(threads);
        self
    }

    pub fn with_dimensions(mut self, dimensions: DimensionFields) -> Self {
        self.dimensions = dimensions;
        self
    }
}

/// Wrapper for Tantivy index with schema access.
pub struct SearchIndex {
    index: Index,
    schema: FrameSchema,
    config: SearchIndexConfig,
}

impl SearchIndex {
    /// Open existing index or create new one.
    ///
    /// A config without a path creates a fresh in-memory index.
    pub fn open_or_create(config: SearchIndexConfig) -> Result<Self, SearchError> {
        let index = match &config.index_path {
            Some(path) => open_or_create_index(path, &config.dimensions)?,
            None => {
                debug!("Creating in-memory index");
                Index::create_in_ram(build_frame_schema(&config.dimensions).schema().clone())
            }
        };
        let schema = FrameSchema::from_schema(index.schema(), config.dimensions.clone())?;

        info!(path = ?config.index_path, "Opened search index");

        Ok(Self {
            index,
            schema,
            config,
        })
    }

    /// Create an in-memory index with the given dimension field names.
    pub fn create_in_ram(dimensions: DimensionFields) -> Result<Self, SearchError> {
        Self::open_or_create(SearchIndexConfig::in_ram().with_dimensions(dimensions))
    }

    /// Get the frame schema
    pub fn schema(&self) -> &FrameSchema {
        &self.schema
    }

    /// Get the underlying Tantivy index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Create an IndexWriter with configured memory budget
    pub fn writer(&self) -> Result<IndexWriter, SearchError> {
        let memory_budget = self.config.writer_memory_mb * 1024 * 1024;
        let writer = match self.config.writer_threads {
            Some(threads) => self.index.writer_with_num_threads(threads, memory_budget)?,
            None => self.index.writer(memory_budget)?,
        };
        debug!(
            memory_mb = self.config.writer_memory_mb,
            threads = ?self.config.writer_threads,
            "Created index writer"
        );
        Ok(writer)
    }

    /// Create an IndexReader with OnCommit reload policy
    pub fn reader(&self) -> Result<IndexReader, SearchError> {
        let reader = self
            .index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()?;
        debug!("Created index reader");
        Ok(reader)
    }

    /// Parse a query string against the named text fields.
    pub fn parse_query(
        &self,
        query_str: &str,
        default_fields: &[&str],
    ) -> Result<Box<dyn Query>, SearchError> {
        let fields = default_fields
            .iter()
            .map(|name| {
                self.schema
                    .schema()
                    .get_field(name)
                    .map_err(|_| SearchError::FieldNotFound(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let query_parser = QueryParser::for_index(&self.index, fields);
        Ok(query_parser.parse_query(query_str)?)
    }

    /// Create a stat searcher over the latest committed state.
    pub fn stat_searcher(&self) -> Result<StatSearcher, SearchError> {
        StatSearcher::new(self)
    }

    /// Get the index path (None for in-memory indexes)
    pub fn path(&self) -> Option<&Path> {
        self.config.index_path.as_deref()
    }

    /// Check if index exists at the configured path
    pub fn exists(&self) -> bool {
        self.config
            .index_path
            .as_ref()
            .is_some_and(|path| path.join("meta.json").exists())
    }
}

/// Open an existing index or create a new one.
///
/// Uses MmapDirectory for persistence.
pub fn open_or_create_index(path: &Path, dimensions: &DimensionFields) -> Result<Index, SearchError> {
    if path.join("meta.json").exists() {
        debug!(path = ?path, "Opening existing index");
        let index = Index::open_in_dir(path)?;
        Ok(index)
    } else {
        info!(path = ?path, "Creating new index");
        std::fs::create_dir_all(path)?;
        let schema = build_frame_schema(dimensions);
        let index = Index::create_in_dir(path, schema.schema().clone())?;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_new_index() {
        let temp_dir = TempDir::new().unwrap();
        let config = SearchIndexConfig::new(temp_dir.path());

        let index = SearchIndex::open_or_create(config).unwrap();
        assert!(index.exists());
        assert_eq!(index.path(), Some(temp_dir.path()));
    }

    #[test]
    fn test_reopen_existing_index() {
        let temp_dir = TempDir::new().unwrap();
        let config = SearchIndexConfig::new(temp_dir.path());

        let _index1 = SearchIndex::open_or_create(config.clone()).unwrap();

        let index2 = SearchIndex::open_or_create(config).unwrap();
        assert!(index2.exists());
    }

    #[test]
    fn test_reopen_with_other_dimension_names_fails() {
        let temp_dir = TempDir::new().unwrap();
        let _index = SearchIndex::open_or_create(SearchIndexConfig::new(temp_dir.path())).unwrap();

        let config =
            SearchIndexConfig::new(temp_dir.path()).with_dimensions(DimensionFields::suffixed());
        let result = SearchIndex::open_or_create(config);
        assert!(matches!(result, Err(SearchError::SchemaMismatch(_))));
    }

    #[test]
    fn test_in_ram_index() {
        let index = SearchIndex::create_in_ram(DimensionFields::suffixed()).unwrap();
        assert!(!index.exists());
        assert!(index.path().is_none());
        assert!(index.schema().schema().get_field("frame_id__").is_ok());
    }

    #[test]
    fn test_create_writer_and_reader() {
        let index = SearchIndex::open_or_create(SearchIndexConfig::in_ram()).unwrap();

        let _writer = index.writer().unwrap();
        let _reader = index.reader().unwrap();
    }

    #[test]
    fn test_parse_query() {
        let index = SearchIndex::open_or_create(SearchIndexConfig::in_ram()).unwrap();
        assert!(index.parse_query("sea", &["body"]).is_ok());
        assert!(index.parse_query("sea", &["body", "title"]).is_ok());

        let err = index.parse_query("sea", &["nope"]).err().unwrap();
        assert!(matches!(err, SearchError::FieldNotFound(_)));
    }

    #[test]
    fn test_config_default() {
        let config = SearchIndexConfig::default();
        assert_eq!(config.index_path, Some(PathBuf::from("./framestat-index")));
        assert_eq!(config.writer_memory_mb, DEFAULT_WRITER_MEMORY_MB);
        assert_eq!(config.dimensions, DimensionFields::default());
    }

    #[test]
    fn test_config_builders() {
        let config = SearchIndexConfig::new("/tmp/test")
            .with_memory_mb(100)
            .with_writer_threads(1);
        assert_eq!(config.writer_memory_mb, 100);
        assert_eq!(config.writer_threads, Some(1));
    }

    #[test]
    fn test_config_from_settings() {
        let mut settings = Settings::default();
        settings.index_path = "/tmp/framestat".to_string();
        settings.dimensions = DimensionFields::suffixed();

        let config = SearchIndexConfig::from_settings(&settings);
        assert_eq!(config.index_path, Some(PathBuf::from("/tmp/framestat")));
        assert_eq!(config.dimensions, DimensionFields::suffixed());
    }
}
