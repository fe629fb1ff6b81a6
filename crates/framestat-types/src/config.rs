//! Configuration loading for framestat.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/framestat/config.toml.

use std::collections::HashSet;
use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::FramestatError;
use crate::triple::{
    default_document_field, default_frame_field, default_sentence_field, DimensionFields,
};

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the search index directory
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Memory budget for the index writer in MB
    #[serde(default = "default_writer_memory_mb")]
    pub writer_memory_mb: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Fast fields holding the document, frame and sentence ids
    #[serde(default)]
    pub dimensions: DimensionFields,

    /// Field checked against the filter set (None = frame dimension)
    #[serde(default)]
    pub filter_field: Option<String>,

    /// Text fields searched when a query names no field
    #[serde(default = "default_search_fields")]
    pub search_fields: Vec<String>,
}

fn default_index_path() -> String {
    ProjectDirs::from("", "", "framestat")
        .map(|p| p.data_local_dir().join("index"))
        .unwrap_or_else(|| PathBuf::from("./framestat-index"))
        .to_string_lossy()
        .to_string()
}

fn default_writer_memory_mb() -> usize {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_search_fields() -> Vec<String> {
    vec!["body".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            writer_memory_mb: default_writer_memory_mb(),
            log_level: default_log_level(),
            dimensions: DimensionFields::default(),
            filter_field: None,
            search_fields: default_search_fields(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/framestat/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (FRAMESTAT_*, `__` between nested keys)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, FramestatError> {
        let config_dir = ProjectDirs::from("", "", "framestat")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("index_path", default_index_path())
            .map_err(|e| FramestatError::Config(e.to_string()))?
            .set_default("writer_memory_mb", default_writer_memory_mb() as i64)
            .map_err(|e| FramestatError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| FramestatError::Config(e.to_string()))?
            .set_default("dimensions.document", default_document_field())
            .map_err(|e| FramestatError::Config(e.to_string()))?
            .set_default("dimensions.frame", default_frame_field())
            .map_err(|e| FramestatError::Config(e.to_string()))?
            .set_default("dimensions.sentence", default_sentence_field())
            .map_err(|e| FramestatError::Config(e.to_string()))?
            .set_default("search_fields", default_search_fields())
            .map_err(|e| FramestatError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // FRAMESTAT_INDEX_PATH, FRAMESTAT_DIMENSIONS__FRAME, ...
        // FRAMESTAT_SEARCH_FIELDS is comma separated.
        builder = builder.add_source(
            Environment::with_prefix("FRAMESTAT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("search_fields"),
        );

        let config = builder
            .build()
            .map_err(|e| FramestatError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| FramestatError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations the searcher could never run with.
    pub fn validate(&self) -> Result<(), FramestatError> {
        if self.writer_memory_mb == 0 {
            return Err(FramestatError::Config(
                "writer_memory_mb must be > 0".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (dimension, name) in self.dimensions.iter() {
            if name.trim().is_empty() {
                return Err(FramestatError::Config(format!(
                    "{} field name must not be empty",
                    dimension
                )));
            }
            if !seen.insert(name) {
                return Err(FramestatError::Config(format!(
                    "field `{}` is configured for more than one dimension",
                    name
                )));
            }
        }

        if matches!(&self.filter_field, Some(name) if name.trim().is_empty()) {
            return Err(FramestatError::Config(
                "filter_field must not be empty".to_string(),
            ));
        }
        if self.search_fields.is_empty() {
            return Err(FramestatError::Config(
                "search_fields must name at least one field".to_string(),
            ));
        }
        Ok(())
    }

    /// Field the filter set applies to.
    pub fn effective_filter_field(&self) -> &str {
        self.filter_field
            .as_deref()
            .unwrap_or(&self.dimensions.frame)
    }

    pub fn index_dir(&self) -> PathBuf {
        PathBuf::from(&self.index_path)
    }
}
