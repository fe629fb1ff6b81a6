//! Command implementations for framestat.
//!
//! Handles:
//! - index: load frames from JSON lines and commit them
//! - stats: run a query through the stat collector
//! - info: report document and segment counts

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use framestat_search::{FrameIndexer, SearchIndex, SearchIndexConfig, StatOptions, StatSearcher};
use framestat_types::{FrameDocument, Settings};

use crate::cli::{Cli, Commands};
use crate::report::{IndexInfo, StatReport};

/// Load settings and apply CLI overrides (highest precedence).
pub fn load_settings(
    config_path: Option<&str>,
    index_path_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;

    if let Some(index_path) = index_path_override {
        settings.index_path = index_path.to_string();
    }
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    Ok(settings)
}

/// Install the global tracing subscriber.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

fn open_existing(settings: &Settings) -> Result<SearchIndex> {
    let path = settings.index_dir();
    if !path.join("meta.json").exists() {
        bail!("No index found at {:?}; run `framestat index` first", path);
    }
    SearchIndex::open_or_create(SearchIndexConfig::from_settings(settings))
        .with_context(|| format!("Failed to open index at {:?}", path))
}

/// Index every frame in a JSON-lines file. Returns the number indexed.
pub fn run_index(settings: &Settings, input: &Path) -> Result<usize> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {:?}", input))?;
    let frames = FrameDocument::parse_json_lines(&raw)
        .with_context(|| format!("Invalid frame data in {:?}", input))?;

    let index = SearchIndex::open_or_create(SearchIndexConfig::from_settings(settings))
        .context("Failed to open index")?;
    let indexer = FrameIndexer::new(&index)?;
    let count = indexer.index_frames(&frames)?;
    indexer.commit()?;

    info!(count, path = %settings.index_path, "Indexed frames");
    Ok(count)
}

/// Collect statistics for `query`.
pub fn run_stats(
    settings: &Settings,
    query: &str,
    filter_field: Option<String>,
    filter: Vec<u64>,
    fields: Vec<String>,
    hits: bool,
) -> Result<StatReport> {
    let index = open_existing(settings)?;

    let fields = if fields.is_empty() {
        settings.search_fields.clone()
    } else {
        fields
    };
    let field_refs: Vec<&str> = fields.iter().map(String::as_str).collect();
    let searcher = StatSearcher::with_search_fields(&index, &field_refs)?;

    let mut options = StatOptions::from_settings(settings)
        .with_filter(filter)
        .with_hits(hits);
    if let Some(field) = filter_field {
        options = options.with_filter_field(field);
    }

    let result = searcher
        .collect_stats_str(query, &options)
        .with_context(|| format!("Stat search failed for query {:?}", query))?;
    Ok(StatReport::new(query, &options, &result))
}

/// Report counts for the configured index.
pub fn run_info(settings: &Settings) -> Result<IndexInfo> {
    let index = open_existing(settings)?;
    let searcher = index.stat_searcher()?;
    Ok(IndexInfo {
        index_path: settings.index_path.clone(),
        num_docs: searcher.num_docs(),
        num_segments: searcher.num_segments(),
    })
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(
        cli.config.as_deref(),
        cli.index_path.as_deref(),
        cli.log_level.as_deref(),
    )?;
    init_logging(&settings)?;

    match cli.command {
        Commands::Index { input } => {
            let count = run_index(&settings, &input)?;
            println!("Indexed {} frames into {}", count, settings.index_path);
        }
        Commands::Stats {
            query,
            filter_field,
            filter,
            fields,
            hits,
            pretty,
        } => {
            let report = run_stats(&settings, &query, filter_field, filter, fields, hits)?;
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", json);
        }
        Commands::Info => {
            let info = run_info(&settings)?;
            println!(
                "{}: {} documents in {} segments",
                info.index_path, info.num_docs, info.num_segments
            );
        }
    }

    Ok(())
}
