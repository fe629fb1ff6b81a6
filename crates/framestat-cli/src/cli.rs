//! CLI argument parsing for framestat.
//!
//! CLI flags override all other config sources.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Frame statistics over a full-text index
#[derive(Parser, Debug)]
#[command(name = "framestat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/framestat/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Override index directory
    #[arg(long, global = true)]
    pub index_path: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index frames from a JSON-lines file
    Index {
        /// File with one frame object per line
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Collect doc/frame/sentence statistics for a query
    Stats {
        /// Query string
        query: String,

        /// Field the filter values apply to (default: frame field)
        #[arg(long)]
        filter_field: Option<String>,

        /// Admissible values, comma separated (empty = no filtering)
        #[arg(long, value_delimiter = ',')]
        filter: Vec<u64>,

        /// Text fields searched by the query, comma separated
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Include every admitted hit in scan order
        #[arg(long)]
        hits: bool,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// Show document and segment counts
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stats() {
        let cli = Cli::parse_from([
            "framestat",
            "stats",
            "sea",
            "--filter",
            "1,3,5",
            "--filter-field",
            "frame_id__",
            "--hits",
        ]);
        match cli.command {
            Commands::Stats {
                query,
                filter_field,
                filter,
                fields,
                hits,
                pretty,
            } => {
                assert_eq!(query, "sea");
                assert_eq!(filter_field.as_deref(), Some("frame_id__"));
                assert_eq!(filter, vec![1, 3, 5]);
                assert!(fields.is_empty());
                assert!(hits);
                assert!(!pretty);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from([
            "framestat",
            "info",
            "--index-path",
            "/tmp/idx",
            "--log-level",
            "debug",
        ]);
        assert!(matches!(cli.command, Commands::Info));
        assert_eq!(cli.index_path.as_deref(), Some("/tmp/idx"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_index() {
        let cli = Cli::parse_from(["framestat", "index", "--input", "frames.jsonl"]);
        match cli.command {
            Commands::Index { input } => assert_eq!(input, PathBuf::from("frames.jsonl")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_numeric_filter() {
        let result = Cli::try_parse_from(["framestat", "stats", "sea", "--filter", "1,x"]);
        assert!(result.is_err());
    }
}
