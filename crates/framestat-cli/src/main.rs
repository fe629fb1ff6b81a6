//! Framestat
//!
//! Deduplicated document, frame and sentence statistics over a full-text index.
//!
//! # Usage
//!
//! ```bash
//! framestat index --input frames.jsonl
//! framestat stats "sea" --filter 1,3,5 [--filter-field frame_id] [--hits]
//! framestat info
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/framestat/config.toml)
//! 3. Environment variables (FRAMESTAT_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use framestat_cli::{run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
