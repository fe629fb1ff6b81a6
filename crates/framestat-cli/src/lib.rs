//! Framestat command-line library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (index, stats, info)
//! - `report`: JSON output shapes

pub mod cli;
pub mod commands;
pub mod report;

pub use cli::{Cli, Commands};
pub use commands::{init_logging, load_settings, run, run_index, run_info, run_stats};
pub use report::{IndexInfo, StatReport};
