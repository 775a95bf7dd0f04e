//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chanscope - Browse 4chan boards from the terminal with a local cache
#[derive(Debug, Parser)]
#[command(name = "chanscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Cache directory (overrides config)
    #[arg(short, long, global = true)]
    pub cachedir: Option<PathBuf>,

    /// Log every cache lookup and request to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Print how often each post field was seen
    #[arg(long, global = true)]
    pub stats: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all boards with their flags and limits
    Boards,

    /// Show every thread in a board's catalog with its latest replies
    Catalog {
        /// Board name (e.g. g)
        board: String,
    },

    /// Show every current thread of a board
    Threads {
        /// Board name (e.g. g)
        board: String,
    },

    /// Show every archived thread of a board
    Archive {
        /// Board name (e.g. g)
        board: String,
    },

    /// Show a single thread
    Thread {
        /// Board name (e.g. g)
        board: String,

        /// Thread number
        no: u64,
    },

    /// Search thread contents
    Search {
        /// Search terms
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Restrict the search to one board
        #[arg(short, long)]
        board: Option<String>,
    },

    /// Manage chanscope configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set configuration values
    Set {
        /// API root URL
        #[arg(long)]
        api_url: Option<String>,

        /// Search endpoint URL
        #[arg(long)]
        search_url: Option<String>,

        /// Cache directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Default log filter for this invocation
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
}
