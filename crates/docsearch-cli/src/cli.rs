//! # CLI Structure and Argument Parsing
//!
//! `docsearch` reads the `search_index.js` a documentation generator writes
//! next to a built site and answers questions about it from the terminal.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # Full-text search over a local build
//! docsearch -s docs/build search "tree iteration"
//!
//! # Only API symbols of one kind
//! docsearch search children -c function -c method
//!
//! # Published documentation (cached locally, revalidated with ETags)
//! docsearch -s https://juliacollections.github.io/AbstractTrees.jl/dev/ lookup nodevalue
//!
//! # Shape checks for CI
//! docsearch -s docs/build validate --strict
//! ```
//!
//! ## Output Formats
//!
//! Data commands accept `--format text|json|jsonl|raw`. Without the flag,
//! terminals get text and pipes get JSON.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::cli_args::{CategoryArg, FormatArg};

/// Main CLI structure for the `docsearch` command
#[derive(Parser, Clone, Debug)]
#[command(name = "docsearch")]
#[command(version)]
#[command(about = "docsearch - Query generated documentation search indexes", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Index file, documentation build directory, or site URL
    #[arg(short = 's', long, global = true, value_name = "PATH|URL", env = "DOCSEARCH_SOURCE")]
    pub source: Option<String>,

    /// Path to configuration file (overrides the platform default)
    #[arg(long, global = true, value_name = "FILE", env = "DOCSEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Never fetch; URL sources must already be cached
    #[arg(long, global = true)]
    pub offline: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

/// Available subcommands for the `docsearch` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Full-text search over entry titles, pages and text
    Search {
        /// Search query (quote phrases: "\"parent links\"")
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Only return entries of these categories (repeatable)
        #[arg(short = 'c', long = "category", value_enum)]
        categories: Vec<CategoryArg>,
        /// Maximum number of results (defaults to `search.limit` from config)
        #[arg(short = 'n', long, value_name = "COUNT")]
        limit: Option<usize>,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Find documented symbols (types, functions, methods) by name
    Lookup {
        /// Symbol name, qualified or not; matched fuzzily
        name: String,
        /// Maximum number of results
        #[arg(short = 'n', long, value_name = "COUNT", default_value = "10")]
        limit: usize,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Show every entry at a location (`page/` or `page/#anchor`)
    Show {
        /// Location path, optionally with `#anchor`
        location: String,
        /// Print the resolved documentation URL (needs `source.base_url` or a URL source)
        #[arg(long)]
        url: bool,
        #[command(flatten)]
        format: FormatArg,
    },

    /// List pages in the order they appear in the index
    Pages {
        #[command(flatten)]
        format: FormatArg,
    },

    /// Show entry counts and other index statistics
    Stats {
        #[command(flatten)]
        format: FormatArg,
    },

    /// Check the index shape; exits non-zero when it fails
    Validate {
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Write the loaded index back out
    Export {
        /// Emit the generator's script form (`var documenterSearchIndex = ...`)
        #[arg(long)]
        js: bool,
        /// Compact JSON instead of pretty-printed
        #[arg(long, conflicts_with = "js")]
        compact: bool,
        /// Output file (defaults to stdout)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Manage locally cached copies of remote indexes
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum CacheCommands {
    /// List cached indexes
    List {
        #[command(flatten)]
        format: FormatArg,
    },
    /// Print the cache directory
    Path,
    /// Remove every cached index
    Clear,
}
