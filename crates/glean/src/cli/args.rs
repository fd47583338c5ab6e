//! Clap argument definitions for the `glean` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "glean")]
#[command(about = "Inline full-text search for structured records")]
pub struct Cli {
    /// Configuration file to use instead of discovering .glean.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `glean fields`.
#[derive(Args, Debug, Clone)]
pub struct FieldsCommand {
    /// Record type to list
    pub record_type: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `glean index`.
#[derive(Args, Debug, Clone)]
pub struct IndexCommand {
    /// Record type of the records
    pub record_type: String,

    /// JSON file holding a record or an array of records ("-" for stdin)
    pub records: PathBuf,
}

/// Arguments for `glean compile`.
#[derive(Args, Debug, Clone)]
pub struct CompileCommand {
    /// Record type whose fields the query may name
    pub record_type: String,

    /// Search query
    pub query: String,

    /// Print one regular expression per pattern instead of JSON
    #[arg(long)]
    pub regex: bool,
}

/// Arguments for `glean search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Record type of the records
    pub record_type: String,

    /// JSON file holding a record or an array of records ("-" for stdin)
    pub records: PathBuf,

    /// Search query (blank matches every record)
    pub query: String,

    /// Include each record's tokens in the output
    #[arg(long)]
    pub tokens: bool,
}

/// Arguments for `glean init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `glean` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List the searchable fields of a record type
    Fields(FieldsCommand),

    /// Add token sequences to records
    Index(IndexCommand),

    /// Show the patterns a query compiles to
    #[command(after_help = QUERY_HELP)]
    Compile(CompileCommand),

    /// Filter records by a query
    #[command(after_help = QUERY_HELP)]
    Search(SearchCommand),

    /// Validate configuration and build every field registry
    Check,

    /// Initialize glean configuration in current directory
    Init(InitCommand),
}

/// Query syntax reference shown after `compile` and `search` help.
const QUERY_HELP: &str = "\
QUERY SYNTAX:
  word                 Word must appear under some field
  word1 word2          Both words (implicit AND)
  \"two words\"          Both words, in any order ('single quotes' work too)
  field:word           Word must appear under the named field
  field:key:word       Key and word under a key-value field

  Field names are the qualified names listed by `glean fields`. A name that
  is not a field leaves the whole term as a plain word.

EXAMPLES:
  glean search movie movies.json 'title:matrix keanu'
  glean search video videos.json \"metadata:director:'alan smithee'\"
  glean compile movie 'actor_name:\"carrie moss\"' --regex";

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
