//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Harvest connector CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline config JSON
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Output format
    #[arg(short = 'o', long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count records matching a query
    Count(QueryArgs),

    /// Retrieve a single record
    Retrieve(QueryArgs),

    /// Search for a page of records
    Search(QueryArgs),

    /// List supported structures and their operations
    Structures,
}

/// Arguments shared by the query commands
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Structure name (e.g. "Task Assignments")
    #[arg(short, long)]
    pub structure: String,

    /// Query template, e.g. 'users?is_active=<%=parameter["Active"]%>'
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Template parameter as NAME=VALUE (repeatable)
    #[arg(short, long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Field to return (repeatable, empty = all)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,

    /// Metadata entry as KEY=VALUE, e.g. page=2 (repeatable)
    #[arg(short, long = "meta", value_parser = parse_key_value)]
    pub metadata: Vec<(String, String)>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}

/// Parse `NAME=VALUE`, splitting on the first `=`
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))
}
