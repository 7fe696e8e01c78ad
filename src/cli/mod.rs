//! CLI module
//!
//! Command-line interface for querying Harvest.
//!
//! # Commands
//!
//! - `count` - Count records matching a query
//! - `retrieve` - Fetch a single record
//! - `search` - Fetch a page of records
//! - `structures` - List supported structures

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, QueryArgs};
pub use runner::{build_request, Runner};
