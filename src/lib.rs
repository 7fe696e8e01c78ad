//! # Solidafy Harvest
//!
//! A count / retrieve / search connector for the Harvest v2 REST API.
//!
//! ## Features
//!
//! - **Query Templates**: `<%=parameter["Name"]%>` placeholders resolved per call
//! - **Table-Driven Routing**: Structures map to flat or nested endpoints
//! - **Canonical URLs**: Key-sorted, percent-encoded query strings
//! - **Uniform Records**: Field projection with every value stringified
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_harvest::{HarvestConfig, HarvestConnector, QueryRequest, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = HarvestConfig::new("1234.pt.abcd").with_account_id("987654");
//!     let connector = HarvestConnector::new(config)?;
//!
//!     let request = QueryRequest::new("Task Assignments")
//!         .query(r#"task_assignments?project_id=<%=parameter["Project"]%>"#)
//!         .parameter("Project", "42")
//!         .fields(["id", "billable"])
//!         .metadata("page", "1");
//!
//!     let list = connector.search(&request).await?;
//!     for record in &list.records {
//!         println!("{:?}", record.get("id"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! QueryRequest
//!     │
//!     ▼
//! template::resolve ─► query::parse_query ─► router::route ─► RequestAssembler
//!                                                                   │
//!                                                     Transport::get (HTTP GET)
//!                                                                   │
//!                                                                   ▼
//!                                          projector ─► u64 / Record / RecordList
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Query template resolution
pub mod template;

/// Query string parsing and canonical serialization
pub mod query;

/// Structure-to-endpoint routing
pub mod router;

/// Final URL assembly
pub mod assembler;

/// Response projection into uniform records
pub mod projector;

/// Connector configuration
pub mod config;

/// HTTP transport
pub mod http;

/// The count / retrieve / search connector
pub mod connector;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::HarvestConfig;
pub use connector::HarvestConnector;
pub use error::{Error, Result};
pub use router::Structure;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
