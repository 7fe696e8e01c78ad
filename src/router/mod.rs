//! Endpoint routing module
//!
//! Maps a structure, an operation and the parsed query parameters to a
//! concrete Harvest path.
//!
//! # Overview
//!
//! Routing is table driven: every (structure, kind) pair has one
//! [`Route`] in [`ROUTES`]. Nested resources such as task assignments take
//! their parent identifier from the query (`project_id`), which is then
//! removed from the residual parameters so it is not sent twice.

mod routes;
mod structure;

pub use routes::{lookup, Route, RouteKind, RoutedRequest, ROUTES};
pub use structure::Structure;

use crate::error::{Error, Result};
use crate::query::QueryParams;
use crate::types::Operation;
use tracing::debug;

/// Route a request to its path and residual parameters
pub fn route(
    structure: Structure,
    operation: Operation,
    params: QueryParams,
) -> Result<RoutedRequest> {
    let route = lookup(structure, operation.into())
        .ok_or_else(|| Error::unsupported(structure.name(), operation.as_str()))?;

    let routed = route.build(structure, params)?;
    debug!(
        structure = structure.name(),
        operation = operation.as_str(),
        path = %routed.path,
        "Routed request"
    );
    Ok(routed)
}

/// Whether a structure has a route for an operation
pub fn supports(structure: Structure, operation: Operation) -> bool {
    lookup(structure, operation.into()).is_some()
}
