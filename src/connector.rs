//! Harvest connector
//!
//! Implements `count`, `retrieve` and `search` by running a request through
//! the template resolver, query codec, router and assembler, issuing one GET
//! through the injected [`Transport`], and projecting the JSON response.

use crate::assembler::RequestAssembler;
use crate::config::HarvestConfig;
use crate::error::{Error, Result};
use crate::http::{HttpTransport, Transport};
use crate::projector;
use crate::query::parse_query;
use crate::router::{self, Structure};
use crate::template;
use crate::types::{JsonValue, Operation, QueryRequest, Record, RecordList};
use std::sync::Arc;
use tracing::{debug, trace};

/// Count / retrieve / search connector for the Harvest API
///
/// Holds no per-call state; share it freely between tasks.
#[derive(Clone)]
pub struct HarvestConnector {
    config: HarvestConfig,
    assembler: RequestAssembler,
    transport: Arc<dyn Transport>,
}

impl HarvestConnector {
    /// Create a connector using the reqwest transport
    pub fn new(config: HarvestConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a connector with a custom transport
    pub fn with_transport(config: HarvestConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let assembler = RequestAssembler::new(config.base_url.clone());
        Ok(Self {
            config,
            assembler,
            transport,
        })
    }

    /// Structures this connector answers for
    pub fn structures() -> impl Iterator<Item = Structure> {
        Structure::ALL.into_iter()
    }

    /// Count the records matching a query
    pub async fn count(&self, request: &QueryRequest) -> Result<u64> {
        trace!(structure = %request.structure, query = %request.query, "Counting records");

        let structure: Structure = request.structure.parse()?;
        let url = self.build_url(structure, Operation::Count, request)?;
        let payload = self.fetch(&url).await?;
        projector::project_count(&payload)
    }

    /// Retrieve a single record
    pub async fn retrieve(&self, request: &QueryRequest) -> Result<Record> {
        trace!(
            structure = %request.structure,
            query = %request.query,
            fields = ?request.fields,
            "Retrieving record"
        );

        let structure: Structure = request.structure.parse()?;
        let url = self.build_url(structure, Operation::Retrieve, request)?;
        let payload = self.fetch(&url).await?;
        projector::project_record(&payload, &request.fields)
    }

    /// Search for a page of records
    pub async fn search(&self, request: &QueryRequest) -> Result<RecordList> {
        trace!(
            structure = %request.structure,
            query = %request.query,
            fields = ?request.fields,
            "Searching records"
        );

        if request.metadata.contains_key("order") {
            return Err(Error::SortUnsupported);
        }

        let structure: Structure = request.structure.parse()?;
        let url = self.build_url(structure, Operation::Search, request)?;
        let payload = self.fetch(&url).await?;
        projector::project_search(structure, &payload, &request.fields)
    }

    /// Resolve a request into the URL it would fetch, without any I/O
    pub fn build_url(
        &self,
        structure: Structure,
        operation: Operation,
        request: &QueryRequest,
    ) -> Result<String> {
        let resolved = template::resolve(&request.query, &request.parameters)?;
        let parsed = parse_query(&resolved)?;
        let routed = router::route(structure, operation, parsed.params)?;

        if !parsed.path.is_empty()
            && parsed.path.trim_matches('/') != routed.path.trim_matches('/')
        {
            debug!(
                query_path = %parsed.path,
                routed_path = %routed.path,
                "Query path differs from routed path, using routed path"
            );
        }

        self.assembler
            .assemble(operation, &routed.path, routed.residual, &request.metadata)
    }

    /// GET a URL and decode the JSON body, mapping error statuses
    async fn fetch(&self, url: &str) -> Result<JsonValue> {
        debug!("Fetching {}", url);
        let response = self.transport.get(url, &self.config.headers()).await?;
        trace!(status = response.status, body = %response.body, "Response received");

        if !response.is_success() {
            return Err(Error::from_status(response.status, url, response.body));
        }

        projector::decode_body(&response.body)
    }
}

impl std::fmt::Debug for HarvestConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestConnector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
