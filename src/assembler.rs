//! Request URL assembly
//!
//! Merges routed parameters with request metadata and produces the final
//! request URL with a canonical query string.

use crate::error::{Error, Result};
use crate::query::{serialize_query, QueryParams};
use crate::types::{Operation, StringMap};
use std::num::IntErrorKind;
use tracing::warn;

/// Harvest's maximum `per_page`
pub const MAX_PER_PAGE: u64 = 100;

/// Builds request URLs against a base URL
#[derive(Debug, Clone)]
pub struct RequestAssembler {
    base_url: String,
}

impl RequestAssembler {
    /// Create an assembler for a base URL such as `https://api.harvestapp.com/v2`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Assemble the final URL
    ///
    /// `order` metadata is rejected for searches. `page` metadata overrides a
    /// `page` parameter, and `per_page` is capped at [`MAX_PER_PAGE`].
    pub fn assemble(
        &self,
        operation: Operation,
        path: &str,
        residual: QueryParams,
        metadata: &StringMap,
    ) -> Result<String> {
        if operation == Operation::Search && metadata.contains_key("order") {
            return Err(Error::SortUnsupported);
        }

        let params = merge_params(residual, metadata);
        let path = path.trim_start_matches('/');

        if params.is_empty() {
            Ok(format!("{}/{path}", self.base_url))
        } else {
            Ok(format!(
                "{}/{path}?{}",
                self.base_url,
                serialize_query(&params)
            ))
        }
    }
}

/// Apply metadata and provider limits to routed parameters
pub fn merge_params(mut params: QueryParams, metadata: &StringMap) -> QueryParams {
    if let Some(page) = metadata.get("page") {
        params.insert("page", page.as_str());
    }

    if let Some(per_page) = params.get("per_page") {
        if let Some(capped) = clamp_per_page(per_page) {
            warn!(requested = per_page, "per_page exceeds {MAX_PER_PAGE}, capping");
            params.insert("per_page", capped);
        }
    }

    params
}

/// Capped value for an oversize `per_page`, or `None` when it can pass through
fn clamp_per_page(value: &str) -> Option<String> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > MAX_PER_PAGE => Some(MAX_PER_PAGE.to_string()),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(MAX_PER_PAGE.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    fn meta(pairs: &[(&str, &str)]) -> StringMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn assembler() -> RequestAssembler {
        RequestAssembler::new("https://api.harvestapp.com/v2/")
    }

    #[test]
    fn test_path_only() {
        let url = assembler()
            .assemble(Operation::Search, "/clients", QueryParams::new(), &meta(&[]))
            .unwrap();
        assert_eq!(url, "https://api.harvestapp.com/v2/clients");
    }

    #[test]
    fn test_canonical_query() {
        let url = assembler()
            .assemble(
                Operation::Search,
                "/projects",
                params(&[("is_active", "true"), ("client_id", "2319519")]),
                &meta(&[]),
            )
            .unwrap();
        assert_eq!(
            url,
            "https://api.harvestapp.com/v2/projects?client_id=2319519&is_active=true"
        );
    }

    #[test]
    fn test_page_metadata_overrides_param() {
        let url = assembler()
            .assemble(
                Operation::Search,
                "/users",
                params(&[("page", "1")]),
                &meta(&[("page", "3")]),
            )
            .unwrap();
        assert_eq!(url, "https://api.harvestapp.com/v2/users?page=3");
    }

    #[test_case("75", "75")]
    #[test_case("100", "100")]
    #[test_case("101", "100")]
    #[test_case("2000", "100")]
    #[test_case("+250", "100")]
    #[test_case("00099", "00099")]
    #[test_case("99999999999999999999999", "100")]
    #[test_case("-5", "-5")]
    #[test_case("abc", "abc")]
    fn test_per_page(requested: &str, expected: &str) {
        let merged = merge_params(params(&[("per_page", requested)]), &meta(&[]));
        assert_eq!(merged.get("per_page"), Some(expected));
    }

    #[test]
    fn test_order_rejected_for_search() {
        let err = assembler()
            .assemble(
                Operation::Search,
                "/clients",
                QueryParams::new(),
                &meta(&[("order", "id:ASC")]),
            )
            .unwrap_err();
        assert!(matches!(err, Error::SortUnsupported));
    }

    #[test]
    fn test_order_ignored_for_count() {
        let url = assembler()
            .assemble(
                Operation::Count,
                "/clients",
                QueryParams::new(),
                &meta(&[("order", "id:ASC")]),
            )
            .unwrap();
        assert_eq!(url, "https://api.harvestapp.com/v2/clients");
    }

    #[test]
    fn test_same_params_same_url() {
        let a = assembler()
            .assemble(
                Operation::Search,
                "/time_entries",
                params(&[("from", "2024-01-01"), ("to", "2024-01-31"), ("user_id", "5")]),
                &meta(&[("page", "2")]),
            )
            .unwrap();
        let b = assembler()
            .assemble(
                Operation::Search,
                "/time_entries",
                params(&[
                    ("user_id", "5"),
                    ("page", "9"),
                    ("to", "2024-01-31"),
                    ("from", "2024-01-01"),
                ]),
                &meta(&[("page", "2")]),
            )
            .unwrap();
        assert_eq!(a, b);
    }
}
