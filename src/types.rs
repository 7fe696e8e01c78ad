//! Common types used throughout Solidafy Harvest
//!
//! This module contains the request and result shapes shared by the
//! router, projector and connector.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Operation
// ============================================================================

/// The three query operations a connector answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Number of records matching a query
    Count,
    /// A single record
    Retrieve,
    /// A page of records
    Search,
}

impl Operation {
    /// Lowercase operation name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Count => "count",
            Operation::Retrieve => "retrieve",
            Operation::Search => "search",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Query Request
// ============================================================================

/// A caller's query against one structure
///
/// `query` is a template such as `users?is_active=<%=parameter["Active"]%>`.
/// Parameters are kept in insertion order; an empty field list means
/// "every field".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Structure name (e.g. "Task Assignments")
    pub structure: String,
    /// Query template
    #[serde(default)]
    pub query: String,
    /// Named template parameters
    #[serde(default)]
    pub parameters: Vec<(String, String)>,
    /// Requested fields
    #[serde(default)]
    pub fields: Vec<String>,
    /// Request metadata such as `page` or `order`
    #[serde(default)]
    pub metadata: StringMap,
}

impl QueryRequest {
    /// Create a request for a structure
    pub fn new(structure: impl Into<String>) -> Self {
        Self {
            structure: structure.into(),
            ..Default::default()
        }
    }

    /// Set the query template
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Add a template parameter, replacing an earlier value with the same name
    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.parameters.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.parameters.push((name, value)),
        }
        self
    }

    /// Add a requested field
    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
        self
    }

    /// Set all requested fields at once
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Vec::new();
        for field in fields {
            self = self.field(field);
        }
        self
    }

    /// Add a metadata entry
    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Look up a template parameter by name
    pub fn get_parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

// ============================================================================
// Records
// ============================================================================

/// One uniform result row: field name to string value, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: JsonObject,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; values are stored as JSON strings
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(field.into(), JsonValue::String(value.into()));
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(JsonValue::as_str)
    }

    /// Field names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Field/value pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str().unwrap_or_default()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of a search: the field list and the matching records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordList {
    /// Fields present in each record
    pub fields: Vec<String>,
    /// Records in response order
    pub records: Vec<Record>,
}

impl RecordList {
    /// Create a record list
    pub fn new(fields: Vec<String>, records: Vec<Record>) -> Self {
        Self { fields, records }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
