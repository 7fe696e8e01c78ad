//! Response projection
//!
//! Turns decoded Harvest payloads into uniform records. Every retained value
//! that is not already a string is replaced by its JSON text, so `5` becomes
//! `"5"` and `{"id": 1}` becomes `"{\"id\":1}"`.

use crate::error::{Error, Result};
use crate::router::Structure;
use crate::types::{JsonObject, JsonValue, Record, RecordList};
use tracing::trace;

/// Parse a response body as JSON
pub fn decode_body(body: &str) -> Result<JsonValue> {
    serde_json::from_str(body)
        .map_err(|e| Error::malformed(format!("Failed to parse JSON: {e}")))
}

/// Extract the `total_entries` count from a list payload
pub fn project_count(payload: &JsonValue) -> Result<u64> {
    payload
        .get("total_entries")
        .ok_or_else(|| Error::malformed("missing 'total_entries'"))?
        .as_u64()
        .ok_or_else(|| Error::malformed("'total_entries' is not a non-negative integer"))
}

/// Project a single-object payload
pub fn project_record(payload: &JsonValue, fields: &[String]) -> Result<Record> {
    let object = payload
        .as_object()
        .ok_or_else(|| Error::malformed("expected a JSON object"))?;

    let fields = effective_fields(object, fields);
    Ok(project_object(object, &fields))
}

/// Project a list payload whose records sit under the structure's envelope key
///
/// With no requested fields, the first record's keys become the field list.
pub fn project_search(
    structure: Structure,
    payload: &JsonValue,
    fields: &[String],
) -> Result<RecordList> {
    let key = structure.envelope_key();
    let items = payload
        .get(&key)
        .and_then(JsonValue::as_array)
        .ok_or_else(|| Error::malformed(format!("missing '{key}' array")))?;

    let objects = items
        .iter()
        .map(|item| {
            item.as_object()
                .ok_or_else(|| Error::malformed(format!("'{key}' contains a non-object entry")))
        })
        .collect::<Result<Vec<_>>>()?;

    let fields = match objects.first() {
        Some(first) => effective_fields(first, fields),
        None => fields.to_vec(),
    };

    let records = objects
        .into_iter()
        .map(|object| project_object(object, &fields))
        .collect();

    Ok(RecordList::new(fields, records))
}

/// Requested fields, or every key of `object` in order when none were requested
fn effective_fields(object: &JsonObject, fields: &[String]) -> Vec<String> {
    if fields.is_empty() {
        object.keys().cloned().collect()
    } else {
        fields.to_vec()
    }
}

/// Keep `fields` in order, skipping those absent from `object`
fn project_object(object: &JsonObject, fields: &[String]) -> Record {
    let mut record = Record::new();
    for field in fields {
        if let Some(value) = object.get(field) {
            record.insert(field.clone(), stringify(value));
        }
    }
    record
}

/// String form of a JSON value; strings pass through unquoted
pub fn stringify(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => {
            trace!("Converting {other} to a string");
            other.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_count() {
        assert_eq!(project_count(&json!({"total_entries": 17})).unwrap(), 17);
    }

    #[test]
    fn test_count_non_integral() {
        for payload in [
            json!({"total_entries": "17"}),
            json!({"total_entries": 1.5}),
            json!({"total_entries": -1}),
            json!({"per_page": 100}),
            json!([1, 2]),
        ] {
            let err = project_count(&payload).unwrap_err();
            assert!(matches!(err, Error::MalformedResponse { .. }), "{payload}");
        }
    }

    #[test]
    fn test_record_all_fields_in_source_order() {
        let payload = json!({"id": 5, "name": "Acme", "is_active": true, "currency": "USD"});
        let record = project_record(&payload, &[]).unwrap();

        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["id", "name", "is_active", "currency"]
        );
        assert_eq!(record.get("id"), Some("5"));
        assert_eq!(record.get("is_active"), Some("true"));
        assert_eq!(record.get("name"), Some("Acme"));
    }

    #[test]
    fn test_record_requested_order_and_missing_fields() {
        let payload = json!({"a": 1, "b": 2, "c": 3});
        let record = project_record(&payload, &fields(&["b", "a", "zzz"])).unwrap();

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(record.get("c"), None);
    }

    #[test]
    fn test_record_stringifies_nested_values() {
        let payload = json!({
            "client": {"id": 1, "name": "Acme"},
            "budget": null,
            "tags": ["x", "y"],
            "hours": 1.25
        });
        let record = project_record(&payload, &[]).unwrap();

        assert_eq!(record.get("client"), Some(r#"{"id":1,"name":"Acme"}"#));
        assert_eq!(record.get("budget"), Some("null"));
        assert_eq!(record.get("tags"), Some(r#"["x","y"]"#));
        assert_eq!(record.get("hours"), Some("1.25"));
    }

    #[test]
    fn test_record_requires_object() {
        let err = project_record(&json!([1]), &[]).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn test_search_uses_envelope_key() {
        let payload = json!({
            "time_entries": [
                {"id": 1, "hours": 2.5, "notes": "a"},
                {"id": 2, "hours": 1, "notes": "b"}
            ],
            "total_entries": 2
        });
        let list =
            project_search(Structure::TimeEntries, &payload, &fields(&["notes", "id"])).unwrap();

        assert_eq!(list.fields, fields(&["notes", "id"]));
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.records[0].keys().collect::<Vec<_>>(),
            vec!["notes", "id"]
        );
        assert_eq!(list.records[1].get("id"), Some("2"));
    }

    #[test]
    fn test_search_empty_fields_uses_first_object_keys() {
        let payload = json!({
            "clients": [
                {"id": 1, "name": "Acme"},
                {"id": 2, "name": "Globex", "extra": "x"}
            ]
        });
        let list = project_search(Structure::Clients, &payload, &[]).unwrap();

        assert_eq!(list.fields, fields(&["id", "name"]));
        assert_eq!(list.records[1].get("extra"), None);
    }

    #[test]
    fn test_search_empty_array() {
        let payload = json!({"users": []});
        let list = project_search(Structure::Users, &payload, &fields(&["id"])).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.fields, fields(&["id"]));
    }

    #[test]
    fn test_search_missing_envelope() {
        let payload = json!({"projects": []});
        let err = project_search(Structure::Clients, &payload, &[]).unwrap_err();
        assert!(err.to_string().contains("clients"));
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(r#"{"a":1}"#).unwrap(), json!({"a": 1}));
        assert!(matches!(
            decode_body("<html>").unwrap_err(),
            Error::MalformedResponse { .. }
        ));
    }
}
