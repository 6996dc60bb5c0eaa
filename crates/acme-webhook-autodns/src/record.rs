//! Zone patch documents
//!
//! `PATCH /zone/{origin}/{nameserver}` takes a document listing records to
//! add and records to remove. A challenge only ever touches one of the two
//! lists, so the constructors below are the only way to build a document.

use serde::Serialize;

/// TTL of published challenge records, in seconds
pub const CHALLENGE_TTL: u32 = 60;

/// Record type of challenge records
pub const TXT: &str = "TXT";

/// A single resource record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRecord {
    /// Owner name
    pub name: String,

    /// Record data
    pub value: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,

    /// Preference, only meaningful for MX/SRV
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pref: Option<i64>,

    /// Time to live in seconds
    pub ttl: u32,
}

impl ResourceRecord {
    /// Challenge TXT record
    pub fn txt(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            record_type: TXT.to_string(),
            pref: None,
            ttl: CHALLENGE_TTL,
        }
    }
}

/// Record additions or removals for one zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordChangeDocument {
    origin: String,

    #[serde(rename = "resourceRecordsAdd", skip_serializing_if = "Vec::is_empty")]
    records_to_add: Vec<ResourceRecord>,

    #[serde(rename = "resourceRecordsRem", skip_serializing_if = "Vec::is_empty")]
    records_to_remove: Vec<ResourceRecord>,
}

impl RecordChangeDocument {
    /// Document adding `record` to `origin`
    pub fn add(origin: impl Into<String>, record: ResourceRecord) -> Self {
        Self {
            origin: origin.into(),
            records_to_add: vec![record],
            records_to_remove: Vec::new(),
        }
    }

    /// Document removing `record` from `origin`
    pub fn remove(origin: impl Into<String>, record: ResourceRecord) -> Self {
        Self {
            origin: origin.into(),
            records_to_add: Vec::new(),
            records_to_remove: vec![record],
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn records_to_add(&self) -> &[ResourceRecord] {
        &self.records_to_add
    }

    pub fn records_to_remove(&self) -> &[ResourceRecord] {
        &self.records_to_remove
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_document_wire_shape() {
        let doc = RecordChangeDocument::add(
            "example.com",
            ResourceRecord::txt("_acme-challenge.example.com", "abc123"),
        );

        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "origin": "example.com",
                "resourceRecordsAdd": [{
                    "name": "_acme-challenge.example.com",
                    "value": "abc123",
                    "type": "TXT",
                    "ttl": 60
                }]
            })
        );
    }

    #[test]
    fn test_remove_document_wire_shape() {
        let doc = RecordChangeDocument::remove(
            "example.com",
            ResourceRecord::txt("_acme-challenge.example.com", "abc123"),
        );

        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("resourceRecordsAdd").is_none());
        assert_eq!(value["resourceRecordsRem"][0]["name"], "_acme-challenge.example.com");
        assert_eq!(value["resourceRecordsRem"][0]["ttl"], 60);
    }

    #[test]
    fn test_never_both_lists() {
        let record = ResourceRecord::txt("a", "b");

        let add = RecordChangeDocument::add("z", record.clone());
        assert_eq!(add.records_to_add().len(), 1);
        assert!(add.records_to_remove().is_empty());

        let remove = RecordChangeDocument::remove("z", record);
        assert!(remove.records_to_add().is_empty());
        assert_eq!(remove.records_to_remove().len(), 1);
    }

    #[test]
    fn test_pref_serialized_when_set() {
        let record = ResourceRecord {
            pref: Some(10),
            ..ResourceRecord::txt("a", "b")
        };
        assert_eq!(serde_json::to_value(&record).unwrap()["pref"], 10);
    }
}
