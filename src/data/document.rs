//! Shared types for status documents.
//!
//! These types match the JSON format served by the shelf monitor endpoint.
//! They serve as the common data format between the monitor producer and
//! this viewer consumer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A complete status document fetched from the monitor endpoint.
///
/// This is the top-level structure that maps group keys (hardware module
/// identifiers, e.g. `"AMC1"`) to their monitor sets.
pub type StatusDocument = BTreeMap<String, MonitorSet>;

/// Monitored items for a single group, keyed by display element identifier.
pub type MonitorSet = BTreeMap<String, MonitorValue>;

/// A single monitored reading: a display class and a literal value.
///
/// Both fields are optional on the wire. The endpoint normally sends both,
/// but an absent field is accepted and applies as a blank write to the
/// corresponding element property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorValue {
    /// Display class assigned to the target element (e.g. `"label label-success"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Literal content written into the target element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Content>,
}

impl MonitorValue {
    /// The class to write, blank when the field was absent.
    pub fn class_text(&self) -> &str {
        self.class_name.as_deref().unwrap_or("")
    }

    /// The content to write, blank when the field was absent.
    pub fn content_text(&self) -> String {
        self.value.as_ref().map(Content::to_string).unwrap_or_default()
    }
}

/// Element content: the endpoint sends either a JSON string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(s) => f.write_str(s),
            Content::Number(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_document() {
        let json = r#"{
            "AMC1": {
                "temp_elem": { "class_name": "ok", "value": 42 },
                "fw_version": { "class_name": "label label-default", "value": "0xdeadbeef" }
            },
            "AMC2": {
                "daq_status": { "class_name": "label label-success", "value": "RUNNING" }
            }
        }"#;

        let doc: StatusDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.len(), 2);

        let amc1 = doc.get("AMC1").unwrap();
        assert_eq!(amc1.len(), 2);

        let temp = amc1.get("temp_elem").unwrap();
        assert_eq!(temp.class_text(), "ok");
        assert_eq!(temp.content_text(), "42");

        let fw = amc1.get("fw_version").unwrap();
        assert_eq!(fw.value, Some(Content::Text("0xdeadbeef".to_string())));
    }

    #[test]
    fn test_missing_fields_blank() {
        let json = r#"{ "AMC1": { "temp_elem": {} } }"#;

        let doc: StatusDocument = serde_json::from_str(json).unwrap();
        let item = doc.get("AMC1").unwrap().get("temp_elem").unwrap();
        assert_eq!(item.class_text(), "");
        assert_eq!(item.content_text(), "");
    }

    #[test]
    fn test_numeric_content_display() {
        let json = r#"{ "AMC1": { "volt": { "class_name": "ok", "value": 3.3 } } }"#;

        let doc: StatusDocument = serde_json::from_str(json).unwrap();
        let item = doc.get("AMC1").unwrap().get("volt").unwrap();
        assert_eq!(item.content_text(), "3.3");
    }

    #[test]
    fn test_non_object_top_level_rejected() {
        let result: Result<StatusDocument, _> = serde_json::from_str("[1, 2, 3]");
        assert!(result.is_err());
    }
}
