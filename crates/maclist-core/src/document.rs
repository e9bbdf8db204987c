//! Document transform - replace every `"data"` entry with the placeholder
//!
//! Operates on an in-memory `serde_json::Value`. File handling lives in
//! [`crate::masker`].

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{MaskError, Result};

/// Top-level key whose array entries get masked
pub const DATA_FIELD: &str = "data";

/// Value substituted for every masked entry
pub const PLACEHOLDER: &str = "AA:AA:AA:AA:AA:AA";

const ROOT: &str = "document root";
const INDENT: &[u8] = b"    ";

/// What to do when the document does not have the expected shape
/// (root is not an object, or `"data"` is present but not an array)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapePolicy {
    /// Fail with [`MaskError::UnexpectedShape`]
    #[default]
    Error,
    /// Leave the value untouched
    Skip,
}

impl FromStr for ShapePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "unknown shape policy '{}' (expected 'error' or 'skip')",
                other
            )),
        }
    }
}

impl fmt::Display for ShapePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Skip => f.write_str("skip"),
        }
    }
}

/// Result of masking one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskOutcome {
    /// No `"data"` key; document left as is
    Absent,
    /// `"data"` array rewritten, length preserved
    Masked { entries: usize },
    /// Unexpected shape left untouched under [`ShapePolicy::Skip`]
    Skipped { found: &'static str },
}

impl MaskOutcome {
    pub fn masked_entries(&self) -> usize {
        match self {
            Self::Masked { entries } => *entries,
            _ => 0,
        }
    }
}

/// Replace every element of the top-level `"data"` array with `placeholder`.
///
/// The array keeps its length; an empty array stays empty. A missing key is
/// never added.
pub fn mask_document(
    doc: &mut Value,
    placeholder: &str,
    policy: ShapePolicy,
) -> Result<MaskOutcome> {
    let map = match doc {
        Value::Object(map) => map,
        other => return unexpected_shape(ROOT, "object", kind(other), policy),
    };

    match map.get_mut(DATA_FIELD) {
        None => {
            tracing::debug!("No '{}' field, passing document through", DATA_FIELD);
            Ok(MaskOutcome::Absent)
        }
        Some(Value::Array(entries)) => {
            for entry in entries.iter_mut() {
                *entry = Value::String(placeholder.to_string());
            }
            Ok(MaskOutcome::Masked {
                entries: entries.len(),
            })
        }
        Some(other) => unexpected_shape(DATA_FIELD, "array", kind(other), policy),
    }
}

fn unexpected_shape(
    field: &str,
    expected: &'static str,
    found: &'static str,
    policy: ShapePolicy,
) -> Result<MaskOutcome> {
    match policy {
        ShapePolicy::Error => Err(MaskError::UnexpectedShape {
            field: field.to_string(),
            expected,
            found,
        }),
        ShapePolicy::Skip => {
            tracing::warn!(
                "Leaving {} untouched: expected {}, found {}",
                field,
                expected,
                found
            );
            Ok(MaskOutcome::Skipped { found })
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serialize with 4-space indentation, no trailing newline
pub fn write_pretty<W: Write>(writer: W, doc: &Value) -> serde_json::Result<()> {
    let mut ser = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    doc.serialize(&mut ser)
}

pub fn to_pretty_string(doc: &Value) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    write_pretty(&mut buf, doc)?;
    String::from_utf8(buf).map_err(serde::ser::Error::custom)
}

/// Masking status of a document's `"data"` array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    pub entries: usize,
    pub unmasked: usize,
}

impl Verification {
    pub fn is_masked(&self) -> bool {
        self.unmasked == 0
    }
}

/// Count `"data"` entries that differ from `placeholder`.
///
/// Returns `None` when the document has no top-level `"data"` array.
pub fn verify_document(doc: &Value, placeholder: &str) -> Option<Verification> {
    let entries = doc.get(DATA_FIELD)?.as_array()?;
    let unmasked = entries
        .iter()
        .filter(|entry| entry.as_str() != Some(placeholder))
        .count();

    Some(Verification {
        entries: entries.len(),
        unmasked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mask(doc: &mut Value) -> Result<MaskOutcome> {
        mask_document(doc, PLACEHOLDER, ShapePolicy::Error)
    }

    #[test]
    fn test_masks_every_entry() {
        let mut doc = json!({"data": ["11:22:33:44:55:66", "AA:BB:CC:DD:EE:FF"]});

        let outcome = mask(&mut doc).unwrap();

        assert_eq!(outcome, MaskOutcome::Masked { entries: 2 });
        assert_eq!(
            doc,
            json!({"data": ["AA:AA:AA:AA:AA:AA", "AA:AA:AA:AA:AA:AA"]})
        );
    }

    #[test]
    fn test_missing_data_passes_through() {
        let mut doc = json!({"other": 1});

        let outcome = mask(&mut doc).unwrap();

        assert_eq!(outcome, MaskOutcome::Absent);
        assert_eq!(doc, json!({"other": 1}));
    }

    #[test]
    fn test_empty_data_stays_empty() {
        let mut doc = json!({"data": []});

        let outcome = mask(&mut doc).unwrap();

        assert_eq!(outcome, MaskOutcome::Masked { entries: 0 });
        assert_eq!(doc, json!({"data": []}));
    }

    #[test]
    fn test_non_string_entries_are_replaced() {
        let mut doc = json!({"data": [1, null, {"mac": "11:22:33:44:55:66"}, ["x"]]});

        mask(&mut doc).unwrap();

        let data = doc["data"].as_array().unwrap();
        assert_eq!(data.len(), 4);
        assert!(data.iter().all(|e| e == PLACEHOLDER));
    }

    #[test]
    fn test_other_fields_untouched() {
        let mut doc = json!({
            "id": "large_maclist",
            "typeName": "MAC_LIST",
            "updated": 1700000000,
            "nested": {"data": ["11:22:33:44:55:66"]},
            "data": ["11:22:33:44:55:66"]
        });

        mask(&mut doc).unwrap();

        assert_eq!(doc["id"], "large_maclist");
        assert_eq!(doc["typeName"], "MAC_LIST");
        assert_eq!(doc["updated"], 1700000000);
        assert_eq!(doc["nested"]["data"][0], "11:22:33:44:55:66");
        assert_eq!(doc["data"][0], PLACEHOLDER);
    }

    #[test]
    fn test_masking_is_idempotent() {
        let mut doc = json!({"id": "x", "data": ["11:22:33:44:55:66", "01:02:03:04:05:06"]});
        mask(&mut doc).unwrap();
        let first = to_pretty_string(&doc).unwrap();

        let mut again: Value = serde_json::from_str(&first).unwrap();
        mask(&mut again).unwrap();

        assert_eq!(to_pretty_string(&again).unwrap(), first);
    }

    #[test]
    fn test_custom_placeholder() {
        let mut doc = json!({"data": ["11:22:33:44:55:66"]});

        mask_document(&mut doc, "00:00:00:00:00:00", ShapePolicy::Error).unwrap();

        assert_eq!(doc, json!({"data": ["00:00:00:00:00:00"]}));
    }

    #[test]
    fn test_non_array_data_is_an_error() {
        let mut doc = json!({"data": "11:22:33:44:55:66"});

        let err = mask(&mut doc).unwrap_err();

        match err {
            MaskError::UnexpectedShape {
                field,
                expected,
                found,
            } => {
                assert_eq!(field, "data");
                assert_eq!(expected, "array");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_array_data_skipped() {
        let mut doc = json!({"data": {"mac": "11:22:33:44:55:66"}});

        let outcome = mask_document(&mut doc, PLACEHOLDER, ShapePolicy::Skip).unwrap();

        assert_eq!(outcome, MaskOutcome::Skipped { found: "object" });
        assert_eq!(doc, json!({"data": {"mac": "11:22:33:44:55:66"}}));
    }

    #[test]
    fn test_non_object_root() {
        let mut doc = json!(["data"]);

        assert!(matches!(
            mask(&mut doc),
            Err(MaskError::UnexpectedShape { found: "array", .. })
        ));

        let outcome = mask_document(&mut doc, PLACEHOLDER, ShapePolicy::Skip).unwrap();
        assert_eq!(outcome, MaskOutcome::Skipped { found: "array" });
        assert_eq!(doc, json!(["data"]));
    }

    #[test]
    fn test_pretty_output_uses_four_spaces() {
        let doc = json!({"data": ["AA:AA:AA:AA:AA:AA"]});

        let out = to_pretty_string(&doc).unwrap();

        assert_eq!(out, "{\n    \"data\": [\n        \"AA:AA:AA:AA:AA:AA\"\n    ]\n}");
    }

    #[test]
    fn test_pretty_output_keeps_key_order() {
        let doc: Value = serde_json::from_str(r#"{"z": 1, "data": [], "a": 2}"#).unwrap();

        let out = to_pretty_string(&doc).unwrap();

        let z = out.find("\"z\"").unwrap();
        let data = out.find("\"data\"").unwrap();
        let a = out.find("\"a\"").unwrap();
        assert!(z < data && data < a);
        assert!(out.contains("\"data\": []"));
    }

    #[test]
    fn test_verify_document() {
        let doc = json!({"data": [PLACEHOLDER, "11:22:33:44:55:66", PLACEHOLDER]});

        let verification = verify_document(&doc, PLACEHOLDER).unwrap();

        assert_eq!(verification.entries, 3);
        assert_eq!(verification.unmasked, 1);
        assert!(!verification.is_masked());
        assert!(verify_document(&json!({"other": 1}), PLACEHOLDER).is_none());
        assert!(
            verify_document(&json!({"data": []}), PLACEHOLDER)
                .unwrap()
                .is_masked()
        );
    }

    #[test]
    fn test_shape_policy_parse() {
        assert_eq!("error".parse::<ShapePolicy>().unwrap(), ShapePolicy::Error);
        assert_eq!("skip".parse::<ShapePolicy>().unwrap(), ShapePolicy::Skip);
        assert!("ignore".parse::<ShapePolicy>().is_err());
        assert_eq!(ShapePolicy::Skip.to_string(), "skip");
    }
}
