//! Build a [`SchemaShape`] from an explicit field-name → tag-name mapping.

use super::shape::SchemaShape;
use crate::error::{ExportError, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Apply a flat JSON object over the default shape.
///
/// Unknown keys and non-string values are skipped.
pub fn shape_from_map(mapping: &Map<String, Value>) -> SchemaShape {
    let mut shape = SchemaShape::default();
    for (key, value) in mapping {
        let applied = value
            .as_str()
            .is_some_and(|text| shape.apply_override(key, text));
        if !applied {
            debug!(target: "travel_xml::schema", "ignoring mapping entry `{}`", key);
        }
    }
    shape
}

/// Read a mapping file. The file must hold a single JSON object.
pub fn load_mapping(path: &Path) -> Result<Map<String, Value>> {
    let raw = std::fs::read_to_string(path).map_err(|err| ExportError::io(path, err))?;
    match serde_json::from_str::<Value>(&raw)? {
        Value::Object(map) => Ok(map),
        other => Err(ExportError::InvalidInput(format!(
            "schema map {} must be a JSON object, found {}",
            path.display(),
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
