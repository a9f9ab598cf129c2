use crate::types::StructuredPlan;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

static JSON_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").unwrap());

/// Find the first fenced `json` block holding an object and parse it.
///
/// Malformed JSON, or JSON that does not fit the structured plan shape,
/// counts as "not found".
pub fn extract_structured_plan(markdown: &str) -> Option<StructuredPlan> {
    let caps = JSON_FENCE_RE.captures(markdown)?;
    let raw = caps.get(1)?.as_str();

    let mut value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(target: "travel_xml::json", "ignoring malformed embedded JSON: {}", err);
            return None;
        }
    };
    strip_nulls(&mut value);

    let parsed: Result<StructuredPlan, _> = serde_path_to_error::deserialize(value);
    match parsed {
        Ok(plan) => {
            debug!(
                target: "travel_xml::json",
                "embedded plan found with {} timeline events",
                plan.timeline.len()
            );
            Some(plan)
        }
        Err(err) => {
            let path = err.path().to_string();
            warn!(
                target: "travel_xml::json",
                "embedded JSON does not describe a plan at {}: {}",
                if path.is_empty() { "<root>" } else { path.as_str() },
                err.inner()
            );
            None
        }
    }
}

/// Drop `null` members so optional fields fall back to their defaults
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::structured::scalar_text;

    #[test]
    fn test_extracts_first_block() {
        let md = "前言\n```json\n{\"meta\":{\"title\":\"X\"},\"timeline\":[{\"type\":\"dining\",\"day\":1,\"start\":\"18:00\"}]}\n```\n\n```json\n{\"meta\":{\"title\":\"Y\"}}\n```";
        let plan = extract_structured_plan(md).unwrap();
        let meta = plan.meta.unwrap();
        assert_eq!(scalar_text(&meta.title).as_deref(), Some("X"));
        assert_eq!(plan.timeline.len(), 1);
        assert_eq!(scalar_text(&plan.timeline[0].start).as_deref(), Some("18:00"));
        assert!(plan.timeline[0].end.is_none());
    }

    #[test]
    fn test_malformed_json_is_not_found() {
        let md = "```json\n{\"meta\": {\"title\": }\n```";
        assert!(extract_structured_plan(md).is_none());
    }

    #[test]
    fn test_wrong_shape_is_not_found() {
        let md = "```json\n{\"timeline\": \"tomorrow\"}\n```";
        assert!(extract_structured_plan(md).is_none());
    }

    #[test]
    fn test_untagged_fence_ignored() {
        let md = "```\n{\"timeline\": []}\n```";
        assert!(extract_structured_plan(md).is_none());
        assert!(extract_structured_plan("# Day 1\n- 西湖").is_none());
    }

    #[test]
    fn test_nulls_are_absent() {
        let md = "```json\n{\"meta\": null, \"timeline\": [{\"day\": null, \"locations\": null}]}\n```";
        let plan = extract_structured_plan(md).unwrap();
        assert!(plan.meta.is_none());
        assert!(plan.timeline[0].day.is_none());
        assert!(plan.timeline[0].locations.is_empty());
    }
}
