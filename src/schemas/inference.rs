//! Reverse-engineer a [`SchemaShape`] from an example document.

use super::shape::{RenderMode, SchemaShape};
use crate::core::xml::{local_name, parse_document, Element};
use crate::error::{ExportError, Result};
use std::path::Path;
use tracing::debug;

const TIMELINE_NAMES: &[&str] = &["Timeline", "Events"];
const META_NAMES: &[&str] = &["Meta", "Info", "Header"];
const DAYS_NAMES: &[&str] = &["Days", "Itinerary", "Itineraries", "Schedule", "Schedules"];
const ITEMS_NAMES: &[&str] = &["Items", "Plan", "Plans", "Activities", "ActivityList"];
const DAY_INDEX_ATTRS: &[&str] = &["index", "day"];

/// Infer a shape from the example at `path`.
pub fn infer_shape_from_file(path: &Path) -> Result<SchemaShape> {
    let xml = read_example(path)?;
    infer_shape(&xml)
}

fn read_example(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| ExportError::io(path, err))
}

/// Infer a shape from example XML text.
pub fn infer_shape(xml: &str) -> Result<SchemaShape> {
    let root = parse_document(xml)?;
    Ok(infer_from_root(&root))
}

fn infer_from_root(root: &Element) -> SchemaShape {
    let mut shape = SchemaShape {
        root: root.local_name().to_string(),
        ns: root.namespace_uri().map(str::to_string),
        version_value: root.attr("version").map(str::to_string),
        ..SchemaShape::default()
    };
    shape.meta = root
        .find_any_child_ci(META_NAMES)
        .map(|meta| meta.local_name().to_string());

    if let Some(timeline) = root
        .find_any_child_ci(TIMELINE_NAMES)
        .filter(|timeline| !timeline.children.is_empty())
    {
        shape.mode = RenderMode::Timeline;
        shape.timeline_tag = timeline.local_name().to_string();
        shape.event_tag = timeline.children[0].local_name().to_string();
        debug!(
            target: "travel_xml::schema",
            "inferred timeline layout <{}>/<{}>",
            shape.timeline_tag,
            shape.event_tag
        );
        return shape;
    }

    if let Some(days) = root.find_any_child_ci(DAYS_NAMES) {
        shape.days_tag = days.local_name().to_string();
        if let Some(first_day) = days.children.first() {
            infer_day(&mut shape, first_day);
        }
    }
    debug!(
        target: "travel_xml::schema",
        "inferred days layout <{}>/<{}>/<{}>",
        shape.days_tag,
        shape.day_tag,
        shape.item_tag
    );
    shape
}

fn infer_day(shape: &mut SchemaShape, day: &Element) {
    shape.day_tag = day.local_name().to_string();

    if let Some(attr) = DAY_INDEX_ATTRS.iter().find(|name| {
        day.attributes
            .iter()
            .any(|(key, _)| local_name(key) == **name)
    }) {
        shape.day_index_attr = (*attr).to_string();
    }

    if let Some(items) = day.find_any_child_ci(ITEMS_NAMES) {
        shape.items_tag = items.local_name().to_string();
        if let Some(first_item) = items.children.first() {
            shape.item_tag = first_item.local_name().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_days_layout() {
        let xml = r#"<Voyage version="3.1">
  <Info><Destination>Paris</Destination></Info>
  <schedule>
    <Jour day="1"><Activities><Activite period="morning"/></Activities></Jour>
  </schedule>
</Voyage>"#;
        let shape = infer_shape(xml).unwrap();
        assert_eq!(shape.mode, RenderMode::Default);
        assert_eq!(shape.root, "Voyage");
        assert_eq!(shape.version_value.as_deref(), Some("3.1"));
        assert_eq!(shape.meta.as_deref(), Some("Info"));
        assert_eq!(shape.days_tag, "schedule");
        assert_eq!(shape.day_tag, "Jour");
        assert_eq!(shape.day_index_attr, "day");
        assert_eq!(shape.items_tag, "Activities");
        assert_eq!(shape.item_tag, "Activite");
        // Untouched names keep their defaults
        assert_eq!(shape.title, "Title");
    }

    #[test]
    fn test_infer_timeline_with_namespace() {
        let xml = r#"<tp:TravelPlan xmlns:tp="urn:travel:v2" version="2.1">
  <tp:Meta/>
  <tp:Timeline><tp:Entry id="e1"/></tp:Timeline>
</tp:TravelPlan>"#;
        let shape = infer_shape(xml).unwrap();
        assert_eq!(shape.mode, RenderMode::Timeline);
        assert_eq!(shape.ns.as_deref(), Some("urn:travel:v2"));
        assert_eq!(shape.root, "TravelPlan");
        assert_eq!(shape.timeline_tag, "Timeline");
        assert_eq!(shape.event_tag, "Entry");
        assert_eq!(shape.meta.as_deref(), Some("Meta"));
    }

    #[test]
    fn test_empty_timeline_not_timeline_mode() {
        let xml = r#"<Plan><Timeline/><Days><Day index="1"/></Days></Plan>"#;
        let shape = infer_shape(xml).unwrap();
        assert_eq!(shape.mode, RenderMode::Default);
        assert!(shape.meta.is_none());
        assert_eq!(shape.day_tag, "Day");
    }

    #[test]
    fn test_missing_or_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.xml");
        let err = infer_shape_from_file(&missing).unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");

        let broken = dir.path().join("broken.xml");
        std::fs::write(&broken, "<Plan><Days></Plan>").unwrap();
        let err = infer_shape_from_file(&broken).unwrap_err();
        assert_eq!(err.error_code(), "XML_ERROR");
    }

    #[test]
    fn test_inference_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example.xml");
        std::fs::write(
            &path,
            r#"<Trip xmlns="urn:trip"><Header/><Itinerary><D index="1"><Plan><Step/></Plan></D></Itinerary></Trip>"#,
        )
        .unwrap();
        let first = infer_shape_from_file(&path).unwrap();
        let second = infer_shape_from_file(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.ns.as_deref(), Some("urn:trip"));
        assert_eq!(first.items_tag, "Plan");
        assert_eq!(first.item_tag, "Step");
    }
}
