use std::fs;
use std::path::Path;
use travel_xml::{
    export_to_file, export_xml, parse_document, Element, ExportRequest, PlanInput, RenderMode,
    ShapeSource, TripDetails,
};

const MARKDOWN: &str = "# 杭州 3 天行程\n\n## 第1天\n- 上午：西湖（徒步路线）\n- 晚餐 - 2.5小时 地铁\n\n## 第2天\n- 下午 灵隐寺 步行 40分钟\n";

fn trip() -> TripDetails {
    TripDetails::new("杭州", 3)
        .with_budget("3000-5000元")
        .with_preferences("美食, 自然")
}

fn export_and_reload(request: &ExportRequest, dir: &Path) -> Element {
    let path = dir.join("out/plan.xml");
    export_to_file(request, &path).unwrap();
    parse_document(&fs::read_to_string(&path).unwrap()).unwrap()
}

#[test]
fn test_markdown_export_round_trips_trip_details() {
    let dir = tempfile::tempdir().unwrap();
    let root = export_and_reload(&ExportRequest::new(trip(), MARKDOWN), dir.path());

    assert_eq!(root.name, "TravelPlan");
    assert_eq!(root.attr("version"), Some("1.0"));

    let meta = root.find_child("Meta").unwrap();
    assert_eq!(meta.child_text("Destination"), Some("杭州"));
    assert_eq!(meta.child_text("Days"), Some("3"));
    assert_eq!(meta.child_text("Budget"), Some("3000-5000元"));
    assert_eq!(meta.child_text("Preferences"), Some("美食, 自然"));

    let days = root.find_child("Days").unwrap();
    assert_eq!(days.children.len(), 3);
    let indexes: Vec<_> = days.children.iter().map(|d| d.attr("index")).collect();
    assert_eq!(indexes, vec![Some("1"), Some("2"), Some("3")]);

    let items = &days.children[0].find_child("Items").unwrap().children;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].attr("period"), Some("morning"));
    assert_eq!(items[0].child_text("Title"), Some("上午：西湖"));
    assert_eq!(items[0].child_text("Note"), Some("徒步路线"));

    assert_eq!(items[1].child_text("Title"), Some("晚餐"));
    assert_eq!(items[1].child_text("Duration"), Some("150"));
    assert_eq!(items[1].child_text("Transport"), Some("subway"));
}

#[test]
fn test_markdown_without_headings() {
    let md = "随便逛逛，吃点好吃的。";
    let (root, outcome) = export_xml(&ExportRequest::new(trip(), md));
    assert_eq!(outcome.input, PlanInput::Markdown);

    let days = root.find_child("Days").unwrap();
    assert_eq!(days.children.len(), 3);
    for day in &days.children {
        assert_eq!(day.child_text("Note"), Some(md));
        assert!(day.find_child("Items").unwrap().children.is_empty());
    }
}

#[test]
fn test_embedded_json_renders_timeline() {
    let md = r#"行程如下：

```json
{
  "meta": {"title": "杭州美食之旅", "budget": {"currency": "CNY", "totalEstimate": 4000}},
  "timeline": [
    {"id": "dinner-1", "type": "dining", "day": 1, "start": "18:30", "end": null,
     "activity": {"title": "西湖醋鱼", "highlights": ["楼外楼", "湖景"]}}
  ]
}
```
"#;
    let dir = tempfile::tempdir().unwrap();
    let request = ExportRequest::new(trip(), md);
    let root = export_and_reload(&request, dir.path());

    let meta = root.find_child("Meta").unwrap();
    assert_eq!(meta.child_text("Title"), Some("杭州美食之旅"));
    assert_eq!(meta.child_text("TotalDays"), Some("3"));
    let budget = meta.find_child("Budget").unwrap();
    assert_eq!(budget.child_text("Currency"), Some("CNY"));
    assert_eq!(budget.child_text("TotalEstimate"), Some("4000"));

    let timeline = root.find_child("Timeline").unwrap();
    assert_eq!(timeline.children.len(), 1);
    let event = &timeline.children[0];
    assert_eq!(event.attr("id"), Some("dinner-1"));
    assert_eq!(event.attr("type"), Some("dining"));

    let slot = event.find_child("TimeSlot").unwrap();
    assert_eq!(slot.child_text("Day"), Some("1"));
    assert_eq!(slot.child_text("StartTime"), Some("18:30"));
    assert!(slot.find_child("EndTime").is_none());

    let activity = event.find_child("Activity").unwrap();
    assert_eq!(activity.child_text("Title"), Some("西湖醋鱼"));
    assert_eq!(activity.find_child("Highlights").unwrap().children.len(), 2);
}

#[test]
fn test_malformed_json_falls_back_to_markdown() {
    let md = format!("```json\n{{\"timeline\": \"soon\"}}\n```\n\n{}", MARKDOWN);
    let (root, outcome) = export_xml(&ExportRequest::new(trip(), md));
    assert_eq!(outcome.input, PlanInput::Markdown);
    assert_eq!(root.find_child("Days").unwrap().children.len(), 3);
}

#[test]
fn test_schema_map_renames_tags() {
    let dir = tempfile::tempdir().unwrap();
    let map = dir.path().join("map.json");
    fs::write(&map, r#"{"root": "Itinerary", "day_tag": "Jour"}"#).unwrap();

    let request = ExportRequest::new(trip(), MARKDOWN).with_schema_map(&map);
    let (root, outcome) = export_xml(&request);
    assert_eq!(outcome.shape_source, ShapeSource::Map);
    assert_eq!(root.name, "Itinerary");

    let days = root.find_child("Days").unwrap();
    assert_eq!(days.children.len(), 3);
    assert!(days.children.iter().all(|d| d.name == "Jour"));
    assert!(days.children[0].find_child("Items").is_some());
}

#[test]
fn test_explicit_days_map_folds_structured_plan() {
    let dir = tempfile::tempdir().unwrap();
    let map = dir.path().join("map.json");
    fs::write(&map, r#"{"mode": "default"}"#).unwrap();

    let md = "```json\n{\"timeline\": [{\"type\": \"sightseeing\", \"day\": 2, \"start\": \"14:00\", \"activity\": {\"title\": \"灵隐寺\"}}]}\n```";
    let request = ExportRequest::new(trip(), md).with_schema_map(&map);
    let (root, outcome) = export_xml(&request);
    assert_eq!(outcome.input, PlanInput::Structured);
    assert_eq!(outcome.mode, RenderMode::Default);

    let days = root.find_child("Days").unwrap();
    assert_eq!(days.children.len(), 3);
    let item = &days.children[1].find_child("Items").unwrap().children[0];
    assert_eq!(item.attr("period"), Some("afternoon"));
    assert_eq!(item.child_text("Title"), Some("灵隐寺"));
}

#[test]
fn test_namespaced_example_shapes_output() {
    let dir = tempfile::tempdir().unwrap();
    let example = dir.path().join("example.xml");
    fs::write(
        &example,
        r#"<?xml version="1.0" encoding="utf-8"?>
<Trip xmlns="urn:travel" version="2.0">
  <Meta><Destination>X</Destination></Meta>
  <Itinerary>
    <Day index="1">
      <Plan><Activity period="morning"><Title>Y</Title></Activity></Plan>
    </Day>
  </Itinerary>
</Trip>"#,
    )
    .unwrap();

    let request = ExportRequest::new(trip(), MARKDOWN).with_schema_example(&example);
    let root = export_and_reload(&request, dir.path());

    assert_eq!(root.name, "Trip");
    assert_eq!(root.attr("xmlns"), Some("urn:travel"));
    assert_eq!(root.attr("version"), Some("2.0"));

    let days = root.find_child("Itinerary").unwrap();
    assert_eq!(days.children.len(), 3);
    let plan = days.children[0].find_child("Plan").unwrap();
    assert_eq!(plan.children[0].name, "Activity");
}

#[test]
fn test_timeline_example_converts_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let example = dir.path().join("timeline.xml");
    fs::write(
        &example,
        r#"<Journey><Meta/><Events><Stop id="a" type="rest"/></Events></Journey>"#,
    )
    .unwrap();

    let request = ExportRequest::new(trip(), MARKDOWN).with_schema_example(&example);
    let (root, outcome) = export_xml(&request);
    assert_eq!(outcome.shape_source, ShapeSource::Example);
    assert_eq!(outcome.mode, RenderMode::Timeline);
    assert_eq!(root.name, "Journey");

    let events = &root.find_child("Events").unwrap().children;
    let ids: Vec<_> = events.iter().filter_map(|e| e.attr("id")).collect();
    assert_eq!(ids, vec!["d1-1", "d1-2", "d2-1", "d3-rest"]);
    assert!(events.iter().all(|e| e.name == "Stop"));

    let rest = &events[3];
    assert_eq!(rest.attr("type"), Some("rest"));
    assert_eq!(
        rest.find_child("Activity").unwrap().child_text("Title"),
        Some("自由活动/休息")
    );
}

#[test]
fn test_missing_hint_files_use_default_shape() {
    let request = ExportRequest::new(trip(), MARKDOWN)
        .with_schema_map("/nonexistent/map.json")
        .with_schema_example("/nonexistent/example.xml");
    let (root, outcome) = export_xml(&request);
    assert_eq!(outcome.shape_source, ShapeSource::Default);
    assert_eq!(root.name, "TravelPlan");
}

#[test]
fn test_broken_example_behaves_like_no_hint() {
    let dir = tempfile::tempdir().unwrap();
    let example = dir.path().join("broken.xml");
    fs::write(&example, "<Plan><Days></Plan>").unwrap();

    let md = r#"```json
{"meta": {"title": "X"}, "timeline": [{"type": "dining", "day": 1, "start": "18:00"}]}
```"#;
    let (hinted, outcome) = export_xml(&ExportRequest::new(trip(), md).with_schema_example(&example));
    assert_eq!(outcome.input, PlanInput::Structured);
    assert_eq!(outcome.shape_source, ShapeSource::Default);
    assert_eq!(outcome.mode, RenderMode::Timeline);

    let (plain, _) = export_xml(&ExportRequest::new(trip(), md));
    assert_eq!(hinted, plain);
    let names: Vec<_> = hinted.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Meta", "Timeline"]);
}
