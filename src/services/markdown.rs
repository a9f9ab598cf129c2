use super::rules::{detect_period, detect_transport, extract_duration_minutes, split_title_and_note};
use crate::types::{DayPlan, PlanItem};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// Matches `第1天`, `1天`, `Day 1`, `D1` at the start of a line, after optional `#` markers
static DAY_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^(?:#+\s*)?(?:第?\s*([0-9]+)\s*天|day\s*([0-9]+)|d\s*([0-9]+))\b").unwrap()
});

const BULLET_MARKERS: &[char] = &['-', '•', '*'];

/// A day heading and the byte span of the text that follows it
#[derive(Debug, Clone, PartialEq)]
struct DaySpan {
    number: i64,
    start: usize,
    end: usize,
}

/// Split markdown into exactly `total_days` day plans.
///
/// Never fails: without any day headings the whole document becomes the
/// note of every day, and days the markdown skips come back empty.
pub fn parse_markdown_days(markdown: &str, total_days: u32) -> Vec<DayPlan> {
    let spans = find_day_spans(markdown);
    debug!(
        target: "travel_xml::parser",
        "found {} day headings for {} requested days",
        spans.len(),
        total_days
    );

    if spans.is_empty() {
        debug!(target: "travel_xml::parser", "no day headings, repeating document as notes");
        let note = markdown.trim();
        return (1..=total_days)
            .map(|index| DayPlan::with_note(index, note))
            .collect();
    }

    let mut by_number: HashMap<i64, DayPlan> = HashMap::new();
    for span in &spans {
        let chunk = markdown[span.start..span.end].trim();
        let items = extract_items(chunk);
        let note = items.is_empty().then(|| chunk.to_string());
        let plan = DayPlan {
            index: u32::try_from(span.number).unwrap_or(0),
            items,
            note,
        };
        // Later headings for the same day replace earlier ones
        by_number.insert(span.number, plan);
    }

    (1..=total_days)
        .map(|index| {
            by_number
                .remove(&i64::from(index))
                .unwrap_or_else(|| DayPlan::empty(index))
        })
        .collect()
}

fn find_day_spans(markdown: &str) -> Vec<DaySpan> {
    let mut spans: Vec<DaySpan> = Vec::new();
    for caps in DAY_HEADING_RE.captures_iter(markdown) {
        let Some(whole) = caps.get(0) else { continue };
        if let Some(previous) = spans.last_mut() {
            previous.end = whole.start();
        }
        let number = (1..=3)
            .find_map(|group| caps.get(group))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        spans.push(DaySpan {
            number,
            start: whole.end(),
            end: markdown.len(),
        });
    }
    spans
}

/// Turn every meaningful line of a day chunk into a plan item
pub fn extract_items(chunk: &str) -> Vec<PlanItem> {
    chunk
        .lines()
        .filter_map(|raw| {
            let line = raw.trim().trim_start_matches(BULLET_MARKERS).trim();
            if line.chars().count() < 2 {
                return None;
            }
            Some(extract_item(line))
        })
        .collect()
}

fn extract_item(line: &str) -> PlanItem {
    let (title, note) = split_title_and_note(line);
    PlanItem {
        period: detect_period(line),
        title,
        location: None,
        transport: detect_transport(line).map(str::to_string),
        duration: extract_duration_minutes(line).map(|m| m.to_string()),
        cost: None,
        note,
    }
}
