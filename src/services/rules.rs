//! Keyword and pattern rules for pulling fields out of a single plan line.
//!
//! Rule tables are ordered; the first matching rule wins.

use crate::types::Period;
use regex::Regex;
use std::sync::LazyLock;

/// Period keywords, checked against the lowercased line in order
const PERIOD_RULES: &[(&[&str], Period)] = &[
    (&["上午", "morning"], Period::Morning),
    (&["下午", "afternoon"], Period::Afternoon),
    (&["晚上", "evening", "夜"], Period::Evening),
];

/// Transport keywords mapped to mode tokens
const TRANSPORT_RULES: &[(&str, &str)] = &[
    ("地铁", "subway"),
    ("公交", "bus"),
    ("步行", "walk"),
    ("出租", "taxi"),
    ("打车", "taxi"),
    ("自驾", "drive"),
    ("高铁", "rail"),
    ("火车", "rail"),
    ("飞机", "flight"),
];

static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*(?:小时|h|hr|hrs)").unwrap());

static MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*(?:分钟|min|mins)").unwrap());

static PARENTHETICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)[（(](.*?)[）)]\s*$").unwrap());

pub fn detect_period(line: &str) -> Period {
    let lowered = line.to_lowercase();
    PERIOD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, period)| *period)
        .unwrap_or_default()
}

pub fn detect_transport(line: &str) -> Option<&'static str> {
    TRANSPORT_RULES
        .iter()
        .find(|(keyword, _)| line.contains(keyword))
        .map(|(_, mode)| *mode)
}

/// Duration in whole minutes. Hours are converted and truncated; zero counts as absent.
pub fn extract_duration_minutes(line: &str) -> Option<u32> {
    let minutes = if let Some(caps) = HOURS_RE.captures(line) {
        let hours: f64 = caps[1].parse().ok()?;
        (hours * 60.0).floor() as u32
    } else {
        let caps = MINUTES_RE.captures(line)?;
        caps[1].parse().ok()?
    };
    (minutes > 0).then_some(minutes)
}

/// Split `"西湖（徒步路线）"` or `"西湖 - 徒步路线"` into title and note.
pub fn split_title_and_note(line: &str) -> (String, Option<String>) {
    let text = line.trim().trim_matches('。');

    if let Some(caps) = PARENTHETICAL_RE.captures(text) {
        let title = caps[1].trim();
        let note = caps[2].trim();
        let title = if title.is_empty() { text } else { title };
        let note = (!note.is_empty()).then(|| note.to_string());
        return (title.to_string(), note);
    }

    if let Some((left, right)) = text.split_once('-') {
        let (left, right) = (left.trim(), right.trim());
        if !left.is_empty() && !right.is_empty() {
            return (left.to_string(), Some(right.to_string()));
        }
    }

    (text.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_period() {
        assert_eq!(detect_period("上午：浅草寺"), Period::Morning);
        assert_eq!(detect_period("Afternoon at the museum"), Period::Afternoon);
        assert_eq!(detect_period("夜游外滩"), Period::Evening);
        assert_eq!(detect_period("午餐"), Period::Other);
    }

    #[test]
    fn test_period_first_match_wins() {
        // Both morning and evening keywords present
        assert_eq!(detect_period("上午出发，晚上返回"), Period::Morning);
    }

    #[test]
    fn test_detect_transport_order() {
        assert_eq!(detect_transport("乘地铁前往"), Some("subway"));
        assert_eq!(detect_transport("打车或步行"), Some("walk"));
        assert_eq!(detect_transport("坐高铁"), Some("rail"));
        assert_eq!(detect_transport("骑自行车"), None);
    }

    #[test]
    fn test_duration_hours() {
        assert_eq!(extract_duration_minutes("游览 2小时"), Some(120));
        assert_eq!(extract_duration_minutes("2.5小时 地铁"), Some(150));
        assert_eq!(extract_duration_minutes("about 1.5h"), Some(90));
        assert_eq!(extract_duration_minutes("1.33小时"), Some(79));
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(extract_duration_minutes("步行 20分钟"), Some(20));
        assert_eq!(extract_duration_minutes("walk 45 mins"), Some(45));
        assert_eq!(extract_duration_minutes("no timing here"), None);
        assert_eq!(extract_duration_minutes("0h"), None);
    }

    #[test]
    fn test_split_parenthetical() {
        let (title, note) = split_title_and_note("上午：西湖（徒步路线）");
        assert_eq!(title, "上午：西湖");
        assert_eq!(note.as_deref(), Some("徒步路线"));

        let (title, note) = split_title_and_note("Louvre (book ahead)。");
        assert_eq!(title, "Louvre");
        assert_eq!(note.as_deref(), Some("book ahead"));
    }

    #[test]
    fn test_split_hyphen() {
        let (title, note) = split_title_and_note("晚餐 - 2.5小时 地铁");
        assert_eq!(title, "晚餐");
        assert_eq!(note.as_deref(), Some("2.5小时 地铁"));

        let (title, note) = split_title_and_note("Check-in");
        assert_eq!(title, "Check");
        assert_eq!(note.as_deref(), Some("in"));

        let (title, note) = split_title_and_note("自由活动 -");
        assert_eq!(title, "自由活动 -");
        assert!(note.is_none());
    }

    #[test]
    fn test_split_empty_parenthetical() {
        let (title, note) = split_title_and_note("（备选）");
        assert_eq!(title, "（备选）");
        assert_eq!(note.as_deref(), Some("备选"));
    }
}
