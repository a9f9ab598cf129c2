use serde::{Deserialize, Serialize};
use std::fmt;

/// Time of day a plan item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Other,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
            Period::Evening => "evening",
            Period::Other => "other",
        }
    }

    /// Default start/end window used when only the period is known
    pub fn time_window(&self) -> (&'static str, &'static str) {
        match self {
            Period::Morning => ("09:00", "12:00"),
            Period::Afternoon => ("13:30", "17:00"),
            Period::Evening => ("18:30", "21:00"),
            Period::Other => ("10:00", "12:00"),
        }
    }

    /// Period for a clock time such as `"18:00"`; `None` when unparseable
    pub fn from_clock(time: &str) -> Option<Self> {
        let hour: u32 = time.trim().split(':').next()?.trim().parse().ok()?;
        let period = match hour {
            5..=11 => Period::Morning,
            12..=17 => Period::Afternoon,
            18..=23 => Period::Evening,
            _ => Period::Other,
        };
        Some(period)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One activity entry within a day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanItem {
    pub period: Period,
    /// Never empty once extracted
    pub title: String,
    pub location: Option<String>,
    /// Free-form mode token (`subway`, `walk`, ...)
    pub transport: Option<String>,
    /// Whole minutes, string-encoded
    pub duration: Option<String>,
    pub cost: Option<String>,
    pub note: Option<String>,
}

impl PlanItem {
    pub fn new(period: Period, title: impl Into<String>) -> Self {
        Self {
            period,
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Items (or a fallback note) for one day of the trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number
    pub index: u32,
    pub items: Vec<PlanItem>,
    /// Raw text kept when no items could be extracted
    pub note: Option<String>,
}

impl DayPlan {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Placeholder for a day the markdown never mentioned
    pub fn empty(index: u32) -> Self {
        Self {
            index,
            items: Vec::new(),
            note: Some(String::new()),
        }
    }

    pub fn with_note(index: u32, note: impl Into<String>) -> Self {
        Self {
            index,
            items: Vec::new(),
            note: Some(note.into()),
        }
    }
}

/// What the caller asked for: the trip inputs that accompany generated text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TripDetails {
    pub destination: String,
    /// Requested number of days
    pub days: u32,
    pub budget: String,
    pub preferences: String,
    pub summary: Option<String>,
    pub tips: Option<String>,
}

impl TripDetails {
    pub fn new(destination: impl Into<String>, days: u32) -> Self {
        Self {
            destination: destination.into(),
            days,
            ..Default::default()
        }
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = budget.into();
        self
    }

    pub fn with_preferences(mut self, preferences: impl Into<String>) -> Self {
        self.preferences = preferences.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_tips(mut self, tips: impl Into<String>) -> Self {
        self.tips = Some(tips.into());
        self
    }
}

/// The normalized itinerary handed to the XML builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPlan {
    pub destination: String,
    pub days: u32,
    pub budget: String,
    pub preferences: String,
    pub summary: Option<String>,
    pub tips: Option<String>,
    pub daily: Vec<DayPlan>,
}

impl TravelPlan {
    pub fn new(trip: &TripDetails, daily: Vec<DayPlan>) -> Self {
        Self {
            destination: trip.destination.clone(),
            days: trip.days,
            budget: trip.budget.clone(),
            preferences: trip.preferences.clone(),
            summary: trip.summary.clone(),
            tips: trip.tips.clone(),
            daily,
        }
    }

    /// Title used when nothing better is known, e.g. `"东京 3天行程"`
    pub fn default_title(destination: &str, days: u32) -> String {
        format!("{} {}天行程", destination, days)
    }

    /// Summary sentence built from preferences and budget
    pub fn fallback_summary(preferences: &str, budget: &str) -> String {
        format!("偏好：{}；预算：{}", preferences, budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_windows() {
        assert_eq!(Period::Morning.time_window(), ("09:00", "12:00"));
        assert_eq!(Period::Afternoon.time_window(), ("13:30", "17:00"));
        assert_eq!(Period::Evening.time_window(), ("18:30", "21:00"));
        assert_eq!(Period::Other.time_window(), ("10:00", "12:00"));
    }

    #[test]
    fn test_period_from_clock() {
        assert_eq!(Period::from_clock("09:30"), Some(Period::Morning));
        assert_eq!(Period::from_clock("14:00"), Some(Period::Afternoon));
        assert_eq!(Period::from_clock("18:00"), Some(Period::Evening));
        assert_eq!(Period::from_clock("02:00"), Some(Period::Other));
        assert_eq!(Period::from_clock("late"), None);
    }

    #[test]
    fn test_empty_day_has_empty_note() {
        let day = DayPlan::empty(2);
        assert_eq!(day.index, 2);
        assert!(day.items.is_empty());
        assert_eq!(day.note.as_deref(), Some(""));
    }

    #[test]
    fn test_period_serializes_lowercase() {
        let item = PlanItem::new(Period::Evening, "晚餐");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["period"], "evening");
    }
}
