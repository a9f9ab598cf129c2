//! The optional JSON document a generator may embed in its markdown.
//!
//! Every field is optional: the producer is an external text generator and
//! nothing about its completeness is guaranteed. Scalars accept strings,
//! numbers or booleans and render with their textual form.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A loosely typed scalar value (`1`, `"1"`, `true`, `12.5`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Text form, `None` for blank strings
    pub fn text(&self) -> Option<String> {
        match self {
            Scalar::Text(s) if s.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Bool(b) => *b,
            Scalar::Int(n) => *n != 0,
            Scalar::Float(f) => *f != 0.0,
            Scalar::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            // Whole floats keep their fraction: `1.0` stays "1.0"
            Scalar::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Structured itinerary: a meta block and a flat list of events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StructuredPlan {
    pub meta: Option<PlanMeta>,
    pub timeline: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanMeta {
    pub title: Option<Scalar>,
    pub summary: Option<Scalar>,
    pub total_days: Option<Scalar>,
    pub destinations: Vec<Scalar>,
    pub travel_style: Option<Scalar>,
    pub budget: Option<MetaBudget>,
    pub participants: Vec<Participant>,
}

/// Trip-wide budget figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MetaBudget {
    pub currency: Option<Scalar>,
    pub total_estimate: Option<Scalar>,
    pub per_person: Option<Scalar>,
}

impl MetaBudget {
    pub fn is_empty(&self) -> bool {
        self.currency.is_none() && self.total_estimate.is_none() && self.per_person.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Participant {
    pub id: Option<Scalar>,
    pub name: Option<Scalar>,
    pub role: Option<Scalar>,
    pub departure_from: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: Option<Scalar>,
    /// `attraction`, `dining`, `rest`, `custom`, ...
    #[serde(rename = "type")]
    pub kind: Option<Scalar>,
    pub day: Option<Scalar>,
    pub start: Option<Scalar>,
    pub end: Option<Scalar>,
    pub duration_minutes: Option<Scalar>,
    pub activity: Option<Activity>,
    pub participants: Option<EventParticipants>,
    pub locations: Vec<EventLocation>,
    pub budget: Option<EventBudget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Activity {
    pub title: Option<Scalar>,
    pub description: Option<Scalar>,
    pub category: Option<Scalar>,
    pub highlights: Vec<Scalar>,
}

/// Either everyone travels together (`all` + shared transport/route)
/// or each person is listed with their own transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EventParticipants {
    pub all: Option<Scalar>,
    pub shared_transport: Option<Scalar>,
    pub route: Option<Scalar>,
    pub person_refs: Vec<PersonRef>,
}

impl EventParticipants {
    pub fn is_empty(&self) -> bool {
        self.all.is_none()
            && self.shared_transport.is_none()
            && self.route.is_none()
            && self.person_refs.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PersonRef {
    pub id: Option<Scalar>,
    pub transport: Option<Scalar>,
    pub route: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EventLocation {
    #[serde(rename = "type")]
    pub kind: Option<Scalar>,
    pub name: Option<Scalar>,
    pub address: Option<Scalar>,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Coordinates {
    pub lat: Option<Scalar>,
    pub lng: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EventBudget {
    pub estimated: Option<Scalar>,
    pub category: Option<Scalar>,
    pub per_person: Option<Scalar>,
    pub breakdown: Vec<BreakdownItem>,
}

impl EventBudget {
    pub fn is_empty(&self) -> bool {
        self.estimated.is_none()
            && self.category.is_none()
            && self.per_person.is_none()
            && self.breakdown.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BreakdownItem {
    pub person: Option<Scalar>,
    pub amount: Option<Scalar>,
    pub text: Option<Scalar>,
}

/// Text of an optional scalar, treating blanks as absent
pub fn scalar_text(value: &Option<Scalar>) -> Option<String> {
    value.as_ref().and_then(Scalar::text)
}
