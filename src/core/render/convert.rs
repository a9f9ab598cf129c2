//! Conversions between the day/item model and the structured timeline model.

use crate::types::structured::{
    scalar_text, Activity, EventBudget, EventLocation, EventParticipants, MetaBudget, PlanMeta,
    Scalar, StructuredPlan, TimelineEvent,
};
use crate::types::{DayPlan, Period, PlanItem, TravelPlan, TripDetails};
use std::collections::BTreeMap;
use tracing::debug;

const REST_TITLE: &str = "自由活动/休息";
const REST_START: &str = "10:00";
const DEFAULT_CURRENCY: &str = "CNY";

fn text(value: impl Into<String>) -> Option<Scalar> {
    Some(Scalar::Text(value.into()))
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Event type implied by the time of day
pub fn event_type_for(period: Period) -> &'static str {
    match period {
        Period::Morning | Period::Afternoon => "attraction",
        Period::Evening => "dining",
        Period::Other => "custom",
    }
}

/// Activity category implied by the event type
pub fn category_for(event_type: &str) -> &'static str {
    match event_type {
        "attraction" => "景点",
        "dining" => "餐饮",
        _ => "活动",
    }
}

/// Express a day-by-day plan as timeline events.
///
/// Days without items become a single rest event so every day is represented.
pub fn timeline_from_travel_plan(plan: &TravelPlan) -> StructuredPlan {
    let summary = plan
        .summary
        .clone()
        .unwrap_or_else(|| TravelPlan::fallback_summary(&plan.preferences, &plan.budget));

    let meta = PlanMeta {
        title: text(TravelPlan::default_title(&plan.destination, plan.days)),
        summary: text(summary),
        total_days: Some(Scalar::Int(i64::from(plan.days))),
        destinations: non_empty(&plan.destination)
            .map(|d| vec![Scalar::Text(d.to_string())])
            .unwrap_or_default(),
        travel_style: non_empty(&plan.preferences).and_then(text),
        budget: Some(MetaBudget {
            currency: text(DEFAULT_CURRENCY),
            ..Default::default()
        }),
        participants: Vec::new(),
    };

    let timeline = plan
        .daily
        .iter()
        .flat_map(|day| {
            if day.items.is_empty() {
                vec![rest_event(day)]
            } else {
                day.items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| item_event(day.index, idx + 1, item))
                    .collect()
            }
        })
        .collect();

    StructuredPlan {
        meta: Some(meta),
        timeline,
    }
}

fn rest_event(day: &DayPlan) -> TimelineEvent {
    TimelineEvent {
        id: text(format!("d{}-rest", day.index)),
        kind: text("rest"),
        day: Some(Scalar::Int(i64::from(day.index))),
        start: text(REST_START),
        activity: Some(Activity {
            title: text(REST_TITLE),
            description: day.note.as_deref().and_then(non_empty).and_then(text),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Durations are carried as a string of ASCII digits (minutes)
fn is_whole_minutes(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn item_event(day: u32, position: usize, item: &PlanItem) -> TimelineEvent {
    let kind = event_type_for(item.period);
    let (start, end) = item.period.time_window();
    let duration = item.duration.as_deref().filter(|d| is_whole_minutes(d));

    TimelineEvent {
        id: text(format!("d{}-{}", day, position)),
        kind: text(kind),
        day: Some(Scalar::Int(i64::from(day))),
        start: text(start),
        end: text(end),
        duration_minutes: duration.and_then(text),
        activity: Some(Activity {
            title: text(item.title.as_str()),
            description: item.note.as_deref().and_then(text),
            category: text(category_for(kind)),
            highlights: Vec::new(),
        }),
        participants: item.transport.as_deref().map(|mode| EventParticipants {
            shared_transport: text(mode),
            ..Default::default()
        }),
        locations: item
            .location
            .as_deref()
            .map(|name| {
                vec![EventLocation {
                    name: text(name),
                    ..Default::default()
                }]
            })
            .unwrap_or_default(),
        budget: item.cost.as_deref().map(|cost| EventBudget {
            estimated: text(cost),
            ..Default::default()
        }),
    }
}

/// Fill gaps in the structured meta block from the caller's trip details.
pub fn meta_with_trip_defaults(meta: Option<&PlanMeta>, trip: &TripDetails) -> PlanMeta {
    let mut merged = meta.cloned().unwrap_or_default();

    if scalar_text(&merged.title).is_none() {
        merged.title = text(TravelPlan::default_title(&trip.destination, trip.days));
    }
    if scalar_text(&merged.summary).is_none() {
        let summary = trip
            .summary
            .as_deref()
            .and_then(non_empty)
            .map(str::to_string)
            .unwrap_or_else(|| TravelPlan::fallback_summary(&trip.preferences, &trip.budget));
        merged.summary = text(summary);
    }
    if scalar_text(&merged.total_days).is_none() && trip.days > 0 {
        merged.total_days = Some(Scalar::Int(i64::from(trip.days)));
    }
    if merged.destinations.iter().all(|d| d.text().is_none()) {
        merged.destinations = non_empty(&trip.destination)
            .map(|d| vec![Scalar::Text(d.to_string())])
            .unwrap_or_default();
    }
    if scalar_text(&merged.travel_style).is_none() {
        merged.travel_style = non_empty(&trip.preferences).and_then(text);
    }
    merged
}

/// Collapse timeline events back into `trip.days` day plans.
///
/// Events are grouped by their day number; events without a usable day
/// are dropped, as are days outside the requested range.
pub fn travel_plan_from_timeline(plan: &StructuredPlan, trip: &TripDetails) -> TravelPlan {
    let mut by_day: BTreeMap<u32, Vec<PlanItem>> = BTreeMap::new();
    for event in &plan.timeline {
        let Some(day) = scalar_text(&event.day).and_then(|d| d.trim().parse::<u32>().ok()) else {
            debug!(target: "travel_xml::render", "dropping event without a day number");
            continue;
        };
        by_day.entry(day).or_default().push(item_from_event(event));
    }

    let daily = (1..=trip.days)
        .map(|index| match by_day.remove(&index) {
            Some(items) => DayPlan {
                items,
                ..DayPlan::new(index)
            },
            None => DayPlan::empty(index),
        })
        .collect();

    let meta = plan.meta.as_ref();
    let mut travel_plan = TravelPlan::new(trip, daily);
    if non_empty(&travel_plan.destination).is_none() {
        if let Some(city) = meta.and_then(|m| m.destinations.iter().find_map(Scalar::text)) {
            travel_plan.destination = city;
        }
    }
    if non_empty(&travel_plan.preferences).is_none() {
        if let Some(style) = meta.and_then(|m| scalar_text(&m.travel_style)) {
            travel_plan.preferences = style;
        }
    }
    if travel_plan.summary.is_none() {
        travel_plan.summary = meta.and_then(|m| scalar_text(&m.summary));
    }
    travel_plan
}

fn item_from_event(event: &TimelineEvent) -> PlanItem {
    let activity = event.activity.clone().unwrap_or_default();
    let kind = scalar_text(&event.kind);
    let first_location = event.locations.iter().find_map(|l| scalar_text(&l.name));

    let period = scalar_text(&event.start)
        .and_then(|start| Period::from_clock(&start))
        .unwrap_or_default();
    let title = scalar_text(&activity.title)
        .or_else(|| first_location.clone())
        .or_else(|| kind.clone())
        .unwrap_or_else(|| category_for("custom").to_string());
    let transport = event.participants.as_ref().and_then(|p| {
        scalar_text(&p.shared_transport)
            .or_else(|| p.person_refs.iter().find_map(|r| scalar_text(&r.transport)))
    });

    PlanItem {
        period,
        title,
        location: first_location,
        transport,
        duration: scalar_text(&event.duration_minutes).filter(|d| is_whole_minutes(d)),
        cost: event.budget.as_ref().and_then(|b| scalar_text(&b.estimated)),
        note: scalar_text(&activity.description),
    }
}
