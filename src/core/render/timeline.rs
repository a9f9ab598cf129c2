use super::new_root;
use crate::core::xml::Element;
use crate::schemas::SchemaShape;
use crate::types::structured::{
    scalar_text, Activity, EventBudget, EventLocation, EventParticipants, MetaBudget, PlanMeta,
    StructuredPlan, TimelineEvent,
};

/// Render the flat timeline layout: a meta block followed by events.
pub fn render(plan: &StructuredPlan, shape: &SchemaShape) -> Element {
    let mut root = new_root(shape);
    if let Some(meta) = &plan.meta {
        write_meta(&mut root, meta, shape);
    }

    let timeline = root.child(&shape.timeline_tag);
    for (idx, event) in plan.timeline.iter().enumerate() {
        write_event(timeline, idx + 1, event, shape);
    }
    root
}

fn write_meta(root: &mut Element, meta: &PlanMeta, shape: &SchemaShape) {
    let parent = match &shape.meta {
        Some(tag) => root.child(tag),
        None => root,
    };

    parent.opt_text_child(&shape.meta_title, scalar_text(&meta.title));
    parent.opt_text_child(&shape.summary, scalar_text(&meta.summary));
    parent.opt_text_child(&shape.meta_total_days, scalar_text(&meta.total_days));

    let cities: Vec<String> = meta.destinations.iter().filter_map(|d| d.text()).collect();
    if !cities.is_empty() {
        let destinations = parent.child(&shape.meta_destinations);
        for city in cities {
            destinations.text_child(&shape.meta_city, city);
        }
    }

    parent.opt_text_child(&shape.meta_travel_style, scalar_text(&meta.travel_style));

    if !meta.participants.is_empty() {
        let people = parent.child(&shape.participants_tag);
        for person in &meta.participants {
            let mut person_el = Element::new(&shape.person_tag);
            if let Some(id) = scalar_text(&person.id) {
                person_el.set_attr(&shape.person_id_attr, id);
            }
            person_el.opt_text_child(&shape.person_name, scalar_text(&person.name));
            person_el.opt_text_child(&shape.person_role, scalar_text(&person.role));
            person_el.opt_text_child(&shape.person_departure, scalar_text(&person.departure_from));
            people.push(person_el);
        }
    }

    if let Some(budget) = meta.budget.as_ref().filter(|b| !b.is_empty()) {
        write_meta_budget(parent, budget, shape);
    }
}

fn write_meta_budget(parent: &mut Element, budget: &MetaBudget, shape: &SchemaShape) {
    let budget_el = parent.child(&shape.meta_budget);
    budget_el.opt_text_child(&shape.meta_currency, scalar_text(&budget.currency));
    budget_el.opt_text_child(&shape.meta_total_estimate, scalar_text(&budget.total_estimate));
    budget_el.opt_text_child(&shape.meta_per_person, scalar_text(&budget.per_person));
}

fn write_event(timeline: &mut Element, position: usize, event: &TimelineEvent, shape: &SchemaShape) {
    let id = scalar_text(&event.id).unwrap_or_else(|| format!("e{}", position));
    let kind = scalar_text(&event.kind).unwrap_or_else(|| "custom".to_string());
    let event_el = timeline.push(
        Element::new(&shape.event_tag)
            .with_attr(&shape.event_id_attr, id)
            .with_attr(&shape.event_type_attr, kind),
    );

    let slot = event_el.child(&shape.timeslot_tag);
    slot.opt_text_child(&shape.timeslot_day, scalar_text(&event.day));
    slot.opt_text_child(&shape.timeslot_start, scalar_text(&event.start));
    slot.opt_text_child(&shape.timeslot_end, scalar_text(&event.end));
    slot.opt_text_child(&shape.timeslot_duration, scalar_text(&event.duration_minutes));

    let activity = event.activity.clone().unwrap_or_default();
    write_activity(event_el, &activity, shape);

    if let Some(participants) = event.participants.as_ref().filter(|p| !p.is_empty()) {
        write_participants(event_el, participants, shape);
    }
    if !event.locations.is_empty() {
        write_locations(event_el, &event.locations, shape);
    }
    if let Some(budget) = event.budget.as_ref().filter(|b| !b.is_empty()) {
        write_event_budget(event_el, budget, shape);
    }
}

fn write_activity(event_el: &mut Element, activity: &Activity, shape: &SchemaShape) {
    let act = event_el.child(&shape.activity_tag);
    act.opt_text_child(&shape.activity_title, scalar_text(&activity.title));
    act.opt_text_child(&shape.activity_desc, scalar_text(&activity.description));
    act.opt_text_child(&shape.activity_category, scalar_text(&activity.category));

    let highlights: Vec<String> = activity.highlights.iter().filter_map(|h| h.text()).collect();
    if !highlights.is_empty() {
        let list = act.child(&shape.highlights_tag);
        for highlight in highlights {
            list.text_child(&shape.highlight_item, highlight);
        }
    }
}

fn write_participants(event_el: &mut Element, participants: &EventParticipants, shape: &SchemaShape) {
    let parts = event_el.child(&shape.participants_tag);
    if participants.all.as_ref().is_some_and(|all| all.is_truthy()) {
        parts.set_attr(&shape.participants_all_attr, "true");
    }

    if participants.person_refs.is_empty() {
        parts.opt_text_child(&shape.shared_transport, scalar_text(&participants.shared_transport));
        parts.opt_text_child(&shape.route, scalar_text(&participants.route));
        return;
    }

    for person in &participants.person_refs {
        let mut person_el = Element::new(&shape.person_ref);
        if let Some(id) = scalar_text(&person.id) {
            person_el.set_attr(&shape.person_id_attr, id);
        }
        person_el.opt_text_child(&shape.transport, scalar_text(&person.transport));
        person_el.opt_text_child(&shape.route, scalar_text(&person.route));
        parts.push(person_el);
    }
}

fn write_locations(event_el: &mut Element, locations: &[EventLocation], shape: &SchemaShape) {
    let list = event_el.child(&shape.locations_tag);
    for location in locations {
        let mut loc_el = Element::new(&shape.location);
        if let Some(kind) = scalar_text(&location.kind) {
            loc_el.set_attr(&shape.location_type_attr, kind);
        }
        loc_el.opt_text_child(&shape.location_name, scalar_text(&location.name));
        loc_el.opt_text_child(&shape.location_address, scalar_text(&location.address));

        if let Some(coords) = &location.coordinates {
            let lat = scalar_text(&coords.lat);
            let lng = scalar_text(&coords.lng);
            if lat.is_some() || lng.is_some() {
                let coords_el = loc_el.child(&shape.coordinates);
                if let Some(lat) = lat {
                    coords_el.set_attr(&shape.lat_attr, lat);
                }
                if let Some(lng) = lng {
                    coords_el.set_attr(&shape.lng_attr, lng);
                }
            }
        }
        list.push(loc_el);
    }
}

fn write_event_budget(event_el: &mut Element, budget: &EventBudget, shape: &SchemaShape) {
    let budget_el = event_el.child(&shape.event_budget);
    budget_el.opt_text_child(&shape.budget_estimated, scalar_text(&budget.estimated));
    budget_el.opt_text_child(&shape.budget_category, scalar_text(&budget.category));
    budget_el.opt_text_child(&shape.budget_per_person, scalar_text(&budget.per_person));

    if budget.breakdown.is_empty() {
        return;
    }
    let breakdown = budget_el.child(&shape.breakdown_tag);
    for entry in &budget.breakdown {
        let mut entry_el = Element::new(&shape.breakdown_item);
        if let Some(person) = scalar_text(&entry.person) {
            entry_el.set_attr(&shape.breakdown_person_attr, person);
        }
        if let Some(amount) = scalar_text(&entry.amount) {
            entry_el.set_attr(&shape.breakdown_amount_attr, amount);
        }
        entry_el.text = scalar_text(&entry.text);
        breakdown.push(entry_el);
    }
}
