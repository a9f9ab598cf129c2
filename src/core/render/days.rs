use super::new_root;
use crate::core::xml::Element;
use crate::schemas::SchemaShape;
use crate::types::{DayPlan, PlanItem, TravelPlan};

/// Render the nested days/items layout.
pub fn render(plan: &TravelPlan, shape: &SchemaShape) -> Element {
    let mut root = new_root(shape);
    write_meta(&mut root, plan, shape);

    let days = root.child(&shape.days_tag);
    for day in &plan.daily {
        write_day(days, day, shape);
    }
    root
}

fn write_meta(root: &mut Element, plan: &TravelPlan, shape: &SchemaShape) {
    let parent = match &shape.meta {
        Some(tag) => root.child(tag),
        None => root,
    };

    parent.opt_text_child(&shape.destination, Some(&plan.destination));
    if shape.meta.is_some() {
        parent.text_child(&shape.days_count, plan.days.to_string());
    }
    parent.opt_text_child(&shape.budget, Some(&plan.budget));
    parent.opt_text_child(&shape.preferences, Some(&plan.preferences));
    parent.opt_text_child(&shape.summary, plan.summary.as_deref());
    parent.opt_text_child(&shape.tips, plan.tips.as_deref());
}

fn write_day(days: &mut Element, day: &DayPlan, shape: &SchemaShape) {
    let day_el = days.push(
        Element::new(&shape.day_tag).with_attr(&shape.day_index_attr, day.index.to_string()),
    );
    day_el.opt_text_child(&shape.note, day.note.as_deref());

    let items = day_el.child(&shape.items_tag);
    for item in &day.items {
        write_item(items, item, shape);
    }
}

fn write_item(items: &mut Element, item: &PlanItem, shape: &SchemaShape) {
    let item_el =
        items.push(Element::new(&shape.item_tag).with_attr(&shape.period_attr, item.period.as_str()));
    item_el.text_child(&shape.title, item.title.as_str());
    item_el.opt_text_child(&shape.location, item.location.as_deref());
    item_el.opt_text_child(&shape.transport, item.transport.as_deref());
    item_el.opt_text_child(&shape.duration, item.duration.as_deref());
    item_el.opt_text_child(&shape.cost, item.cost.as_deref());
    item_el.opt_text_child(&shape.note, item.note.as_deref());
}
