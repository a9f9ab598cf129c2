//! XML builders: one strategy per layout, chosen once per export.

pub mod convert;
pub mod days;
pub mod timeline;

use crate::core::xml::Element;
use crate::schemas::{RenderMode, ResolvedShape, SchemaShape};
use crate::types::{StructuredPlan, TravelPlan, TripDetails};
use tracing::debug;

/// Root element carrying the version attribute and, when set, the default namespace.
pub(crate) fn new_root(shape: &SchemaShape) -> Element {
    let mut root = Element::new(&shape.root);
    if let Some(ns) = &shape.ns {
        root.set_attr("xmlns", ns.as_str());
    }
    root.set_attr("version", shape.version());
    root
}

/// Layout used to build the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    Days,
    Timeline,
}

impl RenderStrategy {
    pub fn for_mode(mode: RenderMode) -> Self {
        match mode {
            RenderMode::Default => RenderStrategy::Days,
            RenderMode::Timeline => RenderStrategy::Timeline,
        }
    }

    /// Structured plans render as a timeline unless the caller explicitly
    /// chose a shape in days layout.
    pub fn for_structured(resolved: &ResolvedShape) -> Self {
        if resolved.source.is_explicit() {
            Self::for_mode(resolved.shape.mode)
        } else {
            RenderStrategy::Timeline
        }
    }

    pub fn mode(&self) -> RenderMode {
        match self {
            RenderStrategy::Days => RenderMode::Default,
            RenderStrategy::Timeline => RenderMode::Timeline,
        }
    }

    /// Build the tree for a heuristically parsed plan
    pub fn render_travel_plan(&self, plan: &TravelPlan, shape: &SchemaShape) -> Element {
        match self {
            RenderStrategy::Days => days::render(plan, shape),
            RenderStrategy::Timeline => {
                timeline::render(&convert::timeline_from_travel_plan(plan), shape)
            }
        }
    }

    /// Build the tree for an embedded structured plan
    pub fn render_structured(
        &self,
        plan: &StructuredPlan,
        trip: &TripDetails,
        shape: &SchemaShape,
    ) -> Element {
        match self {
            RenderStrategy::Days => {
                debug!(target: "travel_xml::render", "folding structured timeline into days");
                days::render(&convert::travel_plan_from_timeline(plan, trip), shape)
            }
            RenderStrategy::Timeline => {
                let merged = StructuredPlan {
                    meta: Some(convert::meta_with_trip_defaults(plan.meta.as_ref(), trip)),
                    timeline: plan.timeline.clone(),
                };
                timeline::render(&merged, shape)
            }
        }
    }
}

/// Render a parsed plan in the layout named by the shape
pub fn build_xml(plan: &TravelPlan, shape: &SchemaShape) -> Element {
    RenderStrategy::for_mode(shape.mode).render_travel_plan(plan, shape)
}
