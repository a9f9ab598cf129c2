//! travel-xml: turn generated markdown travel plans into schema-shaped XML
//!
//! A plan arrives as markdown, optionally with a fenced `json` block holding a
//! structured timeline. The crate parses it into an itinerary model, picks a
//! schema shape (explicit mapping, inferred from an example document, or the
//! built-in default) and renders either a nested days/items document or a flat
//! timeline of events.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use travel_xml::{export_to_file, ExportRequest, TripDetails};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let markdown = std::fs::read_to_string("plan.md")?;
//!     let trip = TripDetails::new("东京", 3)
//!         .with_budget("适中")
//!         .with_preferences("美食, 博物馆");
//!
//!     let request = ExportRequest::new(trip, markdown).with_schema_example("schema/example.xml");
//!     let outcome = export_to_file(&request, "output/travel_plan.xml")?;
//!     println!("rendered {} layout", outcome.mode);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod error;
pub mod schemas;
pub mod services;
pub mod types;

pub use crate::core::{
    build_xml, export_to_file, export_xml, parse_document, save_markdown, save_xml,
    to_xml_string, Element, ExportOutcome, ExportRequest, PlanInput, RenderStrategy,
};
pub use error::{ExportError, Result};
pub use schemas::{resolve_shape, RenderMode, ResolvedShape, SchemaShape, ShapeSource};
pub use services::{extract_structured_plan, parse_markdown_days};
pub use types::{DayPlan, Period, PlanItem, StructuredPlan, TravelPlan, TripDetails};

#[cfg(feature = "cli")]
pub mod cli;
