//! Turning generated markdown into itinerary data

pub mod embedded_json;
pub mod markdown;
pub mod rules;

pub use embedded_json::extract_structured_plan;
pub use markdown::parse_markdown_days;
