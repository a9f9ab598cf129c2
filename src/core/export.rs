use super::render::RenderStrategy;
use super::xml::{save_xml, write_file, Element};
use crate::error::Result;
use crate::schemas::{resolve_shape, RenderMode, ShapeSource};
use crate::services::{extract_structured_plan, parse_markdown_days};
use crate::types::{TravelPlan, TripDetails};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything one export needs: trip details, generated markdown and optional schema hints.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub trip: TripDetails,
    pub markdown: String,
    pub schema_map: Option<PathBuf>,
    pub schema_example: Option<PathBuf>,
}

impl ExportRequest {
    pub fn new(trip: TripDetails, markdown: impl Into<String>) -> Self {
        Self {
            trip,
            markdown: markdown.into(),
            schema_map: None,
            schema_example: None,
        }
    }

    pub fn with_schema_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_map = Some(path.into());
        self
    }

    pub fn with_schema_example(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_example = Some(path.into());
        self
    }
}

/// Which input the tree was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanInput {
    Structured,
    Markdown,
}

/// How an export was carried out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportOutcome {
    pub input: PlanInput,
    pub shape_source: ShapeSource,
    pub mode: RenderMode,
}

/// Build the XML tree for a request.
///
/// An embedded JSON plan takes over from the markdown parser when present.
/// Nothing here fails: every missing or malformed input has a fallback.
pub fn export_xml(request: &ExportRequest) -> (Element, ExportOutcome) {
    let resolved = resolve_shape(
        request.schema_map.as_deref(),
        request.schema_example.as_deref(),
    );

    let (root, input, strategy) = match extract_structured_plan(&request.markdown) {
        Some(plan) => {
            let strategy = RenderStrategy::for_structured(&resolved);
            let root = strategy.render_structured(&plan, &request.trip, &resolved.shape);
            (root, PlanInput::Structured, strategy)
        }
        None => {
            let daily = parse_markdown_days(&request.markdown, request.trip.days);
            let plan = TravelPlan::new(&request.trip, daily);
            let strategy = RenderStrategy::for_mode(resolved.shape.mode);
            let root = strategy.render_travel_plan(&plan, &resolved.shape);
            (root, PlanInput::Markdown, strategy)
        }
    };

    let outcome = ExportOutcome {
        input,
        shape_source: resolved.source,
        mode: strategy.mode(),
    };
    info!(
        target: "travel_xml::export",
        "built {:?} plan as {} layout using {} shape",
        outcome.input,
        outcome.mode,
        outcome.shape_source
    );
    (root, outcome)
}

/// Build the tree for `request` and write it to `path`.
pub fn export_to_file(request: &ExportRequest, path: impl AsRef<Path>) -> Result<ExportOutcome> {
    let path = path.as_ref();
    let (root, outcome) = export_xml(request);
    save_xml(&root, path)?;
    info!(target: "travel_xml::export", "wrote {}", path.display());
    Ok(outcome)
}

/// Write the raw markdown verbatim, creating parent directories.
pub fn save_markdown(path: impl AsRef<Path>, markdown: &str) -> Result<()> {
    let path = path.as_ref();
    write_file(path, markdown.as_bytes())?;
    info!(target: "travel_xml::export", "wrote markdown copy {}", path.display());
    Ok(())
}
