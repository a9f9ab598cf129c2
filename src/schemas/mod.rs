//! Schema shapes: which tag and attribute names the XML builder emits.

pub mod inference;
pub mod mapping;
pub mod shape;

pub use inference::{infer_shape, infer_shape_from_file};
pub use mapping::{load_mapping, shape_from_map};
pub use shape::{RenderMode, SchemaShape};

use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// Where the shape for an export came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeSource {
    Map,
    Example,
    Default,
}

impl ShapeSource {
    /// Whether the caller asked for this layout explicitly
    pub fn is_explicit(&self) -> bool {
        !matches!(self, ShapeSource::Default)
    }
}

impl fmt::Display for ShapeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeSource::Map => f.write_str("map"),
            ShapeSource::Example => f.write_str("example"),
            ShapeSource::Default => f.write_str("default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedShape {
    pub shape: SchemaShape,
    pub source: ShapeSource,
}

impl ResolvedShape {
    pub fn default_shape() -> Self {
        Self {
            shape: SchemaShape::default(),
            source: ShapeSource::Default,
        }
    }
}

/// Pick the shape for one export: mapping file, then example document, then default.
///
/// A hint path that does not point at a file is skipped. A mapping file that
/// exists but cannot be read or parsed yields the default shape rather than
/// falling through to the example; an unparsable example does the same.
pub fn resolve_shape(schema_map: Option<&Path>, schema_example: Option<&Path>) -> ResolvedShape {
    if let Some(path) = schema_map.filter(|p| p.is_file()) {
        return match load_mapping(path) {
            Ok(mapping) => {
                info!(target: "travel_xml::schema", "using schema map {}", path.display());
                ResolvedShape {
                    shape: shape_from_map(&mapping),
                    source: ShapeSource::Map,
                }
            }
            Err(err) => {
                warn!(
                    target: "travel_xml::schema",
                    "schema map unusable, using default shape: {}",
                    err
                );
                ResolvedShape::default_shape()
            }
        };
    }

    if let Some(path) = schema_example.filter(|p| p.is_file()) {
        return match infer_shape_from_file(path) {
            Ok(shape) => {
                info!(target: "travel_xml::schema", "inferred shape from {}", path.display());
                ResolvedShape {
                    shape,
                    source: ShapeSource::Example,
                }
            }
            Err(err) => {
                warn!(
                    target: "travel_xml::schema",
                    "schema example unusable, using default shape: {}",
                    err
                );
                ResolvedShape::default_shape()
            }
        };
    }

    ResolvedShape::default_shape()
}
