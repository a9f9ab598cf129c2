pub mod export;
pub mod render;
pub mod xml;

pub use export::{
    export_to_file, export_xml, save_markdown, ExportOutcome, ExportRequest, PlanInput,
};
pub use render::{build_xml, RenderStrategy};
pub use xml::{parse_document, save_xml, to_xml_string, Element};
