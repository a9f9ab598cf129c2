use crate::{
    export_to_file, resolve_shape, save_markdown, ExportError, ExportRequest, StructuredPlan,
    TripDetails,
};
use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::env;
use std::io::Read;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT: &str = "output/travel_plan.xml";

fn command() -> Command {
    Command::new("travel-xml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert a generated markdown travel plan into schema-shaped XML")
        .arg(
            Arg::new("input")
                .help("Markdown plan to convert (`-` or omitted reads stdin)")
                .index(1),
        )
        .arg(
            Arg::new("destination")
                .short('d')
                .long("destination")
                .value_name("CITY")
                .help("Trip destination")
                .default_value("东京"),
        )
        .arg(
            Arg::new("days")
                .short('n')
                .long("days")
                .value_name("COUNT")
                .help("Number of days to emit")
                .default_value("3"),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("BUDGET")
                .help("Budget preference or amount range")
                .default_value("适中"),
        )
        .arg(
            Arg::new("preferences")
                .short('p')
                .long("preferences")
                .value_name("TAGS")
                .help("Comma separated preference tags")
                .default_value("美食, 博物馆"),
        )
        .arg(Arg::new("summary").long("summary").value_name("TEXT"))
        .arg(Arg::new("tips").long("tips").value_name("TEXT"))
        .arg(
            Arg::new("schema-example")
                .short('e')
                .long("schema-example")
                .value_name("FILE")
                .help("Example XML to infer tag names from (or set TRAVEL_XML_SCHEMA_EXAMPLE)"),
        )
        .arg(
            Arg::new("schema-map")
                .short('m')
                .long("schema-map")
                .value_name("FILE")
                .help("JSON mapping of shape fields to tag names (or set TRAVEL_XML_SCHEMA_MAP)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the XML (or set TRAVEL_XML_OUTPUT)"),
        )
        .arg(
            Arg::new("markdown-copy")
                .long("markdown-copy")
                .value_name("FILE")
                .help("Also write the raw markdown here (or set TRAVEL_XML_MARKDOWN_COPY)"),
        )
        .arg(
            Arg::new("print-plan-schema")
                .long("print-plan-schema")
                .help("Print the JSON Schema for embedded structured plans and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print-shape")
                .long("print-shape")
                .help("Print the resolved schema shape as a mapping file and exit")
                .action(ArgAction::SetTrue),
        )
}

/// Flag value, then environment variable
fn flag_or_env(matches: &ArgMatches, id: &str, var: &str) -> Option<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .or_else(|| env::var(var).ok())
        .filter(|value| !value.trim().is_empty())
}

fn read_markdown(input: Option<&String>) -> anyhow::Result<String> {
    match input.map(String::as_str) {
        None | Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read markdown from stdin")?;
            Ok(buffer)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read markdown from {}", path)),
    }
}

fn trip_details(matches: &ArgMatches) -> Result<TripDetails, ExportError> {
    let text = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();
    let days: u32 = text("days")
        .trim()
        .parse()
        .ok()
        .filter(|days| *days > 0)
        .ok_or_else(|| ExportError::Config("--days must be a positive integer".to_string()))?;

    let mut trip = TripDetails::new(text("destination"), days)
        .with_budget(text("budget"))
        .with_preferences(text("preferences"));
    trip.summary = matches.get_one::<String>("summary").cloned();
    trip.tips = matches.get_one::<String>("tips").cloned();
    Ok(trip)
}

/// CLI entry point for the travel-xml tool
pub fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();

    if matches.get_flag("print-plan-schema") {
        let schema = schemars::schema_for!(StructuredPlan);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let schema_map = flag_or_env(&matches, "schema-map", "TRAVEL_XML_SCHEMA_MAP").map(PathBuf::from);
    let schema_example =
        flag_or_env(&matches, "schema-example", "TRAVEL_XML_SCHEMA_EXAMPLE").map(PathBuf::from);

    if matches.get_flag("print-shape") {
        let resolved = resolve_shape(schema_map.as_deref(), schema_example.as_deref());
        info!("Shape source: {}", resolved.source);
        println!("{}", serde_json::to_string_pretty(&resolved.shape)?);
        return Ok(());
    }

    let trip = trip_details(&matches)?;
    let markdown = read_markdown(matches.get_one::<String>("input"))?;
    let output = flag_or_env(&matches, "output", "TRAVEL_XML_OUTPUT")
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let markdown_copy = flag_or_env(&matches, "markdown-copy", "TRAVEL_XML_MARKDOWN_COPY");

    let mut request = ExportRequest::new(trip, markdown);
    request.schema_map = schema_map;
    request.schema_example = schema_example;

    info!("Exporting {} day plan for {}", request.trip.days, request.trip.destination);

    let mut failures = 0;
    match export_to_file(&request, &output) {
        Ok(outcome) => println!(
            "XML written to {} ({} layout, {} shape, from {:?})",
            output, outcome.mode, outcome.shape_source, outcome.input
        ),
        Err(e) => {
            error!("XML export failed: {}", e.to_error_payload());
            failures += 1;
        }
    }

    if let Some(path) = markdown_copy {
        match save_markdown(&path, &request.markdown) {
            Ok(()) => println!("Markdown copy written to {}", path),
            Err(e) => {
                error!("Markdown copy failed: {}", e.to_error_payload());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} output file(s) could not be written", failures));
    }
    Ok(())
}
