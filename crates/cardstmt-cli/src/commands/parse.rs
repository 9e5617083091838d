//! Parse command - upload one statement and show the extracted details.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardstmt_core::view::SPINNER_TEXT;
use cardstmt_core::{
    ExtractedRecord, HttpParseService, InMemoryFile, WorkflowController, WorkflowState,
    shape_record,
};

use super::config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Statement file (PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Declared media type (default: derived from the extension)
    #[arg(long)]
    media_type: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Parsing service endpoint (overrides the config file)
    #[arg(short, long)]
    endpoint: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Raw record as JSON
    Json,
    /// Labelled rows as CSV
    Csv,
    /// Labelled rows as plain text
    Text,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = config::load(config_path)?;
    if let Some(endpoint) = &args.endpoint {
        config.service.endpoint = endpoint.clone();
    }
    config.validate()?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let mut file = InMemoryFile::from_path(&args.input)?;
    if let Some(media_type) = &args.media_type {
        file = file.with_media_type(media_type.as_str());
    }
    info!("Selected {} ({} bytes)", args.input.display(), file.content().len());

    let mut controller = WorkflowController::new();
    controller.select_from_picker([file])?;

    let service = HttpParseService::new(&config.service)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message(SPINNER_TEXT);
    pb.enable_steady_tick(Duration::from_millis(100));

    let state = controller.trigger_parse(&service).await;
    pb.finish_and_clear();

    let record = match state {
        WorkflowState::Success(record) => record,
        WorkflowState::Failed(message) => anyhow::bail!("{}", message),
        other => anyhow::bail!("Parse did not complete (state: {})", other.name()),
    };

    let output = format_record(record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total time: {:?}", start.elapsed());

    Ok(())
}

fn format_record(record: &ExtractedRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &ExtractedRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    for field in shape_record(record) {
        wtr.serialize(&field)?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(record: &ExtractedRecord) -> String {
    let mut output = String::from("Extracted Details\n");

    for field in shape_record(record) {
        output.push_str(&format!("  {}: {}\n", field.label, field.value));
    }

    output
}
