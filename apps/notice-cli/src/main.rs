//! Meeting notice PDF generator, command line
//!
//! Reads one meeting record (nested or flat layout) from a file or stdin and
//! writes the notice PDF.
//!
//! ```text
//! notice-cli --json-file data.json --output convocatoria.pdf
//! cat data.json | notice-cli --json-file - --output-dir ./pdfs/
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use notice_pdf::format::notice_file_name;
use notice_pdf::{DisplayZone, NoticeRenderer, RendererConfig};
use notice_types::NoticePayload;
use tracing::{debug, error, info, Level};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the notice generator
#[derive(Parser, Debug)]
#[command(name = "notice-cli")]
#[command(about = "Generate a meeting notice PDF from JSON data")]
struct Args {
    /// JSON file with the meeting record ("-" reads stdin)
    #[arg(short = 'j', long)]
    json_file: String,

    /// Output PDF path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output directory; the file is named after the meeting id
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Directory holding meeting_notice.typ.tera and styles.typ
    #[arg(long, env = "NOTICE_TEMPLATE_DIR")]
    template_dir: Option<PathBuf>,

    /// Zone for printed dates: local, utc or +HH:MM
    #[arg(long, env = "NOTICE_TIME_ZONE", default_value = "local")]
    time_zone: DisplayZone,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(path) => {
            info!("PDF generated successfully: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to generate PDF: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<PathBuf> {
    let input = read_input(&args.json_file)?;
    let payload = NoticePayload::from_json_slice(&input).context("Invalid meeting record")?;
    debug!("Parsed {} record for meeting {}", payload.kind(), payload.meeting_id());

    let output = output_path(args, payload.meeting_id())?;

    let config = args
        .template_dir
        .as_deref()
        .map(RendererConfig::from_template_dir)
        .unwrap_or_default()
        .with_zone(args.time_zone);
    let renderer = NoticeRenderer::new(config);

    let request = payload.into_request();
    info!("Generating PDF for meeting ID: {}", request.meeting.id);
    let pdf = renderer.render(&request).context("Error generating PDF")?;

    fs::write(&output, pdf).with_context(|| format!("Cannot write {}", output.display()))?;
    Ok(output)
}

fn read_input(source: &str) -> anyhow::Result<Vec<u8>> {
    if source == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Cannot read stdin")?;
        Ok(buffer)
    } else {
        fs::read(source).with_context(|| format!("Cannot read {}", source))
    }
}

/// `--output` wins; otherwise the id-derived name in `--output-dir` (created
/// if missing) or the current directory
fn output_path(args: &Args, meeting_id: &str) -> anyhow::Result<PathBuf> {
    if let Some(output) = &args.output {
        return Ok(output.clone());
    }

    let file_name = notice_file_name(meeting_id);
    match &args.output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create {}", dir.display()))?;
            Ok(dir.join(file_name))
        }
        None => Ok(Path::new(".").join(file_name)),
    }
}
