//! PDF Stamper CLI - Command line tool for stamping identifiers onto a PDF template.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pdf_stamper_core::{AppConfig, StampOutcome, StampRequest, Stamper, TextColor};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, ValueEnum)]
enum ColorOption {
    Red,
    DarkRed,
    Black,
    Blue,
}

impl From<ColorOption> for TextColor {
    fn from(opt: ColorOption) -> Self {
        match opt {
            ColorOption::Red => Self::red(),
            ColorOption::DarkRed => Self::dark_red(),
            ColorOption::Black => Self::black(),
            ColorOption::Blue => Self::blue(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pdf-stamp")]
#[command(author, version, about = "Stamp two identifiers onto a PDF template", long_about = None)]
struct Args {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Text for the first slot
    #[arg(short = 'a', long, default_value = "")]
    text_a: String,

    /// Text for the second slot
    #[arg(short = 'b', long, default_value = "")]
    text_b: String,

    /// Output PDF file (default: <input>-stamped.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Primary font file, replacing the bundled Hangul font (fallbacks still apply)
    #[arg(long, env = "PDF_STAMPER_FONT")]
    font: Option<PathBuf>,

    /// Stamp text color (overrides config)
    #[arg(long, value_enum)]
    color: Option<ColorOption>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save a copy even when both texts are empty
    #[arg(long)]
    allow_empty: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// `<dir>/<stem>-stamped.pdf` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}-stamped.pdf"))
}

/// Turn parsed arguments into a request, applying the form's input rules.
fn build_request(args: &Args) -> Result<StampRequest> {
    let text_a = args.text_a.trim();
    let text_b = args.text_b.trim();

    if text_a.is_empty() && text_b.is_empty() && !args.allow_empty {
        anyhow::bail!("At least one of --text-a / --text-b is required (or pass --allow-empty)");
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    if output == args.input {
        anyhow::bail!("Output path must differ from the input: {}", output.display());
    }

    Ok(StampRequest::new(&args.input, output)
        .with_text_a(text_a)
        .with_text_b(text_b))
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path).context("Failed to load config file")?
    } else {
        AppConfig::load()
    };

    // Override config with CLI arguments
    if let Some(font) = &args.font {
        config.font.path = Some(font.clone());
    }
    if let Some(color) = &args.color {
        config.template.text_color = color.clone().into();
    }

    Ok(config)
}

fn report(outcome: &StampOutcome) {
    let folder = outcome
        .output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    // CLI output is intentional
    #[allow(clippy::print_stdout)]
    {
        println!("Stamped PDF saved to: {}", outcome.output.display());
        println!("Folder: {}", folder.display());
    }
}

fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Setup logging
    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let request = build_request(&args)?;
    let config = load_config(&args)?;

    let stamper = Stamper::new(config).context("Invalid stamp configuration")?;
    let outcome = stamper
        .stamp(&request)
        .with_context(|| format!("Failed to stamp {}", request.input.display()))?;

    info!(
        "Wrote {} slot(s){}",
        outcome.slots_written.len(),
        if outcome.font_embedded { ", font embedded" } else { "" }
    );
    report(&outcome);

    Ok(())
}
