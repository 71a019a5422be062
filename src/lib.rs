//! Catmood: cat body-language analysis from body-part detections.
//!
//! Given an RGB image and the bounding boxes an object detector found for a
//! cat's eyes, mouth and tail, catmood classifies each part with simple image
//! heuristics and maps the combination to an emotion label with a fixed
//! decision table.
//!
//! # Modules
//!
//! - [`model`]: Detections, bounding boxes and body-part states
//! - [`validation`]: Detection validation and issue reporting
//! - [`analysis`]: Region extraction, per-part analyzers and the orchestrator
//! - [`emotion`]: The emotion decision table
//! - [`behavior`]: Summaries over several frames
//! - [`error`]: Error types for catmood operations

pub mod analysis;
pub mod behavior;
pub mod emotion;
pub mod error;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use image::RgbImage;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use analysis::{AnalysisResult, Analyzer, AnalyzerConfig};
use model::{BodyPartState, Detection, EyeState, MouthState, TailPosition};

pub use error::CatMoodError;

/// The catmood CLI application.
#[derive(Parser)]
#[command(name = "catmood")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log debug details to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Analyze an image with its detections and print the emotion.
    Analyze(AnalyzeArgs),
    /// Validate detections against an image without analyzing.
    Validate(ValidateArgs),
    /// Classify a single combination of body-part states.
    Emotion(EmotionArgs),
    /// Print the full emotion decision table.
    Table(TableArgs),
    /// Combine several analysis results into one behavior summary.
    Summarize(SummarizeArgs),
}

/// Image plus detections, shared by analyze and validate.
#[derive(clap::Args)]
struct InputArgs {
    /// Image file (PNG, JPEG or BMP).
    image: PathBuf,

    /// Detections JSON file.
    detections: PathBuf,

    /// Detection boxes are normalized to [0, 1] instead of pixels.
    #[arg(long)]
    normalized: bool,
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Analyzer config file (YAML or JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

#[derive(clap::Args)]
struct ValidateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

#[derive(clap::Args)]
struct EmotionArgs {
    /// Eye state: closed, normal or wide_open.
    #[arg(long)]
    eye: Option<EyeState>,

    /// Mouth state: closed or open.
    #[arg(long)]
    mouth: Option<MouthState>,

    /// Tail position: up, down, left or right.
    #[arg(long)]
    tail: Option<TailPosition>,
}

#[derive(clap::Args)]
struct TableArgs {
    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

#[derive(clap::Args)]
struct SummarizeArgs {
    /// Analysis result JSON files, as written by `analyze --output json`.
    #[arg(required = true)]
    results: Vec<PathBuf>,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the catmood CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CatMoodError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Analyze(args)) => run_analyze(args),
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Emotion(args)) => run_emotion(args),
        Some(Commands::Table(args)) => run_table(args),
        Some(Commands::Summarize(args)) => run_summarize(args),
        None => {
            println!("catmood {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Cat body-language analysis from body-part detections.");
            println!();
            println!("Run 'catmood --help' for usage information.");
            Ok(())
        }
    }
}

/// Installs the stderr log subscriber. Defaults to `warn`, or `debug` with
/// `--verbose`; `RUST_LOG` overrides both.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn check_output_format(output: &str) -> Result<(), CatMoodError> {
    match output {
        "text" | "json" => Ok(()),
        other => Err(CatMoodError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

fn load_image(path: &Path) -> Result<RgbImage, CatMoodError> {
    let image = image::open(path).map_err(|source| CatMoodError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgb8())
}

fn load_detections(
    input: &InputArgs,
    width: u32,
    height: u32,
) -> Result<Vec<Detection>, CatMoodError> {
    if input.normalized {
        model::io_json::read_normalized_detections_json(&input.detections, width, height)
    } else {
        model::io_json::read_detections_json(&input.detections)
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CatMoodError> {
    let json = serde_json::to_string_pretty(value).map_err(CatMoodError::JsonWrite)?;
    println!("{}", json);
    Ok(())
}

fn print_state(state: &BodyPartState) {
    let show = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    println!("  eye:   {}", show(state.eye_state.map(|s| s.to_string())));
    println!("  mouth: {}", show(state.mouth_state.map(|s| s.to_string())));
    println!(
        "  tail:  {}",
        show(state.tail.map(|t| format!("{} ({:.1} deg)", t.position, t.angle)))
    );
}

/// Execute the analyze subcommand.
fn run_analyze(args: AnalyzeArgs) -> Result<(), CatMoodError> {
    check_output_format(&args.output)?;

    let config = match &args.config {
        Some(path) => AnalyzerConfig::from_path(path)?,
        None => AnalyzerConfig::default(),
    };
    let image = load_image(&args.input.image)?;
    let detections = load_detections(&args.input, image.width(), image.height())?;
    debug!(
        "loaded {}x{} image with {} detection(s)",
        image.width(),
        image.height(),
        detections.len()
    );

    let result = Analyzer::new(config).analyze(&image, &detections)?;

    if args.output == "json" {
        return print_json(&result);
    }
    print_result(&result);
    Ok(())
}

fn print_result(result: &AnalysisResult) {
    println!("Analyzed {} detection(s)", result.detections.len());
    for issue in &result.rejected {
        println!("  dropped: {}", issue);
    }
    match (&result.analysis, result.emotion) {
        (Some(state), Some(emotion)) => {
            print_state(state);
            println!("Emotion: {}", emotion);
        }
        _ => println!("No body part could be analyzed"),
    }
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), CatMoodError> {
    check_output_format(&args.output)?;

    let path = &args.input.image;
    let (width, height) =
        image::image_dimensions(path).map_err(|source| CatMoodError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
    let detections = load_detections(&args.input, width, height)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    let report = validation::validate_detections(&detections, width, height, &opts);

    if args.output == "json" {
        print_json(&serde_json::json!({
            "error_count": report.error_count(),
            "warning_count": report.warning_count(),
            "issues": report.issues,
        }))?;
    } else {
        print!("{}", report);
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(CatMoodError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Execute the emotion subcommand.
fn run_emotion(args: EmotionArgs) -> Result<(), CatMoodError> {
    println!("{}", emotion::classify(args.eye, args.mouth, args.tail));
    Ok(())
}

/// Execute the table subcommand.
fn run_table(args: TableArgs) -> Result<(), CatMoodError> {
    check_output_format(&args.output)?;
    let rows = emotion::decision_table();

    if args.output == "json" {
        return print_json(&rows);
    }

    let show = |value: Option<&'static str>| value.unwrap_or("-");
    println!("{:<10} {:<7} {:<6} emotion", "eye", "mouth", "tail");
    for row in &rows {
        println!(
            "{:<10} {:<7} {:<6} {}",
            show(row.eye_state.map(|s| s.as_str())),
            show(row.mouth_state.map(|s| s.as_str())),
            show(row.tail_position.map(|s| s.as_str())),
            row.emotion
        );
    }
    Ok(())
}

/// Execute the summarize subcommand.
fn run_summarize(args: SummarizeArgs) -> Result<(), CatMoodError> {
    check_output_format(&args.output)?;

    let mut states = Vec::with_capacity(args.results.len());
    for path in &args.results {
        let result = model::io_json::read_result_json(path)?;
        match result.analysis {
            Some(state) => states.push(state),
            None => debug!("{} has no analysis, skipped", path.display()),
        }
    }

    let summary = behavior::summarize(&states).ok_or(CatMoodError::NothingToSummarize)?;
    let emotion = emotion::aggregate(&summary);

    if args.output == "json" {
        return print_json(&serde_json::json!({
            "frames": args.results.len(),
            "analyzed_frames": states.len(),
            "analysis": summary,
            "emotion": emotion,
        }));
    }

    println!(
        "Summary of {} frame(s) ({} analyzed)",
        args.results.len(),
        states.len()
    );
    print_state(&summary);
    println!("Emotion: {}", emotion);
    Ok(())
}
