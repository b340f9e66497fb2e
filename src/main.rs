//! slabcam - CLI tool to convert outline drawings to saw G-code.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use slabcam::{
    generate_from_passes, load_settings, parse_drawing_file, plan_passes, validate_drawing,
    validate_settings, Dialect, GenerationParams, Settings,
};

/// Convert 2-D outline drawings to G-code for 5-axis saw machines.
#[derive(Parser, Debug)]
#[command(name = "slabcam")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input drawing (JSON primitive document)
    #[arg(short, long)]
    input: PathBuf,

    /// Settings document (JSON); defaults are used when omitted
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Output program path; its extension is replaced by the dialect's (defaults to the input path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Controller dialect, overriding the settings (Osai or Breton)
    #[arg(short, long)]
    controller: Option<Dialect>,

    /// Skip the smoothing raster
    #[arg(long)]
    no_smoothing: bool,

    /// Validate only, don't generate output
    #[arg(long)]
    validate: bool,

    /// Output planned paths as JSON
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut settings = match &args.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load settings {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(dialect) = args.controller {
        settings.machine_settings.controller = dialect;
    }

    info!("Processing: {}", args.input.display());

    let drawing = parse_drawing_file(&args.input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    info!("Loaded {} primitive(s)", drawing.primitives.len());

    // Validate
    let mut validation = validate_settings(&settings);
    validation.merge(validate_drawing(&drawing));

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    // Validate-only mode
    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    let passes = plan_passes(&drawing, &settings, !args.no_smoothing)
        .with_context(|| format!("Failed to plan {}", drawing.name))?;

    // Debug output
    if args.debug {
        let json = serde_json::to_string_pretty(&passes.iter().collect::<Vec<_>>())?;
        println!("{}", json);
        return Ok(());
    }

    let params = GenerationParams::from_settings(&settings, drawing.name.as_str());
    let program = generate_from_passes(&passes, &params)?;

    // Write output; the dialect's extension always wins
    let output_path = args.output.unwrap_or_else(|| args.input.clone());

    let written = program
        .save(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!("Generated: {}", written.display());

    Ok(())
}
