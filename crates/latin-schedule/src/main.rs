//! Latin Square Scheduling CLI.
//!
//! Commands:
//! - square: Generate and display a Latin square
//! - plan: Expand a plan file into a balanced episode schedule

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use latin_schedule::export::{self, ExportFormat};
use latin_schedule::generator::{GeneratorConfig, LatinSquareGenerator};
use latin_schedule::PlanConfig;

/// Generate a timestamped output path from the given path.
/// e.g., "schedule.json" -> "schedule-20260108-010530.json"
fn timestamped_path(path: &Path, default_ext: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("schedule");
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or(default_ext);
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!("{}-{}.{}", stem, timestamp, ext))
}

#[derive(Parser)]
#[command(name = "latin-schedule")]
#[command(version)]
#[command(about = "Latin square experiment scheduling")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and display a Latin square
    Square {
        /// Square dimension
        #[arg(long, default_value = "4")]
        k: usize,

        /// Random seed (omit for the base cyclic square)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Build a schedule from a plan file
    Plan {
        /// Plan file (TOML, or JSON with a .json extension)
        #[arg(long)]
        config: PathBuf,

        /// Random seed, overriding the plan file
        #[arg(long)]
        seed: Option<u64>,

        /// Output format. Valid: json, table, dataframe
        #[arg(long, default_value = "table")]
        format: String,

        /// Write to a timestamped file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Square { k, seed } => {
            let generator = LatinSquareGenerator::new(GeneratorConfig { k, seed });
            let square = generator.generate()?;

            println!("{}", square);
            match seed {
                Some(seed) => println!("Seed: {}", seed),
                None => println!("Seed: none (base square)"),
            }
        }

        Commands::Plan {
            config,
            seed,
            format,
            output,
        } => {
            let format = parse_format(&format)?;

            let plan = PlanConfig::load(&config)
                .with_context(|| format!("Failed to load plan {}", config.display()))?;
            let plan = override_seed(plan, seed);

            info!(
                k = plan.k(),
                seed = ?plan.seed,
                format = %format,
                "Building schedule"
            );

            let scheduler = plan.into_scheduler()?;
            let rendered = export::render(scheduler.episodes(), format)?;

            match output {
                Some(output) => {
                    let output_path = timestamped_path(&output, format.extension());
                    std::fs::write(&output_path, rendered)
                        .with_context(|| format!("Failed to write {}", output_path.display()))?;

                    println!("\n=== Schedule Complete ===");
                    println!("Episodes: {}", scheduler.len());
                    println!("Saved to: {}", output_path.display());
                }
                None => print!("{}", rendered),
            }
        }
    }

    Ok(())
}

/// Apply a command-line seed on top of the plan file's seed.
fn override_seed(mut plan: PlanConfig, seed: Option<u64>) -> PlanConfig {
    if seed.is_some() {
        plan.seed = seed;
    }
    plan
}

fn parse_format(s: &str) -> Result<ExportFormat> {
    match s.to_lowercase().as_str() {
        "json" => Ok(ExportFormat::Json),
        "table" | "txt" => Ok(ExportFormat::Table),
        "dataframe" | "df" | "polars" => Ok(ExportFormat::Dataframe),
        _ => anyhow::bail!("Unknown format: {}. Valid: json, table, dataframe", s),
    }
}
