//! Uma Scores
//!
//! Reads a folder of race result screenshots, extracts each horse's score
//! with Tesseract OCR, resolves the OCR'd names against a roster and prints
//! the average score per horse across all screenshots.

mod analysis;
mod batch;
mod config;
mod extract;
mod ocr;
mod paths;
mod roster;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use analysis::Report;
use config::AppConfig;
use extract::{IdentityResolver, MatchPolicy, PolicyPreset, RecordParser, ScoreExtractor};
use roster::Roster;

/// Average per-horse scores across a folder of screenshots.
#[derive(Debug, Parser)]
#[command(name = "uma-scores", version)]
struct Cli {
    /// Folder containing the screenshots
    #[arg(default_value = "screenshots")]
    folder: PathBuf,

    /// Roster of valid names (.json array or one name per line)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Config file (defaults to config.json next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Identity matching preset, overrides the config file policy
    #[arg(long, value_enum)]
    policy: Option<PolicyPreset>,

    /// Worker threads (0 = one per CPU)
    #[arg(long)]
    workers: Option<usize>,

    /// Also write the report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Also draw the report as a PNG bar chart
    #[arg(long)]
    chart: Option<PathBuf>,
}

/// Logs a message to both stderr and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    eprint!("{}", line);
    let log_path = paths::get_logs_dir().join("uma_scores.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = batch::worker::panic_message(panic_info.payload());
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        log(&format!("[PANIC]{} {}", location, msg));
    }));

    let cli = Cli::parse();

    // Ensure output directories exist
    paths::ensure_directories()?;

    let mut config = AppConfig::load(&AppConfig::locate(cli.config.as_deref()));
    if let Some(preset) = cli.policy {
        config.policy = MatchPolicy::from_preset(preset);
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }

    let roster_path = cli.roster.clone().unwrap_or_else(paths::get_default_roster_path);
    let roster = Roster::load(&roster_path)?;
    log(&format!(
        "Loaded {} roster names from {}",
        roster.len(),
        roster_path.display()
    ));

    let report = run(&cli, &config, &roster)?;

    println!("\nAverage Score Per Horse:\n");
    print!("{}", report);

    analysis::write_outputs(&report, cli.json.as_deref(), cli.chart.as_deref())
}

/// Runs recognition and aggregation over the input folder.
fn run(cli: &Cli, config: &AppConfig, roster: &Roster) -> Result<Report> {
    let images = batch::collect_images(&cli.folder, config)?;
    log(&format!(
        "Found {} images in {}",
        images.len(),
        cli.folder.display()
    ));

    let recognizer = ocr::build_recognizer(config)?;
    let matcher = extract::WeightedRatioMatcher;
    let scores = ScoreExtractor::new()?;
    let parser = RecordParser::new(
        &scores,
        IdentityResolver::new(roster, &matcher, &config.policy),
    );
    log(&format!("Match policy: {:?}", config.policy));

    let workers = config.worker_count(images.len());
    log(&format!("Processing with {} workers", workers));

    let (aggregator, summary) = batch::run_batch(&images, workers, &recognizer, &parser);
    log(&format!(
        "Done: {} processed, {} skipped, {} records",
        summary.images_processed, summary.images_skipped, summary.records
    ));

    Ok(Report::from_aggregator(&aggregator))
}
