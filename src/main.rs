// SPDX-License-Identifier: PMPL-1.0-or-later

//! panic-atlas: backtest spatial panic signatures in search-interest data
//!
//! Reads per-event artifacts produced by the trends collector, classifies
//! each event, and reports whether the panic signature holds up across the
//! historical record.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use panic_atlas::config::AtlasConfig;
use panic_atlas::events::{self, DEFAULT_DAYS_BEFORE};
use panic_atlas::regions::RegionTable;
use panic_atlas::report::{self, ReportFormatter, ReportOutputFormat};
use panic_atlas::{backtest, storage};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "panic-atlas")]
#[command(version)]
#[command(about = "Backtest spatial panic signatures in per-state search-interest data")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine config file (JSON or YAML)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Panic score threshold (overrides config)
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// States above threshold required (overrides config)
    #[arg(long, global = true)]
    min_states: Option<usize>,

    /// Affected regions required (overrides config)
    #[arg(long, global = true)]
    min_regions: Option<usize>,

    /// Criteria needed for detection (overrides config)
    #[arg(long, global = true)]
    quorum: Option<u8>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single event artifact
    Analyze {
        /// Event name, e.g. SVB_Collapse (catalogue names match case-insensitively)
        #[arg(value_name = "EVENT")]
        event: String,

        /// Directory holding <EVENT>_data.json artifacts
        #[arg(short, long, default_value = "backtest_data")]
        data_dir: PathBuf,

        /// Print the verdict as JSON instead of the console report
        #[arg(long)]
        json: bool,
    },

    /// Analyze every event artifact and write the summary report
    Backtest {
        /// Directory holding <EVENT>_data.json artifacts
        #[arg(short, long, default_value = "backtest_data")]
        data_dir: PathBuf,

        /// Report path (default: <DATA_DIR>/summary_report.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format (default: from the output extension, else json)
        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,
    },

    /// Recompute panic scores and the summary block of an artifact
    Rescore {
        /// Artifact to rescore
        #[arg(value_name = "ARTIFACT")]
        artifact: PathBuf,

        /// Write here instead of updating the artifact in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the historical event catalogue with analysis windows
    Events {
        /// Days of history before each event
        #[arg(long, default_value_t = DEFAULT_DAYS_BEFORE)]
        days_before: u32,

        /// Mark events that already have an artifact here
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Show the state-to-region partition
    Regions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(&cli)?;
    let table = RegionTable::standard();

    match cli.command {
        Commands::Analyze {
            event,
            data_dir,
            json,
        } => {
            let event = match events::find(&event) {
                Some(known) => known.name.to_string(),
                None => event,
            };
            let (record, result) = backtest::analyze_event(&data_dir, &event, &config, &table)
                .with_context(|| format!("analyzing {}", event))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                ReportFormatter::new().print_event(&record, &result, &config.signature, &table);
            }
        }

        Commands::Backtest {
            data_dir,
            output,
            format,
        } => {
            let report = backtest::run(&data_dir, &config, &table)
                .with_context(|| format!("running backtest over {}", data_dir.display()))?;

            report::print_report(&report);

            let format = format
                .or_else(|| {
                    output
                        .as_ref()
                        .and_then(|p| p.extension())
                        .and_then(|e| e.to_str())
                        .and_then(ReportOutputFormat::parse)
                })
                .unwrap_or(ReportOutputFormat::Json);
            let path = output.unwrap_or_else(|| storage::summary_report_path(&data_dir, format));
            storage::write_report(&report, &path, format)?;
            println!("Summary report saved to: {}", path.display());
        }

        Commands::Rescore { artifact, output } => {
            let raw = storage::read_artifact(&artifact)?;
            let (rescored, record) = storage::rescore(&raw, &config.signature, &table)
                .with_context(|| format!("rescoring {}", artifact.display()))?;

            let path = output.unwrap_or(artifact);
            fs::write(&path, serde_json::to_string_pretty(&rescored)?)
                .with_context(|| format!("writing {}", path.display()))?;
            println!(
                "Rescored {} ({} states) -> {}",
                record.name(),
                record.state_scores.len(),
                path.display()
            );
        }

        Commands::Events {
            days_before,
            data_dir,
        } => {
            println!(
                "  {:<26} {:>10} {:>10} {:>10}  {}",
                "Event", "Start", "End", "Days", "Artifact"
            );
            println!("  {}", "-".repeat(72));
            for event in events::catalog() {
                let window = event.window(days_before).with_context(|| {
                    format!(
                        "{} days before {} ({}) is out of range",
                        days_before, event.name, event.date
                    )
                })?;
                let collected = match &data_dir {
                    Some(dir) => {
                        if storage::artifact_path(dir, event.name).is_file() {
                            "yes"
                        } else {
                            "no"
                        }
                    }
                    None => "-",
                };
                println!(
                    "  {:<26} {:>10} {:>10} {:>10}  {}",
                    event.name,
                    window.window_start,
                    window.window_end(),
                    window.window_days,
                    collected
                );
            }
            println!();
            println!("Keywords: {}", events::BACKTEST_KEYWORDS.join(", "));
        }

        Commands::Regions => {
            table.validate().context("checking region table")?;
            println!("Region table v{}", table.version());
            for region in table.regions() {
                let members: Vec<&str> = region.members.iter().map(String::as_str).collect();
                println!("\n  {} ({})", region.name, members.len());
                println!("    {}", members.join(", "));
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<AtlasConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            AtlasConfig::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => AtlasConfig::default(),
    };

    if let Some(threshold) = cli.threshold {
        config.signature.threshold = threshold;
    }
    if let Some(min_states) = cli.min_states {
        config.signature.min_states = min_states;
    }
    if let Some(min_regions) = cli.min_regions {
        config.signature.min_regions = min_regions;
    }
    if let Some(quorum) = cli.quorum {
        config.signature.detection_quorum = quorum;
    }

    config.validate().context("validating configuration")?;
    log::debug!("engine config: {:?}", config);
    Ok(config)
}
