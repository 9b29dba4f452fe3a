use std::error::Error;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;
use wx_chain::{generate_runs, RunRecord};
use wx_core::{entropy_seed, to_canonical_json_pretty};

use super::load_config;

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// YAML file with `states`, `length`, `runs` and `seed_policy`.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Steps after the initial state (overrides the config file).
    #[arg(long)]
    pub length: Option<usize>,
    /// Master seed; drawn from OS entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of independent sequences (overrides the config file).
    #[arg(long)]
    pub runs: Option<usize>,
    /// Output rendering.
    #[arg(long, value_enum, default_value_t = OutputFormat::List)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One ordered list per line, e.g. `[sun, sun, rain]`.
    #[default]
    List,
    /// Canonical JSON report with seeds and transition counts.
    Json,
}

#[derive(Debug, Serialize)]
struct GenerateReport {
    seed: u64,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    runs: Vec<RunRecord>,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    // rendered in full before printing so a failure never leaves partial output
    let output = render(args)?;
    println!("{output}");
    Ok(())
}

fn render(args: &GenerateArgs) -> Result<String, Box<dyn Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(length) = args.length {
        config.length = length;
    }
    if let Some(runs) = args.runs {
        config.runs = runs;
    }
    let chain = config.build()?;
    let master_seed = args
        .seed
        .or(config.seed_policy.master_seed)
        .unwrap_or_else(entropy_seed);
    info!(master_seed, length = config.length, runs = config.runs, "generating");

    let report = generate_runs(&chain, config.length, config.runs, master_seed)?;
    match args.format {
        OutputFormat::List => Ok(report
            .runs
            .iter()
            .map(|record| record.sequence.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let payload = GenerateReport {
                seed: report.master_seed,
                length: report.length,
                label: config.seed_policy.label.clone(),
                runs: report.runs,
            };
            Ok(to_canonical_json_pretty(&payload)?)
        }
    }
}
