use serde::{Deserialize, Serialize};
use tracing::info;
use wx_core::{derive_substream_seed, RngHandle, WxError};

use crate::config::check_bounds;
use crate::sampler::{MarkovChain, WeatherSequence};
use crate::tally::TransitionTally;

/// One generated sequence together with the seed that reproduces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Zero-based run index.
    pub run: usize,
    /// Seed of the run's RNG, derived from the master seed and `run`.
    pub seed: u64,
    /// Generated states.
    pub sequence: WeatherSequence,
    /// Observed transitions of `sequence`.
    pub transitions: TransitionTally,
}

/// Batch of independent runs sharing a master seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Master seed all run seeds derive from.
    pub master_seed: u64,
    /// Steps per run; each sequence holds `length + 1` states.
    pub length: usize,
    /// Per-run output in run order.
    pub runs: Vec<RunRecord>,
}

impl RunReport {
    /// Transition counts pooled over every run.
    pub fn pooled_transitions(&self) -> TransitionTally {
        let mut pooled = TransitionTally::new();
        for record in &self.runs {
            pooled.merge(&record.transitions);
        }
        pooled
    }
}

/// Seed of run `run` under `master_seed`.
pub fn run_seed(master_seed: u64, run: usize) -> u64 {
    derive_substream_seed(master_seed, run as u64)
}

/// Generates `runs` independent sequences, run `i` seeded with substream `i`.
pub fn generate_runs(
    chain: &MarkovChain,
    length: usize,
    runs: usize,
    master_seed: u64,
) -> Result<RunReport, WxError> {
    check_bounds(length, runs)?;
    let mut records = Vec::with_capacity(runs);
    for run in 0..runs {
        let seed = run_seed(master_seed, run);
        let mut rng = RngHandle::for_substream(master_seed, run as u64);
        let sequence = chain.generate(length, &mut rng)?;
        let transitions = TransitionTally::from_sequence(&sequence);
        records.push(RunRecord {
            run,
            seed,
            sequence,
            transitions,
        });
    }
    info!(runs, length, master_seed, "generated weather runs");
    Ok(RunReport {
        master_seed,
        length,
        runs: records,
    })
}
