use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wx_core::{ErrorInfo, WxError};

use crate::sampler::MarkovChain;
use crate::state::State;
use crate::table::TransitionTable;

/// Upper bound on the candidate list produced from a weight map.
pub const MAX_EXPANDED_CANDIDATES: u64 = 1 << 16;

/// Largest accepted number of steps per run.
pub const MAX_LENGTH: usize = 1_000_000;

/// Largest accepted number of runs per batch.
pub const MAX_RUNS: usize = 10_000;

/// YAML-configurable parameters of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Transition table keyed by state label.
    #[serde(default = "default_states")]
    pub states: BTreeMap<String, CandidateSpec>,
    /// Number of steps taken after the initial state.
    #[serde(default = "default_length")]
    pub length: usize,
    /// Number of independent sequences to generate.
    #[serde(default = "default_runs")]
    pub runs: usize,
    /// Master seed policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_length() -> usize {
    10
}

fn default_runs() -> usize {
    1
}

fn default_states() -> BTreeMap<String, CandidateSpec> {
    TransitionTable::weather()
        .entries()
        .iter()
        .map(|(state, candidates)| {
            (
                state.to_string(),
                CandidateSpec::List(candidates.iter().map(State::to_string).collect()),
            )
        })
        .collect()
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            states: default_states(),
            length: default_length(),
            runs: default_runs(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

/// Candidate next states of one table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateSpec {
    /// Literal list where repetition encodes probability.
    List(Vec<String>),
    /// Integer weights per target, expanded into a repetition list.
    Weights(BTreeMap<String, u32>),
}

impl CandidateSpec {
    /// Expands the entry into its candidate list.
    ///
    /// Weights are reduced by their greatest common divisor first, so
    /// `{sun: 90, rain: 10}` and `{sun: 9, rain: 1}` produce the same list.
    pub fn expand(&self, source: &str) -> Result<Vec<State>, WxError> {
        match self {
            CandidateSpec::List(labels) => labels.iter().map(State::new).collect(),
            CandidateSpec::Weights(weights) => {
                let divisor = weights
                    .values()
                    .copied()
                    .filter(|&weight| weight > 0)
                    .fold(0u32, gcd)
                    .max(1);
                let total: u64 = weights.values().map(|&w| u64::from(w / divisor)).sum();
                if total > MAX_EXPANDED_CANDIDATES {
                    return Err(WxError::Config(
                        ErrorInfo::new("weights-too-large", "weights expand to too many candidates")
                            .with_context("state", source)
                            .with_context("total", total.to_string())
                            .with_hint("use smaller weights with the same ratios"),
                    ));
                }
                let mut candidates = Vec::with_capacity(total as usize);
                for (label, &weight) in weights {
                    let state = State::new(label.as_str())?;
                    for _ in 0..weight / divisor {
                        candidates.push(state.clone());
                    }
                }
                Ok(candidates)
            }
        }
    }
}

/// Rejects batches larger than [`MAX_RUNS`] runs of [`MAX_LENGTH`] steps.
pub fn check_bounds(length: usize, runs: usize) -> Result<(), WxError> {
    if runs > MAX_RUNS {
        return Err(WxError::Config(
            ErrorInfo::new("runs-too-large", "too many runs requested")
                .with_context("runs", runs.to_string())
                .with_context("max", MAX_RUNS.to_string()),
        ));
    }
    if length > MAX_LENGTH {
        return Err(WxError::Config(
            ErrorInfo::new("length-too-large", "sequence length exceeds the supported bound")
                .with_context("length", length.to_string())
                .with_context("max", MAX_LENGTH.to_string()),
        ));
    }
    Ok(())
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed; when absent the caller draws one from OS entropy.
    #[serde(default)]
    pub master_seed: Option<u64>,
    /// Optional free-form label echoed in reports.
    #[serde(default)]
    pub label: Option<String>,
}

impl ChainConfig {
    /// Parses a YAML document. Missing keys fall back to the defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self, WxError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
            .map_err(|err| WxError::Serde(ErrorInfo::new("yaml-decode", err.to_string())))
    }

    /// Reads and parses a YAML file.
    pub fn load(path: &Path) -> Result<Self, WxError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            WxError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String, WxError> {
        serde_yaml::to_string(self)
            .map_err(|err| WxError::Serde(ErrorInfo::new("yaml-encode", err.to_string())))
    }

    /// Builds and validates the transition table.
    pub fn table(&self) -> Result<TransitionTable, WxError> {
        let mut entries = BTreeMap::new();
        for (label, spec) in &self.states {
            let state = State::new(label.as_str())?;
            let candidates = spec.expand(label)?;
            if entries.insert(state.clone(), candidates).is_some() {
                return Err(WxError::Config(
                    ErrorInfo::new("duplicate-state", "state is declared more than once")
                        .with_context("state", state.as_str()),
                ));
            }
        }
        TransitionTable::new(entries)
    }

    /// Validates the whole configuration and returns the chain to sample from.
    pub fn build(&self) -> Result<MarkovChain, WxError> {
        if self.runs == 0 {
            return Err(WxError::Config(
                ErrorInfo::new("zero-runs", "at least one run must be requested")
                    .with_hint("set `runs` to 1 or more"),
            ));
        }
        check_bounds(self.length, self.runs)?;
        Ok(MarkovChain::new(self.table()?))
    }
}
