#![deny(missing_docs)]

//! First-order Markov chain sampler for synthetic daily weather.
//!
//! A [`TransitionTable`] maps each [`State`] to a list of candidate next states
//! whose repetition encodes probability. [`MarkovChain::generate`] draws a
//! uniform initial state and then walks the table for a fixed number of steps
//! using an injected, seedable RNG.

/// YAML configuration schema and defaults.
pub mod config;
/// Sequence generation: initial state, single steps and full walks.
pub mod sampler;
/// Batches of independent runs derived from a master seed.
pub mod runs;
/// Weather state labels.
pub mod state;
/// Validated transition tables.
pub mod table;
/// Observed transition counts.
pub mod tally;

pub use config::{check_bounds, CandidateSpec, ChainConfig, SeedPolicy, MAX_LENGTH, MAX_RUNS};
pub use runs::{generate_runs, run_seed, RunRecord, RunReport};
pub use sampler::{MarkovChain, WeatherSequence};
pub use state::State;
pub use table::TransitionTable;
pub use tally::TransitionTally;
