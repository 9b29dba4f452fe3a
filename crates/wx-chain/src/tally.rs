use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sampler::WeatherSequence;
use crate::state::State;

/// Observed transition counts for one or more sequences.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransitionTally {
    counts: BTreeMap<State, BTreeMap<State, usize>>,
    total: usize,
}

impl TransitionTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every consecutive pair of `sequence`.
    pub fn from_sequence(sequence: &WeatherSequence) -> Self {
        let mut tally = Self::new();
        tally.record_sequence(sequence);
        tally
    }

    /// Adds the transitions of `sequence` to the tally.
    pub fn record_sequence(&mut self, sequence: &WeatherSequence) {
        for (from, to) in sequence.transitions() {
            self.record(from, to);
        }
    }

    /// Adds a single observed transition.
    pub fn record(&mut self, from: &State, to: &State) {
        *self
            .counts
            .entry(from.clone())
            .or_default()
            .entry(to.clone())
            .or_insert(0) += 1;
        self.total += 1;
    }

    /// Times `from -> to` was observed.
    pub fn count(&self, from: &State, to: &State) -> usize {
        self.counts
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Transitions leaving `from`.
    pub fn departures(&self, from: &State) -> usize {
        self.counts
            .get(from)
            .map(|row| row.values().sum())
            .unwrap_or(0)
    }

    /// Share of departures from `from` that went to `to`, if `from` was ever left.
    pub fn frequency(&self, from: &State, to: &State) -> Option<f64> {
        let departures = self.departures(from);
        (departures > 0).then(|| self.count(from, to) as f64 / departures as f64)
    }

    /// Total number of recorded transitions.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Merges another tally into this one.
    pub fn merge(&mut self, other: &TransitionTally) {
        for (from, row) in &other.counts {
            let target = self.counts.entry(from.clone()).or_default();
            for (to, count) in row {
                *target.entry(to.clone()).or_insert(0) += count;
            }
        }
        self.total += other.total;
    }
}
