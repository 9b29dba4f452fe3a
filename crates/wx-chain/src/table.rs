use std::collections::BTreeMap;

use tracing::debug;
use wx_core::{ErrorInfo, WxError};

use crate::state::State;

/// Immutable transition table of a first-order chain.
///
/// Each state maps to an ordered list of candidate next states. The
/// multiplicity of a candidate encodes its probability: a state listed `k`
/// times in a list of length `m` is drawn with probability `k / m`. The list is
/// kept literally and sampled by uniform index.
///
/// Construction guarantees the table is non-empty, every candidate list is
/// non-empty and every candidate is itself a key (the state graph is closed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    entries: BTreeMap<State, Vec<State>>,
    order: Vec<State>,
}

impl TransitionTable {
    /// Validates and wraps the provided entries.
    pub fn new(entries: BTreeMap<State, Vec<State>>) -> Result<Self, WxError> {
        if entries.is_empty() {
            return Err(WxError::Config(
                ErrorInfo::new("empty-table", "transition table defines no states")
                    .with_hint("declare at least one state with its candidate list"),
            ));
        }
        for (state, candidates) in &entries {
            if candidates.is_empty() {
                return Err(WxError::Config(
                    ErrorInfo::new("empty-candidates", "state has no candidate next states")
                        .with_context("state", state.as_str()),
                ));
            }
            if let Some(target) = candidates.iter().find(|next| !entries.contains_key(*next)) {
                return Err(WxError::Config(
                    ErrorInfo::new("unknown-target", "candidate is not a state of the table")
                        .with_context("state", state.as_str())
                        .with_context("target", target.as_str())
                        .with_hint("every candidate must also be declared as a key"),
                ));
            }
        }
        let order = entries.keys().cloned().collect();
        debug!(states = entries.len(), "validated transition table");
        Ok(Self { entries, order })
    }

    /// The embedded weather table: sun stays sunny 9 times out of 10, rain is a coin flip.
    pub fn weather() -> Self {
        let sun = State::sun();
        let rain = State::rain();
        let mut sunny = vec![sun.clone(); 9];
        sunny.push(rain.clone());
        let entries = BTreeMap::from([
            (sun.clone(), sunny),
            (rain.clone(), vec![sun, rain]),
        ]);
        let order = entries.keys().cloned().collect();
        Self { entries, order }
    }

    /// Number of states in the table.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// States in their canonical (sorted) order.
    pub fn states(&self) -> &[State] {
        &self.order
    }

    /// Returns the state at `index` in canonical order.
    pub(crate) fn state_at(&self, index: usize) -> &State {
        &self.order[index]
    }

    /// Returns whether `state` is a key of the table.
    pub fn contains(&self, state: &State) -> bool {
        self.entries.contains_key(state)
    }

    /// Candidate list for `state`, with repetitions.
    pub fn candidates(&self, state: &State) -> Result<&[State], WxError> {
        self.entries
            .get(state)
            .map(Vec::as_slice)
            .ok_or_else(|| unknown_state(state))
    }

    /// Probability of moving from `from` to `to` in one step.
    pub fn probability(&self, from: &State, to: &State) -> Result<f64, WxError> {
        let candidates = self.candidates(from)?;
        let hits = candidates.iter().filter(|next| *next == to).count();
        Ok(hits as f64 / candidates.len() as f64)
    }

    /// Explicit next-state distribution of `from`, omitting impossible targets.
    pub fn distribution(&self, from: &State) -> Result<BTreeMap<State, f64>, WxError> {
        let candidates = self.candidates(from)?;
        let mut counts: BTreeMap<State, usize> = BTreeMap::new();
        for next in candidates {
            *counts.entry(next.clone()).or_insert(0) += 1;
        }
        let total = candidates.len() as f64;
        Ok(counts
            .into_iter()
            .map(|(state, count)| (state, count as f64 / total))
            .collect())
    }

    /// Read-only view of the raw entries.
    pub fn entries(&self) -> &BTreeMap<State, Vec<State>> {
        &self.entries
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::weather()
    }
}

pub(crate) fn unknown_state(state: &State) -> WxError {
    WxError::Lookup(
        ErrorInfo::new("unknown-state", "state is not defined by the transition table")
            .with_context("state", state.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(label: &str) -> State {
        State::new(label).unwrap()
    }

    #[test]
    fn weather_table_encodes_expected_probabilities() {
        let table = TransitionTable::weather();
        assert_eq!(table.states(), &[State::rain(), State::sun()]);
        assert_eq!(table.candidates(&State::sun()).unwrap().len(), 10);
        assert!((table.probability(&State::sun(), &State::sun()).unwrap() - 0.9).abs() < 1e-12);
        assert!((table.probability(&State::sun(), &State::rain()).unwrap() - 0.1).abs() < 1e-12);
        assert!((table.probability(&State::rain(), &State::rain()).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn weather_table_passes_validation() {
        let table = TransitionTable::weather();
        let rebuilt = TransitionTable::new(table.entries().clone()).unwrap();
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = TransitionTable::new(BTreeMap::new()).unwrap_err();
        assert_eq!(err.code(), "empty-table");
        assert!(matches!(err, WxError::Config(_)));
    }

    #[test]
    fn empty_candidate_list_is_rejected() {
        let entries = BTreeMap::from([(state("sun"), vec![])]);
        let err = TransitionTable::new(entries).unwrap_err();
        assert_eq!(err.code(), "empty-candidates");
        assert_eq!(err.info().context.get("state").map(String::as_str), Some("sun"));
    }

    #[test]
    fn open_state_graph_is_rejected() {
        let entries = BTreeMap::from([(state("sun"), vec![state("sun"), state("hail")])]);
        let err = TransitionTable::new(entries).unwrap_err();
        assert_eq!(err.code(), "unknown-target");
        assert_eq!(err.info().context.get("target").map(String::as_str), Some("hail"));
    }

    #[test]
    fn distribution_collapses_repetitions() {
        let table = TransitionTable::weather();
        let dist = table.distribution(&State::sun()).unwrap();
        assert_eq!(dist.len(), 2);
        assert!((dist[&State::sun()] - 0.9).abs() < 1e-12);
        assert!((dist.values().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_source_is_a_lookup_error() {
        let table = TransitionTable::weather();
        let err = table.candidates(&state("snow")).unwrap_err();
        assert!(matches!(err, WxError::Lookup(_)));
        assert_eq!(err.code(), "unknown-state");
    }
}
