use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wx_core::WxError;

use crate::state::State;
use crate::table::TransitionTable;

const MAX_PREALLOCATED_STEPS: usize = 1 << 16;

/// Ordered output of the chain: the initial state followed by one entry per step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherSequence {
    states: Vec<State>,
}

impl WeatherSequence {
    /// Number of states in the sequence (`steps + 1`).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Sequences produced by [`MarkovChain::generate`] are never empty.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of transitions taken.
    pub fn steps(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    /// States in generation order.
    pub fn as_slice(&self) -> &[State] {
        &self.states
    }

    /// Iterates states in generation order.
    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    /// Iterates consecutive `(from, to)` pairs.
    pub fn transitions(&self) -> impl Iterator<Item = (&State, &State)> + '_ {
        self.states.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

/// Renders as an ordered list, e.g. `[sun, sun, rain]`.
impl fmt::Display for WeatherSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, state) in self.states.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{state}")?;
        }
        write!(f, "]")
    }
}

impl<'a> IntoIterator for &'a WeatherSequence {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

/// Random walk over a [`TransitionTable`].
///
/// The chain holds only the immutable table. Randomness is supplied by the
/// caller on every call, so a seeded `RngHandle` reproduces a walk exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkovChain {
    table: TransitionTable,
}

impl MarkovChain {
    /// Wraps a validated table.
    pub fn new(table: TransitionTable) -> Self {
        Self { table }
    }

    /// Chain over the embedded weather table.
    pub fn weather() -> Self {
        Self::new(TransitionTable::weather())
    }

    /// The table the chain walks.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Draws a starting state uniformly from all states of the table.
    pub fn initial_state<R: Rng + ?Sized>(&self, rng: &mut R) -> State {
        let index = rng.gen_range(0..self.table.len());
        self.table.state_at(index).clone()
    }

    /// Draws the successor of `current` by uniform index into its candidate list.
    pub fn next_state<R: Rng + ?Sized>(
        &self,
        current: &State,
        rng: &mut R,
    ) -> Result<State, WxError> {
        let candidates = self.table.candidates(current)?;
        let index = rng.gen_range(0..candidates.len());
        Ok(candidates[index].clone())
    }

    /// Walks `length` steps from a uniformly drawn start; returns `length + 1` states.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        length: usize,
        rng: &mut R,
    ) -> Result<WeatherSequence, WxError> {
        let mut states = Vec::with_capacity(length.min(MAX_PREALLOCATED_STEPS) + 1);
        let mut current = self.initial_state(rng);
        states.push(current.clone());
        for _ in 0..length {
            current = self.next_state(&current, rng)?;
            states.push(current.clone());
        }
        debug!(length, initial = %states[0], last = %current, "generated weather sequence");
        Ok(WeatherSequence { states })
    }
}
