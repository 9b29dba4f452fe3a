use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wx_core::{ErrorInfo, WxError};

/// Named weather label used as a node of the chain.
///
/// Labels are trimmed and must be non-empty. Ordering follows the label text,
/// which keeps table iteration (and therefore seeded output) stable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct State(String);

impl State {
    /// Creates a state from a label, rejecting blank input.
    pub fn new(label: impl Into<String>) -> Result<Self, WxError> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(WxError::Config(
                ErrorInfo::new("empty-label", "state labels must not be empty")
                    .with_context("label", label.as_str()),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The `sun` state of the default weather table.
    pub fn sun() -> Self {
        Self("sun".into())
    }

    /// The `rain` state of the default weather table.
    pub fn rain() -> Self {
        Self("rain".into())
    }

    /// Returns the label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for State {
    type Err = WxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for State {
    type Error = WxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<State> for String {
    fn from(state: State) -> Self {
        state.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_trimmed() {
        let state = State::new("  sun ").unwrap();
        assert_eq!(state, State::sun());
        assert_eq!(state.to_string(), "sun");
    }

    #[test]
    fn blank_labels_are_rejected() {
        let err = State::new("   ").unwrap_err();
        assert_eq!(err.code(), "empty-label");
        assert!("".parse::<State>().is_err());
    }

    #[test]
    fn deserialization_validates_labels() {
        let state: State = serde_json::from_str("\"rain\"").unwrap();
        assert_eq!(state, State::rain());
        assert!(serde_json::from_str::<State>("\"\"").is_err());
    }
}
