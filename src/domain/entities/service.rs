use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the pseudo-service used when every service is installed as one unit.
pub const COMBINED_SERVICE: &str = "fusion";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    /// Trims the raw value; returns `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn combined() -> Self {
        Self(COMBINED_SERVICE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a single service while a start or stop is being confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollState {
    Issued,
    Polling,
    Confirmed,
    TimedOut,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PollState::Confirmed | PollState::TimedOut)
    }

    /// Advances the state after one status check.
    pub fn advance(self, matched: bool, budget_exhausted: bool) -> Self {
        if self.is_terminal() {
            return self;
        }
        if matched {
            PollState::Confirmed
        } else if budget_exhausted {
            PollState::TimedOut
        } else {
            PollState::Polling
        }
    }
}
