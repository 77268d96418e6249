/// Detail item state definitions
///
/// An item's terminal state only lives in the run counters. On disk the
/// presence of its output file is the sole record that it was fetched.
use std::fmt;

/// Represents the state of one detail item during a harvest run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailState {
    /// Read from a listing file, not yet looked at
    NotStarted,

    /// Output already present in the store, no request made
    Skipped,

    /// Fetched with HTTP 200 and written to the store
    Succeeded,

    /// Non-200 status, transport failure, unusable URL or failed write
    Failed,
}

impl DetailState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Skipped => "skipped",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for DetailState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
