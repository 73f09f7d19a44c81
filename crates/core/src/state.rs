//! Status of a long-running operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

/// State carried by every [`ProgressReport`](crate::report::ProgressReport).
///
/// The variants follow taskbar-style progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressState {
    /// No progress is shown.
    None,
    /// Work is happening but the amount is unknown.
    Indeterminate,
    /// Regular progress toward the maximum.
    #[default]
    Normal,
    /// The operation is paused.
    Paused,
    /// The operation failed.
    Error,
}

impl ProgressState {
    pub const ALL: [ProgressState; 5] = [
        ProgressState::None,
        ProgressState::Indeterminate,
        ProgressState::Normal,
        ProgressState::Paused,
        ProgressState::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressState::None => "none",
            ProgressState::Indeterminate => "indeterminate",
            ProgressState::Normal => "normal",
            ProgressState::Paused => "paused",
            ProgressState::Error => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ProgressState::Error)
    }
}

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressState {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProgressState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProgressError::UnknownState(s.to_string()))
    }
}
