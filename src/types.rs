use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Canonical task identifier type used throughout the crate.
pub type TaskId = String;

/// Rule used to pick among several tasks that are ready at the same time.
///
/// - `Insertion`: the task added to the repository earliest goes first
///   (default, matches the order tasks appear in the record file).
/// - `Lexical`: the task with the smallest id (byte-wise) goes first.
///
/// The rule only affects the emitted order; earliest start times are the
/// same under either rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    Insertion,
    Lexical,
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::Insertion
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insertion" => Ok(TieBreak::Insertion),
            "lexical" => Ok(TieBreak::Lexical),
            other => Err(format!(
                "invalid tie_break: {other} (expected \"insertion\" or \"lexical\")"
            )),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::Insertion => f.write_str("insertion"),
            TieBreak::Lexical => f.write_str("lexical"),
        }
    }
}
