use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where an orchestration run stands.
///
/// `Pending` is initial. `Complete`, `NeedMoreData` and `Error` are
/// terminal: once reached, no further stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Pending,
    NeedMoreData,
    RouteToModels,
    Complete,
    Error,
}

impl Decision {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Decision::NeedMoreData | Decision::Complete | Decision::Error
        )
    }

    /// The legal edges of the run's state machine.
    ///
    /// Any non-terminal state may fail into `Error`.
    pub fn can_transition_to(self, next: Decision) -> bool {
        use Decision::*;
        match (self, next) {
            (Pending, NeedMoreData | RouteToModels | Error) => true,
            (RouteToModels, Complete | NeedMoreData | Error) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Pending => "pending",
            Decision::NeedMoreData => "need_more_data",
            Decision::RouteToModels => "route_to_models",
            Decision::Complete => "complete",
            Decision::Error => "error",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The coarse decision returned by the intent classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentDecision {
    RouteToModels,
    NeedMoreData,
    Complete,
}

impl IntentDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            IntentDecision::RouteToModels => "route_to_models",
            IntentDecision::NeedMoreData => "need_more_data",
            IntentDecision::Complete => "complete",
        }
    }
}

impl fmt::Display for IntentDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDecision(pub String);

impl fmt::Display for UnknownDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised classifier decision: {:?}", self.0)
    }
}

impl std::error::Error for UnknownDecision {}

impl FromStr for IntentDecision {
    type Err = UnknownDecision;

    /// Case-insensitive; hyphens and spaces are treated as underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "route_to_models" => Ok(IntentDecision::RouteToModels),
            "need_more_data" => Ok(IntentDecision::NeedMoreData),
            "complete" => Ok(IntentDecision::Complete),
            _ => Err(UnknownDecision(s.to_string())),
        }
    }
}
