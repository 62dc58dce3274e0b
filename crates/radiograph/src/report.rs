//! JSON shape shared by `radiograph diagnose --json` and the web API.

use radiograph_core::Outcome;
use serde::Serialize;

/// Serializable view of an [`Outcome`].
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Report {
    Success {
        diagnosis: String,
        model: String,
        latency_ms: u64,
        message: String,
    },
    Error {
        message: String,
    },
}

impl Report {
    pub fn error(message: impl Into<String>) -> Self {
        Report::Error {
            message: message.into(),
        }
    }
}

impl From<&Outcome> for Report {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Diagnosed(diagnosis) => Report::Success {
                diagnosis: diagnosis.text.clone(),
                model: diagnosis.model.clone(),
                latency_ms: diagnosis.latency_ms,
                message: outcome.user_message(),
            },
            Outcome::Failed | Outcome::Rejected(_) => Report::error(outcome.user_message()),
        }
    }
}
