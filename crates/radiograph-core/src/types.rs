//! Result types handed back to the front-ends.

use serde::{Deserialize, Serialize};

/// Diagnostic text returned by the inference service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Free-form response, verbatim
    pub text: String,

    /// Model that produced it
    pub model: String,

    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// What a single upload ended in.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The service answered with text.
    Diagnosed(Diagnosis),

    /// The service call failed; the user may try again.
    Failed,

    /// The upload was not a usable JPEG/PNG image. Nothing was sent.
    Rejected(String),
}

impl Outcome {
    /// Single-line notice suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Outcome::Diagnosed(_) => "Analysis complete!".to_string(),
            Outcome::Failed => "Failed to generate analysis. Please try again.".to_string(),
            Outcome::Rejected(reason) => format!(
                "Could not read the uploaded image: {}",
                reason.lines().collect::<Vec<_>>().join(" ")
            ),
        }
    }

    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        match self {
            Outcome::Diagnosed(diagnosis) => Some(diagnosis),
            _ => None,
        }
    }
}
