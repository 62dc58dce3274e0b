//! The request pipeline: one image plus one prompt in, diagnostic text or
//! nothing out.

use crate::llm::{GenerateRequest, InferenceClient};
use crate::prompt::Prompt;
use crate::types::Diagnosis;

use super::decode::DecodedImage;

/// Sends a decoded image to the inference service under a fixed model.
///
/// Exactly one call per `run`, no retry, no timeout beyond the client's own.
/// Every failure is logged here and collapses to `None`; turning that into a
/// user-facing message is the caller's job.
#[derive(Debug, Clone)]
pub struct DiagnosisPipeline {
    model: String,
}

impl DiagnosisPipeline {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// Generate a diagnosis for `image`.
    pub async fn run(
        &self,
        client: &dyn InferenceClient,
        image: &DecodedImage,
        prompt: &Prompt,
    ) -> Option<Diagnosis> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.clone(),
            image: image.to_input(),
        };

        tracing::debug!(
            client = client.name(),
            model = %self.model,
            width = image.width,
            height = image.height,
            "Requesting diagnosis"
        );

        match client.generate(&request).await {
            Ok(response) => {
                tracing::info!(
                    latency_ms = response.latency_ms,
                    "Content generated successfully."
                );
                Some(Diagnosis {
                    text: response.text,
                    model: response.model,
                    latency_ms: response.latency_ms,
                })
            }
            Err(e) => {
                tracing::error!("Failed to generate content: {e}");
                None
            }
        }
    }
}
