//! Inference client traits and request/response types.
//!
//! `InferenceClient` is the one outbound call this crate makes;
//! `ClientFactory` turns a credential into a ready client.

use async_trait::async_trait;
use base64::Engine;
use image::ImageFormat;

use super::credential::Credential;
use crate::error::{GenerationError, InitializationError};
use crate::prompt::Prompt;

/// Base64-encoded image ready to send to the inference API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type ("image/jpeg" or "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and their detected format.
    pub fn from_bytes(bytes: &[u8], format: ImageFormat) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: format.to_mime_type().to_string(),
        }
    }
}

/// One multimodal generation request: prompt first, then the image.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Model identifier
    pub model: String,
    /// Instruction text
    pub prompt: Prompt,
    /// The image to analyze
    pub image: ImageInput,
}

/// The text returned by a generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    /// Generated text, exactly as the service returned it
    pub text: String,
    /// Model version reported by the service (falls back to the requested model)
    pub model: String,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// A configured handle to the external inference service.
///
/// Uses `async_trait` because we need `Box<dyn InferenceClient>`.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Client name for logging.
    fn name(&self) -> &str;

    /// Issue a single content-generation call.
    async fn generate(&self, request: &GenerateRequest)
        -> Result<GenerateResponse, GenerationError>;
}

/// Builds an `InferenceClient` bound to a credential.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Create a client. On error the caller must not attempt any request.
    async fn create(
        &self,
        credential: &Credential,
    ) -> Result<Box<dyn InferenceClient>, InitializationError>;
}
