//! Inference service integration.
//!
//! A `ClientFactory` turns a `Credential` into an `InferenceClient`; the
//! client performs the single multimodal generation call. Gemini is the
//! production backend; tests plug in their own implementations.

pub(crate) mod credential;
pub(crate) mod gemini;
pub(crate) mod provider;

pub use credential::Credential;
pub use gemini::{GeminiClient, GeminiClientFactory};
pub use provider::{
    ClientFactory, GenerateRequest, GenerateResponse, ImageInput, InferenceClient,
};
