//! Radiograph Core - upload an image, get a diagnosis.
//!
//! Radiograph forwards a medical image and a fixed instruction to a
//! multimodal inference service and hands back the text it returns.
//!
//! # Architecture
//!
//! ```text
//! Upload → Validate → Decode → ClientFactory → DiagnosisPipeline → Outcome
//! ```
//!
//! Uploads that are not JPEG/PNG stop at validation or decode and never
//! reach the service. Client construction failures are returned as errors.
//! Generation failures are logged and reported as [`Outcome::Failed`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use radiograph_core::{Config, Radiograph};
//!
//! #[tokio::main]
//! async fn main() -> radiograph_core::Result<()> {
//!     let radiograph = Radiograph::new(Config::load()?)?;
//!     let outcome = radiograph.diagnose_file("./chest.jpg".as_ref()).await?;
//!     println!("{}", outcome.user_message());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-exports for convenient access
pub use config::Config;
pub use error::{
    ConfigError, GenerationError, InitializationError, InputError, RadiographError, Result,
};
pub use llm::{ClientFactory, Credential, GeminiClientFactory, InferenceClient};
pub use pipeline::{DecodedImage, DiagnosisPipeline, ImageDecoder, Validator};
pub use prompt::Prompt;
pub use types::{Diagnosis, Outcome};

use std::path::Path;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Radiograph service - the main entry point for diagnosing uploads.
///
/// Holds everything that is fixed for the life of the process (config,
/// prompt, client factory). Each call to [`Radiograph::diagnose_upload`]
/// builds its own client and owns its decoded image; nothing is shared
/// between calls.
pub struct Radiograph {
    config: Config,
    prompt: Prompt,
    validator: Validator,
    decoder: ImageDecoder,
    pipeline: DiagnosisPipeline,
    factory: Box<dyn ClientFactory>,
}

impl Radiograph {
    /// Create a Radiograph instance backed by Gemini.
    pub fn new(config: Config) -> Result<Self> {
        let factory = GeminiClientFactory::new(config.gemini.clone());
        Self::with_factory(config, Box::new(factory))
    }

    /// Create a Radiograph instance with a custom client factory.
    pub fn with_factory(config: Config, factory: Box<dyn ClientFactory>) -> Result<Self> {
        let prompt = config.prompt.resolve()?;
        tracing::debug!("Initializing Radiograph v{}", VERSION);

        Ok(Self {
            validator: Validator::new(config.limits.clone()),
            decoder: ImageDecoder::new(config.limits.clone()),
            pipeline: DiagnosisPipeline::new(config.gemini.model.clone()),
            prompt,
            factory,
            config,
        })
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The prompt sent with every image.
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Validate and decode an upload.
    pub async fn prepare(
        &self,
        file_name: Option<&str>,
        bytes: Vec<u8>,
    ) -> std::result::Result<DecodedImage, InputError> {
        self.validator.validate_upload(file_name, &bytes)?;
        self.decoder.decode(bytes).await
    }

    /// Resolve the credential and build a fresh inference client.
    pub async fn connect(&self) -> std::result::Result<Box<dyn InferenceClient>, InitializationError> {
        let credential = Credential::resolve(&self.config.gemini.api_key).inspect_err(|e| {
            tracing::error!("Failed to initialize inference client: {e}");
        })?;
        self.factory.create(&credential).await
    }

    /// Run one upload through validate → decode → connect → generate.
    ///
    /// Returns `Err` only when the client cannot be built; in that case no
    /// request is made.
    pub async fn diagnose_upload(&self, file_name: Option<&str>, bytes: Vec<u8>) -> Result<Outcome> {
        let image = match self.prepare(file_name, bytes).await {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!("Upload rejected: {e}");
                return Ok(Outcome::Rejected(e.to_string()));
            }
        };

        let client = self.connect().await?;

        Ok(
            match self.pipeline.run(client.as_ref(), &image, &self.prompt).await {
                Some(diagnosis) => Outcome::Diagnosed(diagnosis),
                None => Outcome::Failed,
            },
        )
    }

    /// Diagnose an image file on disk.
    pub async fn diagnose_file(&self, path: &Path) -> Result<Outcome> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let e = InputError::Unreadable(e);
                tracing::warn!("Upload rejected: {e}");
                return Ok(Outcome::Rejected(e.to_string()));
            }
        };
        let name = path.file_name().and_then(|n| n.to_str());
        self.diagnose_upload(name, bytes).await
    }
}
