//! Error types for Radiograph.
//!
//! Errors follow the path of a single upload: configuration, client
//! initialization, input decoding, and content generation. Each carries
//! enough context to be logged once and shown to the user as a single line.

use thiserror::Error;

/// Top-level error type for Radiograph operations.
#[derive(Error, Debug)]
pub enum RadiographError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The inference client could not be constructed
    #[error("Client initialization failed: {0}")]
    Initialization(#[from] InitializationError),

    /// The uploaded bytes could not be accepted as an image
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),
}

impl RadiographError {
    /// Single-line notice for the user. Service bodies quoted in the error
    /// may span several lines; they are folded onto one.
    pub fn user_notice(&self) -> String {
        let detail = self
            .to_string()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        format!("An error occurred: {detail}")
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file (or prompt file) from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// The inference client handle could not be created.
///
/// Fatal to the invocation that hit it: no request may be attempted.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// No credential configured, or the referenced env var is unset
    #[error("API key not set. Set the {var} environment variable.")]
    MissingCredential { var: String },

    /// Credential cannot be carried in a request header
    #[error("API key contains characters that cannot be sent in a header")]
    MalformedCredential,

    /// The HTTP client itself failed to build
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// The service refused the credential during verification
    #[error("Inference service rejected the credential (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The service could not be reached during verification
    #[error("Inference service unreachable: {0}")]
    Unreachable(String),
}

/// Uploaded bytes that never reach the inference service.
#[derive(Error, Debug)]
pub enum InputError {
    /// Zero-length upload
    #[error("Uploaded file is empty")]
    Empty,

    /// Upload exceeds the configured size limit
    #[error("File too large: {size_mb}MB > {max_mb}MB")]
    FileTooLarge { size_mb: u64, max_mb: u64 },

    /// Extension or content is not an accepted image type
    #[error("Unsupported format: {format} (expected JPEG or PNG)")]
    UnsupportedFormat { format: String },

    /// Image bytes failed to decode
    #[error("Decode error: {0}")]
    Decode(String),

    /// Decoded image dimensions exceed the limit
    #[error("Image too large: {width}x{height} > {max_dim}")]
    ImageTooLarge {
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Decoding did not finish in time
    #[error("Decode timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The source file could not be read
    #[error("Cannot read image: {0}")]
    Unreadable(#[from] std::io::Error),
}

/// The inference call failed or produced nothing usable.
///
/// Never propagated past the request pipeline; it is logged there and turned
/// into an empty result.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Transport-level failure (DNS, connect, TLS, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status from the service
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected shape
    #[error("Failed to parse response: {0}")]
    Malformed(String),

    /// Response carried no text
    #[error("Empty response: {0}")]
    Empty(String),
}

/// Convenience type alias for Radiograph results.
pub type Result<T> = std::result::Result<T, RadiographError>;
