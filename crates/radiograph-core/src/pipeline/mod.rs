//! Upload-to-diagnosis pipeline components.
//!
//! - **validate**: Size, extension, and magic-byte checks on the raw upload
//! - **decode**: Decode JPEG/PNG bytes into a bitmap under a timeout
//! - **diagnose**: Send image + prompt to the inference client

pub mod decode;
pub mod diagnose;
pub mod validate;

// Re-exports for convenient access
pub use decode::{DecodedImage, ImageDecoder};
pub use diagnose::DiagnosisPipeline;
pub use validate::Validator;
