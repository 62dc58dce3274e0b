//! Image decoding with format detection, validation, and timeout support.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::error::InputError;
use crate::llm::ImageInput;

/// Image decoder with configurable limits and timeout.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// An upload that decoded cleanly as JPEG or PNG.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded bitmap
    pub image: DynamicImage,
    /// The original encoded bytes, sent to the inference service as-is
    pub bytes: Vec<u8>,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl DecodedImage {
    /// Base64 payload for the inference request.
    pub fn to_input(&self) -> ImageInput {
        ImageInput::from_bytes(&self.bytes, self.format)
    }
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode an uploaded buffer off the async runtime, bounded by
    /// `decode_timeout_ms`.
    pub async fn decode(&self, bytes: Vec<u8>) -> Result<DecodedImage, InputError> {
        let timeout_duration = Duration::from_millis(self.limits.decode_timeout_ms);
        let max_dim = self.limits.max_image_dimension;

        let decode_result = timeout(
            timeout_duration,
            tokio::task::spawn_blocking(move || Self::decode_sync(bytes, max_dim)),
        )
        .await;

        match decode_result {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(InputError::Decode(format!("Task join error: {e}"))),
            Err(_) => Err(InputError::Timeout {
                timeout_ms: self.limits.decode_timeout_ms,
            }),
        }
    }

    /// Synchronous decode (runs in spawn_blocking).
    ///
    /// Dimensions come from the header, so oversized images are refused
    /// before any pixel buffer is allocated.
    fn decode_sync(bytes: Vec<u8>, max_dim: u32) -> Result<DecodedImage, InputError> {
        let reader = Self::reader(&bytes)?;
        let format = match reader.format() {
            Some(f @ (ImageFormat::Jpeg | ImageFormat::Png)) => f,
            Some(other) => {
                return Err(InputError::UnsupportedFormat {
                    format: format_to_string(other),
                })
            }
            None => {
                return Err(InputError::UnsupportedFormat {
                    format: "unknown".to_string(),
                })
            }
        };

        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| InputError::Decode(e.to_string()))?;
        if width > max_dim || height > max_dim {
            return Err(InputError::ImageTooLarge {
                width,
                height,
                max_dim,
            });
        }

        let image = Self::reader(&bytes)?
            .decode()
            .map_err(|e| InputError::Decode(e.to_string()))?;

        Ok(DecodedImage {
            image,
            bytes,
            format,
            width,
            height,
        })
    }

    fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, InputError> {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| InputError::Decode(format!("Cannot detect image format: {e}")))
    }
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        other => other
            .extensions_str()
            .first()
            .map(|ext| ext.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    }
}
