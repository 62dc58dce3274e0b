//! Upload validation before decode.

use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::InputError;

/// Rejects uploads that are not JPEG or PNG before any decode is attempted.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Perform quick validation on an uploaded buffer.
    ///
    /// Checks:
    /// - The buffer is non-empty and within the size limit
    /// - The file name (if any) has an accepted extension
    /// - The content starts with JPEG or PNG magic bytes
    pub fn validate_upload(&self, file_name: Option<&str>, bytes: &[u8]) -> Result<(), InputError> {
        if bytes.is_empty() {
            return Err(InputError::Empty);
        }

        let max_bytes = self.limits.max_file_size_bytes();
        if bytes.len() as u64 > max_bytes {
            return Err(InputError::FileTooLarge {
                size_mb: bytes.len() as u64 / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        if let Some(name) = file_name {
            self.check_extension(name)?;
        }

        if !Self::is_supported_header(bytes) {
            return Err(InputError::UnsupportedFormat {
                format: "unrecognized content (invalid magic bytes)".to_string(),
            });
        }

        Ok(())
    }

    /// Accept names whose extension is in `supported_formats`.
    ///
    /// Names without an extension are let through; the magic bytes decide.
    fn check_extension(&self, name: &str) -> Result<(), InputError> {
        let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
            return Ok(());
        };
        let ext = ext.to_ascii_lowercase();
        if self
            .limits
            .supported_formats
            .iter()
            .any(|f| f.eq_ignore_ascii_case(&ext))
        {
            Ok(())
        } else {
            Err(InputError::UnsupportedFormat { format: ext })
        }
    }

    /// Check if the leading bytes match JPEG or PNG.
    fn is_supported_header(header: &[u8]) -> bool {
        // JPEG: FF D8 FF
        if header.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return true;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        header.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
    }
}
