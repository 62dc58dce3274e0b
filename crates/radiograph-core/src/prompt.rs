//! The instruction text sent with every image.

use std::fmt;
use std::sync::Arc;

use crate::config::DEFAULT_PROMPT;

/// Non-empty, immutable prompt text.
///
/// Cloning shares the underlying string, so one prompt can back every
/// request the process handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(Arc<str>);

impl Prompt {
    /// Wrap `text`, returning `None` if it is empty or only whitespace.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(Arc::from(text)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self(Arc::from(DEFAULT_PROMPT))
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
