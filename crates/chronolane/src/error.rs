//! Error types for Chronolane operations.
//!
//! Layout itself never fails; errors arise when reading model or
//! configuration input and when exporting a layout.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for Chronolane operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text and the byte span of the
/// offending input, so that callers can render a source snippet.
#[derive(Debug, Error)]
pub enum ChronolaneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for ChronolaneError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ChronolaneError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
