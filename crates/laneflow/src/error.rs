//! Error types for Laneflow operations.
//!
//! Computing a layout never fails: empty input, missing decision edges and
//! unresolved references are part of its contract. [`LaneflowError`] covers the
//! surrounding work instead: reading workflow documents and configuration, and the
//! internal engine failures that trigger a fallback.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for Laneflow operations.
///
/// # Diagnostic Variants
///
/// The `Document` variant keeps the source text and, when the deserializer reports
/// one, the byte range of the offending input. This is enough for rich error
/// reporting in the CLI.
#[derive(Debug, Error)]
pub enum LaneflowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid workflow document: {message}")]
    Document {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl LaneflowError {
    /// Create a new `Document` error with the associated source text.
    pub fn new_document_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Document {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
