//! Workflow documents.
//!
//! A workflow document is an actor list and a step list, written either as TOML
//! (`[[actors]]` / `[[steps]]` tables) or as JSON (`{"actors": [...], "steps": [...]}`).
//! Parse failures become [`LaneflowError::Document`] carrying the source text and,
//! when the deserializer knows it, the byte range of the offending input.

use std::{fmt, ops::Range, path::Path};

use log::{debug, trace};

use laneflow_core::model::Workflow;

use crate::error::LaneflowError;

/// Serialization format of a workflow document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    #[default]
    Toml,
    Json,
}

impl DocumentFormat {
    /// Picks the format from a file extension: `.json` is JSON, anything else TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => write!(f, "toml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Parses a workflow document.
///
/// # Errors
///
/// Returns [`LaneflowError::Document`] if `source` is not a valid document in the
/// given format.
pub fn parse_workflow(source: &str, format: DocumentFormat) -> Result<Workflow, LaneflowError> {
    debug!(format:% = format, bytes = source.len(); "Parsing workflow document");

    let workflow: Workflow = match format {
        DocumentFormat::Toml => toml::from_str(source).map_err(|err| {
            LaneflowError::new_document_error(err.message(), err.span(), source)
        })?,
        DocumentFormat::Json => serde_json::from_str(source).map_err(|err| {
            let span = json_error_span(source, err.line(), err.column());
            LaneflowError::new_document_error(err.to_string(), span, source)
        })?,
    };

    debug!(
        actors = workflow.actors().len(),
        steps = workflow.steps().len();
        "Workflow document parsed"
    );
    trace!(workflow:?; "Parsed workflow");
    Ok(workflow)
}

/// Converts serde_json's 1-based line and column into a span covering one character.
///
/// serde_json reports column 0 when the error is not tied to a character. Columns
/// count bytes, so an offset inside a multi-byte character is moved back to its start.
fn json_error_span(source: &str, line: usize, column: usize) -> Option<Range<usize>> {
    if line == 0 {
        return None;
    }

    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let mut offset = (line_start + column.saturating_sub(1)).min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let end = source[offset..]
        .chars()
        .next()
        .map_or(offset, |ch| offset + ch.len_utf8());
    Some(offset..end)
}
