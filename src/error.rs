//! Error types for texweave.
//!
//! A filter either leaves a node alone (`Action::Keep`) or fails the whole
//! pass with a [`FilterError`]; there is no per-node recovery.

use std::fmt::Display;
use std::process::ExitStatus;

use thiserror::Error;

use crate::template::TemplateError;

/// Errors that abort a filter pass.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A `width` attribute that is not a positive percentage
    #[error("invalid width `{value}`: {reason}")]
    InvalidWidth {
        /// Attribute value as written
        value: String,
        reason: String,
    },

    /// The text converter failed
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// A template could not be parsed or rendered
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// No filter registered under this name
    #[error("unknown filter `{0}` (available: {1})")]
    UnknownFilter(String, String),
}

/// Result type alias for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

impl FilterError {
    /// Create an invalid-width error.
    pub fn invalid_width(value: impl Into<String>, reason: impl Display) -> Self {
        Self::InvalidWidth {
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors from the external text converter.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The converter program could not be started
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The converter exited unsuccessfully
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Piping input to or output from the converter failed
    #[error("converter I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a fragment as pandoc JSON failed
    #[error("failed to encode fragment: {0}")]
    Json(#[from] serde_json::Error),

    /// The converter produced invalid UTF-8
    #[error("converter output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
