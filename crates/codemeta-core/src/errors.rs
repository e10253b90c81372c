//! Error types for codemeta-core.
//!
//! Only two kinds of operations can fail hard: reading JSON text and running
//! JSON-LD compaction. Everything else (validators in particular) reports
//! problems by value through `crate::validate::ValidationReport`.
//!
//! Callers that need a single line for a status area should use `Display`.

use std::fmt;

use crate::form::FormIssue;
use crate::session::SessionState;
use crate::validate::ValidationReport;

/// Result alias used across the crate.
pub type CodemetaResult<T> = Result<T, CodemetaError>;

#[derive(Debug, thiserror::Error)]
pub enum CodemetaError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The input text is not JSON at all.
    #[error(
        "Could not read codemeta document because it is not valid JSON ({0}). \
         Check for missing or extra quote, colon, or bracket characters."
    )]
    NotJson(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// A context document could not be loaded or interpreted.
    #[error("context error: {0}")]
    Context(String),

    /// The form violates its own input constraints; nothing was generated.
    #[error("invalid input (see error above)")]
    InvalidForm(Vec<FormIssue>),

    /// The generator produced a document its own validator rejects.
    ///
    /// This is a defect in the engine, never a problem with user input.
    #[error("generated document failed validation: {}", .0.message())]
    GeneratedInvalid(ValidationReport),

    /// The session storage slot could not be read or written.
    #[error("session storage error: {0}")]
    Storage(String),

    #[error("session is busy ({0})")]
    Busy(SessionState),

    #[error("Unknown license id: {0}")]
    UnknownLicense(String),

    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl CodemetaError {
    pub fn invalid_argument(msg: impl fmt::Display) -> Self {
        Self::InvalidArgument(msg.to_string())
    }

    pub fn serialization(msg: impl fmt::Display) -> Self {
        Self::Serialization(msg.to_string())
    }

    pub fn context(msg: impl fmt::Display) -> Self {
        Self::Context(msg.to_string())
    }

    pub fn storage(msg: impl fmt::Display) -> Self {
        Self::Storage(msg.to_string())
    }

    pub fn invariant(msg: impl fmt::Display) -> Self {
        Self::Invariant(msg.to_string())
    }

    /// True for errors that indicate an engine defect rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::GeneratedInvalid(_) | Self::Invariant(_))
    }
}

impl From<serde_json::Error> for CodemetaError {
    fn from(e: serde_json::Error) -> Self {
        Self::serialization(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_json_message_wraps_parser_message() {
        let e = CodemetaError::NotJson("expected value at line 1 column 1".to_string());
        assert_eq!(
            e.to_string(),
            "Could not read codemeta document because it is not valid JSON \
             (expected value at line 1 column 1). Check for missing or extra quote, \
             colon, or bracket characters."
        );
    }

    #[test]
    fn internal_errors_are_flagged() {
        assert!(CodemetaError::invariant("x").is_internal());
        assert!(!CodemetaError::invalid_argument("x").is_internal());
        assert!(!CodemetaError::UnknownLicense("FOO".into()).is_internal());
    }
}
