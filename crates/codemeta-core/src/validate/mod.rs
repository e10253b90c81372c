//! Human-friendly validation of CodeMeta documents.
//!
//! This validator intentionally does not use a JSON-LD schema: the goal is
//! messages a user with no JSON-LD background can act on. Validators never
//! fail; they return a [`ValidationReport`] by value. Every problem is
//! recorded with its path, and [`ValidationReport::message`] yields the first
//! one for single-line display.

use serde::Serialize;

pub mod document;
pub mod primitives;
pub mod things;

pub use document::validate_document;
pub use things::FieldCheck;

/// Category of a validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    NotAnObject,
    MissingType,
    WrongType,
    InvalidContext,
    UnknownField,
    InvalidId,
    InvalidValue,
}

/// A structured validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub kind: ErrorKind,
    /// Location in the document, e.g. `author[0].affiliation`. Empty for the root.
    pub path: String,
    pub message: String,
}

/// Validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors: Vec<ValidationError>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.ok
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The message to display: the first error, or an empty string.
    pub fn message(&self) -> &str {
        self.errors.first().map(|e| e.message.as_str()).unwrap_or("")
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_str())
    }

    pub fn push(&mut self, kind: ErrorKind, path: impl Into<String>, message: impl Into<String>) {
        self.ok = false;
        self.errors.push(ValidationError {
            kind,
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.ok &= other.ok;
        self.errors.extend(other.errors);
    }
}

/// Compact JSON rendering used inside messages.
pub(crate) fn render(value: &serde_json::Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

pub(crate) fn item_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let r = ValidationReport::new();
        assert!(r.is_valid());
        assert_eq!(r.message(), "");
    }

    #[test]
    fn first_error_is_displayed() {
        let mut r = ValidationReport::new();
        r.push(ErrorKind::UnknownField, "foo", "Unknown field \"foo\".");
        r.push(ErrorKind::UnknownField, "bar", "Unknown field \"bar\".");
        assert!(!r.is_valid());
        assert_eq!(r.message(), "Unknown field \"foo\".");
        assert_eq!(r.messages().count(), 2);
    }

    #[test]
    fn paths() {
        assert_eq!(child_path("", "author"), "author");
        assert_eq!(child_path(&item_path("author", 0), "email"), "author[0].email");
    }
}
