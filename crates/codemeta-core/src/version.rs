//! CodeMeta context versions.
//!
//! A version key ("2.0", "3.0") maps to exactly one context IRI. The list of
//! all IRIs is what the mapper uses whenever terms must be recognised
//! regardless of which version a document declares.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CodemetaError, CodemetaResult};

/// Known CodeMeta versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum CodemetaVersion {
    #[default]
    #[serde(rename = "2.0")]
    V2,
    #[serde(rename = "3.0")]
    V3,
}

impl CodemetaVersion {
    pub const ALL: [CodemetaVersion; 2] = [CodemetaVersion::V2, CodemetaVersion::V3];

    /// Parse a version key (e.g. "2.0").
    pub fn parse(s: &str) -> CodemetaResult<Self> {
        match s.trim() {
            "2.0" | "2" => Ok(Self::V2),
            "3.0" | "3" => Ok(Self::V3),
            other => Err(CodemetaError::invalid_argument(format!(
                "unsupported codemeta version: {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V2 => "2.0",
            Self::V3 => "3.0",
        }
    }

    pub fn context_url(&self) -> &'static str {
        match self {
            Self::V2 => "https://doi.org/10.5063/schema/codemeta-2.0",
            Self::V3 => "https://w3id.org/codemeta/3.0",
        }
    }

    /// Reverse lookup of [`CodemetaVersion::context_url`].
    pub fn from_context_url(url: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.context_url() == url)
    }
}

impl fmt::Display for CodemetaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodemetaVersion {
    type Err = CodemetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Every known context IRI, oldest version first.
pub fn all_context_urls() -> Vec<&'static str> {
    CodemetaVersion::ALL.iter().map(|v| v.context_url()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_versions() {
        assert_eq!(CodemetaVersion::parse("2.0").unwrap(), CodemetaVersion::V2);
        assert_eq!(CodemetaVersion::parse("3.0").unwrap(), CodemetaVersion::V3);
        assert!(CodemetaVersion::parse("4.0").is_err());
    }

    #[test]
    fn context_urls_roundtrip() {
        for v in CodemetaVersion::ALL {
            assert_eq!(CodemetaVersion::from_context_url(v.context_url()), Some(v));
        }
        assert_eq!(
            all_context_urls(),
            vec![
                "https://doi.org/10.5063/schema/codemeta-2.0",
                "https://w3id.org/codemeta/3.0"
            ]
        );
    }

    #[test]
    fn serde_uses_version_keys() {
        let s = serde_json::to_string(&CodemetaVersion::V3).unwrap();
        assert_eq!(s, "\"3.0\"");
    }
}
