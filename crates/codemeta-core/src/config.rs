//! Configuration structures for codemeta-core.
//!
//! The core crate itself does not read environment variables or files. Hosts
//! (the CLI, tests) build an [`EngineConfig`] explicitly and hand it to
//! [`crate::engine::Engine`].

use crate::errors::{CodemetaError, CodemetaResult};
use crate::version::CodemetaVersion;

/// Global configuration container.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub default_version: CodemetaVersion,
    pub limits: LimitsConfig,
    pub output: OutputConfig,
    pub license_policy: LicensePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_version: CodemetaVersion::default(),
            limits: LimitsConfig::default(),
            output: OutputConfig::default(),
            license_policy: LicensePolicy::default(),
        }
    }
}

/// Resource limits.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub max_document_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: crate::defaults::MAX_DOCUMENT_BYTES,
        }
    }
}

/// Rendering of generated documents.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: crate::defaults::INDENT,
        }
    }
}

/// What to do with license ids when no SPDX list is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LicensePolicy {
    /// Accept any non-empty id.
    #[default]
    PermissiveWhenMissing,
    /// Reject every id.
    Strict,
}

impl LicensePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PermissiveWhenMissing => "permissive-when-missing",
            Self::Strict => "strict",
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &EngineConfig) -> CodemetaResult<()> {
    if cfg.limits.max_document_bytes == 0 {
        return Err(CodemetaError::invalid_argument(
            "max_document_bytes must be greater than zero",
        ));
    }

    if cfg.output.indent > 16 {
        return Err(CodemetaError::invalid_argument(
            "indent must not exceed 16 spaces",
        ));
    }

    Ok(())
}
