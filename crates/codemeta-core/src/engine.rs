//! The engine: contexts, licenses and configuration bundled behind the four
//! user-facing operations (generate, import, validate, license lookup).

use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::{validate_config, EngineConfig};
use crate::context::ContextRegistry;
use crate::errors::{CodemetaError, CodemetaResult};
use crate::form::{FormIssue, FormState};
use crate::generate;
use crate::import::{self, ImportOutcome};
use crate::license::{LicenseRegistry, LicenseSelection};
use crate::validate::{validate_document, ValidationReport};
use crate::version::CodemetaVersion;

/// A generated document.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// Pretty-printed document, as persisted and displayed.
    pub text: String,
    pub document: Value,
    pub version: CodemetaVersion,
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    contexts: ContextRegistry,
    licenses: LicenseRegistry,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        contexts: ContextRegistry,
        licenses: LicenseRegistry,
    ) -> CodemetaResult<Self> {
        validate_config(&config)?;
        for version in CodemetaVersion::ALL {
            if !contexts.is_loaded(version) {
                warn!(version = %version, "context document not loaded");
            }
        }
        let licenses = licenses.with_policy(config.license_policy);
        if !licenses.is_loaded() {
            warn!(
                policy = config.license_policy.as_str(),
                "no SPDX license list loaded"
            );
        }
        Ok(Self {
            config,
            contexts,
            licenses,
        })
    }

    /// Engine over the bundled context documents and SPDX list.
    #[cfg(feature = "bundled-data")]
    pub fn bundled(config: EngineConfig) -> CodemetaResult<Self> {
        Self::new(config, ContextRegistry::bundled()?, LicenseRegistry::bundled()?)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn contexts(&self) -> &ContextRegistry {
        &self.contexts
    }

    pub fn licenses(&self) -> &LicenseRegistry {
        &self.licenses
    }

    /// Form constraints plus membership of every selected license.
    pub fn check_form(&self, form: &FormState) -> Vec<FormIssue> {
        let mut issues = form.check_validity();
        issues.extend(self.normalize_licenses(&form.licenses).1);
        issues
    }

    /// Selected ids in the registry's spelling, plus one issue per id the
    /// registry rejects. Ids that normalize to the same license collapse.
    fn normalize_licenses(&self, selection: &LicenseSelection) -> (LicenseSelection, Vec<FormIssue>) {
        let mut normalized = LicenseSelection::new();
        let mut issues = Vec::new();
        for id in selection.ids() {
            match self.licenses.normalize(id) {
                Ok(id) => {
                    normalized.insert_raw(id);
                }
                Err(e) => issues.push(FormIssue::new("licenses", e.to_string())),
            }
        }
        (normalized, issues)
    }

    /// Generate, render and self-check a document.
    ///
    /// `GeneratedInvalid` means the engine produced something its own
    /// validator rejects; the form itself was fine.
    pub fn generate(&self, form: &FormState, version: CodemetaVersion) -> CodemetaResult<Generated> {
        let mut issues = form.check_validity();
        let (licenses, license_issues) = self.normalize_licenses(&form.licenses);
        issues.extend(license_issues);
        if !issues.is_empty() {
            return Err(CodemetaError::InvalidForm(issues));
        }

        let form = FormState {
            licenses,
            ..form.clone()
        };
        let document = generate::generate_document(&form, version, &self.contexts)?;
        let text = generate::render(&document, self.config.output.indent)?;

        let reparsed: Value = serde_json::from_str(&text)?;
        let report = validate_document(&reparsed);
        if !report.is_valid() {
            error!(error = report.message(), "generated document does not validate");
            return Err(CodemetaError::GeneratedInvalid(report));
        }

        info!(version = %version, bytes = text.len(), "generated codemeta document");
        Ok(Generated {
            text,
            document,
            version,
        })
    }

    pub fn generate_default(&self, form: &FormState) -> CodemetaResult<Generated> {
        self.generate(form, self.config.default_version)
    }

    /// Parse `text` and import it into a fresh form.
    pub fn import(&self, text: &str) -> CodemetaResult<ImportOutcome> {
        let doc = import::parse_document(text, self.config.limits.max_document_bytes)?;
        self.import_value(&doc)
    }

    pub fn import_value(&self, doc: &Value) -> CodemetaResult<ImportOutcome> {
        let outcome = import::import_document(doc, &self.contexts)?;
        info!(
            authors = outcome.form.authors.len(),
            contributors = outcome.form.contributors.len(),
            valid = outcome.report.is_valid(),
            "imported codemeta document"
        );
        Ok(outcome)
    }

    pub fn validate(&self, doc: &Value) -> ValidationReport {
        validate_document(doc)
    }

    /// Parse and validate. Only a syntax error (or an oversized text) fails.
    pub fn validate_text(&self, text: &str) -> CodemetaResult<ValidationReport> {
        let doc = import::parse_document(text, self.config.limits.max_document_bytes)?;
        Ok(validate_document(&doc))
    }
}
