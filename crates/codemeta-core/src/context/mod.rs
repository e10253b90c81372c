//! Context documents and the pinned loader.
//!
//! A [`ContextRegistry`] owns the CodeMeta context documents, one per
//! [`CodemetaVersion`]. Expansion and compaction are delegated to the `json-ld`
//! crate; the registry is handed to it through [`PinnedLoader`], which serves
//! requests for a known context IRI from memory and refuses every other
//! remote context. Nothing here ever touches the network.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::{CodemetaError, CodemetaResult};
use crate::version::{self, CodemetaVersion};

mod loader;
mod processor;

pub use loader::PinnedLoader;
pub use processor::Compactor;

/// Pinned context documents, keyed by version.
#[derive(Debug, Clone, Default)]
pub struct ContextRegistry {
    documents: BTreeMap<CodemetaVersion, Value>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the context documents shipped with the crate.
    #[cfg(feature = "bundled-data")]
    pub fn bundled() -> CodemetaResult<Self> {
        let mut registry = Self::new();
        registry.insert_text(
            CodemetaVersion::V2,
            include_str!("../../data/contexts/codemeta-2.0.jsonld"),
        )?;
        registry.insert_text(
            CodemetaVersion::V3,
            include_str!("../../data/contexts/codemeta-3.0.jsonld"),
        )?;
        Ok(registry)
    }

    pub fn insert(&mut self, version: CodemetaVersion, document: Value) -> CodemetaResult<()> {
        match document.get("@context") {
            Some(Value::Object(_)) => {
                self.documents.insert(version, document);
                Ok(())
            }
            _ => Err(CodemetaError::context(format!(
                "context document for {version} must be an object with an @context object"
            ))),
        }
    }

    pub fn insert_text(&mut self, version: CodemetaVersion, text: &str) -> CodemetaResult<()> {
        let document: Value = serde_json::from_str(text).map_err(|e| {
            CodemetaError::context(format!("context document for {version} is not JSON: {e}"))
        })?;
        self.insert(version, document)
    }

    pub fn is_loaded(&self, version: CodemetaVersion) -> bool {
        self.documents.contains_key(&version)
    }

    pub fn loaded_versions(&self) -> impl Iterator<Item = CodemetaVersion> + '_ {
        self.documents.keys().copied()
    }

    /// Every known context IRI, whether or not its document is loaded.
    pub fn all_context_urls(&self) -> Vec<&'static str> {
        version::all_context_urls()
    }

    /// `@context` value naming every known version.
    pub fn union_context(&self) -> Value {
        Value::Array(
            self.all_context_urls()
                .into_iter()
                .map(|u| Value::String(u.to_string()))
                .collect(),
        )
    }

    /// Context document pinned for `iri`.
    pub fn document(&self, iri: &str) -> CodemetaResult<&Value> {
        let version = CodemetaVersion::from_context_url(iri).ok_or_else(|| {
            CodemetaError::context(format!(
                "context {iri} is not pinned and remote contexts are never fetched"
            ))
        })?;
        self.documents.get(&version).ok_or_else(|| {
            CodemetaError::context(format!("context document for {version} ({iri}) is not loaded"))
        })
    }

    fn definitions(&self, version: CodemetaVersion) -> Option<&serde_json::Map<String, Value>> {
        self.documents
            .get(&version)
            .and_then(|doc| doc.get("@context"))
            .and_then(Value::as_object)
    }

    /// True when the `version` context defines `term`.
    pub fn has_term(&self, version: CodemetaVersion, term: &str) -> bool {
        self.definitions(version)
            .is_some_and(|defs| defs.contains_key(term))
    }

    pub fn term_names(&self, version: CodemetaVersion) -> impl Iterator<Item = &str> {
        self.definitions(version)
            .into_iter()
            .flat_map(|defs| defs.keys().map(String::as_str))
    }

    /// Terms standing for a keyword (`"id": "@id"`), across the versions
    /// named by `context`.
    pub fn keyword_aliases(&self, context: &Value) -> Vec<(String, String)> {
        let iris: Vec<&str> = match context {
            Value::String(s) => vec![s.as_str()],
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };
        let mut aliases = Vec::new();
        for version in iris.into_iter().filter_map(CodemetaVersion::from_context_url) {
            for (term, definition) in self.definitions(version).into_iter().flatten() {
                if let Some(keyword) = definition.as_str().filter(|k| k.starts_with('@')) {
                    if !aliases.iter().any(|(t, _)| t == term) {
                        aliases.push((term.clone(), keyword.to_string()));
                    }
                }
            }
        }
        aliases
    }
}
