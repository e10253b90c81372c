//! `json_ld::Loader` over the pinned context documents.

use iref::Iri;
use json_ld::{LoadError, Loader, LoadingResult, RemoteDocument};
use tracing::warn;

use super::ContextRegistry;

/// Serves the registry's documents for their context IRIs. Any other IRI is a
/// load error; there is no network fallback.
#[derive(Debug, Clone, Copy)]
pub struct PinnedLoader<'a> {
    contexts: &'a ContextRegistry,
}

impl<'a> PinnedLoader<'a> {
    pub fn new(contexts: &'a ContextRegistry) -> Self {
        Self { contexts }
    }
}

impl Loader for PinnedLoader<'_> {
    async fn load(&self, url: &Iri) -> LoadingResult {
        match self.contexts.document(url.as_str()) {
            Ok(document) => Ok(RemoteDocument::new(
                Some(url.to_owned()),
                None,
                json_syntax::Value::from_serde_json(document.clone()),
            )),
            Err(e) => {
                warn!(url = %url, "refusing to load context");
                Err(LoadError::new(url.to_owned(), e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::CodemetaVersion;
    use futures::executor::block_on;
    use iref::IriBuf;

    fn iri(s: &str) -> IriBuf {
        IriBuf::new(s.to_string()).unwrap()
    }

    #[test]
    fn pinned_iris_are_served_from_memory() {
        let contexts = ContextRegistry::bundled().unwrap();
        let mut loader = PinnedLoader::new(&contexts);
        for version in CodemetaVersion::ALL {
            let url = iri(version.context_url());
            let doc = block_on(loader.load(url.as_iri())).unwrap();
            assert!(doc.document().as_object().is_some());
        }
    }

    #[test]
    fn other_iris_are_refused() {
        let contexts = ContextRegistry::bundled().unwrap();
        let mut loader = PinnedLoader::new(&contexts);
        let url = iri("https://schema.org/");
        assert!(block_on(loader.load(url.as_iri())).is_err());
    }

    #[test]
    fn unloaded_versions_are_refused() {
        let contexts = ContextRegistry::new();
        let mut loader = PinnedLoader::new(&contexts);
        let url = iri(CodemetaVersion::V2.context_url());
        assert!(block_on(loader.load(url.as_iri())).is_err());
    }
}
