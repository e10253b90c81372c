//! SPDX license registry and license selection.
//!
//! The registry is the membership vocabulary for typed license ids. When no
//! list could be loaded the registry degrades according to its
//! [`LicensePolicy`] instead of failing.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::config::LicensePolicy;
use crate::errors::{CodemetaError, CodemetaResult};
use crate::iri::SPDX_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    #[serde(rename = "licenseId")]
    pub license_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct LicenseList {
    licenses: Vec<LicenseInfo>,
}

/// Known SPDX licenses. `None` when no list is loaded.
#[derive(Debug, Clone, Default)]
pub struct LicenseRegistry {
    licenses: Option<Vec<LicenseInfo>>,
    policy: LicensePolicy,
}

impl LicenseRegistry {
    /// Registry without a list: every non-empty id is accepted.
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Parse an SPDX `licenses.json` document.
    pub fn from_json(text: &str) -> CodemetaResult<Self> {
        let list: LicenseList = serde_json::from_str(text)
            .map_err(|e| CodemetaError::invalid_argument(format!("license list is not valid: {e}")))?;
        Ok(Self::from_licenses(list.licenses))
    }

    pub fn from_licenses(licenses: Vec<LicenseInfo>) -> Self {
        Self {
            licenses: Some(licenses),
            policy: LicensePolicy::default(),
        }
    }

    #[cfg(feature = "bundled-data")]
    pub fn bundled() -> CodemetaResult<Self> {
        Self::from_json(include_str!("../data/spdx/licenses.json"))
    }

    pub fn with_policy(mut self, policy: LicensePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LicensePolicy {
        self.policy
    }

    pub fn is_loaded(&self) -> bool {
        self.licenses.is_some()
    }

    pub fn len(&self) -> usize {
        self.licenses.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn licenses(&self) -> &[LicenseInfo] {
        self.licenses.as_deref().unwrap_or(&[])
    }

    pub fn get(&self, id: &str) -> Option<&LicenseInfo> {
        self.licenses().iter().find(|l| l.license_id == id)
    }

    /// Canonical spelling of a typed id.
    ///
    /// An exact match wins; otherwise a case-insensitive match is returned in
    /// the registry's casing.
    pub fn normalize(&self, input: &str) -> CodemetaResult<String> {
        let id = input.trim();
        if id.is_empty() {
            return Err(CodemetaError::invalid_argument("license id must not be empty"));
        }

        let Some(licenses) = &self.licenses else {
            return match self.policy {
                LicensePolicy::PermissiveWhenMissing => {
                    debug!(license = %id, "no license list loaded, accepting id as typed");
                    Ok(id.to_string())
                }
                LicensePolicy::Strict => Err(CodemetaError::UnknownLicense(id.to_string())),
            };
        };

        licenses
            .iter()
            .find(|l| l.license_id == id)
            .or_else(|| licenses.iter().find(|l| l.license_id.eq_ignore_ascii_case(id)))
            .map(|l| l.license_id.clone())
            .ok_or_else(|| CodemetaError::UnknownLicense(id.to_string()))
    }

    /// Licenses whose id or name contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&LicenseInfo> {
        let needle = query.trim().to_lowercase();
        self.licenses()
            .iter()
            .filter(|l| {
                needle.is_empty()
                    || l.license_id.to_lowercase().contains(&needle)
                    || l.name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Ordered set of selected SPDX ids.
///
/// Serialized as a plain list; duplicates in a deserialized list are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LicenseSelection(Vec<String>);

impl LicenseSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|l| l == id)
    }

    /// Validate `input` against `registry` and append it.
    ///
    /// Returns `Ok(false)` when the id was already selected.
    pub fn insert(&mut self, registry: &LicenseRegistry, input: &str) -> CodemetaResult<bool> {
        let id = registry.normalize(input)?;
        Ok(self.insert_raw(id))
    }

    /// Append an id without checking it against a registry.
    pub fn insert_raw(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|l| l != id);
        self.0.len() != before
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Selected ids as SPDX IRIs, in selection order.
    pub fn to_iris(&self) -> Vec<String> {
        self.0.iter().map(|id| format!("{SPDX_PREFIX}{id}")).collect()
    }
}

impl FromIterator<String> for LicenseSelection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.insert_raw(id);
        }
        selection
    }
}

impl<'de> Deserialize<'de> for LicenseSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<String>::deserialize(deserializer).map(Self::from_iter)
    }
}

/// SPDX id of a license IRI, or `None` for anything else.
pub fn spdx_id(iri: &str) -> Option<&str> {
    iri.strip_prefix(SPDX_PREFIX).filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn registry() -> LicenseRegistry {
        LicenseRegistry::bundled().unwrap()
    }

    #[test]
    fn bundled_list_loads() {
        let r = registry();
        assert!(r.is_loaded());
        assert!(r.get("MIT").is_some());
        assert_eq!(r.get("MIT").map(|l| l.name.as_str()), Some("MIT License"));
    }

    #[test]
    fn normalize_prefers_exact_then_case_insensitive() {
        let r = registry();
        assert_eq!(r.normalize(" MIT ").unwrap(), "MIT");
        assert_eq!(r.normalize("mit").unwrap(), "MIT");
        assert_eq!(r.normalize("mit-0").unwrap(), "MIT-0");
        assert_matches!(r.normalize("MIT-1"), Err(CodemetaError::UnknownLicense(id)) if id == "MIT-1");
        assert_matches!(r.normalize("  "), Err(CodemetaError::InvalidArgument(_)));
    }

    #[test]
    fn full_list_is_bundled() {
        let r = registry();
        assert!(r.len() > 600);
        for id in ["BSD-4-Clause", "CDDL-1.0", "X11", "LGPL-2.0-only", "Apache-2.0", "0BSD"] {
            assert_eq!(r.normalize(id).unwrap(), id);
        }
        assert_eq!(r.normalize("cddl-1.0").unwrap(), "CDDL-1.0");
        assert_eq!(r.normalize("lgpl-2.0-only").unwrap(), "LGPL-2.0-only");
        assert_eq!(
            r.get("BSD-4-Clause").map(|l| l.name.as_str()),
            Some("BSD 4-Clause \"Original\" or \"Old\" License")
        );
    }

    #[test]
    fn missing_list_follows_policy() {
        let r = LicenseRegistry::permissive();
        assert_eq!(r.normalize("Anything").unwrap(), "Anything");
        let r = r.with_policy(LicensePolicy::Strict);
        assert_matches!(r.normalize("MIT"), Err(CodemetaError::UnknownLicense(_)));
    }

    #[test]
    fn duplicate_ids_are_ignored() {
        let r = registry();
        let mut s = LicenseSelection::new();
        assert!(s.insert(&r, "MIT").unwrap());
        assert!(!s.insert(&r, "mit").unwrap());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn deserialized_duplicates_are_dropped() {
        let s: LicenseSelection = serde_json::from_str(r#"["MIT", "GPL-3.0", "MIT"]"#).unwrap();
        assert_eq!(s.ids(), ["MIT".to_string(), "GPL-3.0".to_string()]);
        assert_eq!(serde_json::to_string(&s).unwrap(), r#"["MIT","GPL-3.0"]"#);
    }

    #[test]
    fn selection_order_and_iris() {
        let s: LicenseSelection = ["GPL-3.0", "MIT"].into_iter().map(String::from).collect();
        assert_eq!(
            s.to_iris(),
            vec![
                "https://spdx.org/licenses/GPL-3.0".to_string(),
                "https://spdx.org/licenses/MIT".to_string()
            ]
        );
        let mut s = s;
        assert!(s.remove("GPL-3.0"));
        assert!(!s.remove("GPL-3.0"));
        assert_eq!(s.ids(), ["MIT".to_string()]);
    }

    #[test]
    fn search_matches_id_or_name() {
        let r = registry();
        let hits: Vec<_> = r.search("affero").into_iter().map(|l| l.license_id.as_str()).collect();
        assert!(hits.contains(&"AGPL-3.0-or-later"));
        assert_eq!(r.search("").len(), r.len());
    }

    #[test]
    fn spdx_prefix_is_stripped() {
        assert_eq!(spdx_id("https://spdx.org/licenses/MIT"), Some("MIT"));
        assert_eq!(spdx_id("https://example.org/license"), None);
    }
}
