//! Context documents and the SPDX list, from `--data-dir` or bundled.
//!
//! Layout of a data directory:
//! `contexts/codemeta-2.0.jsonld`, `contexts/codemeta-3.0.jsonld`,
//! `spdx/licenses.json`. Each missing file falls back to the bundled copy.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codemeta_core::prelude::{CodemetaVersion, ContextRegistry, Engine, EngineConfig, LicenseRegistry};
use tracing::debug;

pub fn context_path(data_dir: &Path, version: CodemetaVersion) -> PathBuf {
    data_dir
        .join("contexts")
        .join(format!("codemeta-{}.jsonld", version.as_str()))
}

pub fn licenses_path(data_dir: &Path) -> PathBuf {
    data_dir.join("spdx").join("licenses.json")
}

pub fn load_engine(data_dir: Option<&Path>, config: EngineConfig) -> Result<Engine> {
    let mut contexts = ContextRegistry::bundled()?;
    let mut licenses = LicenseRegistry::bundled()?;

    if let Some(dir) = data_dir {
        for version in CodemetaVersion::ALL {
            let path = context_path(dir, version);
            if let Some(text) = read_optional(&path)? {
                contexts.insert_text(version, &text)?;
                debug!(path = %path.display(), version = %version, "loaded context document");
            }
        }
        let path = licenses_path(dir);
        if let Some(text) = read_optional(&path)? {
            licenses = LicenseRegistry::from_json(&text)?;
            debug!(path = %path.display(), count = licenses.len(), "loaded SPDX license list");
        }
    }

    Ok(Engine::new(config, contexts, licenses)?)
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_files_override_bundled_copies() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("spdx")).unwrap();
        fs::write(
            licenses_path(dir.path()),
            r#"{"licenses": [{"licenseId": "Only-1.0", "name": "Only"}]}"#,
        )
        .unwrap();

        let engine = load_engine(Some(dir.path()), EngineConfig::default()).unwrap();
        assert_eq!(engine.licenses().len(), 1);
        assert!(engine.contexts().is_loaded(CodemetaVersion::V3));
    }

    #[test]
    fn context_paths() {
        let p = context_path(Path::new("/data"), CodemetaVersion::V2);
        assert_eq!(p, PathBuf::from("/data/contexts/codemeta-2.0.jsonld"));
    }
}
