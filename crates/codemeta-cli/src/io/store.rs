use std::fs;
use std::path::{Path, PathBuf};

use codemeta_core::defaults::SESSION_KEY;
use codemeta_core::prelude::{CodemetaError, CodemetaResult, SessionStore};

/// Session slot stored as `<session_dir>/codemetaText.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(session_dir: &Path) -> Self {
        Self {
            path: session_dir.join(format!("{SESSION_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> CodemetaResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| CodemetaError::storage(format!("{}: {e}", self.path.display())))
    }

    fn save(&mut self, text: &str) -> CodemetaResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| CodemetaError::storage(format!("{}: {e}", dir.display())))?;
        }
        fs::write(&self.path, text)
            .map_err(|e| CodemetaError::storage(format!("{}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(&dir.path().join("session"));
        assert_eq!(store.load().unwrap(), None);
        store.save("{}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
    }
}
