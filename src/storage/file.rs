//! File store

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{KeyValueStore, StoreError};

/// Store that keeps each key in its own `<key>.json` file under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the stored files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns true if `key` can name a file in the store: non-empty ASCII
    /// alphanumerics, `-`, `_` or `.`, not starting with `.`.
    pub fn is_valid_key(key: &str) -> bool {
        !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if !Self::is_valid_key(key) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let staging = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir)?;
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;

        debug!(path = %path.display(), "stored value");

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn get_before_any_write_returns_none() -> TestResult {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path().join("missing"));

        assert_eq!(store.get("cart")?, None);

        Ok(())
    }

    #[test]
    fn set_then_get_reads_file() -> TestResult {
        let dir = tempdir()?;
        let mut store = FileStore::new(dir.path().join("data"));

        store.set("cart", "[]".to_string())?;

        assert_eq!(store.get("cart")?.as_deref(), Some("[]"));
        assert!(dir.path().join("data/cart.json").exists());
        assert!(!dir.path().join("data/cart.json.tmp").exists());

        Ok(())
    }

    #[test]
    fn values_survive_a_new_store_instance() -> TestResult {
        let dir = tempdir()?;

        FileStore::new(dir.path()).set("cart", "[1,2]".to_string())?;

        assert_eq!(
            FileStore::new(dir.path()).get("cart")?.as_deref(),
            Some("[1,2]")
        );

        Ok(())
    }

    #[test]
    fn remove_deletes_file_and_tolerates_missing() -> TestResult {
        let dir = tempdir()?;
        let mut store = FileStore::new(dir.path());

        store.set("cart", "[]".to_string())?;
        store.remove("cart")?;
        store.remove("cart")?;

        assert_eq!(store.get("cart")?, None);

        Ok(())
    }

    #[test]
    fn rejects_path_like_keys() -> TestResult {
        let dir = tempdir()?;
        let mut store = FileStore::new(dir.path());

        for key in ["", "../cart", "a/b", ".hidden", "my cart"] {
            let result = store.set(key, "[]".to_string());

            assert!(
                matches!(result, Err(StoreError::InvalidKey(_))),
                "expected InvalidKey for {key:?}, got {result:?}"
            );
        }

        Ok(())
    }

    #[test]
    fn key_validation_accepts_plain_names() {
        for key in ["cart", "guest-cart", "cart_v2", "cart.backup"] {
            assert!(
                FileStore::is_valid_key(key),
                "expected {key:?} to be valid"
            );
        }
    }
}
