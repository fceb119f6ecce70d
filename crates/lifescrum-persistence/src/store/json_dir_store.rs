use crate::store::atomic_writer::AtomicWriter;
use crate::traits::KeyValueStore;
use lifescrum_core::{ScrumError, ScrumResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SLOT_EXTENSION: &str = "json";

/// Directory-backed store: slot `k` lives in `<dir>/k.json`.
/// Every write goes through `AtomicWriter`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> ScrumResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ScrumError::Storage(format!("Invalid slot key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.{}", key, SLOT_EXTENSION)))
    }
}

impl KeyValueStore for JsonDirStore {
    fn get(&self, key: &str) -> ScrumResult<Option<String>> {
        let path = self.slot_path(key)?;
        match AtomicWriter::read_all(&path) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| ScrumError::Storage(format!("{}: {}", path.display(), e))),
            Err(ScrumError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> ScrumResult<()> {
        let path = self.slot_path(key)?;
        std::fs::create_dir_all(&self.dir)?;
        AtomicWriter::write_atomic(&path, value.as_bytes())?;
        tracing::info!("Saved slot {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> ScrumResult<()> {
        let path = self.slot_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> ScrumResult<Vec<String>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SLOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
