use lifescrum_core::ScrumResult;
use std::io::Write;
use std::path::Path;

/// Atomic file writer that prevents half-written slots.
/// Writes to a temp file in the same directory, then renames it over the target.
pub struct AtomicWriter;

impl AtomicWriter {
    pub fn write_atomic(path: &Path, data: &[u8]) -> ScrumResult<()> {
        // Same directory keeps the rename on one filesystem
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(data)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(path).map_err(|e| e.error)?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    pub fn read_all(path: &Path) -> ScrumResult<Vec<u8>> {
        let data = std::fs::read(path)?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}
