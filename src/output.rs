// ============================================================================
// output.rs — Writing the finished ICO
// ============================================================================
//
// The file is written to a uniquely named temp file in the destination
// directory and persisted over the destination, so a failed run never
// leaves a truncated favicon.ico.
// ============================================================================

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{IcoError, Result};
use crate::ico::IconContainer;
use crate::utils::ensure_directory_exists;

fn persist_with<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> Result<()>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    ensure_directory_exists(dir).map_err(|e| IcoError::io(dir, e))?;

    // Dropping `tmp` on any early return removes the temp file.
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| IcoError::io(dir, e))?;
    fill(&mut tmp).map_err(|e| match e {
        IcoError::Write(source) => IcoError::io(path, source),
        other => other,
    })?;
    tmp.as_file().sync_all().map_err(|e| IcoError::io(path, e))?;
    tmp.persist(path).map_err(|e| IcoError::io(path, e.error))?;
    Ok(())
}

/// Writes `bytes` to `path`, replacing any existing file only on success.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    persist_with(path, |tmp| {
        tmp.write_all(bytes).map_err(IcoError::Write)?;
        tmp.flush().map_err(IcoError::Write)
    })
}

/// Encodes `container` straight into `path`; returns the file length.
pub fn write_container(path: &Path, container: &IconContainer) -> Result<usize> {
    // Encoding errors (empty, too large) surface before any file is created.
    if container.is_empty() {
        return Err(IcoError::Empty);
    }
    persist_with(path, |tmp| container.write_to(tmp))?;
    Ok(container.encoded_len())
}
