//! Atomic file replacement using a sibling temp file.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically replaces the contents of `path` with `content`.
///
/// The data goes to a temporary file in the same directory, is synced to
/// disk, and is then persisted over `path`. Readers see either the old file or
/// the new one, never a truncated mix. An existing file keeps its
/// permissions.
///
/// # Errors
///
/// Returns an error if the temp file cannot be created, written, synced or
/// renamed into place. On error the original file is left as it was.
///
/// # Examples
///
/// ```rust,no_run
/// use lbrmeta::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new("resistors.lbr"), b"<eagle/>\n")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write to temp file: {}", temp.path().display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;

    // The temp file is created owner-only; carry over the target's mode.
    if let Ok(metadata) = std::fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("Failed to copy permissions of: {}", path.display()))?;
    }

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace: {}", path.display()))?;

    Ok(())
}
