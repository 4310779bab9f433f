//! Library file discovery.

use crate::constants::LIBRARY_EXTENSION;
use crate::core::LbrError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Finds every library file in `dir`, sorted by path.
///
/// Only files directly inside `dir` are returned unless `recursive` is set.
/// The extension match is case-sensitive, like EAGLE itself.
///
/// # Errors
///
/// Returns [`LbrError::InvalidDirectory`] if `dir` is not a directory, and an
/// I/O error if a directory entry cannot be read.
pub fn find_libraries(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LbrError::InvalidDirectory {
            path: dir.display().to_string(),
        }
        .into());
    }

    let mut walker = WalkDir::new(dir).min_depth(1).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut libraries = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to scan: {}", dir.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == LIBRARY_EXTENSION)
        {
            libraries.push(entry.into_path());
        }
    }

    libraries.sort();
    Ok(libraries)
}
