//! Per-file processing for a batch of libraries.

use crate::core::{LbrError, user_friendly_error};
use crate::library::{library_name, load_library};
use crate::resolver::LinkResolver;
use crate::updater::{MetadataUpdater, UpdateReport};
use crate::utils::fs::atomic_write;
use crate::utils::progress::ProgressBar;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Totals over one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files that were processed without error.
    pub files_processed: usize,
    /// Files rewritten on disk.
    pub files_written: usize,
    /// Files skipped because of an error.
    pub files_failed: usize,
    /// Warnings raised across all files.
    pub warnings: usize,
}

/// Load, update and (when changed) write back one library.
///
/// The file is only written when the update modified the document, and
/// never when it fails the validity guard.
///
/// # Errors
///
/// Returns [`LbrError::MalformedDocument`] for files that are not EAGLE
/// libraries and [`LbrError::FileSystemError`] for read or write failures.
pub async fn process_library<R: LinkResolver>(
    path: &Path,
    updater: &MetadataUpdater<R>,
) -> Result<UpdateReport> {
    let mut document = load_library(path)?;
    let report = updater.update_document(&mut document, &library_name(path)).await;

    if report.modified() {
        let xml = document.to_xml()?;
        atomic_write(path, xml.as_bytes()).with_context(|| LbrError::FileSystemError {
            operation: "write".to_string(),
            path: path.display().to_string(),
        })?;
        info!("Updated {}", path.display());
    } else {
        debug!("No changes to {}", path.display());
    }

    Ok(report)
}

/// Process `files` in order. Errors are displayed per file and never stop
/// the batch.
pub async fn run_batch<R: LinkResolver>(
    files: &[PathBuf],
    updater: &MetadataUpdater<R>,
    progress: &ProgressBar,
    echo_warnings: bool,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for path in files {
        progress.set_message(library_name(path));

        match process_library(path, updater).await {
            Ok(report) => {
                summary.files_processed += 1;
                if report.modified() {
                    summary.files_written += 1;
                }
                summary.warnings += report.warnings.len();
                if echo_warnings {
                    for warning in &report.warnings {
                        progress.println(format!("\t{}", warning.to_string().yellow()));
                    }
                }
            }
            Err(e) => {
                summary.files_failed += 1;
                let context = user_friendly_error(e);
                progress.suspend(|| context.display());
            }
        }

        progress.inc(1);
    }

    debug!(
        "Batch done: {} processed, {} written, {} failed",
        summary.files_processed, summary.files_written, summary.files_failed
    );
    summary
}
