//! Metadata rewrite engine.
//!
//! [`MetadataUpdater`] walks every part definition of a parsed library and,
//! for each part carrying link markers:
//!
//! 1. removes stale generated fields (markers are never touched)
//! 2. resolves each marker whose link points at the configured distributor
//! 3. inserts the five generated fields after the last marker, one block per
//!    resolved marker, in marker order
//!
//! Resolution failures become [`Warning`]s: they are appended to the
//! [`WarningLog`], emitted through `tracing`, and returned in the
//! [`UpdateReport`]. A failing link never aborts the part or the document.
//!
//! Parts without markers are left exactly as they are.
//!
//! # Examples
//!
//! ```rust,no_run
//! use lbrmeta::config::UpdaterConfig;
//! use lbrmeta::library::load_library;
//! use lbrmeta::resolver::{AttemptPolicy, DistributorResolver, HttpPageSource};
//! use lbrmeta::updater::MetadataUpdater;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = UpdaterConfig::default();
//! let resolver = DistributorResolver::new(
//!     HttpPageSource::new()?,
//!     AttemptPolicy::from_config(&config),
//!     config.distributor_name.clone(),
//! )?;
//! let updater = MetadataUpdater::new(resolver, config)?;
//!
//! let mut document = load_library(Path::new("connectors.lbr"))?;
//! let report = updater.update_document(&mut document, "connectors").await;
//! println!("{} fields inserted", report.fields_inserted);
//! # Ok(())
//! # }
//! ```

mod warning;

use crate::config::UpdaterConfig;
use crate::core::LbrError;
use crate::library::{Field, LibraryDocument, PartDefinition, PartLocation, part_locations};
use crate::metadata::{FieldNaming, LinkMarker};
use crate::resolver::{LinkResolver, ResolveError};
use crate::utils::progress::ProgressBar;
use tracing::{debug, warn};

pub use warning::{Warning, WarningKind, WarningLog};

/// Outcome of one document rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Warnings raised, in the order they occurred.
    pub warnings: Vec<Warning>,
    /// Parts whose field list changed.
    pub parts_updated: usize,
    /// Generated fields inserted.
    pub fields_inserted: usize,
    /// Stale fields removed.
    pub fields_removed: usize,
}

impl UpdateReport {
    /// Whether the document differs from what was loaded.
    pub fn modified(&self) -> bool {
        self.parts_updated > 0
    }
}

/// Rewrites distributor metadata in library documents.
pub struct MetadataUpdater<R> {
    resolver: R,
    naming: FieldNaming,
    config: UpdaterConfig,
    log: Option<WarningLog>,
    progress: ProgressBar,
}

impl<R: LinkResolver> MetadataUpdater<R> {
    /// Create an updater without a warning log or progress display.
    ///
    /// # Errors
    ///
    /// Returns [`LbrError::ConfigError`] if the configuration is invalid.
    pub fn new(resolver: R, config: UpdaterConfig) -> Result<Self, LbrError> {
        config.validate()?;
        Ok(Self {
            resolver,
            naming: FieldNaming::new(&config.link_token)?,
            config,
            log: None,
            progress: ProgressBar::hidden(),
        })
    }

    /// Append warnings to `log`.
    pub fn with_warning_log(mut self, log: WarningLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Route status output through `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Rewrite every part definition of `document` in place.
    ///
    /// `library` is the name used in warnings. The caller is responsible for
    /// running the validity guard before handing the document over.
    pub async fn update_document(&self, document: &mut LibraryDocument, library: &str) -> UpdateReport {
        let mut report = UpdateReport::default();

        for location in part_locations(document) {
            let Some(element) = document.root_mut().descendant_mut(&location.path) else {
                continue;
            };
            let mut part = PartDefinition::new(element);
            self.update_part(&mut part, &location, library, &mut report).await;
        }

        debug!(
            "{}: {} parts updated, {} fields inserted, {} removed, {} warnings",
            library,
            report.parts_updated,
            report.fields_inserted,
            report.fields_removed,
            report.warnings.len()
        );
        report
    }

    async fn update_part(
        &self,
        part: &mut PartDefinition<'_>,
        location: &PartLocation,
        library: &str,
        report: &mut UpdateReport,
    ) {
        let markers = self.naming.discover_markers(&part.fields());
        if markers.is_empty() {
            return;
        }

        if self.config.verbose {
            self.progress.println(format!(
                "\tUpdating device {} [{}]...",
                location.device,
                markers.len()
            ));
        }

        let removed = part.remove_fields(|field| self.naming.is_stale(field, &markers));

        // Removal shifts child indices.
        let markers = self.naming.discover_markers(&part.fields());
        let Some(mut cursor) = markers.last().map(|marker| marker.position + 1) else {
            return;
        };

        let mut inserted = 0;
        for marker in &markers {
            debug!(
                "{} on {}: affix '{}' ({:?} side)",
                marker.name,
                location.device,
                marker.affix.text(),
                marker.affix.side()
            );
            let Some(block) = self.resolve_marker(marker, location, library, report).await else {
                continue;
            };
            cursor = part.insert_fields(cursor, &block);
            inserted += block.len();
        }

        if removed > 0 || inserted > 0 {
            report.parts_updated += 1;
        }
        report.fields_removed += removed;
        report.fields_inserted += inserted;
    }

    async fn resolve_marker(
        &self,
        marker: &LinkMarker,
        location: &PartLocation,
        library: &str,
        report: &mut UpdateReport,
    ) -> Option<Vec<Field>> {
        if !marker.link.contains(&self.config.distributor_match) {
            debug!(
                "Skipping {} on {}: not a {} link",
                marker.name, location.device, self.config.distributor_match
            );
            return None;
        }

        match self.resolver.resolve(&marker.link).await {
            Ok(record) => {
                if record.lacks_pricing() {
                    self.raise(WarningKind::NoPricing, location, library, report);
                }
                Some(marker.generated_fields(&record))
            }
            Err(ResolveError::Ambiguous) => {
                self.raise(WarningKind::AmbiguousLink, location, library, report);
                None
            }
            Err(ResolveError::Invalid {
                ..
            }) => {
                self.raise(WarningKind::InvalidLink, location, library, report);
                None
            }
        }
    }

    fn raise(&self, kind: WarningKind, location: &PartLocation, library: &str, report: &mut UpdateReport) {
        let warning = Warning {
            kind,
            library: library.to_string(),
            unit: location.unit.clone(),
            part: location.device.clone(),
        };

        warn!("{}", warning);
        if let Some(log) = &self.log {
            if let Err(e) = log.append(&warning) {
                warn!("{:#}", e);
            }
        }
        report.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests;
