//! Per-link warnings and the append-only warning log.

use anyhow::{Context, Result};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What went wrong with a link marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// No product page could be obtained for the link.
    InvalidLink,
    /// The link leads to a search listing.
    AmbiguousLink,
    /// The product resolved but has no single-unit price.
    NoPricing,
}

impl WarningKind {
    /// The label written to the log.
    pub const fn label(self) -> &'static str {
        match self {
            Self::InvalidLink => "Invalid Device Link",
            Self::AmbiguousLink => "Link Leads to Search",
            Self::NoPricing => "Device is Sold Out",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A warning attributed to one part of one library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Kind of problem.
    pub kind: WarningKind,
    /// Library name (file name without `.lbr`).
    pub library: String,
    /// Enclosing deviceset name.
    pub unit: String,
    /// Device name.
    pub part: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {} -> {}...", self.kind, self.library, self.unit, self.part)
    }
}

/// Append-only text log, one warning per line.
#[derive(Debug, Clone)]
pub struct WarningLog {
    path: PathBuf,
}

impl WarningLog {
    /// Log writing to `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `warning` as one line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&self, warning: &Warning) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open warning log: {}", self.path.display()))?;
        writeln!(file, "{warning}")
            .with_context(|| format!("Failed to write warning log: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn warning(kind: WarningKind) -> Warning {
        Warning {
            kind,
            library: "connectors".into(),
            unit: "HEADER-2".into(),
            part: "TH".into(),
        }
    }

    #[test]
    fn test_line_format() {
        assert_eq!(
            warning(WarningKind::AmbiguousLink).to_string(),
            "Link Leads to Search: connectors -> HEADER-2 -> TH..."
        );
        assert_eq!(
            warning(WarningKind::InvalidLink).to_string(),
            "Invalid Device Link: connectors -> HEADER-2 -> TH..."
        );
        assert_eq!(
            warning(WarningKind::NoPricing).to_string(),
            "Device is Sold Out: connectors -> HEADER-2 -> TH..."
        );
    }

    #[test]
    fn test_log_appends_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("log.txt");
        std::fs::write(&path, "earlier run\n").unwrap();

        let log = WarningLog::new(&path);
        log.append(&warning(WarningKind::InvalidLink)).unwrap();
        log.append(&warning(WarningKind::NoPricing)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "earlier run");
        assert!(lines[2].starts_with("Device is Sold Out"));
    }
}
