//! EAGLE library documents.
//!
//! - [`LibraryDocument`]: the parsed file, with the validity guard and the
//!   self-closing serializer
//! - [`PartDefinition`]: a mutable view over one device variant's attributes
//! - [`part_locations`]: every part definition in document order
//!
//! # Example
//!
//! ```rust
//! use lbrmeta::library::{LibraryDocument, part_locations};
//!
//! let doc = LibraryDocument::parse(
//!     r#"<eagle><drawing><library><devicesets><deviceset name="R">
//!        <devices><device name="0603" package="R0603">
//!        <technologies><technology name=""/></technologies>
//!        </device></devices></deviceset></devicesets></library></drawing></eagle>"#,
//! )?;
//! assert!(doc.is_library());
//! assert_eq!(part_locations(&doc)[0].device, "0603");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod document;
pub mod part;

use crate::core::LbrError;
use anyhow::{Context, Result};
use std::path::Path;

pub use document::{Element, LibraryDocument, Node};
pub use part::{Field, PartDefinition, PartLocation, part_locations};

/// Read and validate a library file.
///
/// The validity guard runs here, before any caller can mutate the tree.
///
/// # Errors
///
/// Returns [`LbrError::FileSystemError`] when the file cannot be read and
/// [`LbrError::MalformedDocument`] when it does not parse or its root element
/// is not `<eagle>`.
pub fn load_library(path: &Path) -> Result<LibraryDocument> {
    let content = std::fs::read_to_string(path).with_context(|| LbrError::FileSystemError {
        operation: "read".to_string(),
        path: path.display().to_string(),
    })?;

    let document = LibraryDocument::parse(&content).map_err(|e| LbrError::MalformedDocument {
        path: path.display().to_string(),
        reason: format!("{e:#}"),
    })?;

    if !document.is_library() {
        return Err(LbrError::MalformedDocument {
            path: path.display().to_string(),
            reason: format!("root element is <{}>, expected <eagle>", document.root().name),
        }
        .into());
    }

    Ok(document)
}

/// Library name used in warnings: the file name without its extension.
pub fn library_name(path: &Path) -> String {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default()
}
