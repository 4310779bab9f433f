//! Distributor metadata and the naming contract for generated fields.
//!
//! - [`MetadataRecord`]: the five values resolved from one product link
//! - [`FieldNaming`]: recognizes link markers and stale fields
//! - [`LinkMarker`] / [`Affix`]: derive generated names from a marker name

pub mod naming;
pub mod record;

pub use naming::{Affix, AttributeKey, FieldNaming, LinkMarker, Side};
pub use record::MetadataRecord;
