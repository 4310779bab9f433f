//! Naming rules linking a marker field to the fields generated from it.
//!
//! A marker named `DISTLINK_CRIMP` produces `DIST_CRIMP`, `MFR_CRIMP`, ...;
//! a marker named `CRIMP_DISTLINK` produces `CRIMP_DIST`, `CRIMP_MFR`, ...
//! Downstream BOM tooling reads these names, so the mapping must stay exact
//! and stable across runs.

use super::record::MetadataRecord;
use crate::core::LbrError;
use crate::library::Field;
use regex::Regex;

/// One of the five generated metadata attributes, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// Distributor name.
    Dist,
    /// Distributor part number.
    DistPn,
    /// Manufacturer.
    Mfr,
    /// Manufacturer part number.
    Mpn,
    /// Unit price.
    Price,
}

impl AttributeKey {
    /// All keys in the order their fields are inserted.
    pub const ALL: [Self; 5] = [Self::Dist, Self::DistPn, Self::Mfr, Self::Mpn, Self::Price];

    /// The attribute name stem, e.g. `DISTPN`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dist => "DIST",
            Self::DistPn => "DISTPN",
            Self::Mfr => "MFR",
            Self::Mpn => "MPN",
            Self::Price => "PRICE",
        }
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the attribute key the affix goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Affix precedes the key: `CRIMP_` + `MFR`.
    Left,
    /// Affix follows the key: `MFR` + `_CRIMP`.
    Right,
}

/// The non-token remainder of a marker name and where it attaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affix {
    text: String,
    side: Side,
}

impl Affix {
    /// Derive the affix from a marker name by removing the token once.
    ///
    /// An empty remainder, or one starting with `_`, is right-sided.
    pub fn from_marker_name(name: &str, token: &str) -> Self {
        let text = name.replacen(token, "", 1);
        let side = if text.is_empty() || text.starts_with('_') {
            Side::Right
        } else {
            Side::Left
        };
        Self {
            text,
            side,
        }
    }

    /// The affix text, e.g. `_CRIMP` or `CRIMP_`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Which side the affix attaches on.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Name of the generated field for `key`.
    pub fn field_name(&self, key: AttributeKey) -> String {
        match self.side {
            Side::Right => format!("{}{}", key.as_str(), self.text),
            Side::Left => format!("{}{}", self.text, key.as_str()),
        }
    }
}

/// A field holding a distributor product link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMarker {
    /// Child index of the marker field inside its part definition.
    pub position: usize,
    /// The marker field name.
    pub name: String,
    /// The link value.
    pub link: String,
    /// Naming convention for fields generated from this marker.
    pub affix: Affix,
}

impl LinkMarker {
    /// One field per [`AttributeKey`], in key order, named after this marker.
    pub fn generated_fields(&self, record: &MetadataRecord) -> Vec<Field> {
        AttributeKey::ALL
            .iter()
            .map(|&key| Field::new(self.affix.field_name(key), record.value(key)))
            .collect()
    }

    /// Every name [`generated_fields`](Self::generated_fields) can produce.
    pub fn generated_names(&self) -> impl Iterator<Item = String> + '_ {
        AttributeKey::ALL.iter().map(|&key| self.affix.field_name(key))
    }
}

/// Compiled matchers for marker and stale field names.
#[derive(Debug, Clone)]
pub struct FieldNaming {
    token: String,
    marker: Regex,
    stale_family: Regex,
}

impl FieldNaming {
    /// Build matchers for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`LbrError::ConfigError`] if the token cannot form a pattern.
    pub fn new(token: &str) -> Result<Self, LbrError> {
        let escaped = regex::escape(token);
        // Prefix or suffix, never both: a two-sided name has no single Side.
        let marker = Regex::new(&format!(r"^(?:\S+_{escaped}|{escaped}(?:_\S+)?)$")).map_err(|e| {
            LbrError::ConfigError {
                message: format!("Invalid link token '{token}': {e}"),
            }
        })?;
        let stale_family = Regex::new(r"^(?:DIST|MFR|MPN)").map_err(|e| LbrError::ConfigError {
            message: e.to_string(),
        })?;

        Ok(Self {
            token: token.to_string(),
            marker,
            stale_family,
        })
    }

    /// Whether `name` is a link marker name.
    pub fn is_marker(&self, name: &str) -> bool {
        self.marker.is_match(name)
    }

    /// Link markers among `fields`, in document order.
    pub fn discover_markers(&self, fields: &[(usize, Field)]) -> Vec<LinkMarker> {
        fields
            .iter()
            .filter(|(_, field)| self.is_marker(&field.name))
            .map(|(position, field)| LinkMarker {
                position: *position,
                name: field.name.clone(),
                link: field.value.clone(),
                affix: Affix::from_marker_name(&field.name, &self.token),
            })
            .collect()
    }

    /// Whether `field` is left over from an earlier generation and must go.
    ///
    /// Anything containing the token is kept. Otherwise a field is stale if it
    /// starts with `DIST`, `MFR` or `MPN`, or carries a name that one of
    /// `markers` generates (this covers `PRICE` and left-sided names).
    pub fn is_stale(&self, field: &Field, markers: &[LinkMarker]) -> bool {
        if field.name.contains(&self.token) {
            return false;
        }
        self.stale_family.is_match(&field.name)
            || markers.iter().any(|m| m.generated_names().any(|n| n == field.name))
    }
}
