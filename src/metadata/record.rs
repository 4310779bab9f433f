use super::naming::AttributeKey;
use crate::constants::PRICE_NOT_AVAILABLE;

/// Distributor metadata resolved from one product link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    /// Distributor display name.
    pub distributor: String,
    /// Distributor part number.
    pub distributor_part_number: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Manufacturer part number.
    pub manufacturer_part_number: String,
    /// Single-unit price, or `N/A` when none is listed.
    pub price: String,
}

impl MetadataRecord {
    /// Value for one generated attribute.
    pub fn value(&self, key: AttributeKey) -> &str {
        match key {
            AttributeKey::Dist => &self.distributor,
            AttributeKey::DistPn => &self.distributor_part_number,
            AttributeKey::Mfr => &self.manufacturer,
            AttributeKey::Mpn => &self.manufacturer_part_number,
            AttributeKey::Price => &self.price,
        }
    }

    /// Whether the product had no single-unit price (sold out or discontinued).
    pub fn lacks_pricing(&self) -> bool {
        self.price == PRICE_NOT_AVAILABLE
    }
}
