//! Sample libraries and distributor pages.

use crate::metadata::MetadataRecord;
use std::fmt::Write;

/// A distributor product page for SN74HC00N with a quantity-1 price row.
pub const PRODUCT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>SN74HC00N Texas Instruments</title></head>
<body>
<table id="product-details">
<tr><th>Digi-Key Part Number</th>
<td><meta itemprop="productID" content="sku:296-1234-ND">296-1234-ND</td></tr>
<tr><th>Manufacturer</th>
<td><h2 itemprop="manufacturer"><a href="/tr"><span itemprop="name">Texas Instruments</span></a></h2></td></tr>
<tr><th>Manufacturer Part Number</th>
<td><h1 itemprop="model">
  SN74HC00N
</h1></td></tr>
</table>
<table id="product-dollars">
<tr><th>Price Break</th><th>Unit Price</th><th>Extended Price</th></tr>
<tr><td>1</td><td>0.35</td><td>0.35</td></tr>
<tr><td>10</td><td>0.312</td><td>3.12</td></tr>
<tr><td>100</td><td>0.2178</td><td>21.78</td></tr>
</table>
</body>
</html>
"#;

const UNIT_PRICE_ROW: &str = "<tr><td>1</td><td>0.35</td><td>0.35</td></tr>";

/// A distributor search listing: the link matched several products.
pub const SEARCH_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
<div id="productIndexList">
<h1>Products for "74HC00"</h1>
<ul><li><a href="/p/1">Logic Gates (120)</a></li></ul>
</div>
</body>
</html>
"#;

/// [`PRODUCT_PAGE`] without the quantity-1 price row, as for a sold out part.
pub fn product_page_without_unit_price() -> String {
    PRODUCT_PAGE.replace(UNIT_PRICE_ROW, "")
}

/// A record as the resolver would produce it for `mpn`.
pub fn sample_record(mpn: &str, price: &str) -> MetadataRecord {
    MetadataRecord {
        distributor: "Digikey".to_string(),
        distributor_part_number: format!("{mpn}-ND"),
        manufacturer: "Texas Instruments".to_string(),
        manufacturer_part_number: mpn.to_string(),
        price: price.to_string(),
    }
}

/// Builder for EAGLE library XML.
///
/// Each call to [`device`](Self::device) adds a deviceset holding one
/// packaged device with one default technology.
#[derive(Clone, Debug, Default)]
pub struct LibraryFixture {
    devicesets: Vec<DevicesetFixture>,
}

#[derive(Clone, Debug)]
struct DevicesetFixture {
    name: String,
    device: String,
    attributes: Vec<(String, String)>,
}

impl LibraryFixture {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add deviceset `unit` with device `device` carrying `attributes`.
    pub fn device(mut self, unit: &str, device: &str, attributes: &[(&str, &str)]) -> Self {
        self.devicesets.push(DevicesetFixture {
            name: unit.to_string(),
            device: device.to_string(),
            attributes: attributes.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        });
        self
    }

    /// Render the library with an XML declaration and DOCTYPE.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <!DOCTYPE eagle SYSTEM \"eagle.dtd\">\n\
             <eagle version=\"9.6.2\">\n<drawing>\n<library>\n<devicesets>\n",
        );
        for set in &self.devicesets {
            let _ = write!(
                xml,
                "<deviceset name=\"{}\">\n<gates>\n<gate name=\"G$1\" symbol=\"PIN\" x=\"0\" y=\"0\"/>\n</gates>\n\
                 <devices>\n<device name=\"{}\" package=\"PKG\">\n<connects>\n</connects>\n\
                 <technologies>\n<technology name=\"\">\n",
                set.name, set.device
            );
            for (name, value) in &set.attributes {
                let _ = writeln!(xml, "<attribute name=\"{name}\" value=\"{value}\" constant=\"no\"/>");
            }
            xml.push_str("</technology>\n</technologies>\n</device>\n</devices>\n</deviceset>\n");
        }
        xml.push_str("</devicesets>\n</library>\n</drawing>\n</eagle>\n");
        xml
    }
}
