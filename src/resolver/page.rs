//! Product page parsing.
//!
//! The distributor renders a product as `table#product-details` with schema.org
//! microdata, and prices in `table#product-dollars` with one row per
//! quantity break (`quantity | unit price | extended price`). For the
//! quantity-1 row both prices are the same; the last column is read. A link that
//! matches several products lands on a listing with `div#productIndexList`.

use crate::constants::PRICE_NOT_AVAILABLE;
use crate::metadata::MetadataRecord;
use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};

/// What a fetched page turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// A product page with every required field.
    Product(MetadataRecord),
    /// A search-results listing instead of a single product.
    SearchResults,
    /// Anything else: a rate-limit page, an error page, a half-rendered product.
    Unrecognized,
}

/// Compiled selectors for product pages.
#[derive(Debug, Clone)]
pub struct ProductSelectors {
    search_results: Selector,
    details: Selector,
    product_id: Selector,
    manufacturer: Selector,
    model: Selector,
    price_rows: Selector,
    cell: Selector,
}

impl ProductSelectors {
    /// Compile the selectors.
    ///
    /// # Errors
    ///
    /// Returns an error if a selector fails to parse.
    pub fn new() -> Result<Self> {
        Ok(Self {
            search_results: selector("div#productIndexList")?,
            details: selector("table#product-details")?,
            product_id: selector(r#"[itemprop="productID"]"#)?,
            manufacturer: selector(r#"h2[itemprop="manufacturer"] [itemprop="name"]"#)?,
            model: selector(r#"h1[itemprop="model"]"#)?,
            price_rows: selector("table#product-dollars tr")?,
            cell: selector("td")?,
        })
    }

    /// Classify a page and extract the product record from it.
    ///
    /// `distributor` becomes the record's `DIST` value. A missing single-unit
    /// price row yields `N/A` rather than a failure.
    pub fn parse(&self, html: &str, distributor: &str) -> PageOutcome {
        let document = Html::parse_document(html);

        let Some(details) = document.select(&self.details).next() else {
            return if document.select(&self.search_results).next().is_some() {
                PageOutcome::SearchResults
            } else {
                PageOutcome::Unrecognized
            };
        };

        let distributor_part_number = details
            .select(&self.product_id)
            .next()
            .and_then(|e| e.value().attr("content"))
            .map(|content| {
                let content = content.trim();
                content.strip_prefix("sku:").unwrap_or(content).to_string()
            });
        let manufacturer = details.select(&self.manufacturer).next().map(text_of);
        let model = details.select(&self.model).next().map(text_of);

        let (Some(distributor_part_number), Some(manufacturer), Some(manufacturer_part_number)) =
            (distributor_part_number, manufacturer, model)
        else {
            tracing::debug!("Product table present but incomplete");
            return PageOutcome::Unrecognized;
        };

        PageOutcome::Product(MetadataRecord {
            distributor: distributor.to_string(),
            distributor_part_number,
            manufacturer,
            manufacturer_part_number,
            price: self.unit_price(&document).unwrap_or_else(|| PRICE_NOT_AVAILABLE.to_string()),
        })
    }

    fn unit_price(&self, document: &Html) -> Option<String> {
        document.select(&self.price_rows).find_map(|row| {
            let cells: Vec<_> = row.select(&self.cell).collect();
            match cells.as_slice() {
                [quantity, _, price] if text_of(*quantity) == "1" => Some(text_of(*price)),
                _ => None,
            }
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector '{css}': {e}"))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
