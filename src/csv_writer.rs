//! CSV serialization of scraped products.

use std::path::Path;

use crate::error::ScrapeError;
use crate::models::Product;

/// CSV column names, in `Product` field order.
const PRODUCT_FIELDS: [&str; 5] = ["title", "description", "price", "rating", "num_of_reviews"];

/// Write `products` to `path`, header first, one row per record, replacing
/// any existing file. The header is written even when there are no records,
/// so an empty scrape still produces a well-formed file.
pub fn write_products(products: &[Product], path: &Path) -> Result<(), ScrapeError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(PRODUCT_FIELDS)?;
    for product in products {
        writer.serialize(product)?;
    }

    writer.flush()?;
    Ok(())
}
