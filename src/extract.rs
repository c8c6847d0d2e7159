//! Product tile extraction.
//!
//! Listing pages on the demo site render each product as a `.thumbnail`
//! tile. Extraction is a pure function from one tile to one [`Product`];
//! a tile missing any required field yields an [`ExtractionError`] instead
//! of a partially-populated record.
//!
//! Two page layouts exist for the rating: newer pages carry an explicit
//! `data-rating` attribute, older ones render one star icon per point.
//! The attribute wins when present.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractionError;
use crate::models::Product;

/// CSS class marking one product listing on a catalog page
const TILE_SELECTOR: &str = ".thumbnail";

/// Extract every product tile found in a rendered page.
///
/// A malformed tile is logged and skipped; the rest of the page is still
/// extracted. A page with no tiles at all is simply zero results.
pub fn extract_products(html: &str) -> Vec<Product> {
    let document = Html::parse_document(html);
    let tile_selector = Selector::parse(TILE_SELECTOR).unwrap();

    let mut products = Vec::new();
    for tile in document.select(&tile_selector) {
        match extract_product(tile) {
            Ok(product) => products.push(product),
            Err(e) => log::warn!("Skipping malformed product tile: {}", e),
        }
    }
    products
}

/// Turn a single product tile into a [`Product`].
pub fn extract_product(tile: ElementRef) -> Result<Product, ExtractionError> {
    let title_selector = Selector::parse(".title").unwrap();
    let description_selector = Selector::parse(".description").unwrap();
    let price_selector = Selector::parse(".price").unwrap();
    let reviews_selector = Selector::parse(".ratings > p.float-end").unwrap();

    let title_element = tile
        .select(&title_selector)
        .next()
        .ok_or(ExtractionError::MissingElement(".title"))?;
    let title = title_element
        .value()
        .attr("title")
        .ok_or(ExtractionError::MissingAttribute {
            selector: ".title",
            attribute: "title",
        })?
        .to_string();
    if title.is_empty() {
        return Err(ExtractionError::EmptyTitle);
    }

    let description = tile
        .select(&description_selector)
        .next()
        .ok_or(ExtractionError::MissingElement(".description"))?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    let price_text = tile
        .select(&price_selector)
        .next()
        .ok_or(ExtractionError::MissingElement(".price"))?
        .text()
        .collect::<String>();
    let price = parse_price(&price_text)?;

    let rating = extract_rating(&tile)?;

    let reviews_text = tile
        .select(&reviews_selector)
        .next()
        .ok_or(ExtractionError::MissingElement(".ratings > p.float-end"))?
        .text()
        .collect::<String>();
    let num_of_reviews = parse_review_count(&reviews_text)?;

    Ok(Product {
        title,
        description,
        price,
        rating,
        num_of_reviews,
    })
}

/// Rating is either an explicit `data-rating` attribute or a row of star
/// icons to count, depending on which layout the page uses.
fn extract_rating(tile: &ElementRef) -> Result<u8, ExtractionError> {
    let data_rating_selector = Selector::parse(".ratings [data-rating]").unwrap();
    let star_selector = Selector::parse(".ratings span.ws-icon.ws-icon-star").unwrap();

    let rating = if let Some(element) = tile.select(&data_rating_selector).next() {
        let raw = element.value().attr("data-rating").unwrap_or_default();
        raw.trim()
            .parse::<u32>()
            .map_err(|_| ExtractionError::InvalidNumber {
                field: "rating",
                text: raw.to_string(),
            })?
    } else {
        tile.select(&star_selector).count() as u32
    };

    if rating > 5 {
        return Err(ExtractionError::RatingOutOfRange(rating));
    }
    Ok(rating as u8)
}

/// Parse a currency-formatted price like `"$24.99"` into its numeric value.
fn parse_price(text: &str) -> Result<f64, ExtractionError> {
    let invalid = || ExtractionError::InvalidNumber {
        field: "price",
        text: text.trim().to_string(),
    };

    let re = Regex::new(r"(\d+(?:\.\d+)?)").unwrap();
    let captures = re.captures(text).ok_or_else(invalid)?;
    captures[1].parse::<f64>().map_err(|_| invalid())
}

/// Review counts render as `"14 reviews"`; the leading token is the number.
fn parse_review_count(text: &str) -> Result<u32, ExtractionError> {
    let token = text
        .split_whitespace()
        .next()
        .ok_or_else(|| ExtractionError::InvalidNumber {
            field: "num_of_reviews",
            text: text.to_string(),
        })?;

    token
        .parse::<u32>()
        .map_err(|_| ExtractionError::InvalidNumber {
            field: "num_of_reviews",
            text: token.to_string(),
        })
}
