use serde::{Deserialize, Serialize};

/// One product listing, fully populated at construction time.
///
/// Field order doubles as the CSV column order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub rating: u8,
    pub num_of_reviews: u32,
}

impl Product {
    /// Identity used to deduplicate tiles that reappear across captures
    /// while paginating. "Load more" only appends tiles, but the full
    /// visible set is re-extracted on every capture.
    pub fn dedup_key(&self) -> (String, String, String) {
        (
            self.title.clone(),
            self.description.clone(),
            format!("{:.2}", self.price),
        )
    }
}

/// How a catalog entry's page is fetched.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    /// One HTTP GET, parsed once.
    #[default]
    Static,
    /// A browser session that clicks "load more" until it disappears.
    Interactive,
}

/// One target page: where to fetch, where to write, and how.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogEntry {
    pub url: String,
    pub output_file: String,
    #[serde(default)]
    pub strategy: FetchStrategy,
}
