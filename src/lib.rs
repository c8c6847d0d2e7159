// Library interface for rust_product_scraper
// This allows tests and external crates to use the scraper components

pub mod browser_client;
pub mod catalog;
pub mod config;
pub mod csv_writer;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod http_client;
pub mod models;
pub mod pagination;
