//! Error types for the scraper.
//!
//! Failures fall into three tiers: per-record (`ExtractionError`, the tile is
//! skipped and the rest of the page continues), per-wait (`SessionError`
//! during pagination, absorbed as "no more content"), and per-entry
//! (`ScrapeError`, which stops the entry and, unless configured otherwise,
//! the run).

use thiserror::Error;

/// A product tile that could not be turned into a complete record.
///
/// Extraction is all-or-nothing: any missing selector, missing attribute, or
/// unparseable field aborts the record instead of defaulting it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no element matching `{0}` in product tile")]
    MissingElement(&'static str),

    #[error("element `{selector}` has no `{attribute}` attribute")]
    MissingAttribute {
        selector: &'static str,
        attribute: &'static str,
    },

    #[error("product tile has an empty title")]
    EmptyTitle,

    #[error("could not parse {field} from {text:?}")]
    InvalidNumber { field: &'static str, text: String },

    #[error("rating {0} is outside the 0-5 range")]
    RatingOutOfRange(u32),
}

/// Errors raised by a live browser session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("browser startup failed: {0}")]
    Startup(String),

    #[error("tab creation failed: {0}")]
    TabCreation(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("timed out waiting for `{0}`")]
    Timeout(String),

    #[error("script evaluation failed: {0}")]
    Eval(String),

    #[error("could not read page content: {0}")]
    Content(String),
}

/// Top-level error for one catalog entry.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request for {url} returned status {status}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("browser session error: {0}")]
    Session(#[from] SessionError),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
}
