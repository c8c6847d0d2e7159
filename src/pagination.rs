//! Pagination over listing pages that reveal content through a "load more"
//! control instead of page links.
//!
//! The driver captures the rendered page, extracts every visible tile, then
//! looks for the control: clickable means another batch is coming, hidden or
//! missing means the listing is exhausted. Because every capture re-extracts
//! the full visible set, records are deduplicated by tile identity before
//! they are accumulated.

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use crate::browser_client::{ControlState, PageSession};
use crate::error::ScrapeError;
use crate::extract::extract_products;
use crate::models::Product;

/// CSS class of the demo site's "load more" control. The misspelling is the
/// site's own.
pub const MORE_BUTTON_SELECTOR: &str = ".ecomerce-items-scroll-more";

/// Timing and selector knobs for one pagination run.
#[derive(Debug, Clone)]
pub struct PaginationSettings {
    pub more_selector: String,
    /// Upper bound on waiting for the control to appear before concluding
    /// there are no more pages.
    pub wait_timeout: Duration,
    /// Pause after a click so the next batch can render before re-capture.
    pub settle_delay: Duration,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            more_selector: MORE_BUTTON_SELECTOR.to_string(),
            wait_timeout: Duration::from_secs(5),
            settle_delay: Duration::from_millis(500),
        }
    }
}

enum PageState {
    Loading,
    HasMore,
    Done,
}

/// Drives one session through a full "load more" cycle and accumulates every
/// product revealed along the way.
///
/// The driver owns its session; on every exit path, error or not, the
/// session is dropped and its resources released.
pub struct PaginationDriver<S: PageSession> {
    session: S,
    settings: PaginationSettings,
}

impl<S: PageSession> PaginationDriver<S> {
    pub fn new(session: S) -> Self {
        Self::with_settings(session, PaginationSettings::default())
    }

    pub fn with_settings(session: S, settings: PaginationSettings) -> Self {
        Self { session, settings }
    }

    /// Navigate to `url` and collect products until the "load more" control
    /// is gone.
    ///
    /// A failed initial navigation is fatal. After that, any trouble locating
    /// or triggering the control just ends pagination: the products gathered
    /// so far are still returned.
    pub fn collect(mut self, url: &str) -> Result<Vec<Product>, ScrapeError> {
        self.session.navigate(url)?;

        let mut products: Vec<Product> = Vec::new();
        let mut seen = HashSet::new();
        let mut captures = 0usize;
        let mut state = PageState::Loading;

        loop {
            state = match state {
                PageState::Loading => {
                    let html = match self.session.content() {
                        Ok(html) => html,
                        // The first capture failing means the page never
                        // loaded; later ones degrade to "no more content".
                        Err(e) if captures == 0 => return Err(e.into()),
                        Err(e) => {
                            log::warn!("Could not re-capture page, stopping: {}", e);
                            break;
                        }
                    };
                    captures += 1;

                    let batch = extract_products(&html);
                    log::info!("Capture {}: {} visible products", captures, batch.len());

                    for product in batch {
                        if seen.insert(product.dedup_key()) {
                            products.push(product);
                        }
                    }

                    PageState::HasMore
                }
                PageState::HasMore => {
                    match self
                        .session
                        .wait_for_control(&self.settings.more_selector, self.settings.wait_timeout)
                    {
                        Ok(ControlState::Clickable) => {
                            match self.session.click(&self.settings.more_selector) {
                                Ok(()) => {
                                    thread::sleep(self.settings.settle_delay);
                                    PageState::Loading
                                }
                                Err(e) => {
                                    log::warn!("Load-more click failed, stopping: {}", e);
                                    PageState::Done
                                }
                            }
                        }
                        Ok(ControlState::Hidden) => {
                            log::info!("Load-more control hidden, no more pages");
                            PageState::Done
                        }
                        Err(e) => {
                            log::info!("No load-more control: {}", e);
                            PageState::Done
                        }
                    }
                }
                PageState::Done => break,
            };
        }

        log::info!("Pagination finished with {} products", products.len());
        Ok(products)
    }
}
