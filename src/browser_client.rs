//! Headless browser session for pages that load content behind a user action.
//!
//! The pagination driver only talks to the [`PageSession`] trait, so it never
//! sees the concrete automation library; any engine that can navigate, hand
//! back rendered HTML, probe a control, and click can stand in (tests use a
//! scripted in-memory session).

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::SessionError;

/// Whether the "load more" control can currently be triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Clickable,
    Hidden,
}

/// The capabilities the pagination driver needs from a live page.
pub trait PageSession {
    /// Load the given URL and wait for the page to finish navigating.
    fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    /// The currently rendered HTML of the page.
    fn content(&mut self) -> Result<String, SessionError>;

    /// Wait up to `timeout` for an element matching `selector` to be present,
    /// then report whether it is actually interactable.
    fn wait_for_control(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<ControlState, SessionError>;

    /// Click the element matching `selector`.
    fn click(&mut self, selector: &str) -> Result<(), SessionError>;
}

/// Configuration for the headless browser
#[derive(Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub timeout: Duration,
    pub disable_images: bool,
    pub user_agent: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            timeout: Duration::from_secs(30),
            disable_images: true, // Faster loading
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

/// A [`PageSession`] backed by headless Chrome.
///
/// The Chrome process lives as long as this value; dropping it tears the
/// browser down on every exit path, successful or not.
pub struct ChromeSession {
    browser: Browser,
    tab: Option<Arc<Tab>>,
    config: BrowserConfig,
}

impl ChromeSession {
    /// Launch a browser. Fails with [`SessionError::Startup`] when no Chrome
    /// binary is available, which is fatal for the whole run.
    pub fn new(config: &BrowserConfig) -> Result<Self, SessionError> {
        // Owned argument strings must outlive the &OsStr list handed to the
        // launch options builder.
        let images_arg = if config.disable_images {
            Some("--blink-settings=imagesEnabled=false".to_string())
        } else {
            None
        };

        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args: Vec<&OsStr> = vec![
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--no-sandbox"),
        ];

        if let Some(ref img) = images_arg {
            args.push(OsStr::new(img));
        }

        if let Some(ref ua) = user_agent_arg {
            args.push(OsStr::new(ua));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_width, config.window_height)))
            .args(args)
            .build()
            .map_err(|e| SessionError::Startup(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| SessionError::Startup(e.to_string()))?;

        Ok(Self {
            browser,
            tab: None,
            config: config.clone(),
        })
    }

    fn current_tab(&self) -> Result<&Arc<Tab>, SessionError> {
        self.tab
            .as_ref()
            .ok_or_else(|| SessionError::Content("no page loaded yet".to_string()))
    }
}

impl PageSession for ChromeSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        log::info!("Browser navigating to: {}", url);

        let tab = self
            .browser
            .new_tab()
            .map_err(|e| SessionError::TabCreation(e.to_string()))?;

        tab.set_default_timeout(self.config.timeout);

        tab.navigate_to(url).map_err(|e| SessionError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        tab.wait_until_navigated()
            .map_err(|e| SessionError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.tab = Some(tab);
        Ok(())
    }

    fn content(&mut self) -> Result<String, SessionError> {
        let tab = self.current_tab()?;
        tab.get_content()
            .map_err(|e| SessionError::Content(e.to_string()))
    }

    fn wait_for_control(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<ControlState, SessionError> {
        let tab = self.current_tab()?;

        tab.wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|_| SessionError::Timeout(selector.to_string()))?;

        // Present but display:none means the page has nothing left to reveal.
        let escaped = selector.replace('\'', "\\'");
        let script = format!(
            "document.querySelector('{}') !== null && document.querySelector('{}').offsetParent !== null",
            escaped, escaped
        );

        let result = tab
            .evaluate(&script, false)
            .map_err(|e| SessionError::Eval(e.to_string()))?;

        match result.value {
            Some(serde_json::Value::Bool(true)) => Ok(ControlState::Clickable),
            _ => Ok(ControlState::Hidden),
        }
    }

    fn click(&mut self, selector: &str) -> Result<(), SessionError> {
        let tab = self.current_tab()?;

        let element = tab
            .find_element(selector)
            .map_err(|e| SessionError::Eval(format!("lookup of `{}` failed: {}", selector, e)))?;
        element
            .click()
            .map_err(|e| SessionError::Eval(format!("click on `{}` failed: {}", selector, e)))?;

        Ok(())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        // Chrome process shuts down with the Browser handle
        log::debug!("Browser session closed");
    }
}
