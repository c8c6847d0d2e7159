use rand::Rng;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use std::time::Duration;
use tokio::time::sleep;

use crate::error::ScrapeError;

/// User agents to rotate through so repeated runs don't present a single
/// fingerprint to the target site.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:126.0) Gecko/20100101 Firefox/126.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
];

/// Configuration for the HTTP client used by static fetches
#[derive(Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub max_retries: usize,
    pub initial_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
    pub enable_cookies: bool,
    pub enable_compression: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_retry_delay_ms: 500,
            max_retry_delay_ms: 8000,
            enable_cookies: true,
            enable_compression: true,
        }
    }
}

/// HTTP client with browser-like headers and bounded retry
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(Self::random_user_agent())
            .cookie_store(config.enable_cookies)
            .gzip(config.enable_compression)
            .brotli(config.enable_compression);

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                .parse()
                .unwrap(),
        );
        headers.insert("Accept-Language", "en-US,en;q=0.9".parse().unwrap());
        headers.insert("Connection", "keep-alive".parse().unwrap());
        headers.insert("Upgrade-Insecure-Requests", "1".parse().unwrap());
        builder = builder.default_headers(headers);

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get a random user agent from the pool
    fn random_user_agent() -> &'static str {
        let mut rng = rand::thread_rng();
        let index = rng.gen_range(0..USER_AGENTS.len());
        USER_AGENTS[index]
    }

    /// Calculate retry delay with exponential backoff and jitter
    fn calculate_retry_delay(&self, attempt: usize) -> Duration {
        let base_delay = self.config.initial_retry_delay_ms;
        let max_delay = self.config.max_retry_delay_ms;

        let delay_ms = (base_delay * 2u64.pow(attempt as u32)).min(max_delay);

        // +/-25% jitter to avoid hammering a recovering server in lockstep
        let mut rng = rand::thread_rng();
        let jitter = rng.gen_range(0.75..=1.25);
        let final_delay_ms = (delay_ms as f64 * jitter) as u64;

        Duration::from_millis(final_delay_ms)
    }

    /// Check if a status code is worth retrying
    fn is_retryable_status(status: StatusCode) -> bool {
        matches!(
            status.as_u16(),
            // Rate limiting
            429 |
            // Server errors
            500 | 502 | 503 | 504 |
            // Cloudflare errors
            520 | 521 | 522 | 523 | 524 | 525 | 526 | 527
        )
    }

    /// Fetch a URL, retrying transient failures with exponential backoff.
    /// Returns the final response whatever its status.
    pub async fn get_with_retry(&self, url: &str) -> Result<Response, reqwest::Error> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            let request = self
                .client
                .get(url)
                .header("User-Agent", Self::random_user_agent());

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if Self::is_retryable_status(status) && attempt < self.config.max_retries {
                        log::warn!(
                            "Received retryable status {} for {}, attempt {}/{}",
                            status,
                            url,
                            attempt + 1,
                            self.config.max_retries + 1
                        );

                        let delay = self.calculate_retry_delay(attempt);
                        sleep(delay).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(e) => {
                    let should_retry = e.is_timeout() || e.is_connect();

                    if should_retry && attempt < self.config.max_retries {
                        log::warn!(
                            "Request failed for {}, attempt {}/{}: {}",
                            url,
                            attempt + 1,
                            self.config.max_retries + 1,
                            e
                        );

                        let delay = self.calculate_retry_delay(attempt);
                        sleep(delay).await;
                        last_error = Some(e);
                        continue;
                    }

                    return Err(e);
                }
            }
        }

        // All retries exhausted on transport errors
        Err(last_error.unwrap())
    }

    /// Fetch a URL and return the response body. A final non-success status
    /// is an error: a page that failed to load has no products on it.
    pub async fn get_text(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.get_with_retry(url).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScrapeError::Http {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_random_user_agent() {
        let ua1 = HttpClient::random_user_agent();
        let ua2 = HttpClient::random_user_agent();
        assert!(USER_AGENTS.contains(&ua1));
        assert!(USER_AGENTS.contains(&ua2));
    }

    #[test]
    fn test_retry_delay_is_bounded() {
        let config = HttpClientConfig {
            initial_retry_delay_ms: 100,
            max_retry_delay_ms: 1000,
            ..HttpClientConfig::default()
        };
        let client = HttpClient::with_config(config).unwrap();

        for attempt in 0..10 {
            let delay = client.calculate_retry_delay(attempt);
            assert!(delay.as_millis() <= 1250, "jittered delay should stay near the cap");
        }
    }

    #[test]
    fn test_retryable_status() {
        assert!(HttpClient::is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(HttpClient::is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(HttpClient::is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(HttpClient::is_retryable_status(StatusCode::from_u16(522).unwrap()));
        assert!(!HttpClient::is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!HttpClient::is_retryable_status(StatusCode::FORBIDDEN));
    }
}
