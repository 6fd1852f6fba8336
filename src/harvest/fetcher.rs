//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the shared HTTP client with a proper user agent string
//! - GET requests for listing pages, bounded by the configured timeout
//! - Error classification (timeout, connect failure, HTTP status)
//!
//! There is no retry logic: a failed request is terminal for its page
//! within the run.

use crate::config::HarvesterConfig;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Classified failure of a single page fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timeout")]
    Timeout,

    #[error("connection failed")]
    Connect,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Builds the shared HTTP client
///
/// One client is built per run and cloned into each fetch task; reqwest
/// clients share their connection pool across clones. Redirects stay at
/// library defaults.
///
/// # Arguments
///
/// * `config` - The harvester configuration (timeout source)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HarvesterConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.request_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a single page and returns its body
///
/// Issues one GET bounded by the client's timeout. Any network failure or
/// non-success HTTP status is classified into a [`FetchError`]; nothing is
/// retried and nothing panics.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(FetchError)` - Classified failure
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    response.text().await.map_err(classify)
}

/// Maps a reqwest error onto the fetch failure taxonomy
fn classify(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect
    } else {
        FetchError::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_build_http_client() {
        let config = Config::default();
        let client = build_http_client(&config.harvester);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let client = build_http_client(&Config::default().harvester).unwrap();
        let body = fetch_page(&client, &format!("{}/page", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_fetch_page_http_error_status() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(&Config::default().harvester).unwrap();
        let result = fetch_page(&client, &format!("{}/missing", server.uri())).await;
        assert!(matches!(result, Err(FetchError::Status(404))));
    }

    #[tokio::test]
    async fn test_fetch_page_connection_refused() {
        let client = build_http_client(&Config::default().harvester).unwrap();
        // Port 1 is never listening
        let result = fetch_page(&client, "http://127.0.0.1:1/").await;
        assert!(result.is_err());
    }
}
