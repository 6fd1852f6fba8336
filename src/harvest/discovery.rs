//! Page-count discovery
//!
//! One request to the first listing page locates the pagination indicator
//! (the `li.current` element, text of the form "Page 1 of 50") and reads
//! the total page count out of it. Every failure mode degrades to a
//! single-page harvest rather than aborting the run.

use crate::harvest::fetcher::fetch_page;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};

/// Discovers the total number of listing pages
///
/// Never fails: on any network error, missing indicator, or unparsable
/// indicator text the site is treated as single-page and the cause is
/// logged. This can make a total outage look like a one-page catalogue;
/// the `--probe` mode exists so operators can check the discovered count
/// before a full run.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `start_url` - URL of the first listing page
///
/// # Returns
///
/// The total page count, always >= 1
pub async fn discover_total_pages(client: &Client, start_url: &str) -> u32 {
    tracing::info!("Discovering total page count from {}", start_url);

    let body = match fetch_page(client, start_url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(
                "Discovery request to {} failed: {}. Assuming a single page.",
                start_url,
                e
            );
            return 1;
        }
    };

    let indicator = match pagination_indicator_text(&body) {
        Some(text) => text,
        None => {
            tracing::warn!("Pagination indicator not found. Assuming a single page.");
            return 1;
        }
    };

    match parse_page_count(&indicator) {
        Some(total) => {
            tracing::info!("{} pages found", total);
            total
        }
        None => {
            tracing::error!(
                "Could not read a page count from indicator text '{}'. Assuming a single page.",
                indicator
            );
            1
        }
    }
}

/// Locates the pagination indicator element and returns its text
fn pagination_indicator_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("li.current").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the total page count from indicator text
///
/// The indicator's trailing number is the maximum page ("Page 1 of 50"
/// -> 50), so the LAST embedded integer wins. Returns None when the text
/// carries no parseable integer.
pub fn parse_page_count(text: &str) -> Option<u32> {
    let digits = Regex::new(r"\d+").ok()?;

    digits
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .last()
        .filter(|&n| n >= 1)
}
