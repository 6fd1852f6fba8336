//! Harvest module for page fetching and item collection
//!
//! This module contains the core harvest logic, including:
//! - HTTP fetching with a bounded per-request timeout
//! - Product-card extraction from listing markup
//! - Page-count discovery with single-page fallback
//! - Bounded-parallelism scatter/gather over all pages

mod coordinator;
mod discovery;
mod extractor;
mod fetcher;
mod pool;

pub use coordinator::{fetch_and_extract, Coordinator, Harvest, PageOutcome, PageTask};
pub use discovery::{discover_total_pages, parse_page_count};
pub use extractor::{extract_items, parse_price, ExtractError, Item};
pub use fetcher::{build_http_client, fetch_page, FetchError};
pub use pool::scatter_ordered;

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete harvest operation
///
/// This is the main entry point: it builds the shared HTTP client,
/// discovers the page count, sweeps every page across the worker pool,
/// and returns the ordered aggregate with its statistics.
pub async fn harvest(config: Config) -> Result<Harvest, HarvestError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
