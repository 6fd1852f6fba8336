//! Harvest coordination
//!
//! The coordinator owns the whole run: discover the page count, build one
//! task per page, scatter the tasks over the bounded worker pool, and
//! fan the results back in as a deterministically ordered aggregate.
//! A failed page never aborts the run; its items are simply absent from
//! the aggregate and its number is recorded in the statistics.

use crate::config::Config;
use crate::harvest::discovery::discover_total_pages;
use crate::harvest::extractor::{extract_items, Item};
use crate::harvest::fetcher::{build_http_client, fetch_page};
use crate::harvest::pool::scatter_ordered;
use crate::report::HarvestStats;
use crate::HarvestError;
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// One unit of harvest work: a single listing page
#[derive(Debug, Clone)]
pub struct PageTask {
    /// The listing page URL
    pub url: String,

    /// 1-based page number, the fan-in ordering key
    pub page_number: u32,
}

/// Explicit per-page result
///
/// Failure is a first-class variant rather than an implicit null, so the
/// aggregate can surface how many pages were lost.
#[derive(Debug)]
pub enum PageOutcome {
    /// Items extracted from the page, in document order
    Fetched(Vec<Item>),

    /// The page contributed nothing; the reason was already logged
    Failed(String),
}

/// The final aggregate of a run
#[derive(Debug)]
pub struct Harvest {
    /// All items from succeeding pages, ascending page number then
    /// page-internal document order
    pub items: Vec<Item>,

    /// Run summary, including the failed page numbers
    pub stats: HarvestStats,
}

/// Orchestrates discovery, the fetch/extract pool, and aggregation
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    base_url: Url,
}

impl Coordinator {
    /// Creates a coordinator with a shared HTTP client
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.harvester)?;
        let base_url = Url::parse(&config.catalogue.base_url)?;

        Ok(Self {
            config: Arc::new(config),
            client,
            base_url,
        })
    }

    /// Runs a complete harvest: discovery, then the parallel page sweep
    pub async fn run(&self) -> Harvest {
        let total_pages =
            discover_total_pages(&self.client, &self.config.catalogue.start_url).await;
        self.harvest(total_pages).await
    }

    /// Harvests pages 1..=total_pages across the worker pool
    ///
    /// Results are consumed in completion order for progress logging, then
    /// key-sorted by page number so the aggregate is a deterministic
    /// function of page content alone, not of network timing.
    pub async fn harvest(&self, total_pages: u32) -> Harvest {
        let tasks: Vec<PageTask> = (1..=total_pages)
            .map(|page_number| PageTask {
                url: self.config.catalogue.page_url(page_number),
                page_number,
            })
            .collect();

        tracing::info!(
            "Starting parallel collection for {} pages ({} workers)",
            total_pages,
            self.config.harvester.workers
        );

        let client = self.client.clone();
        let base_url = self.base_url.clone();

        let results = scatter_ordered(
            tasks,
            self.config.harvester.workers as usize,
            move |task| {
                let client = client.clone();
                let base_url = base_url.clone();
                async move {
                    let outcome = fetch_and_extract(&client, &task.url, &base_url).await;
                    (task.page_number, outcome)
                }
            },
            |completed, total| {
                tracing::info!("Progress: {}/{} pages collected", completed, total);
            },
        )
        .await;

        tracing::info!("Collection finished, assembling results");

        let mut items = Vec::new();
        let mut failed_pages = Vec::new();

        for (page_number, outcome) in results {
            match outcome {
                PageOutcome::Fetched(page_items) => items.extend(page_items),
                PageOutcome::Failed(_) => failed_pages.push(page_number),
            }
        }

        if !failed_pages.is_empty() {
            tracing::warn!(
                "{} of {} pages failed and were omitted from the report: {:?}",
                failed_pages.len(),
                total_pages,
                failed_pages
            );
        }

        let stats = HarvestStats {
            total_pages,
            pages_succeeded: total_pages - failed_pages.len() as u32,
            failed_pages,
            total_items: items.len(),
        };

        Harvest { items, stats }
    }
}

/// Fetches one listing page and extracts its items
///
/// Every failure is converted into a [`PageOutcome::Failed`] with an error
/// log entry; nothing propagates past this function.
pub async fn fetch_and_extract(client: &Client, url: &str, base_url: &Url) -> PageOutcome {
    let body = match fetch_page(client, url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Failed to fetch {}: {}", url, e);
            return PageOutcome::Failed(e.to_string());
        }
    };

    match extract_items(&body, base_url) {
        Ok(items) => PageOutcome::Fetched(items),
        Err(e) => {
            tracing::error!("Failed to extract items from {}: {}", url, e);
            PageOutcome::Failed(e.to_string())
        }
    }
}
