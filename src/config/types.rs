use serde::Deserialize;

/// Main configuration structure for the harvester
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub catalogue: CatalogueConfig,
    pub harvester: HarvesterConfig,
    pub output: OutputConfig,
}

/// Catalogue site layout configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueConfig {
    /// URL of the first listing page, used for page-count discovery
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Base URL that relative item detail links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// URL pattern for listing pages; `{page}` is replaced with the page number
    #[serde(rename = "page-pattern")]
    pub page_pattern: String,
}

/// Harvester behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HarvesterConfig {
    /// Number of concurrent page fetches
    pub workers: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

/// Output artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the spreadsheet report file
    #[serde(rename = "report-path")]
    pub report_path: String,

    /// Worksheet name inside the report
    #[serde(rename = "sheet-name")]
    pub sheet_name: String,

    /// Path to the activity log file (truncated each run)
    #[serde(rename = "log-path")]
    pub log_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogue: CatalogueConfig {
                start_url: "http://books.toscrape.com/catalogue/page-1.html".to_string(),
                base_url: "http://books.toscrape.com/catalogue/".to_string(),
                page_pattern: "http://books.toscrape.com/catalogue/page-{page}.html".to_string(),
            },
            harvester: HarvesterConfig {
                workers: 10,
                request_timeout_secs: 10,
            },
            output: OutputConfig {
                report_path: "items.xlsx".to_string(),
                sheet_name: "Products".to_string(),
                log_path: "harvest.log".to_string(),
            },
        }
    }
}

impl CatalogueConfig {
    /// Builds the listing URL for a given page number from the pattern
    pub fn page_url(&self, page_number: u32) -> String {
        self.page_pattern
            .replace("{page}", &page_number.to_string())
    }
}
