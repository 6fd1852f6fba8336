//! Harvest statistics summary
//!
//! Degradation is silent in the report file itself (failed pages are just
//! absent), so the run summary makes it visible: page counts, failed page
//! numbers, and the success rate.

/// Summary of one harvest run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestStats {
    /// Number of pages the discovery phase reported
    pub total_pages: u32,

    /// Pages that contributed items to the aggregate
    pub pages_succeeded: u32,

    /// Page numbers that failed to fetch or extract, ascending
    pub failed_pages: Vec<u32>,

    /// Total items in the aggregate
    pub total_items: usize,
}

impl HarvestStats {
    /// Percentage of pages that succeeded
    pub fn success_rate(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        f64::from(self.pages_succeeded) / f64::from(self.total_pages) * 100.0
    }
}

/// Prints the run summary to stdout
pub fn print_stats(stats: &HarvestStats) {
    println!("=== Harvest Summary ===\n");

    println!("Pages:");
    println!("  Discovered: {}", stats.total_pages);
    println!("  Succeeded:  {}", stats.pages_succeeded);
    println!("  Failed:     {}", stats.failed_pages.len());

    if !stats.failed_pages.is_empty() {
        println!("\nFailed pages:");
        for page in &stats.failed_pages {
            println!("  - page {}", page);
        }
    }

    println!("\nItems collected: {}", stats.total_items);
    println!(
        "Success rate: {:.1}% ({} / {} pages)",
        stats.success_rate(),
        stats.pages_succeeded,
        stats.total_pages
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let stats = HarvestStats {
            total_pages: 4,
            pages_succeeded: 3,
            failed_pages: vec![2],
            total_items: 60,
        };
        assert!((stats.success_rate() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_success_rate_zero_pages() {
        let stats = HarvestStats {
            total_pages: 0,
            pages_succeeded: 0,
            failed_pages: vec![],
            total_items: 0,
        };
        assert_eq!(stats.success_rate(), 0.0);
    }
}
