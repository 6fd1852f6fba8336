//! Configuration module for the harvester
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. When no file is given, `Config::default()` targets the
//! books.toscrape.com catalogue with the stock worker pool and timeouts.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogueConfig, Config, HarvesterConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
