use crate::config::types::{CatalogueConfig, Config, HarvesterConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalogue_config(&config.catalogue)?;
    validate_harvester_config(&config.harvester)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates catalogue site layout configuration
fn validate_catalogue_config(config: &CatalogueConfig) -> Result<(), ConfigError> {
    Url::parse(&config.start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start-url: {}", e)))?;

    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    // Relative links are joined against the base; without a trailing slash
    // Url::join replaces the last path segment instead of appending.
    if !base.path().ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url must end with '/', got '{}'",
            config.base_url
        )));
    }

    if !config.page_pattern.contains("{page}") {
        return Err(ConfigError::Validation(format!(
            "page-pattern must contain the '{{page}}' placeholder, got '{}'",
            config.page_pattern
        )));
    }

    Url::parse(&config.page_pattern.replace("{page}", "1"))
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid page-pattern: {}", e)))?;

    Ok(())
}

/// Validates harvester behavior configuration
fn validate_harvester_config(config: &HarvesterConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > 100 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 100, got {}",
            config.workers
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output artifact configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }

    if config.sheet_name.is_empty() {
        return Err(ConfigError::Validation(
            "sheet-name cannot be empty".to_string(),
        ));
    }

    if config.log_path.is_empty() {
        return Err(ConfigError::Validation(
            "log-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
