use crate::config::types::{CrawlConfig, UserAgentConfig};
use crate::{ConfigError, ConfigResult};
use std::path::Path;
use url::Url;

/// Validates a resolved crawl configuration
pub fn validate(config: &CrawlConfig) -> ConfigResult<()> {
    validate_base_url(&config.base_url)?;

    if config.page_count < 1 {
        return Err(ConfigError::Validation(format!(
            "pages must be >= 1, got {}",
            config.page_count
        )));
    }

    if config.channel_capacity < 1 {
        return Err(ConfigError::Validation(format!(
            "channel-capacity must be >= 1, got {}",
            config.channel_capacity
        )));
    }

    validate_user_agent_config(&config.user_agent)?;

    Ok(())
}

/// Validates the search endpoint
fn validate_base_url(base_url: &str) -> ConfigResult<()> {
    if base_url.is_empty() {
        return Err(ConfigError::Validation(
            "missing codebase parameter".to_string(),
        ));
    }

    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid codebase '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "codebase must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "codebase '{}' has no host",
            base_url
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user agent name cannot be empty".to_string(),
        ));
    }

    if config.version.is_empty() {
        return Err(ConfigError::Validation(
            "user agent version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Ensures the output directory exists, creating it when missing
pub fn prepare_output_dir(dir: &Path) -> ConfigResult<()> {
    if dir.is_dir() {
        return Ok(());
    }

    std::fs::create_dir_all(dir).map_err(|source| ConfigError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}
