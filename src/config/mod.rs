//! Configuration module for Sumi-Harvest
//!
//! Crawl settings come from command-line flags, optionally layered over a TOML
//! file. The merged settings are resolved into a `CrawlConfig` and validated
//! before any network activity.
//!
//! # Example
//!
//! ```no_run
//! use sumi_harvest::config::{load_config, resolve, CrawlSettings};
//! use std::path::Path;
//!
//! let file = load_config(Path::new("harvest.toml")).unwrap();
//! let config = resolve(Some(file), CrawlSettings::default()).unwrap();
//! println!("Fetching {} pages from {}", config.page_count, config.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ConfigFile, CrawlConfig, CrawlSettings, UserAgentConfig, DEFAULT_CHANNEL_CAPACITY,
    DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_COUNT, DEFAULT_PAGINATION_KEY,
};

// Re-export parser and validation functions
pub use parser::load_config;
pub use validation::{prepare_output_dir, validate};

use crate::ConfigResult;

/// Merges `flags` over an optional config file and validates the result
///
/// # Arguments
///
/// * `file` - Settings loaded from a TOML file, if any
/// * `flags` - Settings given on the command line; set fields win
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - A complete, validated configuration
/// * `Err(ConfigError)` - A required value is missing or invalid
pub fn resolve(file: Option<ConfigFile>, flags: CrawlSettings) -> ConfigResult<CrawlConfig> {
    let file = file.unwrap_or_default();
    let config = file.crawl.merge(flags).into_config(file.user_agent);
    validate(&config)?;
    Ok(config)
}
