//! Crawler module for paginated partner harvesting
//!
//! This module contains the crawl pipeline, including:
//! - Request generation for each results page
//! - HTTP fetching without retries
//! - Result filtering and partner page downloads
//! - Overall producer/worker coordination

mod coordinator;
mod download;
mod fetcher;
mod scheduler;

pub use coordinator::{is_partner, run_crawl, Coordinator, CrawlReport, PARTNER_KIND};
pub use download::{download_page, download_path, page_basename, resolve_result_url};
pub use fetcher::{build_http_client, fetch_url};
pub use scheduler::{generate_requests, page_url, spawn_producer, CrawlRequest};

use crate::config::CrawlConfig;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and create the output directory
/// 2. Build the HTTP client
/// 3. Generate one request per results page
/// 4. Fetch each page and extract its results
/// 5. Download every result classified as a partner
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed successfully
/// * `Err(HarvestError)` - The first fatal error; nothing after it was attempted
pub async fn crawl(config: CrawlConfig) -> Result<CrawlReport> {
    run_crawl(config).await
}
