//! Crawl coordinator - producer/worker orchestration
//!
//! This module ties the pipeline together:
//! - Validating configuration and preparing the output directory
//! - Spawning the request producer
//! - Running the single worker that fetches, extracts, filters and downloads
//!
//! The worker handles one request completely before receiving the next. The
//! first error of any kind ends the run; the producer notices the closed
//! channel and stops submitting.

use crate::config::{prepare_output_dir, validate, CrawlConfig};
use crate::crawler::download::{download_page, resolve_result_url};
use crate::crawler::fetcher::{build_http_client, fetch_url};
use crate::crawler::scheduler::{generate_requests, spawn_producer, CrawlRequest};
use crate::extract::{parse_results, SearchResult};
use crate::{HarvestError, Result};
use reqwest::Client;
use tokio::sync::mpsc;
use url::Url;

/// Result kind whose pages are downloaded
pub const PARTNER_KIND: &str = "Partner";

/// Totals for a completed crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Result pages fetched and extracted
    pub pages_fetched: usize,

    /// Partner pages written to the output directory
    pub partners_downloaded: usize,
}

/// Returns true for results that trigger a download
pub fn is_partner(result: &SearchResult) -> bool {
    result.kind == PARTNER_KIND
}

/// Main crawl coordinator structure
pub struct Coordinator {
    config: CrawlConfig,
    client: Client,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Everything that can fail before network activity happens here:
    /// configuration validation, output directory creation and client setup.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(HarvestError)` - Invalid configuration or unusable output directory
    pub fn new(config: CrawlConfig) -> Result<Self> {
        validate(&config)?;
        prepare_output_dir(&config.output_dir)?;

        let client = build_http_client(&config.user_agent)?;

        Ok(Self { config, client })
    }

    /// Runs the crawl to completion or to the first error
    pub async fn run(&self) -> Result<CrawlReport> {
        let start_time = std::time::Instant::now();
        tracing::info!(
            "Crawling {} page(s) of {} into {}",
            self.config.page_count,
            self.config.base_url,
            self.config.output_dir.display()
        );

        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        let producer = spawn_producer(generate_requests(&self.config), tx);

        let outcome = self.work(rx).await;

        let submitted = producer
            .await
            .map_err(|e| HarvestError::Worker(e.to_string()))?;
        let report = outcome?;

        tracing::info!(
            "Crawl completed: {} of {} page(s) fetched, {} partner page(s) downloaded in {:?}",
            report.pages_fetched,
            submitted,
            report.partners_downloaded,
            start_time.elapsed()
        );

        Ok(report)
    }

    /// Consumes requests strictly in submission order
    async fn work(&self, mut rx: mpsc::Receiver<CrawlRequest>) -> Result<CrawlReport> {
        let mut report = CrawlReport::default();

        while let Some(request) = rx.recv().await {
            let downloaded = self.process_request(&request).await?;
            report.pages_fetched += 1;
            report.partners_downloaded += downloaded;
        }

        Ok(report)
    }

    /// Fetches one results page and downloads every partner it lists
    ///
    /// Returns the number of partner pages written.
    async fn process_request(&self, request: &CrawlRequest) -> Result<usize> {
        tracing::info!("fetching page {}", request.sequence_id);

        let body = fetch_url(&self.client, &request.url).await?;
        let results = parse_results(&body).map_err(|source| HarvestError::Extract {
            url: request.url.clone(),
            source,
        })?;

        let origin = Url::parse(&request.url).map_err(|source| HarvestError::UrlParse {
            url: request.url.clone(),
            source,
        })?;

        tracing::debug!(
            "Page {} listed {} result(s)",
            request.sequence_id,
            results.len()
        );

        let mut downloaded = 0;
        for result in results.iter().filter(|r| is_partner(r)) {
            let url = resolve_result_url(&origin, &result.url)?;
            tracing::info!("retrieving partner, {}", url);

            download_page(&self.client, &url, &request.output_dir).await?;
            downloaded += 1;
        }

        Ok(downloaded)
    }
}

/// Runs a complete crawl operation
///
/// # Example
///
/// ```no_run
/// use sumi_harvest::config::CrawlConfig;
/// use sumi_harvest::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CrawlConfig::new("https://example.com/search");
/// let report = run_crawl(config).await?;
/// println!("Downloaded {} partners", report.partners_downloaded);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: CrawlConfig) -> Result<CrawlReport> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
