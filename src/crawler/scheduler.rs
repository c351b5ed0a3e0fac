//! Request generation for the crawl pipeline
//!
//! This module handles:
//! - Enumerating one `CrawlRequest` per result page
//! - Feeding them, in order, into the channel the worker consumes
//!
//! The producer stops early as soon as the worker hangs up its end of the
//! channel, which is how a fatal worker error halts generation.

use crate::config::CrawlConfig;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One result page to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// 1-based position of the page, used for progress reporting
    pub sequence_id: u32,

    /// Absolute URL of the results page
    pub url: String,

    /// Directory partner pages found on this page are written to
    pub output_dir: PathBuf,
}

/// Builds the URL of a paginated results page
///
/// ```
/// use sumi_harvest::crawler::page_url;
///
/// assert_eq!(
///     page_url("https://example.com/search", "PageNum", 2),
///     "https://example.com/search?PageNum=2"
/// );
/// ```
pub fn page_url(base_url: &str, pagination_key: &str, sequence_id: u32) -> String {
    format!("{}?{}={}", base_url, pagination_key, sequence_id)
}

/// Generates the requests for a crawl, in increasing `sequence_id` order
pub fn generate_requests(config: &CrawlConfig) -> Vec<CrawlRequest> {
    (1..=config.page_count)
        .map(|sequence_id| CrawlRequest {
            sequence_id,
            url: page_url(&config.base_url, &config.pagination_key, sequence_id),
            output_dir: config.output_dir.clone(),
        })
        .collect()
}

/// Spawns the producer task submitting `requests` in order
///
/// The task resolves to the number of requests the worker accepted.
pub fn spawn_producer(
    requests: Vec<CrawlRequest>,
    tx: mpsc::Sender<CrawlRequest>,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut submitted = 0;

        for request in requests {
            let sequence_id = request.sequence_id;
            if tx.send(request).await.is_err() {
                tracing::debug!(
                    "Worker stopped, not submitting page {} or later",
                    sequence_id
                );
                break;
            }
            submitted += 1;
        }

        submitted
    })
}
