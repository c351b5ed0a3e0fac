//! Partner page downloads
//!
//! Result links are resolved against the scheme and host of the results page
//! they were found on, fetched, and written verbatim to
//! `{output_dir}/{basename}.html`. Existing files are overwritten.

use crate::crawler::fetcher::fetch_url;
use crate::{HarvestError, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};
use url::Url;

/// Resolves a result link against the origin of the page it came from
///
/// Only the scheme, host and port of `origin` are used; its path and query
/// never influence the result.
///
/// ```
/// use sumi_harvest::crawler::resolve_result_url;
/// use url::Url;
///
/// let origin = Url::parse("https://example.com/search?PageNum=1").unwrap();
/// let resolved = resolve_result_url(&origin, "/people/jane-doe").unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/people/jane-doe");
/// ```
pub fn resolve_result_url(origin: &Url, href: &str) -> Result<Url> {
    let mut root = origin.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);

    root.join(href).map_err(|source| HarvestError::UrlParse {
        url: href.to_string(),
        source,
    })
}

/// Derives the file stem for a downloaded page
///
/// This is the last non-empty path segment, or the host when the path is
/// empty.
pub fn page_basename(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .or_else(|| url.host_str())
        .unwrap_or("index")
        .to_string()
}

/// Path a downloaded page is written to
pub fn download_path(output_dir: &Path, url: &Url) -> PathBuf {
    output_dir.join(format!("{}.html", page_basename(url)))
}

/// Fetches `url` and writes its body into `output_dir`
///
/// # Returns
///
/// * `Ok(PathBuf)` - Where the page was written
/// * `Err(HarvestError)` - The fetch or the write failed
pub async fn download_page(
    client: &Client,
    url: &Url,
    output_dir: &Path,
) -> Result<PathBuf> {
    let body = fetch_url(client, url.as_str()).await?;
    let path = download_path(output_dir, url);

    tokio::fs::write(&path, &body)
        .await
        .map_err(|source| HarvestError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::debug!("Wrote {} bytes to {}", body.len(), path.display());
    Ok(path)
}
