//! Search results extraction
//!
//! Every `.result` row of the `table.search-results` table becomes one
//! `SearchResult`, in document order. Rows are never skipped; missing cells
//! simply produce empty fields.

use crate::document::{attr_or, find, first, text_or_empty, Document};
use crate::extract::types::SearchResult;
use crate::ParseResult;

/// Parses a search results page
///
/// # Arguments
///
/// * `raw` - The raw page bytes
///
/// # Returns
///
/// * `Ok(Vec<SearchResult>)` - One entry per result row, in document order
/// * `Err(ParseError)` - The input is not a usable document
///
/// # Example
///
/// ```
/// use sumi_harvest::parse_results;
///
/// let html = br#"<table class="search-results"><tr class="result">
///     <td class="name-sec"><a href="/people/jane-doe">Jane Doe</a></td>
///     <td class="position-sec"><strong>Partner</strong></td>
/// </tr></table>"#;
/// let results = parse_results(html).unwrap();
/// assert_eq!(results[0].kind, "Partner");
/// assert_eq!(results[0].url, "/people/jane-doe");
/// ```
pub fn parse_results(raw: &[u8]) -> ParseResult<Vec<SearchResult>> {
    let document = Document::parse(raw)?;
    let mut results = Vec::new();

    for row in find(document.root(), "table.search-results .result")? {
        let kind = text_or_empty(first(row, ".position-sec strong")?)
            .trim()
            .to_string();
        let url = attr_or(first(row, ".name-sec a")?, "href", "");
        results.push(SearchResult { kind, url });
    }

    Ok(results)
}
