//! Document selector built on top of `scraper`
//!
//! This module is the only place that touches the HTML parser directly. It
//! provides:
//! - Parsing raw bytes into a navigable `Document`
//! - Selecting descendants by CSS selector (in document order)
//! - First/last lookups, text rendering, attribute lookup with default
//! - Inner markup serialization

use crate::{ParseError, ParseResult};
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses raw bytes into a document tree
    ///
    /// Parsing never fails: byte sequences that are not valid UTF-8 are
    /// replaced with U+FFFD before the markup is tokenized.
    ///
    /// # Example
    ///
    /// ```
    /// use sumi_harvest::document::Document;
    ///
    /// let doc = Document::parse(b"<html><body><p>Hi</p></body></html>").unwrap();
    /// assert!(doc.body().is_ok());
    /// ```
    pub fn parse(raw: &[u8]) -> ParseResult<Self> {
        let content = String::from_utf8_lossy(raw);
        Ok(Self {
            html: Html::parse_document(&content),
        })
    }

    /// Returns the root `<html>` element
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Returns the first `<body>` element
    pub fn body(&self) -> ParseResult<ElementRef<'_>> {
        first(self.root(), "body")?.ok_or(ParseError::MissingElement("body"))
    }
}

/// Compiles a CSS selector
pub fn selector(pattern: &str) -> ParseResult<Selector> {
    Selector::parse(pattern).map_err(|e| ParseError::Selector {
        selector: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Finds every descendant of `node` matching `pattern`, in document order
pub fn find<'a>(node: ElementRef<'a>, pattern: &str) -> ParseResult<Vec<ElementRef<'a>>> {
    let selector = selector(pattern)?;
    Ok(node.select(&selector).collect())
}

/// Finds the first descendant of `node` matching `pattern`
pub fn first<'a>(node: ElementRef<'a>, pattern: &str) -> ParseResult<Option<ElementRef<'a>>> {
    let selector = selector(pattern)?;
    let found = node.select(&selector).next();
    Ok(found)
}

/// Finds the last descendant of `node` matching `pattern`
pub fn last<'a>(node: ElementRef<'a>, pattern: &str) -> ParseResult<Option<ElementRef<'a>>> {
    let selector = selector(pattern)?;
    let found = node.select(&selector).last();
    Ok(found)
}

/// Renders the text content of a node (all descendant text, untrimmed)
pub fn text(node: ElementRef<'_>) -> String {
    node.text().collect()
}

/// Renders the text of an optional node, empty when absent
pub fn text_or_empty(node: Option<ElementRef<'_>>) -> String {
    node.map(text).unwrap_or_default()
}

/// Reads an attribute from an optional node, falling back to `default`
pub fn attr_or(node: Option<ElementRef<'_>>, name: &str, default: &str) -> String {
    node.and_then(|element| element.value().attr(name))
        .unwrap_or(default)
        .to_string()
}

/// Serializes the children of a node back to markup
pub fn inner_html(node: ElementRef<'_>) -> String {
    node.inner_html()
}
