//! Label-keyed dispatch over document sections
//!
//! A `DispatchTable` maps the exact text of a heading to a handler. Running a
//! table over a root node visits every section matched by a selector, reads
//! the section's headings in document order and hands the whole section to the
//! handler registered for the first heading label it recognises.
//!
//! Handlers are plain functions, so nesting is just a handler that runs
//! another table over a narrower selector.

use crate::document::{find, text};
use crate::ParseResult;
use scraper::ElementRef;

/// Extraction handler invoked with the record under construction and the
/// matching section
pub type Handler<R> = fn(&mut R, ElementRef<'_>) -> ParseResult<()>;

/// Ordered list of `(label, handler)` pairs
pub struct DispatchTable<R> {
    entries: Vec<(&'static str, Handler<R>)>,
}

impl<R> Default for DispatchTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> DispatchTable<R> {
    /// Creates an empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers `handler` for sections headed by exactly `label`
    pub fn on(mut self, label: &'static str, handler: Handler<R>) -> Self {
        self.entries.push((label, handler));
        self
    }

    /// Looks up the handler for an exact label
    pub fn handler(&self, label: &str) -> Option<Handler<R>> {
        self.entries
            .iter()
            .find(|(key, _)| *key == label)
            .map(|(_, handler)| *handler)
    }

    /// Runs the table over every section under `root`
    ///
    /// # Arguments
    ///
    /// * `record` - The record handlers write into
    /// * `root` - Node whose descendants are searched for sections
    /// * `sections` - Selector locating section nodes
    /// * `heading` - Selector locating heading nodes inside a section
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Every matched handler succeeded
    /// * `Err(ParseError)` - A selector was invalid or a handler failed
    pub fn dispatch(
        &self,
        record: &mut R,
        root: ElementRef<'_>,
        sections: &str,
        heading: &str,
    ) -> ParseResult<()> {
        for section in find(root, sections)? {
            for node in find(section, heading)? {
                let label = text(node);
                let label = label.trim();

                if let Some(handler) = self.handler(label) {
                    handler(record, section)?;
                    break;
                }

                tracing::trace!("No handler registered for label '{}'", label);
            }
        }

        Ok(())
    }
}
