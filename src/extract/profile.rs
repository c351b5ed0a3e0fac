//! Profile page extraction
//!
//! A profile page carries the person's name and portrait in its header, a
//! story region with the biography, and a sidebar of labelled sections. The
//! sidebar is read through two nested dispatch tables:
//!
//! | Sidebar heading                 | Handler                           |
//! |---------------------------------|-----------------------------------|
//! | `Areas of focus`                | nested table over `.areaOfFocus`  |
//! | `Contact information`           | positional contact lookups        |
//! | `Education`                     | paragraph list                    |
//! | `Admissions and qualifications` | paragraph list                    |

use crate::document::{attr_or, find, first, inner_html, last, text, text_or_empty, Document};
use crate::extract::dispatch::DispatchTable;
use crate::extract::types::{ContactBlock, Link, Profile};
use crate::ParseResult;
use scraper::ElementRef;
use std::collections::BTreeMap;

/// Role marker appended to partner names in the page header
const ROLE_SUFFIX: &str = "Partner";

/// Relative prefix the vcard link carries on the template
const PARENT_DIR: &str = "..";

/// Parses a profile page into a `Profile`
///
/// # Arguments
///
/// * `raw` - The raw page bytes
///
/// # Returns
///
/// * `Ok(Profile)` - The extracted record; fields missing from the page are empty
/// * `Err(ParseError)` - The input is not a usable document
///
/// # Example
///
/// ```
/// use sumi_harvest::parse_profile;
///
/// let html = br#"<html><body><h1 id="top">Jane Doe Partner</h1></body></html>"#;
/// let profile = parse_profile(html).unwrap();
/// assert_eq!(profile.name, "Jane Doe");
/// ```
pub fn parse_profile(raw: &[u8]) -> ParseResult<Profile> {
    let document = Document::parse(raw)?;
    let body = document.body()?;
    let mut profile = Profile::default();

    parse_summary(&mut profile, body)?;
    parse_header(&mut profile, body)?;
    parse_sidebar(&mut profile, body)?;

    Ok(profile)
}

/// Strips a trailing role marker from a header name
///
/// ```
/// use sumi_harvest::extract::strip_role_suffix;
///
/// assert_eq!(strip_role_suffix("  Jane Doe Partner "), "Jane Doe");
/// assert_eq!(strip_role_suffix("Jane Doe"), "Jane Doe");
/// ```
pub fn strip_role_suffix(name: &str) -> String {
    let name = name.trim();
    match name.strip_suffix(ROLE_SUFFIX) {
        Some(stripped) => stripped.trim().to_string(),
        None => name.to_string(),
    }
}

fn parse_summary(profile: &mut Profile, body: ElementRef<'_>) -> ParseResult<()> {
    if let Some(story) = first(body, ".view-stories")? {
        profile.summary = text(story).trim().to_string();
        profile.summary_raw = inner_html(story).trim().to_string();
    }
    Ok(())
}

fn parse_header(profile: &mut Profile, body: ElementRef<'_>) -> ParseResult<()> {
    profile.image = attr_or(first(body, ".carousel-img img")?, "src", "");
    profile.name = strip_role_suffix(&text_or_empty(first(body, "h1#top")?));
    Ok(())
}

fn parse_sidebar(profile: &mut Profile, body: ElementRef<'_>) -> ParseResult<()> {
    DispatchTable::<Profile>::new()
        .on("Areas of focus", parse_areas_of_focus)
        .on("Contact information", parse_contact_info)
        .on("Education", parse_education)
        .on("Admissions and qualifications", parse_qualifications)
        .dispatch(profile, body, ".BioLeftControl section", "h4 a")
}

// -- Areas of focus -----------------------------------------------------------

fn parse_areas_of_focus(profile: &mut Profile, section: ElementRef<'_>) -> ParseResult<()> {
    DispatchTable::<Profile>::new()
        .on("Practices", parse_practices)
        .on("Industry sectors", parse_industry_sectors)
        .dispatch(profile, section, ".areaOfFocus", "h5")
}

fn parse_practices(profile: &mut Profile, section: ElementRef<'_>) -> ParseResult<()> {
    collect_links(&mut profile.practices, section)
}

fn parse_industry_sectors(profile: &mut Profile, section: ElementRef<'_>) -> ParseResult<()> {
    collect_links(&mut profile.industry_sectors, section)
}

/// Maps every anchor's text, as written, to its href; later anchors
/// overwrite earlier ones
fn collect_links(into: &mut BTreeMap<String, String>, section: ElementRef<'_>) -> ParseResult<()> {
    for anchor in find(section, "a")? {
        let href = attr_or(Some(anchor), "href", "");
        into.insert(text(anchor), href);
    }
    Ok(())
}

// -- Contact information ------------------------------------------------------

fn parse_contact_info(profile: &mut Profile, section: ElementRef<'_>) -> ParseResult<()> {
    let office = first(section, ".bio-contact a")?;
    let office = Link::non_empty(text_or_empty(office), attr_or(office, "href", ""));

    let linked_in = Link::non_empty(
        String::new(),
        attr_or(last(section, ".social-links")?, "href", ""),
    );

    let vcard = attr_or(first(section, ".vcard .social-links")?, "href", "");
    let vcard = match vcard.strip_prefix(PARENT_DIR) {
        Some(stripped) => stripped.to_string(),
        None => vcard,
    };

    profile.contact_info = Some(ContactBlock {
        office,
        email: text_or_empty(first(section, ".pemail a")?),
        phone: text_or_empty(first(section, ".left_assign")?),
        country: String::new(),
        linked_in,
        vcard: Link::non_empty(String::new(), vcard),
        timezone: attr_or(first(section, ".timezone input")?, "value", ""),
    });

    Ok(())
}

// -- Education and qualifications ---------------------------------------------

fn parse_education(profile: &mut Profile, section: ElementRef<'_>) -> ParseResult<()> {
    profile.education = paragraphs(section)?;
    Ok(())
}

fn parse_qualifications(profile: &mut Profile, section: ElementRef<'_>) -> ParseResult<()> {
    profile.qualifications = paragraphs(section)?;
    Ok(())
}

fn paragraphs(section: ElementRef<'_>) -> ParseResult<Vec<String>> {
    Ok(find(section, "p")?.into_iter().map(text).collect())
}
