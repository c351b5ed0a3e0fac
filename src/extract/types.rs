use serde::Serialize;
use std::collections::BTreeMap;

/// An anchor's visible text and target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Link {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
}

impl Link {
    /// Builds a link, returning `None` when both parts are empty
    pub fn non_empty(label: String, href: String) -> Option<Self> {
        if label.is_empty() && href.is_empty() {
            None
        } else {
            Some(Self { label, href })
        }
    }
}

/// Contact details from a profile's sidebar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office: Option<Link>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,

    #[serde(rename = "linked-in", skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcard: Option<Link>,

    #[serde(rename = "tz", skip_serializing_if = "String::is_empty")]
    pub timezone: String,
}

/// A person's profile page rendered as a record
///
/// `summary` and `summary_raw` always come from the same story region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Profile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub practices: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub industry_sectors: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactBlock>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary_raw: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub qualifications: Vec<String>,
}

/// One row of a search results table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Free-text classification, e.g. "Partner"
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// Relative or absolute link to the result's page
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}
