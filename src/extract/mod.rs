//! Record extraction
//!
//! This module turns raw HTML into typed records:
//! - `parse_profile` builds a nested `Profile` from a person's page
//! - `parse_results` builds a flat list of `SearchResult` rows
//!
//! Both are pure functions of their input. Label-driven sections are read
//! through `DispatchTable`.

pub mod dispatch;
mod profile;
mod results;
mod types;

pub use dispatch::{DispatchTable, Handler};
pub use profile::{parse_profile, strip_role_suffix};
pub use results::parse_results;
pub use types::{ContactBlock, Link, Profile, SearchResult};
